//! Task domain types — the structured output extracted from chat.
//!
//! A `Task` is created only when the remote model classifies a user message
//! as a complete task. Tasks are never mutated or deleted; the session holds
//! them in memory for its lifetime.

use serde::{Deserialize, Serialize};

/// Task priority as reported by the remote model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// Task category as reported by the remote model.
///
/// The wire contract allows arbitrary category strings; anything outside the
/// known set collapses to `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Personal,
    Health,
    #[default]
    #[serde(other)]
    Other,
}

/// A task extracted from a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Short human-readable name for the task
    #[serde(rename = "taskName")]
    pub name: String,

    /// Due date as an ISO-8601 string, if the model could infer one.
    /// The model controls the format; the system never computes with it.
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default)]
    pub category: TaskCategory,
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{:?}/{:?}]", self.name, self.priority, self.category)?;
        if let Some(due) = &self.due_date {
            write!(f, " due {due}")?;
        }
        Ok(())
    }
}
