//! The tagged reply contract returned by the remote model.
//!
//! This is a transient parse target, not a stored entity: the interpreter
//! decodes the model's text into an `AssistantReply`, the session consumes it,
//! and only the reply text (and possibly a task) survive as domain state.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// The remote model's classification of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// A complete task was extracted
    Task,
    /// The message looks like a task but essential details are missing
    IncompleteTask,
    /// Ordinary conversation
    Chat,
}

/// The structured reply the remote model is instructed to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Classification of the user message
    pub intent: Intent,

    /// Human-readable reply text, always present — even for task replies
    pub response: String,

    /// The extracted task payload, present only for task-bearing replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}
