//! Prompt construction for the assistant gateway.
//!
//! The entire instruction to the remote model is one rendered string: the
//! prior transcript as labeled lines, the new utterance, the current
//! date-time, and a literal description of the required JSON reply shape.

use chrono::{DateTime, SecondsFormat, Utc};
use taskchat_core::message::{Message, Role};

/// Render a transcript as alternating labeled lines in chronological order.
pub fn render_transcript(messages: &[Message]) -> String {
    let mut out = String::new();
    for msg in messages {
        let label = match msg.role {
            Role::User => "User",
            Role::Assistant => "AI",
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&msg.content);
        out.push('\n');
    }
    out
}

/// Build the full instruction prompt for one user turn.
///
/// `prior` is the transcript before this submission; the new utterance gets
/// its own slot. Deterministic given `now`, which should capture the moment
/// of the call.
pub fn build_prompt(prior: &[Message], user_text: &str, now: DateTime<Utc>) -> String {
    let transcript = render_transcript(prior);
    let now_iso = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    format!(
        r#"You are a helpful personal assistant that manages tasks and chats with the user.
The current date and time is {now_iso}.

Conversation so far:
{transcript}
New user message: {user_text}

Classify the new user message and respond with ONLY a JSON object, no other text:

{{
  "intent": "task" | "incomplete_task" | "chat",
  "response": "<string>",
  "task": {{
    "taskName": "<string>",
    "dueDate": "<ISO-8601 date-time>" or null,
    "priority": "low" | "normal" | "high",
    "category": "work" | "personal" | "health" | "other"
  }}
}}

Decision rules:
- Use intent "task" when the message describes a task and you can determine the essential details. Include the "task" object. Fill missing non-essential fields with your best defaults (priority "normal", category by topic, dueDate null when no date is implied).
- Use intent "incomplete_task" when the message describes a task but an essential detail is missing; ask for it in "response" and omit the "task" object.
- Use intent "chat" for ordinary conversation; omit the "task" object.
- Resolve relative dates ("tomorrow", "next week") against the current date-time above and express dueDate in ISO-8601.
- ALWAYS fill "response" with a short, friendly reply for the user, even when the intent is "task"."#
    )
}
