//! Response interpreter — decodes the remote model's text into a tagged reply.
//!
//! The model is instructed to answer with bare JSON but routinely wraps it in
//! Markdown code fences. Stripping is a plain substring removal so fenced and
//! unfenced payloads parse identically; the operation is idempotent.

use taskchat_core::error::ParseError;
use taskchat_core::reply::{AssistantReply, Intent};
use taskchat_core::task::Task;

/// Remove all literal code-fence markers and trim surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the raw model output as an `AssistantReply`.
///
/// Callers substitute a local fallback message on error; this function never
/// retries and never panics.
pub fn interpret(raw: &str) -> Result<AssistantReply, ParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }

    serde_json::from_str(&cleaned).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            ParseError::InvalidJson(e.to_string())
        } else {
            ParseError::SchemaMismatch(e.to_string())
        }
    })
}

/// The task to append, if any.
///
/// Only a reply with intent exactly `task` AND a payload yields a task;
/// `incomplete_task` and `chat` never do, even if a payload is present.
pub fn extracted_task(reply: &AssistantReply) -> Option<&Task> {
    match reply.intent {
        Intent::Task => reply.task.as_ref(),
        Intent::IncompleteTask | Intent::Chat => None,
    }
}
