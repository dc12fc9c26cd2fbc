//! # TaskChat Assistant
//!
//! The submit-response cycle: prompt construction, the gateway call to the
//! remote model, interpretation of its tagged JSON reply, and the per-session
//! chat state (transcript + extracted tasks).

pub mod gateway;
pub mod interpreter;
pub mod prompt;
pub mod session;

pub use gateway::{AssistantGateway, GATEWAY_FALLBACK_JSON};
pub use interpreter::{extracted_task, interpret, strip_code_fences};
pub use session::{ChatSession, TurnOutcome, TurnState, PARSE_FALLBACK_MESSAGE};
