//! # TaskChat Core
//!
//! Domain types, traits, and error definitions for the TaskChat assistant.
//! This crate has **zero framework dependencies** — it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The provider and channel abstractions are traits here; implementations live
//! in their respective crates. This enables:
//! - Swapping the remote model backend via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod channel;
pub mod error;
pub mod message;
pub mod provider;
pub mod reply;
pub mod task;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelId, ChannelMessage};
pub use error::{ChannelError, Error, ParseError, ProviderError, Result, SessionError};
pub use message::{Conversation, ConversationId, Message, Role};
pub use provider::{GenerationRequest, GenerationResponse, Provider, Usage};
pub use reply::{AssistantReply, Intent};
pub use task::{Task, TaskCategory, TaskPriority};
