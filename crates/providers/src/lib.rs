//! Generative-text provider implementations for TaskChat.
//!
//! All providers implement the `taskchat_core::Provider` trait.
//! The router selects the correct provider based on configuration.

pub mod gemini;
pub mod router;

pub use gemini::GeminiProvider;
pub use router::ProviderRouter;
