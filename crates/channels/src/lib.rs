//! Chat surface implementations for TaskChat.
//!
//! All surfaces implement the `taskchat_core::Channel` trait. The only
//! shipping surface is the interactive terminal.

pub mod cli;

pub use cli::CliChannel;
