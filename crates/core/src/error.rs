//! Error types for the TaskChat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all TaskChat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Channel errors ---
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    // --- Response interpretation errors ---
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider returned no candidates: {0}")]
    EmptyResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Message delivery failed on {channel}: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    #[error("Channel connection lost: {0}")]
    ConnectionLost(String),
}

/// Failure to interpret the remote model's text as a tagged reply.
///
/// Callers are expected to substitute a local fallback message rather than
/// crash or retry.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Response text is empty after stripping code fences")]
    Empty,

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Response JSON does not match the tagged reply shape: {0}")]
    SchemaMismatch(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A turn is already in flight; wait for it to complete")]
    TurnInFlight,
}
