//! Assistant gateway — the single outbound call per user turn.
//!
//! Stateless given its inputs: renders the prompt, makes one generation call,
//! and hands back the raw text. Remote failures are absorbed here by
//! substituting a fixed fallback blob that downstream parsing accepts as an
//! ordinary chat reply; they are never surfaced to the session.

use std::sync::Arc;

use chrono::Utc;
use taskchat_core::message::Message;
use taskchat_core::provider::{GenerationRequest, Provider};
use tracing::{debug, warn};

use crate::prompt::build_prompt;

/// The fixed text returned when the remote call fails for any reason.
/// Parses as a chat reply with a generic apology.
pub const GATEWAY_FALLBACK_JSON: &str =
    r#"{"intent":"chat","response":"Sorry, I encountered an error. Please try again."}"#;

/// Forwards one user turn to the remote model.
pub struct AssistantGateway {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_output_tokens: Option<u32>,
}

impl AssistantGateway {
    /// Create a new gateway over the given provider.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_output_tokens: None,
        }
    }

    /// Set the maximum output tokens per generation.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the remote model about one new user utterance, given the prior
    /// transcript.
    ///
    /// One blocking request, no retry, no streaming. Any provider failure
    /// yields `GATEWAY_FALLBACK_JSON` instead of an error.
    pub async fn ask(&self, prior: &[Message], user_text: &str) -> String {
        let prompt = build_prompt(prior, user_text, Utc::now());

        let request = GenerationRequest {
            model: self.model.clone(),
            prompt,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        match self.provider.generate(request).await {
            Ok(response) => {
                debug!(
                    provider = self.provider.name(),
                    model = %response.model,
                    chars = response.text.len(),
                    "Received generation response"
                );
                response.text
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "Remote call failed, substituting fallback reply");
                GATEWAY_FALLBACK_JSON.to_string()
            }
        }
    }
}
