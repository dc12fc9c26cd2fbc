//! Google Gemini provider implementation.
//!
//! Uses the `generateContent` endpoint of the Generative Language API:
//! - API key passed as a `key` query parameter
//! - Request body carries `contents` with role/parts blocks
//! - Response text lives in `candidates[0].content.parts[*].text`
//!
//! One blocking request per call: no retry, no streaming, no tool use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskchat_core::error::ProviderError;
use taskchat_core::provider::{GenerationRequest, GenerationResponse, Provider, Usage};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Google Gemini `generateContent` provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }

    /// Build the request body for a single-prompt generation call.
    fn to_api_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request
                    .max_output_tokens
                    .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            },
        }
    }

    /// Convert a Gemini API response to our GenerationResponse.
    fn to_generation_response(
        resp: GeminiResponse,
        requested_model: &str,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let candidate = resp.candidates.into_iter().next().ok_or_else(|| {
            ProviderError::EmptyResponse("response contained no candidates".into())
        })?;

        let text = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<String>();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(
                "candidate contained no text parts".into(),
            ));
        }

        let usage = resp.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(GenerationResponse {
            text,
            model: resp
                .model_version
                .unwrap_or_else(|| requested_model.to_string()),
            usage,
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError> {
        let url = self.generate_url(&request.model);
        let body = Self::to_api_request(&request);

        debug!(provider = "gemini", model = %request.model, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Gemini API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Gemini response: {e}"),
            })?;

        Self::to_generation_response(api_resp, &request.model)
    }

    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        // Known generateContent-capable models; the live listing endpoint is
        // not needed for a single-model chat flow.
        Ok(vec![
            "gemini-2.0-flash".into(),
            "gemini-2.0-flash-lite".into(),
            "gemini-2.5-flash".into(),
            "gemini-2.5-pro".into(),
        ])
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        // Minimal 1-token probe to verify the API key and reachability.
        let request = GenerationRequest {
            model: "gemini-2.0-flash".into(),
            prompt: "hi".into(),
            temperature: 0.0,
            max_output_tokens: Some(1),
        };
        let url = self.generate_url(&request.model);
        let body = Self::to_api_request(&request);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        // 200 = works, 401/403 = bad key, anything else = reachable but error
        let status = response.status().as_u16();
        Ok(response.status().is_success() || (status != 401 && status != 403))
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default = "default_role")]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

fn default_role() -> String {
    "model".into()
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,

    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<UsageMetadata>,

    #[serde(rename = "modelVersion", default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,

    #[serde(rename = "finishReason", default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: u32,
}
