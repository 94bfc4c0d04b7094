//! API-based generator for Gemini and OpenAI-compatible endpoints.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use review_types::ProviderKind;

use super::{GenerationError, ResponseFormat, TextGenerator};

/// Configuration for API-based generation.
#[derive(Debug, Clone)]
pub struct ApiGeneratorConfig {
    /// Which wire protocol to speak
    pub kind: ProviderKind,

    /// API base URL (e.g., "https://generativelanguage.googleapis.com/v1beta")
    pub base_url: String,

    /// Model to use (e.g., "gemini-pro", "gpt-4o-mini")
    pub model: String,

    /// API key
    pub api_key: SecretString,

    /// Request timeout
    pub timeout: Duration,

    /// Ask Gemini for `application/json` output on JSON requests.
    /// Older models reject the option, so it is off unless enabled.
    pub gemini_json_mode: bool,
}

impl ApiGeneratorConfig {
    /// Create config for the Gemini API.
    pub fn gemini(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Gemini,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: model.into(),
            api_key,
            timeout: Duration::from_secs(60),
            gemini_json_mode: false,
        }
    }

    /// Create config for OpenAI (or any compatible endpoint via `with_base_url`).
    pub fn openai(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Openai,
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
            api_key,
            timeout: Duration::from_secs(60),
            gemini_json_mode: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_gemini_json_mode(mut self, enabled: bool) -> Self {
        self.gemini_json_mode = enabled;
        self
    }
}

/// API-based generator implementation.
pub struct ApiGenerator {
    client: Client,
    config: ApiGeneratorConfig,
}

impl ApiGenerator {
    /// Create a new API generator.
    pub fn new(config: ApiGeneratorConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Make Gemini `generateContent` request.
    async fn make_gemini_request(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GeminiRequest<'a> {
            contents: Vec<GeminiContent<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            generation_config: Option<GeminiGenerationConfig>,
        }

        #[derive(Serialize)]
        struct GeminiContent<'a> {
            role: &'static str,
            parts: Vec<GeminiPart<'a>>,
        }

        #[derive(Serialize)]
        struct GeminiPart<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GeminiGenerationConfig {
            response_mime_type: &'static str,
        }

        #[derive(Deserialize)]
        struct GeminiResponse {
            #[serde(default)]
            candidates: Vec<GeminiCandidate>,
        }

        #[derive(Deserialize)]
        struct GeminiCandidate {
            content: Option<GeminiResponseContent>,
        }

        #[derive(Deserialize)]
        struct GeminiResponseContent {
            #[serde(default)]
            parts: Vec<GeminiResponsePart>,
        }

        #[derive(Deserialize)]
        struct GeminiResponsePart {
            #[serde(default)]
            text: String,
        }

        let generation_config = (self.config.gemini_json_mode && format == ResponseFormat::Json)
            .then_some(GeminiGenerationConfig {
                response_mime_type: "application/json",
            });

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config,
        };

        let model = self
            .config
            .model
            .strip_prefix("models/")
            .unwrap_or(&self.config.model);
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        let response_body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(e.to_string()))?;

        let text: String = response_body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        non_empty(text)
    }

    /// Make OpenAI-compatible API request.
    async fn make_openai_request(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            model: &'a str,
            messages: Vec<OpenAIMessage<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            response_format: Option<OpenAIResponseFormat>,
        }

        #[derive(Serialize)]
        struct OpenAIMessage<'a> {
            role: &'static str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct OpenAIResponseFormat {
            #[serde(rename = "type")]
            format_type: &'static str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            choices: Vec<OpenAIChoice>,
        }

        #[derive(Deserialize)]
        struct OpenAIChoice {
            message: OpenAIMessageResponse,
        }

        #[derive(Deserialize)]
        struct OpenAIMessageResponse {
            #[serde(default)]
            content: Option<String>,
        }

        let request = OpenAIRequest {
            model: &self.config.model,
            messages: vec![OpenAIMessage {
                role: "user",
                content: prompt,
            }],
            response_format: (format == ResponseFormat::Json).then_some(OpenAIResponseFormat {
                format_type: "json_object",
            }),
        };

        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response).await?;

        let response_body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ParseError(e.to_string()))?;

        let text = response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        non_empty(text)
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::ApiError(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenerationError> {
    if response.status() == 429 {
        return Err(GenerationError::RateLimitExceeded);
    }

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError::ApiError(format!(
            "HTTP {}: {}",
            status, body
        )));
    }

    Ok(response)
}

fn non_empty(text: String) -> Result<String, GenerationError> {
    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for ApiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError> {
        debug!(
            provider = ?self.config.kind,
            model = %self.config.model,
            ?format,
            "Calling generation API"
        );

        match self.config.kind {
            ProviderKind::Gemini => self.make_gemini_request(prompt, format).await,
            ProviderKind::Openai => self.make_openai_request(prompt, format).await,
        }
    }
}
