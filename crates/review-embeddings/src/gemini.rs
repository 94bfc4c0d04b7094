//! Gemini `embedContent` embedder.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

/// Public Gemini API endpoint
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini embedder.
#[derive(Debug, Clone)]
pub struct GeminiEmbedderConfig {
    /// API base URL (e.g., "https://generativelanguage.googleapis.com/v1beta")
    pub base_url: String,

    /// Model resource name (e.g., "models/embedding-001")
    pub model: String,

    /// API key
    pub api_key: SecretString,

    /// Expected embedding dimension
    pub dimension: usize,

    /// Request timeout
    pub timeout: Duration,
}

impl GeminiEmbedderConfig {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
            api_key,
            dimension: 768,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model resource name, always with the `models/` prefix.
    fn model_resource(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    task_type: &'static str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Hosted embedder backed by the Gemini API.
pub struct GeminiEmbedder {
    client: Client,
    config: GeminiEmbedderConfig,
    info: ModelInfo,
}

impl GeminiEmbedder {
    pub fn new(config: GeminiEmbedderConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::Config(e.to_string()))?;

        let info = ModelInfo {
            name: config.model_resource(),
            dimension: config.dimension,
        };

        Ok(Self {
            client,
            config,
            info,
        })
    }
}

#[async_trait]
impl EmbeddingModel for GeminiEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("empty text".to_string()));
        }

        let model = self.config.model_resource();
        let request = EmbedContentRequest {
            model: &model,
            content: Content {
                parts: vec![Part { text }],
            },
            task_type: "RETRIEVAL_DOCUMENT",
        };

        let url = format!("{}/{}:embedContent", self.config.base_url, model);
        debug!(model = %model, chars = text.len(), "Requesting embedding");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Request(e.to_string()))?;

        if response.status() == 429 {
            return Err(EmbeddingError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api { status, body });
        }

        let body: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Parse(e.to_string()))?;

        if body.embedding.values.len() != self.config.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimension,
                actual: body.embedding.values.len(),
            });
        }

        Ok(Embedding::new(body.embedding.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn embedder(server: &MockServer, dimension: usize) -> GeminiEmbedder {
        let config = GeminiEmbedderConfig::new(
            SecretString::from("test-key".to_string()),
            "embedding-001",
        )
        .with_base_url(server.uri())
        .with_dimension(dimension);
        GeminiEmbedder::new(config).unwrap()
    }

    #[test]
    fn test_model_resource_prefix() {
        let config = GeminiEmbedderConfig::new(SecretString::from("k".to_string()), "embedding-001");
        assert_eq!(config.model_resource(), "models/embedding-001");

        let config =
            GeminiEmbedderConfig::new(SecretString::from("k".to_string()), "models/embedding-001");
        assert_eq!(config.model_resource(), "models/embedding-001");
    }

    #[tokio::test]
    async fn test_embed_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/embedding-001:embedContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "embedding": { "values": [3.0, 4.0] } })),
            )
            .mount(&server)
            .await;

        let emb = embedder(&server, 2).embed("hello").await.unwrap();
        assert!((emb.values[0] - 0.6).abs() < 0.001);
        assert!((emb.values[1] - 0.8).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_embed_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = embedder(&server, 2).embed("hello").await;
        assert!(matches!(result, Err(EmbeddingError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_embed_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = embedder(&server, 2).embed("hello").await;
        assert!(matches!(result, Err(EmbeddingError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_embed_wrong_dimension() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "embedding": { "values": [1.0, 0.0, 0.0] } })),
            )
            .mount(&server)
            .await;

        let result = embedder(&server, 2).embed("hello").await;
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_embed_empty_text_rejected() {
        let server = MockServer::start().await;
        let result = embedder(&server, 2).embed("   ").await;
        assert!(matches!(result, Err(EmbeddingError::InvalidInput(_))));
    }
}
