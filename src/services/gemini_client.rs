use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::{self, GeminiConfig};
use crate::models::gemini::GenerateContentRequest;

pub const RATE_LIMITED_MESSAGE: &str = "AI service is busy. Please try again shortly.";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Stripped of its URL, which carries the API key.
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Something that can turn a generateContent payload into a raw response body.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError>;
}

/// Calls the Gemini REST API with an API key passed as a query parameter.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let base_url = Url::parse(&config.host).map_err(|e| {
            GeminiError::InvalidConfig(format!("Invalid base URL {:?}: {}", config.host, e))
        })?;
        let endpoint = base_url
            .join(&config::generate_content_path())
            .map_err(|e| {
                GeminiError::InvalidConfig(format!("Failed to construct endpoint URL: {}", e))
            })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GeminiError::transport)?;

        Ok(GeminiClient {
            client,
            endpoint,
            api_key: config.api_key.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl GeminiError {
    fn transport(error: reqwest::Error) -> Self {
        GeminiError::Transport(error.without_url())
    }
}

#[async_trait]
impl GenerateContent for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(GeminiError::transport)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Gemini rate limit hit");
            return Err(GeminiError::RateLimited);
        }

        let body = response.text().await.map_err(GeminiError::transport)?;
        if !status.is_success() {
            debug!("Gemini request failed with status {}: {}", status, body);
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Received {} bytes from Gemini", body.len());
        Ok(body)
    }
}
