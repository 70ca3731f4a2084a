use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::models::email_request::EmailRequest;
use crate::models::gemini::GenerateContentRequest;
use crate::services::gemini_client::{GeminiError, GenerateContent};
use crate::services::prompt_service::build_prompt;

pub const NO_RESPONSE: &str = "No response generated.";
pub const PROCESSING_ERROR: &str = "Error processing response.";

/// Generates email replies through a content-generation backend.
#[derive(Clone)]
pub struct ReplyGenerator {
    backend: Arc<dyn GenerateContent>,
}

impl ReplyGenerator {
    pub fn new(backend: Arc<dyn GenerateContent>) -> Self {
        ReplyGenerator { backend }
    }

    /// Returns the generated reply, or a placeholder when the response cannot be read.
    ///
    /// Rate limiting and transport failures are returned as errors.
    pub async fn generate_reply(&self, request: &EmailRequest) -> Result<String, GeminiError> {
        info!(
            "Generating reply (tone: {}, {} chars of email)",
            request.tone().unwrap_or("none"),
            request.email_content.chars().count()
        );

        let payload = GenerateContentRequest::from_prompt(build_prompt(request));
        let raw = self.backend.generate_content(&payload).await?;
        Ok(extract_response_content(&raw))
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a raw response body.
pub fn extract_response_content(raw: &str) -> String {
    let root: Value = match serde_json::from_str(raw) {
        Ok(root) => root,
        Err(e) => {
            warn!("Response is not valid JSON: {}", e);
            return PROCESSING_ERROR.to_string();
        }
    };

    let candidates = match root.get("candidates").and_then(Value::as_array) {
        Some(candidates) if !candidates.is_empty() => candidates,
        _ => {
            warn!("Response contained no candidates");
            return NO_RESPONSE.to_string();
        }
    };

    match candidates[0]
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
    {
        Some(text) => text.to_string(),
        None => {
            warn!("First candidate has no text part");
            PROCESSING_ERROR.to_string()
        }
    }
}
