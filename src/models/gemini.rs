//! Request payload for the Gemini `generateContent` endpoint.
//!
//! Responses are deliberately not modelled here; they are read as untyped
//! JSON by `reply_service::extract_response_content`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// A request with one content holding one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt.into() }],
            }],
        }
    }
}
