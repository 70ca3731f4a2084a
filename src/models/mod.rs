pub mod email_request;
pub mod gemini;
