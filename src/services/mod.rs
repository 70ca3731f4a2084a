pub mod gemini_client;
pub mod prompt_service;
pub mod reply_service;
