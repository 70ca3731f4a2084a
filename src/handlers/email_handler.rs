use actix_web::{web, HttpResponse};
use log::{error, warn};
use serde_json::json;

use crate::models::email_request::EmailRequest;
use crate::routes::app_state::AppState;
use crate::services::gemini_client::GeminiError;

pub async fn handle_generate_request(
    data: web::Data<AppState>,
    req_body: web::Json<EmailRequest>,
) -> HttpResponse {
    let request = req_body.into_inner();

    match data.reply_generator.generate_reply(&request).await {
        Ok(reply) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(reply),
        Err(GeminiError::RateLimited) => {
            warn!("Reply generation rate limited");
            HttpResponse::TooManyRequests()
                .json(json!({ "error": GeminiError::RateLimited.to_string() }))
        }
        Err(e) => {
            error!("Error generating reply: {:?}", e);
            HttpResponse::BadGateway().json(json!({ "error": e.to_string() }))
        }
    }
}
