use actix_web::{error, post, web, HttpResponse, Responder};
use log::warn;
use serde_json::json;

use crate::models::email_request::EmailRequest;
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(generate_reply);
}

// Reject unreadable bodies with the same JSON error shape the handlers use.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected email request body: {}", err);
        let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        error::InternalError::from_response(err, response).into()
    })
}

#[post("/api/email/generate")]
async fn generate_reply(
    data: web::Data<AppState>,
    req_body: web::Json<EmailRequest>,
) -> impl Responder {
    crate::handlers::email_handler::handle_generate_request(data, req_body).await
}
