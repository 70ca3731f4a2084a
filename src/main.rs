use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;

use email_reply_generator::config::{self, AppConfig};
use email_reply_generator::routes::app_state::AppState;
use email_reply_generator::routes::email_routes;
use email_reply_generator::services::gemini_client::GeminiClient;
use email_reply_generator::services::reply_service::ReplyGenerator;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    config::init_logging();

    let app_config = AppConfig::from_env().context("Failed to load configuration")?;
    info!("Using Gemini host {} (model {})", app_config.gemini.host, config::MODEL_NAME);

    let client = GeminiClient::new(&app_config.gemini).context("Failed to build Gemini client")?;
    let state = web::Data::new(AppState {
        reply_generator: ReplyGenerator::new(Arc::new(client)),
    });

    let server = &app_config.server;
    info!("Starting server on http://{}:{}", server.host, server.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(email_routes::init_routes)
    })
    .bind((server.host.as_str(), server.port))
    .with_context(|| format!("Failed to bind {}:{}", server.host, server.port))?
    .run()
    .await?;

    Ok(())
}
