pub mod app_state;
pub mod email_routes;
