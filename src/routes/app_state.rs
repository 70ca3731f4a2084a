use crate::services::reply_service::ReplyGenerator;

#[derive(Clone)]
pub struct AppState {
    pub reply_generator: ReplyGenerator,
}
