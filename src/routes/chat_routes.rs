use actix_session::Session;
use actix_web::{post, web, Responder};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(chat);
}

#[post("/api/chat")]
async fn chat(
    data: web::Data<crate::routes::app_state::AppState>,
    session: Session,
    req_body: web::Json<crate::handlers::chat_handler::ChatRequest>,
) -> impl Responder {
    crate::handlers::chat_handler::handle_chat_request(data, session, req_body).await
}
