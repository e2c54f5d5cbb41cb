use std::collections::HashMap;

use actix_session::Session;
use actix_web::{get, web, Responder};

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(check_auth)
        .service(oauth_login)
        .service(oauth_callback);
}

#[get("/check_auth")]
async fn check_auth(
    data: web::Data<crate::routes::app_state::AppState>,
    session: Session,
) -> impl Responder {
    crate::handlers::oauth_handler::check_auth(data, session).await
}

#[get("/auth/google")]
async fn oauth_login(session: Session) -> impl Responder {
    crate::handlers::oauth_handler::oauth_login(session).await
}

#[get("/auth/google/callback")]
async fn oauth_callback(
    data: web::Data<crate::routes::app_state::AppState>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    crate::handlers::oauth_handler::oauth_callback(data, session, query).await
}
