use std::sync::Arc;

use actix_cors::Cors;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware::Logger, web, App, HttpServer};

use CourierChatAgent::routes::app_state::AppState;
use CourierChatAgent::services::gmail_service::GmailClient;
use CourierChatAgent::services::llm_service::{ChatModel, OpenRouterClient};
use CourierChatAgent::token_store::TokenStore;
use CourierChatAgent::{config, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    config::init_logging();

    let llm: Option<Arc<dyn ChatModel>> = match config::openrouter_api_key() {
        Some(key) => Some(Arc::new(OpenRouterClient::new(key))),
        None => {
            log::warn!(
                "OPENROUTER_API_KEY is not set; chat requests will be answered with a setup hint"
            );
            None
        }
    };

    let state = AppState {
        llm,
        mailer: Arc::new(GmailClient::new()),
        tokens: TokenStore::new(),
    };

    // cookie sessions key the in-memory token store; both reset on restart
    let session_key = Key::generate();

    let (host, port) = config::bind_addr();
    log::info!("Starting server on http://{}:{}", host, port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(config::FRONTEND_ORIGIN)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(state.clone()))
            .configure(routes::chat_routes::init_routes)
            .configure(routes::oauth_routes::init_routes)
            .configure(routes::gmail_routes::init_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
