pub mod app_state;
pub mod chat_routes;
pub mod gmail_routes;
pub mod oauth_routes;
