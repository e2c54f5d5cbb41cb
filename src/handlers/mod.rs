pub mod chat_handler;
pub mod oauth_handler;
pub mod send_handler;
pub mod session;
