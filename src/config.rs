use std::env;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant that can also send emails when asked. \
If the user provides an email request, extract the recipient (to), subject, and body. \
You do not need to explain how to send the email manually.";

pub const DEFAULT_MODEL: &str = "mistralai/mistral-small-3.1-24b-instruct:free";

pub const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";
pub const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Origin of the local React frontend admitted through CORS.
pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

const BIND_HOST: &str = "127.0.0.1";
const BIND_PORT: u16 = 8080;

pub fn bind_addr() -> (&'static str, u16) {
    (BIND_HOST, BIND_PORT)
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn openrouter_api_key() -> Option<String> {
    non_empty_env("OPENROUTER_API_KEY")
}

pub fn google_client_id() -> Option<String> {
    non_empty_env("GOOGLE_CLIENT_ID")
}

pub fn google_client_secret() -> Option<String> {
    non_empty_env("GOOGLE_CLIENT_SECRET")
}

pub fn google_redirect_uri() -> Option<String> {
    non_empty_env("GOOGLE_REDIRECT_URI")
}
