use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use log::{error, info};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde_json::json;

use crate::config;
use crate::handlers::session::ensure_session_id;
use crate::models::credentials::StoredCredentials;
use crate::routes::app_state::AppState;

/// Constructs the OAuth2 client from the Google environment configuration.
fn build_oauth_client() -> Result<BasicClient> {
    let client_id = config::google_client_id().context("GOOGLE_CLIENT_ID is not set")?;
    let client_secret = config::google_client_secret().context("GOOGLE_CLIENT_SECRET is not set")?;
    let redirect_uri = config::google_redirect_uri().context("GOOGLE_REDIRECT_URI is not set")?;

    let auth_url = AuthUrl::new(config::GOOGLE_AUTH_URL.to_string())
        .context("Invalid authorization endpoint URL")?;
    let token_url =
        TokenUrl::new(config::GOOGLE_TOKEN_URL.to_string()).context("Invalid token endpoint URL")?;

    Ok(
        BasicClient::new(
            ClientId::new(client_id),
            Some(ClientSecret::new(client_secret)),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(RedirectUrl::new(redirect_uri).context("Invalid redirect URL")?),
    )
}

/// Initiates the OAuth flow by redirecting the browser to Google.
pub async fn oauth_login(session: Session) -> HttpResponse {
    // touch the session so the cookie survives the round trip to Google and
    // the callback lands on the same id
    let session_id = ensure_session_id(&session);
    info!("Starting Google OAuth flow for session {}", session_id);

    let oauth_client = match build_oauth_client() {
        Ok(client) => client,
        Err(e) => {
            error!("OAuth configuration error: {:#}", e);
            return HttpResponse::Ok()
                .json(json!({ "error": "Missing Google OAuth environment variables." }));
        }
    };

    let (auth_url, _csrf_token) = oauth_client
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new(config::GMAIL_SEND_SCOPE.to_string()))
        .add_extra_param("access_type", "offline")
        .add_extra_param("prompt", "consent")
        .add_extra_param("include_granted_scopes", "true")
        .url();

    HttpResponse::Found()
        .append_header(("Location", auth_url.to_string()))
        .finish()
}

/// Handles the redirect back from Google: exchanges the code for a token and
/// stores the credential bundle under the caller's session id.
pub async fn oauth_callback(
    data: web::Data<AppState>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let code = match query.get("code") {
        Some(code) => code.clone(),
        None => return HttpResponse::BadRequest().body("Missing code"),
    };

    let oauth_client = match build_oauth_client() {
        Ok(client) => client,
        Err(e) => {
            error!("OAuth configuration error: {:#}", e);
            return HttpResponse::Ok()
                .json(json!({ "error": "Missing Google OAuth environment variables." }));
        }
    };

    let token_result = oauth_client
        .exchange_code(AuthorizationCode::new(code))
        .request_async(async_http_client)
        .await;

    match token_result {
        Ok(token) => {
            let session_id = ensure_session_id(&session);
            let credentials = StoredCredentials {
                access_token: token.access_token().secret().clone(),
                refresh_token: token.refresh_token().map(|t| t.secret().clone()),
                token_uri: config::GOOGLE_TOKEN_URL.to_string(),
                client_id: config::google_client_id().unwrap_or_default(),
                client_secret: config::google_client_secret().unwrap_or_default(),
                scopes: token
                    .scopes()
                    .map(|scopes| scopes.iter().map(|s| s.as_str().to_owned()).collect())
                    .unwrap_or_default(),
                expires_at: token
                    .expires_in()
                    .and_then(|d| Duration::from_std(d).ok())
                    .map(|d| Utc::now() + d),
            };
            data.tokens.insert(session_id.clone(), credentials);
            info!("Gmail connected for session {}", session_id);
            HttpResponse::Ok().json(json!({ "message": "Gmail connected successfully." }))
        }
        Err(err) => {
            error!("Token exchange error: {:?}", err);
            HttpResponse::InternalServerError().body(format!("Token exchange error: {:?}", err))
        }
    }
}

/// Reports whether the caller's session has a stored credential bundle.
pub async fn check_auth(data: web::Data<AppState>, session: Session) -> HttpResponse {
    let session_id = ensure_session_id(&session);
    let authenticated = data.tokens.contains(&session_id);
    HttpResponse::Ok().json(json!({ "authenticated": authenticated }))
}
