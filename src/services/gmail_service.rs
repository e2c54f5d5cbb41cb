use std::time::Instant;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use log::{error, info};
use serde_json::{json, Value};

use crate::config;
use crate::models::credentials::StoredCredentials;
use crate::models::email::EmailDraft;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("user not authenticated")]
    NotAuthenticated,

    #[error("gmail request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gmail API returned {status}: {body}")]
    Api { status: reqwest::StatusCode, body: String },

    #[error("gmail response did not contain a message id")]
    MissingId,
}

/// The email-sending collaborator. Returns the provider-assigned message id.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(
        &self,
        credentials: &StoredCredentials,
        draft: &EmailDraft,
    ) -> Result<String, SendError>;
}

/// Sends mail through the Gmail REST API with a stored bearer token.
pub struct GmailClient {
    client: reqwest::Client,
    send_url: String,
}

impl GmailClient {
    pub fn new() -> Self {
        GmailClient {
            client: reqwest::Client::new(),
            send_url: config::GMAIL_SEND_URL.to_string(),
        }
    }

    pub fn with_send_url(mut self, url: impl Into<String>) -> Self {
        self.send_url = url.into();
        self
    }
}

impl Default for GmailClient {
    fn default() -> Self {
        GmailClient::new()
    }
}

/// Builds the base64url-encoded RFC 822 message the Gmail API takes as `raw`.
fn encode_message(draft: &EmailDraft) -> String {
    let mime = format!(
        "To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=\"UTF-8\"\r\n\r\n{}",
        draft.to, draft.subject, draft.body
    );
    URL_SAFE.encode(mime.as_bytes())
}

#[async_trait]
impl MailSender for GmailClient {
    async fn send(
        &self,
        credentials: &StoredCredentials,
        draft: &EmailDraft,
    ) -> Result<String, SendError> {
        let started = Instant::now();
        info!("Sending email to {} | {}", draft.to, draft.subject);

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&credentials.access_token)
            .json(&json!({ "raw": encode_message(draft) }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Gmail send failed with status {}", status);
            return Err(SendError::Api { status, body });
        }

        let sent: Value = response.json().await?;
        let id = sent
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or(SendError::MissingId)?;

        info!(
            "Email sent (id {}) in {} ms",
            id,
            started.elapsed().as_millis()
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_plain_text_rfc822_message() {
        let draft = EmailDraft {
            to: "bob@example.com".to_string(),
            subject: "Hi".to_string(),
            body: "Let's meet".to_string(),
        };
        let decoded =
            String::from_utf8(URL_SAFE.decode(encode_message(&draft)).unwrap()).unwrap();
        assert!(decoded.starts_with("To: bob@example.com\r\n"));
        assert!(decoded.contains("Subject: Hi\r\n"));
        assert!(decoded.ends_with("\r\n\r\nLet's meet"));
    }
}
