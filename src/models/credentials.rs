use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The OAuth credential bundle captured at the Google callback. Everything
/// the Gmail API needs to act on the user's behalf, held in memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
