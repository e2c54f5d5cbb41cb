use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::credentials::StoredCredentials;

/// In-memory credential store, keyed by session id. Written by the OAuth
/// callback and read by the email send paths. Cloning shares the underlying
/// map, so one instance in the app state serves every worker.
#[derive(Clone, Default)]
pub struct TokenStore {
    credentials: Arc<Mutex<HashMap<String, StoredCredentials>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore::default()
    }

    pub fn insert(&self, session_id: String, credentials: StoredCredentials) {
        let mut map = self.credentials.lock().unwrap();
        map.insert(session_id, credentials);
    }

    pub fn get(&self, session_id: &str) -> Option<StoredCredentials> {
        let map = self.credentials.lock().unwrap();
        map.get(session_id).cloned()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        let map = self.credentials.lock().unwrap();
        map.contains_key(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> StoredCredentials {
        StoredCredentials {
            access_token: "token".to_string(),
            refresh_token: None,
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            scopes: vec![],
            expires_at: None,
        }
    }

    #[test]
    fn stores_and_returns_credentials_per_session() {
        let store = TokenStore::new();
        assert!(!store.contains("a"));
        assert!(store.get("a").is_none());

        store.insert("a".to_string(), credentials());
        assert!(store.contains("a"));
        assert_eq!(store.get("a").unwrap().access_token, "token");
        assert!(!store.contains("b"));
    }

    #[test]
    fn clones_share_the_same_map() {
        let store = TokenStore::new();
        let view = store.clone();
        store.insert("a".to_string(), credentials());
        assert!(view.contains("a"));
    }
}
