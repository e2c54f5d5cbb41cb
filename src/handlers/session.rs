use actix_session::Session;
use log::warn;
use uuid::Uuid;

const SESSION_ID_KEY: &str = "session_id";

/// Returns the caller's session id, minting and storing a fresh one when the
/// cookie does not carry one yet. The id keys the credential store, so the
/// chat, OAuth and send endpoints all resolve it the same way.
pub fn ensure_session_id(session: &Session) -> String {
    if let Ok(Some(id)) = session.get::<String>(SESSION_ID_KEY) {
        return id;
    }
    let id = Uuid::new_v4().to_string();
    if let Err(e) = session.insert(SESSION_ID_KEY, id.clone()) {
        warn!("Failed to store session_id in cookie: {:?}", e);
    }
    id
}
