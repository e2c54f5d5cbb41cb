use serde::{Deserialize, Serialize};

/// A complete outgoing email. Produced by the intent extractor (with
/// fallback values for fields it could not find) and accepted verbatim by
/// the direct send endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}
