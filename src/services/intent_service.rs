use lazy_static::lazy_static;
use regex::Regex;

use crate::models::email::EmailDraft;

const TRIGGER_PHRASES: [&str; 3] = ["send email", "send an email", "email"];

const FALLBACK_TO: &str = "your-email@example.com";
const FALLBACK_SUBJECT: &str = "Subject from AI";

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"[\w.\-]+@[\w.\-]+").unwrap();
    static ref SUBJECT_RE: Regex = Regex::new(r#"(?i)subject ["“](.+?)["”]"#).unwrap();
    static ref BODY_RE: Regex = Regex::new(r#"(?i)body ["“](.+?)["”]"#).unwrap();
}

/// Decides whether `text` asks to send an email and, if so, extracts the
/// recipient, subject and body from it. `None` means no send intent was
/// expressed; it is never a failure.
///
/// The trigger is a bare substring match, so any message containing the word
/// "email" detects. Fields the patterns cannot find fall back to defaults:
/// a placeholder address, a canned subject, and the whole message as body.
pub fn detect(text: &str) -> Option<EmailDraft> {
    let lowered = text.to_lowercase();
    if !TRIGGER_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return None;
    }

    let to = ADDRESS_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_TO.to_string());
    let subject = SUBJECT_RE
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| FALLBACK_SUBJECT.to_string());
    let body = BODY_RE
        .captures(text)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| text.to_string());

    Some(EmailDraft { to, subject, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_text_without_trigger_phrases() {
        assert!(detect("What's the weather in Zurich?").is_none());
        assert!(detect("Remind me to call Alice tomorrow").is_none());
        assert!(detect("").is_none());
    }

    #[test]
    fn extracts_all_fields_when_present() {
        let draft = detect(
            "Please send an email to bob@example.com subject \"Hi\" body \"Let's meet\"",
        )
        .unwrap();
        assert_eq!(draft.to, "bob@example.com");
        assert_eq!(draft.subject, "Hi");
        assert_eq!(draft.body, "Let's meet");
    }

    #[test]
    fn falls_back_when_fields_are_missing() {
        let text = "Could you email the team about the launch?";
        let draft = detect(text).unwrap();
        assert_eq!(draft.to, FALLBACK_TO);
        assert_eq!(draft.subject, FALLBACK_SUBJECT);
        assert_eq!(draft.body, text);
    }

    #[test]
    fn accepts_curly_quotes() {
        let draft = detect("send email to amy@test.org subject “Launch” body “All set”").unwrap();
        assert_eq!(draft.to, "amy@test.org");
        assert_eq!(draft.subject, "Launch");
        assert_eq!(draft.body, "All set");
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let draft = detect("SEND EMAIL to dana@example.org Subject \"Update\" BODY \"done\"").unwrap();
        assert_eq!(draft.to, "dana@example.org");
        assert_eq!(draft.subject, "Update");
        assert_eq!(draft.body, "done");
    }

    #[test]
    fn triggers_on_any_mention_of_email() {
        // substring trigger: a message merely talking about email still
        // yields a fallback-filled draft
        let draft = detect("I got way too much email today").unwrap();
        assert_eq!(draft.to, FALLBACK_TO);
    }
}
