use async_trait::async_trait;
use mockall::mock;

use CourierChatAgent::models::credentials::StoredCredentials;
use CourierChatAgent::models::email::EmailDraft;
use CourierChatAgent::models::message::ChatMessage;
use CourierChatAgent::services::agent_service::{handle_turn, run_turn};
use CourierChatAgent::services::gmail_service::{MailSender, SendError};
use CourierChatAgent::services::llm_service::{ChatModel, LlmError};

mock! {
    pub Llm {}

    #[async_trait]
    impl ChatModel for Llm {
        async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, LlmError>;
    }
}

mock! {
    pub Mailer {}

    #[async_trait]
    impl MailSender for Mailer {
        async fn send(&self, credentials: &StoredCredentials, draft: &EmailDraft) -> Result<String, SendError>;
    }
}

const SEND_REQUEST: &str =
    "Please send an email to bob@example.com subject \"Hi\" body \"Let's meet\"";

fn test_credentials() -> StoredCredentials {
    StoredCredentials {
        access_token: "ya29.test-token".to_string(),
        refresh_token: Some("refresh-token".to_string()),
        token_uri: "https://oauth2.googleapis.com/token".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        scopes: vec!["https://www.googleapis.com/auth/gmail.send".to_string()],
        expires_at: None,
    }
}

#[tokio::test]
async fn send_request_with_working_collaborators_reports_the_message_id() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .returning(|_, _| Ok("Sure, sending that now.".to_string()));

    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(1)
        .withf(|_, draft| {
            draft.to == "bob@example.com" && draft.subject == "Hi" && draft.body == "Let's meet"
        })
        .returning(|_, _| Ok("msg-123".to_string()));

    let creds = test_credentials();
    let reply = run_turn(SEND_REQUEST, &llm, &mailer, Some(&creds))
        .await
        .unwrap();
    assert!(reply.contains("Email sent to bob@example.com"), "reply: {}", reply);
    assert!(reply.contains("msg-123"), "reply: {}", reply);
}

#[tokio::test]
async fn send_request_without_credentials_still_completes_with_a_reply() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .returning(|_, _| Ok("On it.".to_string()));

    // no expectations: the sender must never be called without credentials
    let mailer = MockMailer::new();

    let reply = run_turn(SEND_REQUEST, &llm, &mailer, None).await.unwrap();
    assert!(reply.contains("not authenticated"), "reply: {}", reply);
}

#[tokio::test]
async fn plain_conversation_terminates_without_sending() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .withf(|model, messages| !model.is_empty() && messages.len() == 2)
        .returning(|_, _| Ok("Sunny with a light breeze.".to_string()));

    let mailer = MockMailer::new();

    let reply = run_turn("What's the weather like today?", &llm, &mailer, None)
        .await
        .unwrap();
    assert_eq!(reply, "Sunny with a light breeze.");
}

#[tokio::test]
async fn llm_failure_still_yields_a_non_empty_reply() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .returning(|_, _| Err(LlmError::EmptyResponse));

    let mailer = MockMailer::new();

    let reply = handle_turn("hello there", &llm, &mailer, None).await;
    assert!(!reply.is_empty());
    assert!(reply.contains("Something went wrong"), "reply: {}", reply);
}

#[tokio::test]
async fn send_failure_is_absorbed_into_the_reply() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .times(1)
        .returning(|_, _| Ok("Sending.".to_string()));

    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(1)
        .returning(|_, _| Err(SendError::MissingId));

    let creds = test_credentials();
    let reply = handle_turn(SEND_REQUEST, &llm, &mailer, Some(&creds)).await;
    assert!(!reply.is_empty());
    assert!(reply.contains("Failed to send email"), "reply: {}", reply);
}

#[tokio::test]
async fn repeated_sends_are_not_deduplicated() {
    let mut mailer = MockMailer::new();
    let mut counter = 0u32;
    mailer.expect_send().times(2).returning(move |_, _| {
        counter += 1;
        Ok(format!("msg-{}", counter))
    });

    let creds = test_credentials();
    let draft = EmailDraft {
        to: "bob@example.com".to_string(),
        subject: "Hi".to_string(),
        body: "Let's meet".to_string(),
    };

    let first = mailer.send(&creds, &draft).await.unwrap();
    let second = mailer.send(&creds, &draft).await.unwrap();
    assert_ne!(first, second);
}
