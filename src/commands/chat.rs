use anyhow::{Result, bail};

use super::resolve;
use crate::{
    api::{Api, ChatMessage, Conversation, Purpose, Role},
    credential::CredentialProvider,
};

/// Starts a conversation for `purpose`, then sends each message in turn,
/// printing the transcript as it grows. Stops at the first failed call.
#[tracing::instrument(skip(api, messages))]
pub async fn chat<P: CredentialProvider>(
    api: &Api<P>,
    purpose: Purpose,
    messages: &[String],
) -> Result<Conversation> {
    let mut conversation = Conversation::new();
    let mut printed = 0;

    let outcome = conversation.start(api, purpose).await;
    printed = print_new(&conversation, printed);
    resolve(outcome)?;

    match conversation.language() {
        Some(language) => println!("(conversation language: {})", language),
        None if !messages.is_empty() => {
            bail!("The chatbot did not pick a conversation language; no messages were sent")
        }
        None => {}
    }

    for message in messages {
        let Some(outcome) = conversation.send(api, message).await else {
            continue;
        };
        printed = print_new(&conversation, printed);
        resolve(outcome)?;
    }

    Ok(conversation)
}

fn print_new(conversation: &Conversation, already_printed: usize) -> usize {
    let messages = conversation.messages();
    for message in &messages[already_printed.min(messages.len())..] {
        println!("{}", render_message(message));
    }
    messages.len()
}

pub fn render_message(message: &ChatMessage) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Bot => "bot",
    };
    format!("[{}] {}", speaker, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::signed_in_api;
    use crate::api::{APOLOGY, CHAT_PATH, START_CHAT_PATH};
    use crate::commands::SignInRequired;

    const START_BODY: &str = r#"{
        "messages": [{"role": "bot", "content": "Welcome!"}],
        "recommended_language": "de"
    }"#;

    #[test]
    fn test_render_message() {
        assert_eq!(render_message(&ChatMessage::user("Hallo")), "[you] Hallo");
        assert_eq!(render_message(&ChatMessage::bot("Guten Tag")), "[bot] Guten Tag");
    }

    #[tokio::test]
    async fn test_chat_runs_all_messages() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", START_CHAT_PATH)
            .with_status(200)
            .with_body(START_BODY)
            .create_async()
            .await;
        let chat_mock = server
            .mock("POST", CHAT_PATH)
            .with_status(200)
            .with_body(r#"{"messages": [{"role": "bot", "content": "Sehr gut!"}]}"#)
            .expect(2)
            .create_async()
            .await;

        let api = signed_in_api(&server.url());
        let messages = vec!["Hallo".to_string(), "   ".to_string(), "Danke".to_string()];
        let conversation = chat(&api, Purpose::Business, &messages).await.unwrap();

        chat_mock.assert_async().await;
        // welcome + 2 * (user + bot); the blank message is skipped
        assert_eq!(conversation.messages().len(), 5);
    }

    #[tokio::test]
    async fn test_chat_stops_at_first_failure() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", START_CHAT_PATH)
            .with_status(200)
            .with_body(START_BODY)
            .create_async()
            .await;
        let chat_mock = server
            .mock("POST", CHAT_PATH)
            .with_status(502)
            .expect(1)
            .create_async()
            .await;

        let api = signed_in_api(&server.url());
        let messages = vec!["Hallo".to_string(), "Danke".to_string()];
        let err = chat(&api, Purpose::Social, &messages).await.unwrap_err();

        chat_mock.assert_async().await;
        assert_eq!(err.to_string(), "Request failed: HTTP 502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_chat_start_rejected_credential() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", START_CHAT_PATH)
            .with_status(401)
            .create_async()
            .await;

        let api = signed_in_api(&server.url());
        let err = chat(&api, Purpose::Travel, &[]).await.unwrap_err();
        assert!(err.downcast_ref::<SignInRequired>().is_some());
    }

    #[tokio::test]
    async fn test_chat_without_language_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", START_CHAT_PATH)
            .with_status(200)
            .with_body(r#"{"messages": [{"role": "bot", "content": "hi"}]}"#)
            .create_async()
            .await;
        let chat_mock = server
            .mock("POST", CHAT_PATH)
            .expect(0)
            .create_async()
            .await;

        let api = signed_in_api(&server.url());
        let messages = vec!["Hola".to_string(), "Gracias".to_string()];
        let err = chat(&api, Purpose::Travel, &messages).await.unwrap_err();

        chat_mock.assert_async().await;
        assert!(err.to_string().contains("did not pick a conversation language"));
    }

    #[tokio::test]
    async fn test_chat_without_language_and_no_messages_succeeds() {
        let mut server = mockito::Server::new_async().await;
        let _start = server
            .mock("POST", START_CHAT_PATH)
            .with_status(200)
            .with_body(r#"{"messages": [{"role": "bot", "content": "hi"}]}"#)
            .create_async()
            .await;

        let api = signed_in_api(&server.url());
        let conversation = chat(&api, Purpose::Travel, &[]).await.unwrap();
        assert_eq!(conversation.messages().len(), 1);
    }

    #[test]
    fn test_apology_rendering() {
        assert_eq!(
            render_message(&ChatMessage::bot(APOLOGY)),
            format!("[bot] {}", APOLOGY)
        );
    }
}
