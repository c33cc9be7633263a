use anyhow::{Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Api;
use crate::credential::CredentialProvider;
use crate::http::{Outcome, RequestDescriptor};

pub const START_CHAT_PATH: &str = "/api/chatbot/start";
pub const CHAT_PATH: &str = "/api/chatbot/chat";

/// Bot message appended to the transcript when a chat call does not succeed.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Why the user is talking to the bot; the backend picks a language from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Business,
    Travel,
    Education,
    Social,
    Technical,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Business,
        Purpose::Travel,
        Purpose::Education,
        Purpose::Social,
        Purpose::Technical,
    ];
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purpose::Business => write!(f, "business"),
            Purpose::Travel => write!(f, "travel"),
            Purpose::Education => write!(f, "education"),
            Purpose::Social => write!(f, "social"),
            Purpose::Technical => write!(f, "technical"),
        }
    }
}

impl FromStr for Purpose {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "business" => Ok(Purpose::Business),
            "travel" => Ok(Purpose::Travel),
            "education" => Ok(Purpose::Education),
            "social" => Ok(Purpose::Social),
            "technical" => Ok(Purpose::Technical),
            _ => bail!(
                "Unknown purpose: {}. Expected business, travel, education, social, or technical.",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatStart {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub recommended_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub messages: Vec<ChatMessage>,
}

impl<P: CredentialProvider> Api<P> {
    #[tracing::instrument(skip(self))]
    pub async fn start_chat(&self, purpose: Purpose) -> Outcome<ChatStart> {
        #[derive(Serialize)]
        struct Body {
            purpose: Purpose,
        }

        let descriptor = RequestDescriptor::post(START_CHAT_PATH)
            .json(&Body { purpose })
            .map(|descriptor| descriptor.expect_field("messages"));
        self.call(descriptor).await
    }

    #[tracing::instrument(skip(self, request), fields(language = %request.language))]
    pub async fn chat(&self, request: &ChatRequest) -> Outcome<ChatReply> {
        let descriptor = RequestDescriptor::post(CHAT_PATH)
            .json(request)
            .map(|descriptor| descriptor.expect_field("messages"));
        self.call(descriptor).await
    }
}

/// Transcript and state of one chatbot session.
///
/// Both operations borrow the conversation mutably, so a conversation can
/// only have one request in flight.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    purpose: Option<Purpose>,
    language: Option<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn purpose(&self) -> Option<Purpose> {
        self.purpose
    }

    /// Language the bot converses in, once the conversation has started.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Starts (or restarts) the conversation. On success the transcript is
    /// replaced by the bot's opening messages. Otherwise the transcript is
    /// replaced by a single apology.
    pub async fn start<P: CredentialProvider>(
        &mut self,
        api: &Api<P>,
        purpose: Purpose,
    ) -> Outcome<()> {
        let outcome = api.start_chat(purpose).await;
        match outcome {
            Outcome::Success(start) => {
                debug!(
                    "Conversation started for {} in {:?}",
                    purpose, start.recommended_language
                );
                self.messages = start.messages;
                self.language = start.recommended_language;
                self.purpose = Some(purpose);
                Outcome::Success(())
            }
            other => {
                self.messages = vec![ChatMessage::bot(APOLOGY)];
                other.map(|_| ())
            }
        }
    }

    /// Sends `text` as the user. Returns `None` without calling the backend
    /// when the text is blank or no language has been agreed yet.
    pub async fn send<P: CredentialProvider>(
        &mut self,
        api: &Api<P>,
        text: &str,
    ) -> Option<Outcome<()>> {
        if text.trim().is_empty() {
            return None;
        }
        let language = self.language.clone()?;

        self.messages.push(ChatMessage::user(text));

        let request = ChatRequest {
            message: text.to_string(),
            language,
        };
        let outcome = match api.chat(&request).await {
            Outcome::Success(reply) => {
                self.messages.extend(reply.messages);
                Outcome::Success(())
            }
            other => {
                self.messages.push(ChatMessage::bot(APOLOGY));
                other.map(|_| ())
            }
        };
        Some(outcome)
    }
}
