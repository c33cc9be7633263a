//! Typed endpoints of the translation backend.
//!
//! Every method builds a [`RequestDescriptor`] and goes through the one
//! [`AuthClient`], so all endpoints share the same credential and outcome
//! handling. Callers decide what to do with each [`Outcome`].

mod chatbot;
mod dashboard;
mod language;
mod location;
mod speech;
mod translate;

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::credential::CredentialProvider;
use crate::http::{AuthClient, Outcome, RequestDescriptor};

pub use chatbot::{
    APOLOGY, CHAT_PATH, ChatMessage, ChatReply, ChatRequest, ChatStart, Conversation, Purpose,
    Role, START_CHAT_PATH,
};
pub use dashboard::{
    DashboardStats, Preferences, RECENT_TRANSLATIONS_PATH, RecentTranslation, STATS_PATH,
    UPDATE_PREFERENCES_PATH,
};
pub use language::{AUTO, LANGUAGES, Language, find_language, target_languages};
pub use location::{DETECT_LOCATION_PATH, SuggestedLanguage};
pub use speech::{SpeechAudio, SpeechRequest, TEXT_TO_SPEECH_PATH};
pub use translate::{TRANSLATE_PATH, TranslateRequest, TranslateResponse};

pub struct Api<P: CredentialProvider> {
    client: AuthClient<P>,
}

impl<P: CredentialProvider> Api<P> {
    pub fn new(client: AuthClient<P>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthClient<P> {
        &self.client
    }

    async fn call<T: DeserializeOwned>(&self, descriptor: Result<RequestDescriptor>) -> Outcome<T> {
        match descriptor {
            Ok(descriptor) => self.client.send_as(&descriptor).await,
            Err(e) => Outcome::Failure(format!("{:#}", e)),
        }
    }
}
