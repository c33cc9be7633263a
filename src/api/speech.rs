use anyhow::{Result, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::warn;
use serde::{Deserialize, Serialize};

use super::Api;
use super::language::{AUTO, find_language};
use crate::credential::CredentialProvider;
use crate::http::{Outcome, RequestDescriptor};

pub const TEXT_TO_SPEECH_PATH: &str = "/api/text-to-speech";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub language: String,
}

impl SpeechRequest {
    pub fn new(text: &str, language: &str) -> Result<Self> {
        if text.trim().is_empty() {
            bail!("Please enter text to speak");
        }
        match find_language(language) {
            Some(found) if found.code != AUTO => Ok(Self {
                text: text.to_string(),
                language: found.code.to_string(),
            }),
            _ => bail!("Unsupported speech language: {}", language),
        }
    }

    pub fn descriptor(&self) -> Result<RequestDescriptor> {
        Ok(RequestDescriptor::post(TEXT_TO_SPEECH_PATH)
            .json(self)?
            .expect_field("audio_data"))
    }
}

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    audio_data: String,
}

/// Decoded MP3 audio returned by the speech endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
}

impl SpeechAudio {
    pub const MIME_TYPE: &'static str = "audio/mpeg";
}

impl<P: CredentialProvider> Api<P> {
    #[tracing::instrument(skip(self, request), fields(language = %request.language))]
    pub async fn text_to_speech(&self, request: &SpeechRequest) -> Outcome<SpeechAudio> {
        self.call::<SpeechResponse>(request.descriptor())
            .await
            .and_then(|response| match STANDARD.decode(response.audio_data.trim()) {
                Ok(bytes) => Outcome::Success(SpeechAudio { bytes }),
                Err(e) => {
                    warn!("Speech endpoint returned undecodable audio: {}", e);
                    Outcome::failure("invalid audio data")
                }
            })
    }
}
