use anyhow::Result;

use super::resolve;
use crate::{
    api::{Api, SpeechRequest},
    capability::AudioOutput,
    credential::CredentialProvider,
};

/// Synthesizes `text` and hands the audio to `output`.
#[tracing::instrument(skip(api, text, output))]
pub async fn speak<P: CredentialProvider, O: AudioOutput>(
    api: &Api<P>,
    text: &str,
    language: &str,
    output: &O,
) -> Result<()> {
    let request = SpeechRequest::new(text, language)?;
    let audio = resolve(api.text_to_speech(&request).await)?;
    output.play(&audio.bytes)
}
