use anyhow::{Result, bail};
use log::debug;

use super::resolve;
use crate::{
    api::{Api, TranslateRequest},
    capability::SpeechInput,
    credential::CredentialProvider,
};

/// Translates `text`, or the captured input when no text is given, and
/// prints the translation.
#[tracing::instrument(skip(api, text, input))]
pub async fn translate<P: CredentialProvider, S: SpeechInput>(
    api: &Api<P>,
    text: Option<String>,
    input: &mut S,
    from: &str,
    to: &str,
) -> Result<String> {
    let text = match text {
        Some(text) => text,
        None => match input.transcript()? {
            Some(text) => text,
            None => bail!("Please enter text to translate"),
        },
    };

    let request = TranslateRequest::new(&text, from, to)?;
    debug!("Translating {} characters", request.text.chars().count());

    let response = resolve(api.translate(&request).await)?;
    println!("{}", response.translated_text);
    Ok(response.translated_text)
}
