use anyhow::Result;

use super::resolve;
use crate::{
    api::{Api, SuggestedLanguage},
    credential::CredentialProvider,
};

#[tracing::instrument(skip(api))]
pub async fn detect_location<P: CredentialProvider>(api: &Api<P>) -> Result<SuggestedLanguage> {
    let suggestion = resolve(api.detect_location().await)?;
    println!("Suggested language: {} ({})", suggestion.name, suggestion.code);
    Ok(suggestion)
}
