use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::Api;
use super::language::{AUTO, find_language};
use crate::credential::CredentialProvider;
use crate::http::{Outcome, RequestDescriptor};

pub const TRANSLATE_PATH: &str = "/api/translate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslateRequest {
    /// Validates the input before anything is sent: text must not be blank,
    /// both codes must be known, and auto-detect is only a valid source.
    pub fn new(text: &str, source_lang: &str, target_lang: &str) -> Result<Self> {
        if text.trim().is_empty() {
            bail!("Please enter text to translate");
        }

        let Some(source) = find_language(source_lang) else {
            bail!("Unknown source language: {}", source_lang);
        };
        let Some(target) = find_language(target_lang) else {
            bail!("Unknown target language: {}", target_lang);
        };
        if target.code == AUTO {
            bail!("Auto-detect can only be used as the source language");
        }

        Ok(Self {
            text: text.to_string(),
            source_lang: source.code.to_string(),
            target_lang: target.code.to_string(),
        })
    }

    pub fn descriptor(&self) -> Result<RequestDescriptor> {
        Ok(RequestDescriptor::post(TRANSLATE_PATH)
            .json(self)?
            .expect_field("translated_text"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

impl<P: CredentialProvider> Api<P> {
    #[tracing::instrument(skip(self, request), fields(source = %request.source_lang, target = %request.target_lang))]
    pub async fn translate(&self, request: &TranslateRequest) -> Outcome<TranslateResponse> {
        self.call(request.descriptor()).await
    }
}
