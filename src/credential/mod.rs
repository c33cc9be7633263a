//! Credential acquisition for authenticated requests.
//!
//! The request client never reads ambient authentication state. It is handed
//! a [`CredentialProvider`] and asks it for a fresh [`Credential`] on every
//! call, because identity-provider tokens are short-lived and may rotate
//! between requests.

mod chain;
mod env;
mod session;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use std::fmt;

pub use chain::ChainCredential;
pub use env::{EnvCredential, TOKEN_ENV_VAR};
pub use session::{SessionCredential, SessionFile};

/// An opaque bearer token issued by the identity provider.
///
/// `Debug` and `Display` only ever show the masked form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token. Only the request client should need this.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Returns the token with everything but its first and last four
    /// characters hidden. Short tokens are hidden entirely.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            return "*********".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}*********{}", head, tail)
    }

    /// Builds the `Authorization` header value, flagged as sensitive so it
    /// is never printed by reqwest's debug output.
    pub fn bearer_header(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))
            .context("Credential contains characters not allowed in a header")?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Source of bearer credentials.
///
/// `Ok(None)` means no credential is available (the user is signed out),
/// which is a different state from `Err`, where the source itself failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credential(&self) -> Result<Option<Credential>>;
}

#[async_trait]
impl CredentialProvider for Box<dyn CredentialProvider> {
    async fn credential(&self) -> Result<Option<Credential>> {
        (**self).credential().await
    }
}

/// A provider that always answers with the same credential (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<Credential>);

impl StaticCredential {
    pub fn new(credential: Option<Credential>) -> Self {
        Self(credential)
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self(Some(Credential::new(token)))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl CredentialProvider for StaticCredential {
    async fn credential(&self) -> Result<Option<Credential>> {
        Ok(self.0.clone())
    }
}
