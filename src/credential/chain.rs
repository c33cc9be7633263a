use anyhow::Result;
use async_trait::async_trait;

use super::{Credential, CredentialProvider};

/// Asks each provider in order and returns the first credential found.
///
/// A provider error stops the chain; it is not treated as "absent".
#[derive(Default)]
pub struct ChainCredential {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P: CredentialProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl CredentialProvider for ChainCredential {
    #[tracing::instrument(skip(self))]
    async fn credential(&self) -> Result<Option<Credential>> {
        for provider in &self.providers {
            if let Some(credential) = provider.credential().await? {
                return Ok(Some(credential));
            }
        }
        Ok(None)
    }
}
