//! Persisted identity session.
//!
//! The CLI keeps the token handed out by the identity provider in a small
//! JSON file under the user's config directory. `login` writes it, `logout`
//! removes it, and every request re-reads it.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Credential, CredentialProvider};
use crate::runtime::Runtime;

/// On-disk format of the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    pub token: String,
}

pub struct SessionCredential<R: Runtime> {
    runtime: Arc<R>,
    path: PathBuf,
}

impl<R: Runtime> SessionCredential<R> {
    pub fn new(runtime: Arc<R>, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    /// Uses `<config_dir>/parlance/session.json`.
    pub fn at_default_path(runtime: Arc<R>) -> Result<Self> {
        let path = Self::default_path(runtime.as_ref())?;
        Ok(Self::new(runtime, path))
    }

    pub fn default_path(runtime: &R) -> Result<PathBuf> {
        let Some(config_dir) = runtime.config_dir() else {
            bail!("Could not determine the user config directory");
        };
        Ok(config_dir.join("parlance").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists `token` as the current session, replacing any previous one.
    #[tracing::instrument(skip(self, token))]
    pub fn store(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            bail!("Refusing to store an empty token");
        }

        if let Some(parent) = self.path.parent() {
            self.runtime.create_dir_all(parent)?;
        }

        let session = SessionFile {
            token: token.to_string(),
        };
        let json = serde_json::to_string_pretty(&session)?;
        self.runtime
            .write_private(&self.path, json.as_bytes())
            .context("Failed to save session")?;

        info!("Session saved to {:?}", self.path);
        Ok(())
    }

    /// Removes the session file. Returns `false` if there was nothing to remove.
    #[tracing::instrument(skip(self))]
    pub fn clear(&self) -> Result<bool> {
        if !self.runtime.exists(&self.path) {
            debug!("No session file at {:?}", self.path);
            return Ok(false);
        }
        self.runtime
            .remove_file(&self.path)
            .context("Failed to remove session")?;
        info!("Session removed from {:?}", self.path);
        Ok(true)
    }
}

#[async_trait]
impl<R: Runtime> CredentialProvider for SessionCredential<R> {
    #[tracing::instrument(skip(self))]
    async fn credential(&self) -> Result<Option<Credential>> {
        if !self.runtime.exists(&self.path) {
            debug!("No session file at {:?}", self.path);
            return Ok(None);
        }

        let content = self.runtime.read_to_string(&self.path)?;
        let session: SessionFile = serde_json::from_str(&content)
            .with_context(|| format!("Malformed session file {:?}", self.path))?;

        if session.token.trim().is_empty() {
            return Ok(None);
        }

        let credential = Credential::new(session.token.trim());
        debug!("Using session token for authentication: {}", credential);
        Ok(Some(credential))
    }
}
