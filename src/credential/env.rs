use anyhow::{Result, bail};
use async_trait::async_trait;
use log::debug;
use std::env::VarError;
use std::sync::Arc;

use super::{Credential, CredentialProvider};
use crate::runtime::Runtime;

/// Environment variable consulted for a bearer token before the session file.
pub const TOKEN_ENV_VAR: &str = "PARLANCE_TOKEN";

/// Reads the bearer token from an environment variable on every call.
pub struct EnvCredential<R: Runtime> {
    runtime: Arc<R>,
    var: String,
}

impl<R: Runtime> EnvCredential<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self::with_var(runtime, TOKEN_ENV_VAR)
    }

    pub fn with_var(runtime: Arc<R>, var: impl Into<String>) -> Self {
        Self {
            runtime,
            var: var.into(),
        }
    }
}

#[async_trait]
impl<R: Runtime> CredentialProvider for EnvCredential<R> {
    #[tracing::instrument(skip(self))]
    async fn credential(&self) -> Result<Option<Credential>> {
        match self.runtime.env_var(&self.var) {
            Ok(token) if token.trim().is_empty() => {
                debug!("{} is set but empty, ignoring", self.var);
                Ok(None)
            }
            Ok(token) => {
                let credential = Credential::new(token.trim());
                debug!("Using {} for authentication: {}", self.var, credential);
                Ok(Some(credential))
            }
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => bail!("{} is not valid unicode", self.var),
        }
    }
}
