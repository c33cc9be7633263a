use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    api::Api,
    credential::{ChainCredential, EnvCredential, SessionCredential},
    http::AuthClient,
    runtime::Runtime,
};

/// API base URL used when neither `--api-url` nor `PARLANCE_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub struct Config<R: Runtime> {
    pub runtime: Arc<R>,
    pub api_url: String,
    pub session_path: PathBuf,
}

impl<R: Runtime + 'static> Config<R> {
    pub fn new(runtime: R, api_url: Option<String>, session_path: Option<PathBuf>) -> Result<Self> {
        let session_path = match session_path {
            Some(path) => path,
            None => SessionCredential::default_path(&runtime)?,
        };
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            runtime: Arc::new(runtime),
            api_url,
            session_path,
        })
    }

    pub fn session(&self) -> SessionCredential<R> {
        SessionCredential::new(Arc::clone(&self.runtime), self.session_path.clone())
    }

    pub fn env_credential(&self) -> EnvCredential<R> {
        EnvCredential::new(Arc::clone(&self.runtime))
    }

    /// `PARLANCE_TOKEN` wins over the stored session.
    pub fn credentials(&self) -> ChainCredential {
        ChainCredential::new()
            .with(self.env_credential())
            .with(self.session())
    }

    pub fn api(&self) -> Result<Api<ChainCredential>> {
        let client = Client::builder()
            .user_agent(concat!("parlance-cli/", env!("PARLANCE_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Api::new(AuthClient::new(
            client,
            self.api_url.clone(),
            self.credentials(),
        )))
    }
}
