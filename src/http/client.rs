//! Authenticated request client.

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::{Outcome, RequestDescriptor, classify};
use crate::credential::CredentialProvider;

/// Message shown when the server could not be reached at all.
pub const NETWORK_ERROR: &str = "Could not reach the server. Check your connection and try again.";

/// Performs authenticated JSON calls against one API base URL.
///
/// A credential is fetched from the provider on every call and never kept.
/// Calls are not retried; a caller that wants another attempt re-invokes.
pub struct AuthClient<P: CredentialProvider> {
    client: Client,
    base_url: String,
    credentials: Arc<P>,
}

impl<P: CredentialProvider> Clone for AuthClient<P> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            credentials: Arc::clone(&self.credentials),
        }
    }
}

impl<P: CredentialProvider> AuthClient<P> {
    pub fn new(client: Client, base_url: impl Into<String>, credentials: P) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            credentials: Arc::new(credentials),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &P {
        &self.credentials
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Issues the call described by `descriptor` and classifies the response.
    #[tracing::instrument(skip(self, descriptor), fields(method = %descriptor.method, path = %descriptor.path))]
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Outcome<Value> {
        let credential = match self.credentials.credential().await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!(
                    "No credential available, not sending {} {}",
                    descriptor.method, descriptor.path
                );
                return Outcome::Unauthenticated;
            }
            Err(e) => {
                warn!("Failed to obtain credential: {:#}", e);
                return Outcome::Failure(format!("Could not obtain credentials: {:#}", e));
            }
        };

        let auth_header = match credential.bearer_header() {
            Ok(value) => value,
            Err(e) => return Outcome::Failure(format!("{:#}", e)),
        };

        let url = self.url_for(&descriptor.path);
        debug!("{} {} as {}", descriptor.method, url, credential);

        let mut request = self
            .client
            .request(descriptor.method.clone(), &url)
            .header(AUTHORIZATION, auth_header)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", descriptor.method, url, e);
                return Outcome::failure(NETWORK_ERROR);
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read response body from {}: {}", url, e);
                return Outcome::failure(NETWORK_ERROR);
            }
        };

        let outcome = classify(status, &body, descriptor.expected_field.as_deref());
        match &outcome {
            Outcome::Success(_) => debug!("{} {} -> {}", descriptor.method, url, status),
            Outcome::Unauthenticated => {
                debug!("{} {} -> {}: credential rejected", descriptor.method, url, status)
            }
            Outcome::Failure(message) => {
                warn!("{} {} -> {}: {}", descriptor.method, url, status, message)
            }
        }
        outcome
    }

    /// Like [`send`](Self::send), deserializing the payload into `T`.
    /// A payload that does not fit `T` is a `Failure`.
    pub async fn send_as<T: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> Outcome<T> {
        self.send(descriptor)
            .await
            .and_then(|value| match serde_json::from_value(value) {
                Ok(payload) => Outcome::Success(payload),
                Err(e) => {
                    warn!("Unexpected response shape from {}: {}", descriptor.path, e);
                    Outcome::Failure(format!("Unexpected response from server: {}", e))
                }
            })
    }
}
