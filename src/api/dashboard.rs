use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::Api;
use super::language::{AUTO, find_language};
use crate::credential::CredentialProvider;
use crate::http::{Outcome, RequestDescriptor};

pub const STATS_PATH: &str = "/api/dashboard/stats";
pub const RECENT_TRANSLATIONS_PATH: &str = "/api/dashboard/recent-translations";
pub const UPDATE_PREFERENCES_PATH: &str = "/api/dashboard/update-preferences";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub translations_today: u64,
    #[serde(default)]
    pub languages_used: u64,
    #[serde(default)]
    pub saved_phrases: u64,
    /// Consecutive days with at least one translation.
    #[serde(default)]
    pub learning_streak: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentTranslation {
    pub id: i64,
    pub from: String,
    pub to: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct RecentTranslationsResponse {
    translations: Vec<RecentTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub primary_language: String,
}

impl Preferences {
    pub fn new(primary_language: &str) -> Result<Self> {
        match find_language(primary_language) {
            Some(found) if found.code != AUTO => Ok(Self {
                primary_language: found.code.to_string(),
            }),
            _ => bail!("Unknown primary language: {}", primary_language),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PreferencesResponse {
    message: String,
}

impl<P: CredentialProvider> Api<P> {
    #[tracing::instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Outcome<DashboardStats> {
        let descriptor = RequestDescriptor::get(STATS_PATH).expect_field("translations_today");
        self.client().send_as(&descriptor).await
    }

    /// The most recent translations, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn recent_translations(&self) -> Outcome<Vec<RecentTranslation>> {
        let descriptor =
            RequestDescriptor::get(RECENT_TRANSLATIONS_PATH).expect_field("translations");
        self.client()
            .send_as::<RecentTranslationsResponse>(&descriptor)
            .await
            .map(|response| response.translations)
    }

    /// Returns the backend's confirmation message.
    #[tracing::instrument(skip(self))]
    pub async fn update_preferences(&self, preferences: &Preferences) -> Outcome<String> {
        let descriptor = RequestDescriptor::post(UPDATE_PREFERENCES_PATH)
            .json(preferences)
            .map(|descriptor| descriptor.expect_field("message"));
        self.call::<PreferencesResponse>(descriptor)
            .await
            .map(|response| response.message)
    }
}
