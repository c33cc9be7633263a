use anyhow::Result;

use super::resolve;
use crate::{
    api::{Api, DashboardStats, Preferences, RecentTranslation},
    credential::CredentialProvider,
};

#[tracing::instrument(skip(api))]
pub async fn stats<P: CredentialProvider>(api: &Api<P>) -> Result<DashboardStats> {
    let stats = resolve(api.dashboard_stats().await)?;
    print!("{}", render_stats(&stats));
    Ok(stats)
}

#[tracing::instrument(skip(api))]
pub async fn recent<P: CredentialProvider>(api: &Api<P>) -> Result<Vec<RecentTranslation>> {
    let translations = resolve(api.recent_translations().await)?;
    print!("{}", render_recent(&translations));
    Ok(translations)
}

#[tracing::instrument(skip(api))]
pub async fn preferences<P: CredentialProvider>(
    api: &Api<P>,
    primary_language: &str,
) -> Result<()> {
    let preferences = Preferences::new(primary_language)?;
    let message = resolve(api.update_preferences(&preferences).await)?;
    println!("{}", message);
    Ok(())
}

pub fn render_stats(stats: &DashboardStats) -> String {
    let streak = match stats.learning_streak {
        1 => "1 day".to_string(),
        n => format!("{} days", n),
    };
    format!(
        "Translations today: {}\nLanguages used:     {}\nSaved phrases:      {}\nLearning streak:    {}\n",
        stats.translations_today, stats.languages_used, stats.saved_phrases, streak
    )
}

pub fn render_recent(translations: &[RecentTranslation]) -> String {
    if translations.is_empty() {
        return "No translations yet.\n".to_string();
    }
    translations
        .iter()
        .map(|t| format!("{}  {} -> {}\n", t.date, t.from, t.to))
        .collect()
}
