use serde::{Deserialize, Serialize};

use super::Api;
use crate::credential::CredentialProvider;
use crate::http::{Outcome, RequestDescriptor};

pub const DETECT_LOCATION_PATH: &str = "/api/detect-location";

/// Language the backend suggests for the caller's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedLanguage {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct LocationResponse {
    suggested_language: SuggestedLanguage,
}

impl<P: CredentialProvider> Api<P> {
    #[tracing::instrument(skip(self))]
    pub async fn detect_location(&self) -> Outcome<SuggestedLanguage> {
        let descriptor =
            RequestDescriptor::get(DETECT_LOCATION_PATH).expect_field("suggested_language");
        self.client()
            .send_as::<LocationResponse>(&descriptor)
            .await
            .map(|response| response.suggested_language)
    }
}
