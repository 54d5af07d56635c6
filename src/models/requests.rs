use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of an inbound relay request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayQuery {
    #[serde(default)]
    pub url: Option<String>,
}

impl RelayQuery {
    /// Target URL, treating an empty `url=` as missing
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Request to run the extractor against a document
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractRequest {
    #[validate(length(min = 1))]
    pub html: String,
}
