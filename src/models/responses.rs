use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the extract endpoint
///
/// `output` is exactly the text the extractor writes to the info element,
/// or `None` while the widget is not ready.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub ready: bool,
    pub output: Option<String>,
    #[serde(rename = "matchDate")]
    pub match_date: Option<chrono::NaiveDate>,
}
