use serde::{Deserialize, Serialize};

/// Snapshot of the match widget
///
/// Every scalar field is best-effort: a missing element leaves the field
/// `None`, and `None` fields are left out of the serialized JSON.
/// `referees` is always serialized, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena: Option<String>,
    #[serde(default)]
    pub referees: Vec<String>,
}
