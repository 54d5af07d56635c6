// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::MatchInfo;
pub use requests::{ExtractRequest, RelayQuery};
pub use responses::{ErrorResponse, ExtractResponse, HealthResponse};
