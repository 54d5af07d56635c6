//! RefStat Lite - match widget extraction and a CORS relay
//!
//! Two independent pieces live here:
//! - the extractor, which reads the match widget out of an HTML page and
//!   renders it as JSON for the info element, optionally re-running on every
//!   page change;
//! - the relay, an HTTP handler that fetches a URL on behalf of a browser and
//!   echoes the body back with permissive CORS headers.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Extraction, Extractor, ExtractError, InfoElement, OutputSink, PageWatcher};
pub use models::MatchInfo;
pub use services::{RelayClient, RelayError};
