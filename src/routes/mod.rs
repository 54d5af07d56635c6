// Route exports
pub mod errors;
pub mod extract;
pub mod relay;

use actix_cors::Cors;
use actix_web::web;
use crate::core::Extractor;
use crate::services::RelayClient;
use std::sync::Arc;

pub use errors::handle_json_payload_error;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
    pub relay: RelayClient,
}

/// Configure the JSON API
///
/// The relay is not part of this: it is the app's default service, see
/// [`relay::forward`].
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(Cors::permissive())
            .configure(extract::configure),
    );
}
