use actix_web::{web, HttpResponse, Responder, ResponseError};
use validator::Validate;
use crate::core::{normalize_date, render_output, Extraction};
use crate::models::{ErrorResponse, ExtractRequest, ExtractResponse, HealthResponse};
use crate::routes::AppState;

/// Configure extraction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/extract", web::post().to(extract));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Run the extractor once
///
/// POST /api/v1/extract
///
/// Request body:
/// ```json
/// { "html": "<html>...</html>" }
/// ```
///
/// `output` carries exactly what the page watcher would write to the info
/// element; `matchDate` is the widget date normalized to `YYYY-MM-DD`.
async fn extract(
    state: web::Data<AppState>,
    req: web::Json<ExtractRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return ErrorResponse::bad_request("validation_failed", errors.to_string()).error_response();
    }

    let extraction = state.extractor.extract(&req.html);

    let (ready, match_date) = match &extraction {
        Extraction::Ready(info) => (
            true,
            info.datetime.as_deref().and_then(normalize_date),
        ),
        Extraction::NotReady => (false, None),
    };

    tracing::debug!("Extracted {} bytes of HTML, ready: {}", req.html.len(), ready);

    HttpResponse::Ok().json(ExtractResponse {
        ready,
        output: render_output(extraction),
        match_date,
    })
}
