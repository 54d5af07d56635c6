use actix_web::{http::header, web, HttpRequest, HttpResponse};
use crate::models::RelayQuery;
use crate::routes::AppState;

const MISSING_URL: &str = "Missing ?url=";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// CORS relay
///
/// ANY /<anything>?url=<target>
///
/// Fetches `target` and echoes its body back with permissive CORS headers.
/// The upstream status is not forwarded: any completed fetch is a 200.
pub async fn forward(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let query = parse_query(req.query_string());

    let Some(target) = query.target() else {
        tracing::debug!("Relay request on {} without url parameter", req.path());
        return HttpResponse::BadRequest()
            .content_type(PLAIN_TEXT)
            .body(MISSING_URL);
    };

    match state.relay.fetch(target).await {
        Ok(body) => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
            .body(body),
        Err(e) => {
            tracing::warn!("Relay to {} failed: {}", target, e);
            HttpResponse::InternalServerError()
                .content_type(PLAIN_TEXT)
                .body(format!("Proxy error: {}", e))
        }
    }
}

/// First `url` pair of the query string wins
fn parse_query(query_string: &str) -> RelayQuery {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map(|q| q.into_inner())
        .unwrap_or_default();

    RelayQuery {
        url: pairs.into_iter().find(|(k, _)| k == "url").map(|(_, v)| v),
    }
}
