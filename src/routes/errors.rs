use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use crate::models::ErrorResponse;
use std::fmt;

impl ErrorResponse {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST.as_u16(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Render undecodable `/api/v1` JSON bodies as an [`ErrorResponse`]
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected JSON body on {}: {}", req.path(), err);
    ErrorResponse::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let err = ErrorResponse::bad_request("invalid_json", "Invalid JSON: EOF");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid_json: Invalid JSON: EOF");

        let err = ErrorResponse {
            error: "teapot".to_string(),
            message: String::new(),
            status_code: 1000,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
