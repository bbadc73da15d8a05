use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Fields `POST /estimate-swap` cannot do without.
pub const REQUIRED_ESTIMATE_FIELDS: [&str; 2] = ["venue", "amount"];

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameters")]
    MissingParameters,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::MissingParameters => json!({
                "error": self.to_string(),
                "required": REQUIRED_ESTIMATE_FIELDS,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// 200 with `data` serialized as the JSON body.
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingParameters.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("Venue not found".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(ApiError::NotFound("Venue not found".into()).to_string(), "Venue not found");
        assert_eq!(ApiError::MissingParameters.to_string(), "Missing required parameters");
    }
}
