//! API error handling.
//!
//! Failures the user cannot recover from (storage or rendering errors) end
//! up here and are answered with a short HTML page. Details are logged, not
//! shown.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::infrastructure::RepositoryError;

/// Message shown for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

// =============================================================================
// API Error Response
// =============================================================================

/// Error response containing status code and a user-facing message.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Human-readable error message.
    pub message: String,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Error page; askama escapes the message.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorView<'a> {
    status: u16,
    message: &'a str,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let view = ErrorView {
            status: self.status.as_u16(),
            message: &self.message,
        };
        match view.render() {
            Ok(body) => (self.status, Html(body)).into_response(),
            Err(error) => {
                tracing::error!(%error, "Error page rendering failed");
                self.status.into_response()
            }
        }
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => Self::not_found(format!("List {id} not found")),
            RepositoryError::DatabaseError(_) | RepositoryError::SessionUnavailable => {
                tracing::error!(%error, "Repository operation failed");
                Self::internal_error(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<askama::Error> for ApiErrorResponse {
    fn from(error: askama::Error) -> Self {
        tracing::error!(%error, "Template rendering failed");
        Self::internal_error(INTERNAL_ERROR_MESSAGE)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListId;
    use rstest::rstest;

    #[rstest]
    fn test_api_error_response_not_found() {
        let response = ApiErrorResponse::not_found("Missing");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.message, "Missing");
    }

    #[rstest]
    fn test_api_error_response_internal_error() {
        let response = ApiErrorResponse::internal_error("Boom");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    fn test_repository_error_to_api_error_response() {
        let response: ApiErrorResponse = RepositoryError::NotFound(ListId::new(3)).into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let response: ApiErrorResponse =
            RepositoryError::DatabaseError("password authentication failed".to_string()).into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.message, INTERNAL_ERROR_MESSAGE);

        let response: ApiErrorResponse = RepositoryError::SessionUnavailable.into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    fn test_into_response_is_html_with_status() {
        let response = ApiErrorResponse::internal_error(INTERNAL_ERROR_MESSAGE).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/html"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_into_response_escapes_message() {
        use http_body_util::BodyExt;

        let response =
            ApiErrorResponse::not_found("<script>alert(\"x\")</script> & more").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("&amp; more"));
        assert!(body.contains("<h1>404</h1>"));
    }
}
