//! Request extractors for storage access and AJAX detection.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::error::ApiErrorResponse;
use super::handlers::AppState;
use crate::infrastructure::{ListRepository, RepositoryError, SessionHandle};

/// Header value sent by the front-end script for AJAX requests.
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

// =============================================================================
// Storage
// =============================================================================

/// The repository serving the current request.
///
/// In session mode the repository reads and writes the request's session;
/// in database mode it shares the pool.
pub struct Storage(pub Box<dyn ListRepository>);

impl std::ops::Deref for Storage {
    type Target = dyn ListRepository;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for Storage {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionHandle>()
            .ok_or(RepositoryError::SessionUnavailable)?;
        Ok(Self(state.backend.open(session)))
    }
}

// =============================================================================
// AjaxRequest
// =============================================================================

/// Whether the request was sent with `X-Requested-With: XMLHttpRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AjaxRequest(pub bool);

impl<State> FromRequestParts<State> for AjaxRequest
where
    State: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Self, Self::Rejection> {
        let is_ajax = parts
            .headers
            .get("x-requested-with")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == XML_HTTP_REQUEST);
        Ok(Self(is_ajax))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::StorageBackend;
    use axum::http::{Request, StatusCode};
    use rstest::rstest;

    async fn extract_ajax(header: Option<&str>) -> bool {
        let mut builder = Request::builder().uri("/lists/1/destroy");
        if let Some(value) = header {
            builder = builder.header("X-Requested-With", value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        let AjaxRequest(is_ajax) = AjaxRequest::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        is_ajax
    }

    #[rstest]
    #[case(Some("XMLHttpRequest"), true)]
    #[case(Some("fetch"), false)]
    #[case(None, false)]
    #[tokio::test]
    async fn test_ajax_request_detection(#[case] header: Option<&str>, #[case] expected: bool) {
        assert_eq!(extract_ajax(header).await, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_storage_without_session_is_internal_error() {
        let (mut parts, ()) = Request::builder()
            .uri("/lists")
            .body(())
            .unwrap()
            .into_parts();
        let state = AppState::new(StorageBackend::Session);

        let Err(rejection) = Storage::from_request_parts(&mut parts, &state).await else {
            panic!("expected a rejection without a session");
        };
        assert_eq!(rejection.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
