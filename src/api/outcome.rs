//! What a handler answers with.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::error::ApiErrorResponse;
use super::views::Page;

/// The result of a successful handler.
#[derive(Debug)]
pub enum Outcome {
    /// A rendered HTML page (200).
    Render(Page),
    /// See Other redirect to the given path (303).
    Redirect(String),
    /// Plain-text path the client should navigate to (200, AJAX list deletion).
    Location(&'static str),
    /// Empty body (204, AJAX todo deletion).
    NoContent,
}

impl Outcome {
    #[must_use]
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::Redirect(path.into())
    }
}

impl From<Page> for Outcome {
    fn from(page: Page) -> Self {
        Self::Render(page)
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Self::Render(page) => match page.render() {
                Ok(html) => Html(html).into_response(),
                Err(error) => ApiErrorResponse::from(error).into_response(),
            },
            Self::Redirect(path) => Redirect::to(&path).into_response(),
            Self::Location(path) => (StatusCode::OK, path).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
