//! Common test helpers for integration tests.
//!
//! [`TestClient`] drives the router with `oneshot` and carries the session
//! cookie between requests like a browser would.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_lists::api::{AppState, create_router};
use todo_lists::infrastructure::{SessionStore, StorageBackend};

// =============================================================================
// Test Response
// =============================================================================

/// Status, redirect target and body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Asserts a 303 redirect to `path`.
    pub fn assert_redirect(&self, path: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(path));
    }

    /// Byte offset of `needle` in the body, panicking if absent.
    pub fn position_of(&self, needle: &str) -> usize {
        self.body
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} not found in body"))
    }
}

// =============================================================================
// Test Client
// =============================================================================

/// A browser-like client bound to one session.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Creates a client against a fresh session-mode application.
    pub fn new() -> Self {
        let router = create_router(AppState::new(StorageBackend::Session), SessionStore::new());
        Self::with_router(router)
    }

    /// Creates a client against an existing router, starting without a session.
    pub fn with_router(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request(Method::GET, path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Submits an urlencoded form body.
    pub async fn post_form(&mut self, path: &str, body: &str) -> TestResponse {
        let request = self
            .request(Method::POST, path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Sends a POST the way the front-end script does.
    pub async fn post_ajax(&mut self, path: &str) -> TestResponse {
        let request = self
            .request(Method::POST, path)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Follows the redirect in `response` with a GET.
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response
            .location
            .clone()
            .expect("response has no Location header");
        self.get(&location).await
    }

    /// Creates a list and returns the redirect response.
    pub async fn create_list(&mut self, name: &str) -> TestResponse {
        self.post_form("/lists", &format!("list_name={name}")).await
    }

    /// Adds a todo to the list and returns the redirect response.
    pub async fn create_todo(&mut self, list_id: i64, name: &str) -> TestResponse {
        self.post_form(&format!("/lists/{list_id}/todos"), &format!("todo={name}"))
            .await
    }

    fn request(&self, method: Method, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
