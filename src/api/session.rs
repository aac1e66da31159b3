//! Session cookie middleware and extractor.
//!
//! [`SessionLayer`] resolves the `todos.session` cookie against the
//! [`SessionStore`] and makes the [`SessionHandle`] available to handlers
//! through the [`Session`] extractor.
//!
//! A request without a known cookie gets a fresh, unregistered session. It
//! is registered, and the cookie is set, only if the request leaves lists or
//! a flash message in it.

use std::task::{Context, Poll};

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Request, Response, StatusCode};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use crate::infrastructure::{SessionHandle, SessionId, SessionStore};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "todos.session";

/// Extracts the session id from the request's `Cookie` headers.
#[must_use]
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// Builds the `Set-Cookie` value for a new session.
#[must_use]
pub fn session_cookie(id: SessionId) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

// =============================================================================
// Session Extractor
// =============================================================================

/// The current request's session.
#[derive(Debug, Clone)]
pub struct Session(pub SessionHandle);

impl std::ops::Deref for Session {
    type Target = SessionHandle;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<State> FromRequestParts<State> for Session
where
    State: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .map(Session)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Session not found. Ensure SessionLayer is applied.",
            ))
    }
}

// =============================================================================
// SessionLayer
// =============================================================================

/// Tower layer attaching a session to every request.
#[derive(Debug, Clone, Default)]
pub struct SessionLayer {
    store: SessionStore,
}

impl SessionLayer {
    /// Creates a layer backed by the given store.
    #[must_use]
    pub const fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl<Service> Layer<Service> for SessionLayer {
    type Service = SessionService<Service>;

    fn layer(&self, inner: Service) -> Self::Service {
        SessionService {
            inner,
            store: self.store.clone(),
        }
    }
}

// =============================================================================
// SessionService
// =============================================================================

/// Service produced by [`SessionLayer`].
#[derive(Debug, Clone)]
pub struct SessionService<Service> {
    inner: Service,
    store: SessionStore,
}

impl<InnerService, RequestBody, ResponseBody> Service<Request<RequestBody>>
    for SessionService<InnerService>
where
    InnerService:
        Service<Request<RequestBody>, Response = Response<ResponseBody>> + Clone + Send + 'static,
    InnerService::Future: Send,
    RequestBody: Send + 'static,
    ResponseBody: Send + 'static,
{
    type Response = Response<ResponseBody>;
    type Error = InnerService::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, mut request: Request<RequestBody>) -> Self::Future {
        let cookie_id = session_id_from_headers(request.headers());
        let store = self.store.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let existing = match cookie_id {
                Some(id) => store.get(id).await,
                None => None,
            };

            let (session, is_new) = match existing {
                Some(session) => (session, false),
                None => (SessionHandle::new(SessionId::generate()), true),
            };

            request.extensions_mut().insert(session.clone());

            let mut response = inner.call(request).await?;

            if is_new && !session.is_empty().await {
                store.insert(session.clone()).await;
                tracing::debug!(session_id = %session.id(), "Created session");
                if let Ok(header_value) = HeaderValue::from_str(&session_cookie(session.id())) {
                    response.headers_mut().append(SET_COOKIE, header_value);
                }
            }

            Ok(response)
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
