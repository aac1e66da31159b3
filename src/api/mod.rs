//! API module for HTTP handlers.
//!
//! This module contains the router, the session middleware and the
//! request/response handlers that render pages or redirect.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod outcome;
pub mod routes;
pub mod session;
pub mod views;

pub use dto::{CompletedForm, ListNameForm, TodoForm};
pub use error::ApiErrorResponse;
pub use extract::{AjaxRequest, Storage};
pub use handlers::{AppState, HandlerResult};
pub use outcome::Outcome;
pub use routes::create_router;
pub use session::{SESSION_COOKIE, Session, SessionLayer, SessionService};
pub use views::{EditListView, ListRow, ListView, ListsView, NewListView, Page, TodoRow};
