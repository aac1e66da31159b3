//! Router configuration.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, complete_all, create_list, create_todo, delete_list, delete_todo, edit_list, lists,
    new_list, rename_list, root, show_list, toggle_todo,
};
use super::session::SessionLayer;
use crate::infrastructure::SessionStore;

/// Creates the application router.
///
/// Every request passes through [`SessionLayer`], so handlers can rely on a
/// session being present.
pub fn create_router(state: AppState, sessions: SessionStore) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/lists", get(lists).post(create_list))
        .route("/lists/new", get(new_list))
        .route("/lists/{id}", get(show_list).post(rename_list))
        .route("/lists/{id}/edit", get(edit_list))
        .route("/lists/{id}/destroy", post(delete_list))
        .route("/lists/{id}/complete_all", post(complete_all))
        .route("/lists/{id}/todos", post(create_todo))
        .route("/lists/{id}/todos/{todo_id}", post(toggle_todo))
        .route("/lists/{id}/todos/{todo_id}/destroy", post(delete_todo))
        .layer(SessionLayer::new(sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Tests
// =============================================================================
