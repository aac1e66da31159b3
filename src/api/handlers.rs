//! HTTP handlers for lists and todos.
//!
//! Every handler that addresses a list loads it first. A missing list or an
//! id that does not parse sets the not-found flash and redirects to the
//! overview. Validation failures re-render the submitting form with the
//! trimmed input and the error flash.

use axum::extract::{Form, Path};

use super::dto::{CompletedForm, ListNameForm, TodoForm};
use super::error::ApiErrorResponse;
use super::extract::{AjaxRequest, Storage};
use super::outcome::Outcome;
use super::session::Session;
use super::views::{EditListView, ListView, ListsView, NewListView, Page};
use crate::domain::{List, ListId, TodoId, validate_list_name, validate_todo_name};
use crate::infrastructure::{ListRepository, RepositoryError, SessionHandle, StorageBackend};

/// Path of the lists overview.
pub const LISTS_PATH: &str = "/lists";

pub const LIST_NOT_FOUND: &str = "The specified list was not found.";
pub const LIST_CREATED: &str = "The list has been created.";
pub const LIST_UPDATED: &str = "The list has been updated.";
pub const LIST_DELETED: &str = "The list has been deleted.";
pub const TODO_ADDED: &str = "The todo was added.";
pub const TODO_DELETED: &str = "The todo has been deleted.";
pub const TODO_UPDATED: &str = "The todo has been updated.";
pub const TODOS_COMPLETED: &str = "All todos are marked completed.";

/// Result type shared by all handlers.
pub type HandlerResult = Result<Outcome, ApiErrorResponse>;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage variant chosen at startup.
    pub backend: StorageBackend,
}

impl AppState {
    #[must_use]
    pub const fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn list_path(id: ListId) -> String {
    format!("{LISTS_PATH}/{id}")
}

/// Loads the list addressed by a path segment.
///
/// Returns `Ok(None)` after setting the not-found flash when the segment
/// does not parse or no such list exists.
async fn load_list(
    storage: &dyn ListRepository,
    session: &SessionHandle,
    segment: &str,
) -> Result<Option<List>, ApiErrorResponse> {
    let Some(id) = ListId::from_path_segment(segment) else {
        tracing::warn!(segment, "Unparseable list id");
        session.flash_error(LIST_NOT_FOUND).await;
        return Ok(None);
    };

    match storage.find_list(id).await {
        Ok(list) => Ok(Some(list)),
        Err(RepositoryError::NotFound(_)) => {
            tracing::warn!(list_id = %id, "List not found");
            session.flash_error(LIST_NOT_FOUND).await;
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

// =============================================================================
// Lists
// =============================================================================

/// GET /
pub async fn root() -> Outcome {
    Outcome::redirect(LISTS_PATH)
}

/// GET /lists
pub async fn lists(session: Session, storage: Storage) -> HandlerResult {
    let lists = storage.all_lists().await?;
    let flash = session.take_flash().await;
    Ok(Page::Lists(ListsView::new(&lists, flash)).into())
}

/// GET /lists/new
pub async fn new_list(session: Session) -> HandlerResult {
    let flash = session.take_flash().await;
    Ok(Page::NewList(NewListView {
        flash,
        draft: String::new(),
    })
    .into())
}

/// POST /lists
pub async fn create_list(
    session: Session,
    storage: Storage,
    Form(form): Form<ListNameForm>,
) -> HandlerResult {
    let name = form.trimmed();
    let existing = storage.all_lists().await?;

    if let Err(error) = validate_list_name(name, &existing) {
        tracing::debug!(%error, "Rejected list name");
        session.flash_error(error.to_string()).await;
        let flash = session.take_flash().await;
        return Ok(Page::NewList(NewListView {
            flash,
            draft: name.to_string(),
        })
        .into());
    }

    let id = storage.create_list(name).await?;
    tracing::info!(list_id = %id, "Created list");
    session.flash_success(LIST_CREATED).await;
    Ok(Outcome::redirect(LISTS_PATH))
}

/// GET /lists/{id}
pub async fn show_list(
    session: Session,
    storage: Storage,
    Path(list_id): Path<String>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };
    let flash = session.take_flash().await;
    Ok(Page::List(ListView::new(&list, "", flash)).into())
}

/// GET /lists/{id}/edit
pub async fn edit_list(
    session: Session,
    storage: Storage,
    Path(list_id): Path<String>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };
    let flash = session.take_flash().await;
    Ok(Page::EditList(EditListView::new(&list, list.name.clone(), flash)).into())
}

/// POST /lists/{id}
pub async fn rename_list(
    session: Session,
    storage: Storage,
    Path(list_id): Path<String>,
    Form(form): Form<ListNameForm>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };
    let name = form.trimmed();
    let existing = storage.all_lists().await?;

    if let Err(error) = validate_list_name(name, &existing) {
        tracing::debug!(%error, "Rejected list name");
        session.flash_error(error.to_string()).await;
        let flash = session.take_flash().await;
        return Ok(Page::EditList(EditListView::new(&list, name, flash)).into());
    }

    storage.rename_list(list.id, name).await?;
    session.flash_success(LIST_UPDATED).await;
    Ok(Outcome::redirect(list_path(list.id)))
}

/// POST /lists/{id}/destroy
pub async fn delete_list(
    session: Session,
    storage: Storage,
    AjaxRequest(is_ajax): AjaxRequest,
    Path(list_id): Path<String>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };

    storage.delete_list(list.id).await?;
    tracing::info!(list_id = %list.id, "Deleted list");

    if is_ajax {
        return Ok(Outcome::Location(LISTS_PATH));
    }
    session.flash_success(LIST_DELETED).await;
    Ok(Outcome::redirect(LISTS_PATH))
}

// =============================================================================
// Todos
// =============================================================================

/// POST /lists/{id}/todos
pub async fn create_todo(
    session: Session,
    storage: Storage,
    Path(list_id): Path<String>,
    Form(form): Form<TodoForm>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };
    let name = form.trimmed();

    if let Err(error) = validate_todo_name(name) {
        tracing::debug!(%error, "Rejected todo name");
        session.flash_error(error.to_string()).await;
        let flash = session.take_flash().await;
        return Ok(Page::List(ListView::new(&list, name, flash)).into());
    }

    let todo_id = match storage.create_todo(list.id, name).await {
        Ok(todo_id) => todo_id,
        Err(RepositoryError::NotFound(_)) => {
            tracing::warn!(list_id = %list.id, "List removed before todo was added");
            session.flash_error(LIST_NOT_FOUND).await;
            return Ok(Outcome::redirect(LISTS_PATH));
        }
        Err(error) => return Err(error.into()),
    };
    tracing::info!(list_id = %list.id, todo_id = %todo_id, "Added todo");
    session.flash_success(TODO_ADDED).await;
    Ok(Outcome::redirect(list_path(list.id)))
}

/// POST /lists/{id}/todos/{todo_id}/destroy
pub async fn delete_todo(
    session: Session,
    storage: Storage,
    AjaxRequest(is_ajax): AjaxRequest,
    Path((list_id, todo_id)): Path<(String, String)>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };

    // An unparseable todo id matches no todo.
    if let Some(todo_id) = TodoId::from_path_segment(&todo_id) {
        storage.delete_todo(list.id, todo_id).await?;
    }

    if is_ajax {
        return Ok(Outcome::NoContent);
    }
    session.flash_success(TODO_DELETED).await;
    Ok(Outcome::redirect(list_path(list.id)))
}

/// POST /lists/{id}/todos/{todo_id}
pub async fn toggle_todo(
    session: Session,
    storage: Storage,
    Path((list_id, todo_id)): Path<(String, String)>,
    Form(form): Form<CompletedForm>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };

    if let Some(todo_id) = TodoId::from_path_segment(&todo_id) {
        storage
            .set_todo_completed(list.id, todo_id, form.is_completed())
            .await?;
    }

    session.flash_success(TODO_UPDATED).await;
    Ok(Outcome::redirect(list_path(list.id)))
}

/// POST /lists/{id}/complete_all
pub async fn complete_all(
    session: Session,
    storage: Storage,
    Path(list_id): Path<String>,
) -> HandlerResult {
    let Some(list) = load_list(&*storage, &session, &list_id).await? else {
        return Ok(Outcome::redirect(LISTS_PATH));
    };

    storage.complete_all_todos(list.id).await?;
    session.flash_success(TODOS_COMPLETED).await;
    Ok(Outcome::redirect(list_path(list.id)))
}

// =============================================================================
// Tests
// =============================================================================
