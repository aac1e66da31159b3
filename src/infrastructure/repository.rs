//! Repository trait for lists and their todos.
//!
//! Both storage variants implement [`ListRepository`]; handlers only ever see
//! a `Box<dyn ListRepository>`, chosen once at startup by the factory.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{List, ListId, TodoId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No list with this id exists.
    #[error("List not found: {0}")]
    NotFound(ListId),

    /// The database rejected a statement or could not be reached.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The request carries no session to store lists in.
    #[error("Session unavailable")]
    SessionUnavailable,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

/// Result type returned by every repository operation.
pub type RepositoryResult<'a, T> = BoxFuture<'a, Result<T, RepositoryError>>;

// =============================================================================
// List Repository
// =============================================================================

/// Storage for lists and the todos they own.
///
/// Mutators that target an absent list or todo are silent no-ops; callers
/// confirm existence with [`ListRepository::find_list`] first.
pub trait ListRepository: Send + Sync {
    /// Returns every list, each with its todos, in storage order.
    fn all_lists(&self) -> RepositoryResult<'_, Vec<List>>;

    /// Finds a list by id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when no list has this id.
    fn find_list(&self, id: ListId) -> RepositoryResult<'_, List>;

    /// Creates an empty list and returns its freshly assigned id.
    fn create_list(&self, name: &str) -> RepositoryResult<'_, ListId>;

    /// Renames a list.
    fn rename_list(&self, id: ListId, name: &str) -> RepositoryResult<'_, ()>;

    /// Deletes a list together with all of its todos.
    fn delete_list(&self, id: ListId) -> RepositoryResult<'_, ()>;

    /// Appends an incomplete todo and returns its id, unique within the list.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the list does not exist.
    fn create_todo(&self, list_id: ListId, name: &str) -> RepositoryResult<'_, TodoId>;

    /// Deletes a single todo.
    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> RepositoryResult<'_, ()>;

    /// Sets the completion flag of a single todo.
    fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> RepositoryResult<'_, ()>;

    /// Marks every todo of the list as completed.
    fn complete_all_todos(&self, list_id: ListId) -> RepositoryResult<'_, ()>;
}

// =============================================================================
// Tests
// =============================================================================
