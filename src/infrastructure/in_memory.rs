//! Session-backed repository implementation.
//!
//! The whole list collection lives inside the caller's [`SessionHandle`], so
//! changes are visible to that browser session only. List and todo ids are
//! assigned as max-plus-one within their collection.

use crate::domain::{List, ListId, Todo, TodoId, next_list_id};
use crate::infrastructure::{ListRepository, RepositoryError, RepositoryResult, SessionHandle};

// =============================================================================
// Session List Repository
// =============================================================================

/// [`ListRepository`] that stores lists in the request's session.
///
/// # Example
///
/// ```ignore
/// let repository = SessionListRepository::new(session.clone());
/// let id = repository.create_list("Groceries").await?;
/// let list = repository.find_list(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionListRepository {
    session: SessionHandle,
}

impl SessionListRepository {
    /// Creates a repository over the given session.
    #[must_use]
    pub const fn new(session: SessionHandle) -> Self {
        Self { session }
    }
}

fn list_mut(lists: &mut [List], id: ListId) -> Option<&mut List> {
    lists.iter_mut().find(|list| list.id == id)
}

impl ListRepository for SessionListRepository {
    fn all_lists(&self) -> RepositoryResult<'_, Vec<List>> {
        Box::pin(async move { Ok(self.session.read(|data| data.lists.clone()).await) })
    }

    fn find_list(&self, id: ListId) -> RepositoryResult<'_, List> {
        Box::pin(async move {
            self.session
                .read(|data| data.lists.iter().find(|list| list.id == id).cloned())
                .await
                .ok_or(RepositoryError::NotFound(id))
        })
    }

    fn create_list(&self, name: &str) -> RepositoryResult<'_, ListId> {
        let name = name.to_owned();
        Box::pin(async move {
            let id = self
                .session
                .write(|data| {
                    let id = next_list_id(&data.lists);
                    data.lists.push(List::new(id, name));
                    id
                })
                .await;
            Ok(id)
        })
    }

    fn rename_list(&self, id: ListId, name: &str) -> RepositoryResult<'_, ()> {
        let name = name.to_owned();
        Box::pin(async move {
            self.session
                .write(|data| {
                    if let Some(list) = list_mut(&mut data.lists, id) {
                        list.name = name;
                    }
                })
                .await;
            Ok(())
        })
    }

    fn delete_list(&self, id: ListId) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            self.session
                .write(|data| data.lists.retain(|list| list.id != id))
                .await;
            Ok(())
        })
    }

    fn create_todo(&self, list_id: ListId, name: &str) -> RepositoryResult<'_, TodoId> {
        let name = name.to_owned();
        Box::pin(async move {
            self.session
                .write(|data| {
                    let list = list_mut(&mut data.lists, list_id)?;
                    let id = list.next_todo_id();
                    list.todos.push(Todo::new(id, name));
                    Some(id)
                })
                .await
                .ok_or(RepositoryError::NotFound(list_id))
        })
    }

    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            self.session
                .write(|data| {
                    if let Some(list) = list_mut(&mut data.lists, list_id) {
                        list.todos.retain(|todo| todo.id != todo_id);
                    }
                })
                .await;
            Ok(())
        })
    }

    fn set_todo_completed(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            self.session
                .write(|data| {
                    let todo = list_mut(&mut data.lists, list_id)
                        .and_then(|list| list.todos.iter_mut().find(|todo| todo.id == todo_id));
                    if let Some(todo) = todo {
                        todo.completed = completed;
                    }
                })
                .await;
            Ok(())
        })
    }

    fn complete_all_todos(&self, list_id: ListId) -> RepositoryResult<'_, ()> {
        Box::pin(async move {
            self.session
                .write(|data| {
                    if let Some(list) = list_mut(&mut data.lists, list_id) {
                        for todo in &mut list.todos {
                            todo.completed = true;
                        }
                    }
                })
                .await;
            Ok(())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
