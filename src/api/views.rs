//! Page templates and the view rows they display.
//!
//! Rows are computed from domain lists with the presentation helpers so the
//! templates only print fields.

use askama::Template;

use crate::domain::presentation::COMPLETE_CLASS;
use crate::domain::{
    List, ListId, Todo, TodoId, incomplete_count, list_class, sort_lists, sort_todos, todos_count,
};
use crate::infrastructure::Flash;

// =============================================================================
// View Rows
// =============================================================================

/// One list as shown in the overview and on its own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: ListId,
    pub name: String,
    /// `"complete"` or empty.
    pub class: &'static str,
    pub incomplete: usize,
    pub total: usize,
}

impl From<&List> for ListRow {
    fn from(list: &List) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            class: list_class(list).unwrap_or_default(),
            incomplete: incomplete_count(list),
            total: todos_count(list),
        }
    }
}

/// One todo as shown on a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
    pub class: &'static str,
    /// Value submitted by the toggle form; the opposite of `completed`.
    pub toggle_value: &'static str,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name.clone(),
            completed: todo.completed,
            class: if todo.completed { COMPLETE_CLASS } else { "" },
            toggle_value: if todo.completed { "false" } else { "true" },
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// All lists, incomplete ones first.
#[derive(Debug, Template)]
#[template(path = "lists.html")]
pub struct ListsView {
    pub flash: Flash,
    pub lists: Vec<ListRow>,
}

impl ListsView {
    #[must_use]
    pub fn new(lists: &[List], flash: Flash) -> Self {
        Self {
            flash,
            lists: sort_lists(lists).into_iter().map(ListRow::from).collect(),
        }
    }
}

/// The new list form.
#[derive(Debug, Template)]
#[template(path = "new_list.html")]
pub struct NewListView {
    pub flash: Flash,
    pub draft: String,
}

/// A single list with its todos and the add todo form.
#[derive(Debug, Template)]
#[template(path = "list.html")]
pub struct ListView {
    pub flash: Flash,
    pub list: ListRow,
    pub todos: Vec<TodoRow>,
    pub draft: String,
}

impl ListView {
    #[must_use]
    pub fn new(list: &List, draft: impl Into<String>, flash: Flash) -> Self {
        Self {
            flash,
            list: ListRow::from(list),
            todos: sort_todos(list).into_iter().map(TodoRow::from).collect(),
            draft: draft.into(),
        }
    }
}

/// The rename form for a list.
#[derive(Debug, Template)]
#[template(path = "edit_list.html")]
pub struct EditListView {
    pub flash: Flash,
    pub list: ListRow,
    pub draft: String,
}

impl EditListView {
    #[must_use]
    pub fn new(list: &List, draft: impl Into<String>, flash: Flash) -> Self {
        Self {
            flash,
            list: ListRow::from(list),
            draft: draft.into(),
        }
    }
}

// =============================================================================
// Page
// =============================================================================

/// Any page the handlers can render.
#[derive(Debug)]
pub enum Page {
    Lists(ListsView),
    NewList(NewListView),
    List(ListView),
    EditList(EditListView),
}

impl Page {
    /// Renders the page to HTML.
    ///
    /// # Errors
    ///
    /// Returns the template error if rendering fails.
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Lists(view) => view.render(),
            Self::NewList(view) => view.render(),
            Self::List(view) => view.render(),
            Self::EditList(view) => view.render(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
