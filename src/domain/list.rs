//! List and todo domain model.
//!
//! A `List` exclusively owns its `Todo`s. List identifiers are unique across
//! the whole store, todo identifiers only within their owning list.

use std::num::ParseIntError;
use std::str::FromStr;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListId(i64);

impl ListId {
    /// Creates a `ListId` from a raw integer.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parses a path segment, returning `None` for anything that is not a
    /// decimal integer.
    ///
    /// Handlers treat `None` exactly like an id that was never created.
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        segment.trim().parse().ok()
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for ListId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse().map(Self)
    }
}

/// Identifier of a todo, unique within its owning list only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from a raw integer.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Parses a path segment, returning `None` for non-integers.
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        segment.trim().parse().ok()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse().map(Self)
    }
}

// =============================================================================
// Todo
// =============================================================================

/// A named item with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Identifier, unique within the owning list.
    pub id: TodoId,
    /// Display name (1 to 100 characters when created through the handlers).
    pub name: String,
    /// Whether the todo has been completed.
    pub completed: bool,
}

impl Todo {
    /// Creates an incomplete todo.
    #[must_use]
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    /// Returns a copy with the given completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

// =============================================================================
// List
// =============================================================================

/// A named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    /// Identifier, unique across the store.
    pub id: ListId,
    /// Display name, unique among lists at creation and rename time.
    pub name: String,
    /// Todos in insertion order.
    pub todos: Vec<Todo>,
}

impl List {
    /// Creates an empty list.
    #[must_use]
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Returns the list with its todos replaced.
    #[must_use]
    pub fn with_todos(mut self, todos: Vec<Todo>) -> Self {
        self.todos = todos;
        self
    }

    /// Returns the todo with the given id, if any.
    #[must_use]
    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Returns the id a newly added todo would receive (max + 1, starting at 1).
    #[must_use]
    pub fn next_todo_id(&self) -> TodoId {
        let max = self.todos.iter().map(|todo| todo.id.value()).max().unwrap_or(0);
        TodoId::new(max + 1)
    }
}

/// Returns the id a newly created list would receive (max + 1, starting at 1).
#[must_use]
pub fn next_list_id(lists: &[List]) -> ListId {
    let max = lists.iter().map(|list| list.id.value()).max().unwrap_or(0);
    ListId::new(max + 1)
}

// =============================================================================
// Tests
// =============================================================================
