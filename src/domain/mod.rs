//! Domain module for to-do lists.
//!
//! This module contains the list and todo model, name validation and the
//! presentation helpers consumed by the views.

pub mod list;
pub mod presentation;
pub mod validation;

pub use list::{List, ListId, Todo, TodoId, next_list_id};
pub use presentation::{
    incomplete_count, is_list_complete, list_class, partition_stable, sort_lists, sort_todos,
    todos_count,
};
pub use validation::{ValidationError, validate_list_name, validate_todo_name};
