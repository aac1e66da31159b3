//! Derived display state for lists and todos.
//!
//! Everything here reads the model and never reorders stored data.

use super::list::{List, Todo};

/// CSS class applied to completed lists and todos.
pub const COMPLETE_CLASS: &str = "complete";

/// Returns true when the list has at least one todo and none are incomplete.
#[must_use]
pub fn is_list_complete(list: &List) -> bool {
    todos_count(list) > 0 && incomplete_count(list) == 0
}

/// Number of todos in the list.
#[must_use]
pub fn todos_count(list: &List) -> usize {
    list.todos.len()
}

/// Number of todos not yet completed.
#[must_use]
pub fn incomplete_count(list: &List) -> usize {
    list.todos.iter().filter(|todo| !todo.completed).count()
}

/// CSS class for a list row.
#[must_use]
pub fn list_class(list: &List) -> Option<&'static str> {
    is_list_complete(list).then_some(COMPLETE_CLASS)
}

/// Stable two-pass ordering: items for which `is_done` is false first, then
/// the rest, each group keeping its original relative order.
pub fn partition_stable<'a, T>(items: &'a [T], is_done: impl Fn(&T) -> bool) -> Vec<&'a T> {
    let (done, pending): (Vec<&T>, Vec<&T>) = items.iter().partition(|item| is_done(item));
    pending.into_iter().chain(done).collect()
}

/// Orders lists with incomplete lists first.
#[must_use]
pub fn sort_lists(lists: &[List]) -> Vec<&List> {
    partition_stable(lists, is_list_complete)
}

/// Orders the todos of a list with incomplete todos first.
#[must_use]
pub fn sort_todos(list: &List) -> Vec<&Todo> {
    partition_stable(&list.todos, |todo| todo.completed)
}
