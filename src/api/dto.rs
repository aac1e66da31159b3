//! Form bodies submitted by the browser.
//!
//! Every field defaults to empty so that a missing field reaches validation
//! instead of being rejected by the extractor.

use serde::Deserialize;

// =============================================================================
// List Forms
// =============================================================================

/// Body of the create and rename list forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNameForm {
    /// Submitted list name, untrimmed.
    #[serde(default)]
    pub list_name: String,
}

impl ListNameForm {
    /// The submitted name without surrounding whitespace.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.list_name.trim()
    }
}

// =============================================================================
// Todo Forms
// =============================================================================

/// Body of the add todo form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoForm {
    /// Submitted todo name, untrimmed.
    #[serde(default)]
    pub todo: String,
}

impl TodoForm {
    /// The submitted name without surrounding whitespace.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.todo.trim()
    }
}

/// Body of the toggle todo form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletedForm {
    #[serde(default)]
    pub completed: Option<String>,
}

impl CompletedForm {
    /// Only the literal `"true"` marks the todo completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed.as_deref() == Some("true")
    }
}
