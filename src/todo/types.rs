//! Todo resource types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A stored todo item.
///
/// Returned records are owned snapshots; mutating the store produces a new
/// snapshot under the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Opaque unique identifier, assigned by the store at creation.
    pub id: String,
    /// Title text, never empty or whitespace-only once stored.
    pub title: String,
    /// Optional free-form description. Omitted from JSON when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag, false at creation.
    pub completed: bool,
    /// Set once at creation, immutable thereafter.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Reset on every successful mutation. Always >= `created_at`.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated fields for creating a todo.
///
/// Callers trim and validate before constructing this; the store treats the
/// values as ready to persist.
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description, if one was supplied.
    pub description: Option<String>,
}

/// Field-presence patch for partial updates.
///
/// `None` means "leave unchanged". `Some` replaces the stored value, including
/// `Some(String::new())` for an intentionally empty description. This keeps
/// "not supplied" and "supplied as empty/false" distinguishable without
/// sentinel values.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    /// Replacement title, already validated non-empty by the caller.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}
