//! In-memory todo storage.

use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{NewTodo, Todo, TodoPatch};

/// Sole owner of the in-memory todo collection.
///
/// Cloning hands out another handle to the same collection; the store is
/// constructed once in `main` and passed to handlers through app state.
/// Every mutation holds the write lock for its whole critical section, so
/// concurrent readers never observe a partially-applied change and no two
/// mutations race to produce a lost update.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Arc<RwLock<HashMap<String, Todo>>>,
}

impl TodoStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every live todo.
    ///
    /// Iteration order is not contractually meaningful.
    pub async fn find_all(&self) -> Vec<Todo> {
        self.todos.read().await.values().cloned().collect()
    }

    /// Look up a single todo by id. `None` when no live record has that id.
    pub async fn find_by_id(&self, id: &str) -> Option<Todo> {
        self.todos.read().await.get(id).cloned()
    }

    /// Create a new todo under a fresh unique id.
    ///
    /// The caller is responsible for validating `fields` beforehand; the
    /// store does not re-check business rules.
    pub async fn create(&self, fields: NewTodo) -> Todo {
        let now = OffsetDateTime::now_utc();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };

        self.todos
            .write()
            .await
            .insert(todo.id.clone(), todo.clone());
        todo
    }

    /// Merge the supplied fields onto an existing todo and stamp `updated_at`.
    ///
    /// Returns `None` without any side effect when `id` does not exist.
    /// Merging is by field presence only: an unsupplied field retains its
    /// prior value.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Option<Todo> {
        let mut todos = self.todos.write().await;
        let existing = todos.get_mut(id)?;

        if let Some(title) = patch.title {
            existing.title = title;
        }
        if let Some(description) = patch.description {
            existing.description = Some(description);
        }
        if let Some(completed) = patch.completed {
            existing.completed = completed;
        }
        existing.updated_at = OffsetDateTime::now_utc();

        Some(existing.clone())
    }

    /// Remove a todo, reporting whether a live record existed.
    ///
    /// Repeated deletes of the same id after the first all return false.
    pub async fn delete(&self, id: &str) -> bool {
        self.todos.write().await.remove(id).is_some()
    }

    /// Remove all todos unconditionally.
    ///
    /// Test-isolation helper; not part of the request surface.
    pub async fn clear(&self) {
        self.todos.write().await.clear();
    }
}
