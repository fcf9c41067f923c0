//! Todo store module
//!
//! Owns the authoritative in-memory collection and its persistence.
//! Every mutation rewrites the full snapshot through the configured
//! storage backend.

mod error;
mod storage;
mod todo;

pub use error::StoreError;
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{JsonFileStorage, Storage};
pub use todo::{Snapshot, Todo, TodoPatch};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::logger;

/// Component owning the authoritative todo collection.
///
/// The collection lives behind an `RwLock`; mutations hold the write lock
/// across the in-memory change and the snapshot write, so concurrent
/// mutations within the process serialize on the lock.
pub struct TodoStore {
    storage: Box<dyn Storage>,
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    /// Open a store over the given backend, loading any existing snapshot.
    ///
    /// A missing or unreadable snapshot is not fatal: the cause is logged
    /// and the store starts from an empty collection.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let todos = match storage.load() {
            Ok(snapshot) => snapshot.todos,
            Err(e) => {
                logger::log_error(&format!("Failed to load todo snapshot: {e}"));
                Vec::new()
            }
        };

        Self {
            storage,
            todos: RwLock::new(todos),
        }
    }

    /// Current collection, in insertion order.
    pub async fn get_all(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    /// Find a todo by id (linear scan).
    pub async fn get_by_id(&self, id: &str) -> Result<Todo, StoreError> {
        self.todos
            .read()
            .await
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Whether a todo with the given id exists.
    pub async fn exists(&self, id: &str) -> bool {
        self.todos.read().await.iter().any(|todo| todo.id == id)
    }

    /// Append a new todo and persist the snapshot.
    ///
    /// Assigns a fresh unique id and `created_at`; the caller decides the
    /// initial `completed` flag.
    pub async fn create(&self, title: String, completed: bool) -> Result<Todo, StoreError> {
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title,
            completed,
            created_at: Utc::now(),
            updated_at: None,
        };

        let mut todos = self.todos.write().await;
        todos.push(todo.clone());
        self.persist(&todos)?;
        Ok(todo)
    }

    /// Apply a partial update and persist.
    ///
    /// Only fields present in the patch are overwritten; `updated_at` is
    /// set to the current time.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(Utc::now());
        let updated = todo.clone();

        self.persist(&todos)?;
        Ok(updated)
    }

    /// Remove a todo, persist the remainder, and return the removed record.
    pub async fn delete(&self, id: &str) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let index = todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::NotFound)?;
        let removed = todos.remove(index);

        self.persist(&todos)?;
        Ok(removed)
    }

    /// Serialize the full collection through the storage backend.
    ///
    /// Write failures are surfaced to the caller. The in-memory change is
    /// not rolled back, so memory can run ahead of disk until the next
    /// successful write.
    fn persist(&self, todos: &[Todo]) -> Result<(), StoreError> {
        self.storage.save(&Snapshot {
            todos: todos.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn memory_store() -> TodoStore {
        TodoStore::open(Box::new(MemoryStorage::default()))
    }

    #[tokio::test]
    async fn create_assigns_id_and_defaults() {
        let store = memory_store();

        let todo = store.create("Buy milk".to_string(), false).await.unwrap();
        assert!(!todo.id.is_empty());
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert!(todo.updated_at.is_none());

        let other = store.create("Buy bread".to_string(), false).await.unwrap();
        assert_ne!(todo.id, other.id);
    }

    #[tokio::test]
    async fn get_by_id_returns_created_record() {
        let store = memory_store();
        let created = store.create("Buy milk".to_string(), true).await.unwrap();

        let fetched = store.get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(store.exists(&created.id).await);
    }

    #[tokio::test]
    async fn update_with_completed_only_keeps_title() {
        let store = memory_store();
        let created = store.create("Buy milk".to_string(), false).await.unwrap();

        let patch = TodoPatch {
            title: None,
            completed: Some(true),
        };
        let updated = store.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.title, "Buy milk");
        assert!(updated.completed);
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_with_title_only_keeps_completed() {
        let store = memory_store();
        let created = store.create("Buy milk".to_string(), true).await.unwrap();

        let patch = TodoPatch {
            title: Some("Buy oat milk".to_string()),
            completed: None,
        };
        let updated = store.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.title, "Buy oat milk");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn delete_returns_record_and_removes_it() {
        let store = memory_store();
        let created = store.create("Buy milk".to_string(), false).await.unwrap();

        let removed = store.delete(&created.id).await.unwrap();
        assert_eq!(removed.id, created.id);

        assert!(matches!(
            store.get_by_id(&created.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn operations_on_missing_id_do_not_mutate() {
        let store = memory_store();
        store.create("Buy milk".to_string(), false).await.unwrap();

        assert!(matches!(
            store.get_by_id("missing").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.update("missing", TodoPatch::default()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.delete("missing").await,
            Err(StoreError::NotFound)
        ));

        assert_eq!(store.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn insertion_order_is_preserved() {
        let store = memory_store();
        for title in ["one", "two", "three"] {
            store.create(title.to_string(), false).await.unwrap();
        }

        let titles: Vec<String> = store
            .get_all()
            .await
            .into_iter()
            .map(|todo| todo.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn mutating_a_returned_copy_does_not_corrupt_the_store() {
        let store = memory_store();
        let created = store.create("Buy milk".to_string(), false).await.unwrap();

        let mut copy = store.get_all().await;
        copy[0].title = "changed".to_string();

        assert_eq!(store.get_by_id(&created.id).await.unwrap().title, "Buy milk");
    }

    #[tokio::test]
    async fn reopening_reproduces_the_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = TodoStore::open(Box::new(JsonFileStorage::new(&path)));
        let a = store.create("first".to_string(), false).await.unwrap();
        let b = store.create("second".to_string(), true).await.unwrap();
        store
            .update(
                &a.id,
                TodoPatch {
                    title: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap();

        let reopened = TodoStore::open(Box::new(JsonFileStorage::new(&path)));
        let todos = reopened.get_all().await;
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].id, a.id);
        assert_eq!(todos[0].title, "first");
        assert!(todos[0].completed);
        assert_eq!(todos[1].id, b.id);
        assert_eq!(todos[1].title, "second");
        assert!(todos[1].completed);
    }

    #[tokio::test]
    async fn unreadable_snapshot_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = TodoStore::open(Box::new(JsonFileStorage::new(&path)));
        assert!(store.get_all().await.is_empty());
    }
}
