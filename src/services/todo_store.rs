//! Persisted to-do list store.

use crate::domain::TodoItem;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// To-do list backed by a JSON file.
///
/// Every mutation goes through [`TodoStore::update`], which writes the whole
/// list back to disk and only keeps the change once the write succeeded.
#[derive(Debug)]
pub struct TodoStore {
    path: PathBuf,
    items: Vec<TodoItem>,
}

impl TodoStore {
    /// Open the store at `path`, treating a missing file or `null` as empty
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let parsed: Option<Vec<TodoItem>> = serde_json::from_str(&raw)?;
            parsed.unwrap_or_default()
        } else {
            Vec::new()
        };

        tracing::debug!("Loaded {} to-do items from {:?}", items.len(), path);
        Ok(Self { path, items })
    }

    /// Default location for a storage key inside the user's data directory
    pub fn default_path(storage_key: &str) -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grid-tui", "grid-tui")
            .map(|dirs| dirs.data_dir().join(format!("{}.json", storage_key)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply a change to the list and persist the result
    pub fn update<F>(&mut self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Vec<TodoItem>),
    {
        let mut updated = self.items.clone();
        f(&mut updated);
        self.persist(&updated)?;
        self.items = updated;
        Ok(())
    }

    /// Append a new open item
    pub fn add(&mut self, text: &str) -> StoreResult<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }

        let item = TodoItem::new(text);
        let id = item.id;
        self.update(|items| items.push(item))?;
        Ok(id)
    }

    /// Flip the done flag of an item
    pub fn toggle(&mut self, id: Uuid) -> StoreResult<()> {
        let idx = self.index_of(id)?;
        self.update(|items| items[idx].done = !items[idx].done)
    }

    pub fn remove(&mut self, id: Uuid) -> StoreResult<()> {
        let idx = self.index_of(id)?;
        self.update(|items| {
            items.remove(idx);
        })
    }

    fn index_of(&self, id: Uuid) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::ItemNotFound(id))
    }

    fn persist(&self, items: &[TodoItem]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(items)?;

        let written = match self.path.parent() {
            Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::write(&self.path, json)),
            None => fs::write(&self.path, json),
        };
        written.map_err(|e| {
            tracing::warn!("Failed to write to-do list to {:?}: {}", self.path, e);
            StoreError::Io(e)
        })?;

        tracing::debug!("Persisted {} to-do items", items.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("data").join("st-todo-list.json")
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TodoStore::open(store_path(&dir)).unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_open_null_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "null").unwrap();

        let store = TodoStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_malformed_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "{not json").unwrap();

        let err = TodoStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let mut store = TodoStore::open(&path).unwrap();
        let id = store.add("  write tests  ").unwrap();
        store.add("ship").unwrap();
        assert!(path.exists());

        let reloaded = TodoStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.items()[0].id, id);
        assert_eq!(reloaded.items()[0].text, "write tests");
        assert_eq!(reloaded.items()[1].text, "ship");
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let dir = TempDir::new().unwrap();
        let mut store = TodoStore::open(store_path(&dir)).unwrap();
        assert!(matches!(store.add("   "), Err(StoreError::EmptyText)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_and_remove() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        let mut store = TodoStore::open(&path).unwrap();
        let first = store.add("first").unwrap();
        let second = store.add("second").unwrap();

        store.toggle(first).unwrap();
        assert!(store.items()[0].done);
        store.toggle(first).unwrap();
        assert!(!store.items()[0].done);
        store.toggle(second).unwrap();

        store.remove(first).unwrap();
        let reloaded = TodoStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.items()[0].id, second);
        assert!(reloaded.items()[0].done);
    }

    #[test]
    fn test_failed_write_keeps_previous_items() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = TodoStore::open(blocker.join("list.json")).unwrap();
        assert!(matches!(store.add("ghost"), Err(StoreError::Io(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_toggle_leaves_item_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        let mut store = TodoStore::open(&path).unwrap();
        let id = store.add("water plants").unwrap();

        // Replace the file with a directory so the next write fails
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.toggle(id).is_err());
        assert!(!store.items()[0].done);
    }

    #[test]
    fn test_unknown_id() {
        let dir = TempDir::new().unwrap();
        let mut store = TodoStore::open(store_path(&dir)).unwrap();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.toggle(missing),
            Err(StoreError::ItemNotFound(id)) if id == missing
        ));
        assert!(matches!(store.remove(missing), Err(StoreError::ItemNotFound(_))));
    }
}
