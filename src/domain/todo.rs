//! To-do list entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoItem {
    /// Create an open item with a fresh random id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            done: false,
        }
    }

    /// Checkbox marker shown in the list
    pub fn marker(&self) -> &'static str {
        if self.done {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item() {
        let a = TodoItem::new("buy milk");
        let b = TodoItem::new("buy milk");
        assert_eq!(a.text, "buy milk");
        assert!(!a.done);
        assert_ne!(a.id, b.id);
        assert_eq!(a.marker(), "[ ]");
    }

    #[test]
    fn test_done_defaults_when_missing() {
        let json = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","text":"call"}"#;
        let item: TodoItem = serde_json::from_str(json).unwrap();
        assert!(!item.done);
        assert_eq!(item.text, "call");
    }
}
