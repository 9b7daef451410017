//! Durable key-value storage
//!
//! The game stores exactly one value (the high score). On the web it lives
//! in LocalStorage; natively and in tests an in-memory map stands in.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Why a write did not land
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend missing (no window, storage disabled)
    Unavailable,
    /// Backend refused the write (quota, private mode)
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::Rejected(reason) => write!(f, "storage rejected write: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// and inspect what a session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_entries() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        assert_eq!(observer.get("k"), None);
        store.set("k", "42").unwrap();
        assert_eq!(observer.get("k").as_deref(), Some("42"));
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(StoreError::Unavailable.to_string(), "storage unavailable");
        assert_eq!(
            StoreError::Rejected("quota".into()).to_string(),
            "storage rejected write: quota"
        );
    }
}
