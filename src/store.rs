//! Durable key-value storage seam.
//!
//! In the browser this is `localStorage`. [`MemoryStore`] backs native tests
//! and non-browser hosts.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("persistent storage is unavailable")]
    Unavailable,
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

pub trait Store {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    values: HashMap<String, String>,
    reject_writes: bool,
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryStoreInner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail, simulating a full or blocked store.
    pub fn reject_writes(&self, reject: bool) {
        self.inner.borrow_mut().reject_writes = reject;
    }

    /// Remove a key.
    pub fn remove(&self, key: &str) {
        self.inner.borrow_mut().values.remove(key);
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.reject_writes {
            return Err(StoreError::Write { key: key.to_owned(), reason: "writes rejected".to_owned() });
        }
        inner.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
