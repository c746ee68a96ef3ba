//! Persistent key-value store collaborator
//!
//! The page persists exactly one key (the cookie consent record), so the
//! interface is the `localStorage` subset the page needs.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;

/// String key-value store
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
