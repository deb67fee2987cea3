//! Store port for model persistence.
//!
//! This module defines the trait boundary between the agent and the durable
//! key-value storage that holds its learned values.

use crate::Result;

/// Durable string key-value store.
///
/// Each call reads or writes one whole value; there are no partial updates.
///
/// # Examples
///
/// ```
/// use snake_qlearn::adapters::InMemoryStore;
/// use snake_qlearn::ports::KeyValueStore;
///
/// let store = InMemoryStore::new();
/// store.set("QModel", "{}")?;
/// assert_eq!(store.get("QModel")?.as_deref(), Some("{}"));
/// store.remove("QModel")?;
/// assert!(store.get("QModel")?.is_none());
/// # Ok::<(), snake_qlearn::Error>(())
/// ```
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
