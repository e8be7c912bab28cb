/// Collaborator traits for folio
use crate::error::Result;

/// Durable string key/value storage
///
/// Mirrors a browser-style local storage: reads are infallible lookups,
/// writes are synchronous and may fail (disk full, permissions). Callers that
/// must never fail (the preference store) log write errors and carry on.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be written
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
