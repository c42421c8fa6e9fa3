//! Preference store trait - the seam to host key-value storage
//!
//! Backed by `localStorage` on the web, app settings on mobile. Reads and
//! writes may fail silently; the controller swallows every error.

use std::collections::HashMap;

use crate::error::StoreError;

/// Preference key for the selected track id
pub const KEY_SELECTED_TRACK: &str = "selectedTrack";

/// Preference key for the volume slider position (decimal string, 20-100)
pub const KEY_VOLUME_PCT: &str = "volumePct";

/// Host key-value preference storage
pub trait PreferenceStore: Send {
    /// Read a preference value
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a preference value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and headless hosts
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with key-value pairs
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
