//! Settings persistence for the demo.
//!
//! Settings are stored as JSON strings in eframe's persistent storage.

use serde::{Deserialize, Serialize};

/// Storage key of the last query string.
pub const LAST_QUERY_KEY: &str = "last_query";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting, falling back to `default` when it is missing or
    /// does not deserialize.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `key` - The storage key for this setting
    /// * `default` - The value to use if loading fails
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        serde_json::from_str(&json_str).ok()
    }

    /// Saves a setting.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        if let Ok(json_str) = serde_json::to_string(value) {
            storage.set_string(key, json_str);
        }
    }

    /// Query string the demo was showing when it last closed.
    pub fn load_last_query(storage: Option<&dyn eframe::Storage>) -> String {
        Self::load_setting_or(storage, LAST_QUERY_KEY, String::new())
    }

    pub fn save_last_query(storage: &mut dyn eframe::Storage, query: &str) {
        Self::save_setting(storage, LAST_QUERY_KEY, &query);
    }
}
