//! Local preference store settings.

use serde::{Deserialize, Serialize};

/// Location of the on-disk key/value preference store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Path to the JSON preference file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/preferences.json".to_string()
}
