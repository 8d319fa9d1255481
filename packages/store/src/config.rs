//! # Application configuration — `openlab.toml`
//!
//! Client-side settings for Mi OpenLab. Every section is optional; a missing or
//! empty file is equivalent to [`OpenLabConfig::default`].
//!
//! ```toml
//! [backend]
//! project_id = "mi-openlab"
//! storage_base_url = "https://storage.mi-openlab.local"
//!
//! [query]
//! in_batch_limit = 10      # keys per `in` query, capped at the store limit
//!
//! [activity]
//! visible_entries = 20     # activity entries shown on the profile
//! ```

use serde::{Deserialize, Serialize};

use crate::document::MAX_IN_VALUES;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenLabConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
}

/// Where the hosted capabilities live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Prefix of public blob URLs.
    #[serde(default = "default_storage_base_url")]
    pub storage_base_url: String,
}

fn default_project_id() -> String {
    "mi-openlab".to_string()
}

fn default_storage_base_url() -> String {
    "https://storage.mi-openlab.local".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            storage_base_url: default_storage_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_in_batch_limit")]
    pub in_batch_limit: usize,
}

fn default_in_batch_limit() -> usize {
    MAX_IN_VALUES
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            in_batch_limit: default_in_batch_limit(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_visible_entries")]
    pub visible_entries: usize,
}

fn default_visible_entries() -> usize {
    20
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            visible_entries: default_visible_entries(),
        }
    }
}

impl OpenLabConfig {
    /// Builder method to set the `in` batch size.
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.query.in_batch_limit = limit;
        self
    }

    /// Builder method to set the public blob URL prefix.
    pub fn with_storage_base_url(mut self, url: impl Into<String>) -> Self {
        self.backend.storage_base_url = url.into();
        self
    }

    /// Effective batch size: at least 1, never above what the store accepts.
    pub fn batch_limit(&self) -> usize {
        self.query.in_batch_limit.clamp(1, MAX_IN_VALUES)
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "openlab.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
