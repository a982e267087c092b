//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a promptree.toml, and if present we load settings from there.
//! This provides the state directory, the default profile and the history cap.

use crate::document::OpenOptions;
use crate::history::DEFAULT_LIMIT;
use crate::profile::ProfileRegistry;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "promptree.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from promptree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = ".promptree".to_string())]
    /// Directory holding the persisted outline, raw text, profile and history.
    pub state_dir: String,
    #[facet(default = "generic".to_string())]
    /// Profile used until one is explicitly selected.
    pub profile: String,
    #[facet(default = 50)]
    /// Number of undo snapshots kept.
    pub history_limit: usize,
}

impl Config {
    #[must_use]
    /// Load configuration from promptree.toml in the working directory if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is missing or invalid.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
            tracing::warn!("Ignoring invalid config {:?}", path);
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// Document store settings derived from this configuration.
    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            history_limit: if self.history_limit == 0 {
                DEFAULT_LIMIT
            } else {
                self.history_limit
            },
            default_profile: self.profile.clone(),
            profiles: ProfileRegistry::builtin(),
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
