//! Target-model profiles consumed by the analyzer.
//!
//! A profile is configuration, not logic: two token thresholds plus the markup convention the
//! model family is known to prefer. The registry always contains the generic profile.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Name of the profile used when nothing else is selected.
pub const GENERIC: &str = "generic";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Markup convention a model family responds to best.
pub enum Markup {
    #[default]
    /// No particular preference.
    Any,
    /// Structured tag markup such as `<task>...</task>`.
    Xml,
    /// Lightweight `#` headings and `-` lists.
    Markdown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Token thresholds and markup preference for one target model.
pub struct Profile {
    /// Registry key, e.g. `gpt-4`.
    pub name: String,
    /// Human-readable name used in suggestion texts.
    pub label: String,
    /// Token count beyond which instructions risk being lost mid-prompt.
    pub attention_limit: u32,
    /// Token count beyond which the prompt should be trimmed or externalised.
    pub hard_maximum: u32,
    /// Preferred markup convention.
    pub markup: Markup,
}

impl Profile {
    #[must_use]
    /// Builds a profile; the label defaults to the name.
    pub fn new(name: &str, attention_limit: u32, hard_maximum: u32, markup: Markup) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_string(),
            attention_limit,
            hard_maximum,
            markup,
        }
    }

    #[must_use]
    /// Replaces the display label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    #[must_use]
    /// The generic default profile.
    pub fn generic() -> Self {
        Self::new(GENERIC, 3000, 8000, Markup::Any).with_label("general-purpose")
    }
}

#[derive(Clone, Debug)]
/// Ordered set of profiles with a guaranteed generic entry.
pub struct ProfileRegistry {
    profiles: Vec<Profile>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileRegistry {
    #[must_use]
    /// The generic profile plus the three bundled model profiles.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                Profile::generic(),
                Profile::new("gpt-4", 4000, 8000, Markup::Markdown),
                Profile::new("claude-3-sonnet", 8000, 15000, Markup::Xml),
                Profile::new("llama-2-7b", 1500, 2000, Markup::Markdown),
            ],
        }
    }

    #[must_use]
    /// A registry holding the generic profile plus `extra`, replacing same-named entries.
    pub fn with_profiles(extra: impl IntoIterator<Item = Profile>) -> Self {
        let mut registry = Self {
            profiles: vec![Profile::generic()],
        };
        for profile in extra {
            registry.insert(profile);
        }
        registry
    }

    /// Adds `profile`, replacing any entry with the same name.
    pub fn insert(&mut self, profile: Profile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    #[must_use]
    /// Looks a profile up by name.
    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Looks a profile up by name, failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProfile`] if no profile has this name.
    pub fn require(&self, name: &str) -> Result<&Profile> {
        self.get(name)
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }

    #[must_use]
    /// Looks a profile up by name, falling back to the generic profile.
    pub fn resolve(&self, name: &str) -> &Profile {
        self.get(name).unwrap_or_else(|| self.generic())
    }

    #[must_use]
    /// The generic profile.
    pub fn generic(&self) -> &Profile {
        // Index 0 always holds the generic entry.
        &self.profiles[0]
    }

    /// Profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }
}

#[cfg(test)]
#[path = "tests/profile.rs"]
mod tests;
