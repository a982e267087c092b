//! The document store: single owner of the live outline and its history.
//!
//! Every mutation goes through an explicit command on [`DocumentStore`]. A command applies its
//! change, records a snapshot in the [`History`] and writes the touched keys to the injected
//! [`StateStore`], all before returning. Nothing watches the tree for changes, so the history
//! sees exactly one record per accepted command and restores never leak into it.
//!
//! State is loaded from the store once, in [`DocumentStore::open`]. Stored values that fail to
//! decode are logged and replaced with empty defaults; a broken previous session never prevents
//! opening a new one.

use crate::analyzer::{self, Analysis};
use crate::assembler::assemble;
use crate::error::{Error, Result};
use crate::history::{History, DEFAULT_LIMIT};
use crate::identity::{IdSource, UuidIds};
use crate::merge::merge;
use crate::parser::parse;
use crate::persist::{StateStore, StoreKey};
use crate::profile::{Profile, ProfileRegistry, GENERIC};
use crate::section::{self, Color, Document, Section, NEW_SECTION_TITLE};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
/// Settings applied when a document store opens.
pub struct OpenOptions {
    /// Snapshot cap for the history.
    pub history_limit: usize,
    /// Profile selected when the store holds no valid selection.
    pub default_profile: String,
    /// Profiles available for selection.
    pub profiles: ProfileRegistry,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_LIMIT,
            default_profile: GENERIC.to_string(),
            profiles: ProfileRegistry::builtin(),
        }
    }
}

/// Owns the outline, its raw source text, the selected profile and the undo history.
pub struct DocumentStore<S: StateStore, I: IdSource = UuidIds> {
    store: S,
    ids: I,
    profiles: ProfileRegistry,
    raw_input: String,
    sections: Document,
    profile: String,
    history: History,
}

impl<S: StateStore, I: IdSource> DocumentStore<S, I> {
    /// Loads state from `store`, falling back to defaults for anything missing or malformed.
    ///
    /// When a tree was stored without any history, it becomes the first snapshot.
    pub fn open(store: S, ids: I, options: OpenOptions) -> Self {
        let OpenOptions {
            history_limit,
            default_profile,
            profiles,
        } = options;

        let raw_input = load(&store, StoreKey::RawInput).unwrap_or_default();
        let sections: Document = load(&store, StoreKey::Sections)
            .and_then(|raw| decode(StoreKey::Sections, &raw))
            .unwrap_or_default();
        let history = load(&store, StoreKey::History)
            .and_then(|raw| decode::<History>(StoreKey::History, &raw))
            .map_or_else(
                || History::with_limit(history_limit),
                |h| h.restored(history_limit),
            );
        let profile = select_stored_profile(
            &profiles,
            load(&store, StoreKey::Profile).as_deref(),
            &default_profile,
        );

        let mut doc = Self {
            store,
            ids,
            profiles,
            raw_input,
            sections,
            profile,
            history,
        };
        if doc.history.is_empty() && !doc.sections.is_empty() {
            doc.history.record(&doc.sections);
            doc.persist_history();
        }
        tracing::debug!(
            sections = section::count(&doc.sections),
            snapshots = doc.history.len(),
            profile = %doc.profile,
            "opened document store"
        );
        doc
    }

    #[must_use]
    /// The raw text last imported.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Replaces the raw text without touching the outline.
    ///
    /// The outline only changes when [`DocumentStore::parse_input`] is called, so edits to the
    /// reference text never clobber work done on the outline.
    pub fn set_raw_input(&mut self, text: impl Into<String>) {
        self.raw_input = text.into();
        let raw = self.raw_input.clone();
        self.save(StoreKey::RawInput, &raw);
    }

    /// Re-parses the raw text and merges it into the outline, keeping known identities.
    pub fn parse_input(&mut self) {
        let fresh = parse(&self.raw_input, &mut self.ids);
        let previous = std::mem::take(&mut self.sections);
        self.sections = merge(fresh, previous);
        self.commit();
    }

    /// Appends a new top-level section with a random colour and returns its id.
    pub fn add_section(&mut self, title: Option<&str>) -> String {
        let color = Color::random(&mut rand::thread_rng());
        let section = Section::new(
            self.ids.next_id(),
            title.unwrap_or(NEW_SECTION_TITLE),
            1,
            color,
        );
        let id = section.id.clone();
        self.sections.push(section);
        self.commit();
        id
    }

    /// Sets the title of section `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if no section has this id.
    pub fn rename_section(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        self.edit(id, |s| s.title = title)
    }

    /// Replaces the body text of section `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if no section has this id.
    pub fn set_content(&mut self, id: &str, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        self.edit(id, |s| s.content = content)
    }

    /// Folds or unfolds section `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if no section has this id.
    pub fn set_collapsed(&mut self, id: &str, collapsed: bool) -> Result<()> {
        self.edit(id, |s| s.collapsed = collapsed)
    }

    /// Recolours section `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] if no section has this id.
    pub fn set_color(&mut self, id: &str, color: Color) -> Result<()> {
        self.edit(id, |s| s.color = color)
    }

    fn edit(&mut self, id: &str, change: impl FnOnce(&mut Section)) -> Result<()> {
        let section = section::find_mut(&mut self.sections, id)
            .ok_or_else(|| Error::SectionNotFound(id.to_string()))?;
        change(section);
        self.commit();
        Ok(())
    }

    /// Selects the analyzer profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProfile`] if the registry has no such profile.
    pub fn select_profile(&mut self, name: &str) -> Result<()> {
        let name = self.profiles.require(name)?.name.clone();
        self.save(StoreKey::Profile, &name);
        self.profile = name;
        Ok(())
    }

    /// Restores the previous snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(sections) => self.apply_restored(sections),
            None => false,
        }
    }

    /// Re-applies the next snapshot. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(sections) => self.apply_restored(sections),
            None => false,
        }
    }

    /// Applies a tree handed out by the history, then closes the restore scope.
    fn apply_restored(&mut self, sections: Document) -> bool {
        self.sections = sections;
        self.commit();
        self.history.settle();
        true
    }

    /// Records the current tree and persists it with the history.
    fn commit(&mut self) {
        self.history.record(&self.sections);
        match serde_json::to_string(&self.sections) {
            Ok(json) => self.save(StoreKey::Sections, &json),
            Err(e) => tracing::error!("Could not serialise sections: {e}"),
        }
        self.persist_history();
    }

    fn persist_history(&mut self) {
        match serde_json::to_string(&self.history) {
            Ok(json) => self.save(StoreKey::History, &json),
            Err(e) => tracing::error!("Could not serialise history: {e}"),
        }
    }

    fn save(&mut self, key: StoreKey, value: &str) {
        if let Err(e) = self.store.save(key, value) {
            tracing::warn!("Failed to persist {}: {e}", key.as_str());
        }
    }

    #[must_use]
    /// Whether an older snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    /// Whether a newer snapshot exists.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    /// The live outline.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Finds a section anywhere in the outline.
    pub fn find(&self, id: &str) -> Option<&Section> {
        section::find(&self.sections, id)
    }

    #[must_use]
    /// The undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    /// The selected profile.
    pub fn profile(&self) -> &Profile {
        self.profiles.resolve(&self.profile)
    }

    #[must_use]
    /// Every selectable profile.
    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    #[must_use]
    /// The outline rendered back to heading-structured text.
    pub fn preview(&self) -> String {
        assemble(&self.sections)
    }

    #[must_use]
    /// Analyzer report for the outline under the selected profile.
    pub fn analysis(&self) -> Analysis {
        analyzer::analyze(&self.sections, self.profile())
    }

    #[must_use]
    /// Gives back the backing store.
    pub fn into_store(self) -> S {
        self.store
    }
}

fn load<S: StateStore>(store: &S, key: StoreKey) -> Option<String> {
    match store.load(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to load stored {}: {e}", key.as_str());
            None
        }
    }
}

fn decode<T: DeserializeOwned>(key: StoreKey, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                "Failed to parse stored {}, starting from an empty default: {e}",
                key.as_str()
            );
            None
        }
    }
}

fn select_stored_profile(
    profiles: &ProfileRegistry,
    stored: Option<&str>,
    default_profile: &str,
) -> String {
    if let Some(name) = stored.map(str::trim) {
        if profiles.get(name).is_some() {
            return name.to_string();
        }
        tracing::warn!("Stored profile '{name}' is unknown, using '{default_profile}'");
    }
    if profiles.get(default_profile).is_some() {
        default_profile.to_string()
    } else {
        tracing::warn!("Default profile '{default_profile}' is unknown, using '{GENERIC}'");
        GENERIC.to_string()
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
