//! Bounded linear undo/redo over serialised document snapshots.
//!
//! Every accepted mutation records the whole document. The cursor points at the snapshot that
//! matches the live tree; recording after an undo abandons the redo branch.
//!
//! ```text
//! empty --record--> at-newest <--undo/redo--> at-middle <--undo/redo--> at-oldest
//! ```
//!
//! # Restoring
//!
//! `undo` and `redo` hand back a tree for the caller to apply. Applying it usually goes through
//! the same code path as any other mutation, which would record it as a new forward change. To
//! prevent that the history enters a restoring state when it hands out a tree: `record` is
//! ignored until the caller calls [`History::settle`]. The caller must apply the tree and settle
//! synchronously. If mutations were observed later, after settling, a restore would be recorded
//! as a fresh edit and the redo branch would be lost.

use crate::section::{Document, Section};
use serde::{Deserialize, Serialize};

/// Default number of snapshots kept before the oldest is evicted.
pub const DEFAULT_LIMIT: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Snapshot stack with a cursor.
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
    #[serde(skip, default = "default_limit")]
    limit: usize,
    #[serde(skip)]
    restoring: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl History {
    #[must_use]
    /// Empty history evicting beyond `limit` snapshots (at least one is always kept).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            limit: limit.max(1),
            restoring: false,
        }
    }

    #[must_use]
    /// Re-applies a limit to a deserialised history and repairs an out-of-range cursor.
    ///
    /// Eviction keeps the cursor on the same snapshot: the oldest entries go first, and once the
    /// cursor sits on the oldest remaining entry the newest redo entries go instead.
    pub fn restored(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self.restoring = false;
        self.cursor = match (self.cursor, self.entries.len()) {
            (_, 0) => None,
            (Some(c), len) if c < len => Some(c),
            (_, len) => Some(len - 1),
        };
        while self.entries.len() > self.limit {
            match self.cursor {
                Some(c) if c > 0 => {
                    self.entries.remove(0);
                    self.cursor = Some(c - 1);
                }
                _ => {
                    self.entries.pop();
                }
            }
        }
        self
    }

    /// Records `document` as the newest snapshot.
    ///
    /// Returns `false` when nothing changed: the snapshot equals the one at the cursor, the
    /// history is restoring, or the document could not be serialised.
    pub fn record(&mut self, document: &[Section]) -> bool {
        if self.restoring {
            tracing::trace!("ignoring record while restoring a snapshot");
            return false;
        }
        let snapshot = match serde_json::to_string(document) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Could not serialise snapshot: {e}");
                return false;
            }
        };
        if let Some(cursor) = self.cursor {
            if self.entries[cursor] == snapshot {
                return false;
            }
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(snapshot);
        let mut cursor = self.entries.len() - 1;
        if self.entries.len() > self.limit {
            self.entries.remove(0);
            cursor -= 1;
        }
        self.cursor = Some(cursor);
        tracing::trace!(cursor, len = self.entries.len(), "recorded snapshot");
        true
    }

    /// Steps back one snapshot and returns it, entering the restoring state.
    ///
    /// Returns `None` at the oldest snapshot, or when the snapshot fails to deserialise (the
    /// cursor then stays put).
    pub fn undo(&mut self) -> Option<Document> {
        let target = self.cursor?.checked_sub(1)?;
        self.restore(target)
    }

    /// Steps forward one snapshot and returns it, entering the restoring state.
    pub fn redo(&mut self) -> Option<Document> {
        let target = self.cursor? + 1;
        if target >= self.entries.len() {
            return None;
        }
        self.restore(target)
    }

    fn restore(&mut self, target: usize) -> Option<Document> {
        match serde_json::from_str::<Document>(&self.entries[target]) {
            Ok(document) => {
                tracing::debug!(from = ?self.cursor, to = target, "restoring snapshot");
                self.cursor = Some(target);
                self.restoring = true;
                Some(document)
            }
            Err(e) => {
                tracing::error!("Could not restore snapshot {target}: {e}");
                None
            }
        }
    }

    /// Leaves the restoring state once the restored tree has been applied.
    pub fn settle(&mut self) {
        self.restoring = false;
    }

    #[must_use]
    /// Whether a restored tree is still being applied.
    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    #[must_use]
    /// Whether an older snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    /// Whether a newer snapshot exists.
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    #[must_use]
    /// Index of the current snapshot, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    /// Snapshot cap.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
#[path = "tests/history.rs"]
mod tests;
