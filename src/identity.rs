//! Identifier generation for new sections.
//!
//! Ids are opaque: nothing in the crate inspects them beyond equality. The parser and the
//! document store take an [`IdSource`] so callers decide how ids are minted.

use uuid::Uuid;

/// Produces fresh section identifiers.
pub trait IdSource {
    /// Returns an identifier not handed out before by this source.
    fn next_id(&mut self) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
/// Random UUID v4 identifiers.
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Clone, Debug)]
/// Deterministic `prefix-N` identifiers, handy for fixtures and reproducible output.
pub struct SequentialIds {
    prefix: String,
    next: usize,
}

impl SequentialIds {
    #[must_use]
    /// Starts counting from zero with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("s")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}
