//! Crate error type.
//!
//! The outline operations themselves (parse, assemble, merge, analyze, history transitions) are
//! total and never fail. Errors only arise at the edges: reading or writing stored state, and
//! commands naming something that does not exist.

use thiserror::Error;

#[derive(Debug, Error)]
/// Failures surfaced by persistence and document store commands.
pub enum Error {
    #[error("File System error: {0}")]
    /// Reading or writing stored state failed.
    Io(#[from] std::io::Error),
    #[error("(De)Serialization error: {0}")]
    /// Stored or snapshot JSON could not be (de)serialised.
    Serialization(#[from] serde_json::Error),
    #[error("Section Not Found: {0}")]
    /// No section with this id exists in the current document.
    SectionNotFound(String),
    #[error("Unknown profile '{0}'")]
    /// The profile registry has no entry under this name.
    UnknownProfile(String),
    #[error("Unknown color '{0}', expected one of red, orange, green, blue, purple")]
    /// The name is not part of the palette.
    UnknownColor(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
