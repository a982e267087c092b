//! promptree: heading-structured prompt outlines.
//!
//! Text with `#`-style headings is parsed into a forest of [`section::Section`]s, edited,
//! re-assembled into text, and re-merged with fresh parses of the source without losing the
//! identity (id, colour, fold state) of sections that survive. A bounded snapshot history gives
//! undo/redo, and a heuristic analyzer scores the outline against a target-model profile.
//!
//! ```
//! use promptree::identity::SequentialIds;
//! use promptree::{assembler, parser};
//!
//! let sections = parser::parse("# Role\nYou are an assistant.", &mut SequentialIds::default());
//! assert_eq!(sections[0].title, "Role");
//! assert_eq!(assembler::assemble(&sections), "# Role\nYou are an assistant.");
//! ```

pub mod analyzer;
pub mod assembler;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod identity;
pub mod merge;
pub mod outline;
pub mod parser;
pub mod persist;
pub mod profile;
pub mod section;

pub use document::{DocumentStore, OpenOptions};
pub use error::{Error, Result};
pub use section::{Color, Document, Section};
