//! Section representation for heading-structured documents.
//!
//! A section represents a hierarchical division of a document, typically corresponding to a
//! heading line. Sections own their children outright, so a document is a plain forest of
//! `Section` values that serialises directly into the snapshot shape used by the history and
//! the persisted state.

use crate::error::Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title given to the synthetic node holding text that precedes the first heading.
pub const PREAMBLE_TITLE: &str = "preamble";

/// Title given to sections inserted by hand rather than parsed.
pub const NEW_SECTION_TITLE: &str = "New module";

/// An ordered list of top-level sections. There is no single visible root.
pub type Document = Vec<Section>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Categorical tag from the fixed five-value palette.
pub enum Color {
    #[default]
    /// First palette entry.
    Red,
    /// Second palette entry.
    Orange,
    /// Third palette entry.
    Green,
    /// Fourth palette entry.
    Blue,
    /// Fifth palette entry.
    Purple,
}

impl Color {
    /// Every palette entry in round-robin order.
    pub const PALETTE: [Color; 5] = [
        Color::Red,
        Color::Orange,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    #[must_use]
    /// Picks the colour for `counter` and returns it with the advanced counter.
    pub fn round_robin(counter: usize) -> (Self, usize) {
        (Self::PALETTE[counter % Self::PALETTE.len()], counter + 1)
    }

    /// Picks a palette entry uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PALETTE[rng.gen_range(0..Self::PALETTE.len())]
    }

    #[must_use]
    /// Lowercase palette name, as stored in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PALETTE
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Hierarchical document division with stable identity and cosmetic metadata.
pub struct Section {
    /// Opaque identifier, unique within a tree and never derived from content.
    pub id: String,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Body text belonging to this section, excluding nested headings.
    pub content: String,
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Directly nested subsections in document order.
    #[serde(default)]
    pub children: Vec<Section>,
    /// Palette tag carried across merges.
    #[serde(default)]
    pub color: Color,
    /// Whether the section is folded in an outline view.
    #[serde(default)]
    pub collapsed: bool,
}

impl Section {
    #[must_use]
    /// Creates an empty, unfolded section with the given identity.
    pub fn new(id: String, title: impl Into<String>, level: usize, color: Color) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            level,
            children: Vec::new(),
            color,
            collapsed: false,
        }
    }

    #[must_use]
    /// Whether this section and its heading level pair up with another.
    pub fn same_heading(&self, other: &Section) -> bool {
        self.level == other.level && self.title == other.title
    }

    #[must_use]
    /// Number of sections in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + count(&self.children)
    }
}

#[must_use]
/// Total number of sections in a forest, at every depth.
pub fn count(sections: &[Section]) -> usize {
    sections.iter().map(Section::subtree_len).sum()
}

/// Visits every section in pre-order (document order).
pub fn walk<'a>(sections: &'a [Section], visit: &mut impl FnMut(&'a Section)) {
    for section in sections {
        visit(section);
        walk(&section.children, visit);
    }
}

#[must_use]
/// Finds a section anywhere in the forest by id.
pub fn find<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
    sections
        .iter()
        .find_map(|s| if s.id == id { Some(s) } else { find(&s.children, id) })
}

/// Finds a section anywhere in the forest by id, for in-place edits.
pub fn find_mut<'a>(sections: &'a mut [Section], id: &str) -> Option<&'a mut Section> {
    for section in sections {
        if section.id == id {
            return Some(section);
        }
        if let Some(found) = find_mut(&mut section.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
