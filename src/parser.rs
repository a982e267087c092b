//! Turns heading-structured text into a forest of sections.
//!
//! A heading is one or more `#` markers, exactly one space, then the title. Everything else is
//! body text for the nearest open heading. Parsing is total: any input yields a (possibly empty)
//! document.

use crate::identity::IdSource;
use crate::section::{Color, Document, Section, PREAMBLE_TITLE};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+) (.*)$").expect("invalid heading regex"));

/// Splits a line into `(level, title)` if it is a heading.
#[must_use]
pub fn heading(line: &str) -> Option<(usize, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let title = caps.get(2).map_or("", |m| m.as_str());
    Some((level, title))
}

/// Mints sections for one parse call, carrying the round-robin colour counter.
struct Minter<'a, I: IdSource + ?Sized> {
    ids: &'a mut I,
    color_counter: usize,
}

impl<I: IdSource + ?Sized> Minter<'_, I> {
    fn section(&mut self, title: &str, level: usize) -> Section {
        let (color, next) = Color::round_robin(self.color_counter);
        self.color_counter = next;
        Section::new(self.ids.next_id(), title, level, color)
    }
}

/// Parses `text` into top-level sections.
///
/// Text before the first heading becomes a level-1 section titled
/// [`PREAMBLE_TITLE`] when it contains anything besides whitespace. Heading depths may skip
/// levels: a heading nests under the closest open heading with a strictly smaller level.
pub fn parse<I: IdSource + ?Sized>(text: &str, ids: &mut I) -> Document {
    let mut minter = Minter {
        ids,
        color_counter: 0,
    };
    // Open ancestors; index 0 is the level-0 scratch root and is never closed early.
    let mut stack = vec![Section::new(String::new(), "", 0, Color::default())];
    let mut pending: Vec<&str> = Vec::new();

    for line in text.lines() {
        let Some((level, title)) = heading(line) else {
            pending.push(line);
            continue;
        };

        flush(&mut stack, &mut pending, &mut minter);

        while stack.len() > 1 && stack.last().is_some_and(|top| top.level >= level) {
            close_top(&mut stack);
        }
        stack.push(minter.section(title, level));
    }

    flush(&mut stack, &mut pending, &mut minter);
    while stack.len() > 1 {
        close_top(&mut stack);
    }

    let root = stack.pop().map(|root| root.children).unwrap_or_default();
    tracing::trace!(sections = root.len(), "parsed top-level sections");
    root
}

/// Moves buffered body lines into the deepest open section, or into a preamble.
fn flush<I: IdSource + ?Sized>(
    stack: &mut [Section],
    pending: &mut Vec<&str>,
    minter: &mut Minter<'_, I>,
) {
    if pending.is_empty() {
        return;
    }
    let joined = pending.join("\n");
    pending.clear();
    let text = body_text(&joined);

    match stack {
        [root] => {
            if !text.is_empty() {
                let mut preamble = minter.section(PREAMBLE_TITLE, 1);
                preamble.content = text.to_string();
                root.children.push(preamble);
            }
        }
        [.., open] => open.content = text.to_string(),
        [] => {}
    }
}

/// Trims blank space around a body, unless the first line would then read as a heading.
///
/// In that case the line keeps its indentation so that assembling and re-parsing leaves it as
/// body text.
fn body_text(text: &str) -> &str {
    let trimmed = text.trim();
    let first = trimmed.lines().next().unwrap_or_default();
    if heading(first).is_none() {
        return trimmed;
    }
    let indent_start = text.len() - text.trim_start().len();
    let line_start = text[..indent_start].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..].trim_end()
}

/// Pops the deepest open section and attaches it to its parent.
fn close_top(stack: &mut Vec<Section>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(done);
        }
    }
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
