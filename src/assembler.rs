//! Serialises a section forest back into heading-structured text.
//!
//! This is the structural inverse of [`crate::parser::parse`]: re-parsing the output and
//! assembling again yields the same text, though incidental whitespace inside the original input
//! is normalised on the first pass.

use crate::section::Section;

/// Heading marker repeated `level` times at the start of a heading line.
pub const MARKER: char = '#';

#[must_use]
/// Renders `sections` in document order.
pub fn assemble(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        write_section(&mut out, section);
    }
    trim_document(&out).to_string()
}

fn write_section(out: &mut String, section: &Section) {
    let has_heading = section.level > 0;
    if has_heading {
        let markers = MARKER.to_string().repeat(section.level);
        out.push_str(&format!("{markers} {}\n", section.title));
    }
    if !section.content.is_empty() {
        out.push_str(&section.content);
        out.push('\n');
    }
    if has_heading || !section.content.is_empty() {
        out.push('\n');
    }
    for child in &section.children {
        write_section(out, child);
    }
}

/// Trims surrounding whitespace but keeps spaces that end the final line.
///
/// A trailing heading with an empty title renders as `"# "`; dropping that space would turn it
/// into body text on the next parse.
fn trim_document(text: &str) -> &str {
    let text = text.trim_start();
    let body_len = text.trim_end().len();
    let tail = text[body_len..]
        .split(['\n', '\r'])
        .next()
        .unwrap_or_default();
    &text[..body_len + tail.len()]
}

#[cfg(test)]
#[path = "tests/assembler.rs"]
mod tests;
