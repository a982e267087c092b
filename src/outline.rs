//! Plain-text outline of a section tree using box-drawing connectors.
//!
//! Folded sections show their own line plus a count of hidden descendants.

use crate::section::Section;

/// Number of id characters shown per line.
pub const ID_WIDTH: usize = 8;

/// Generate box-drawing prefix for tree structure
fn tree_prefix(depth: usize, is_last: bool, parent_states: &[bool]) -> String {
    if depth == 0 {
        return String::new();
    }

    let mut prefix = String::new();

    // Draw vertical lines for ancestors that still have siblings below
    for i in 0..depth.saturating_sub(1) {
        if parent_states.get(i).copied().unwrap_or(false) {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

#[must_use]
/// Renders one line per visible section: connectors, heading markers, title, colour and id.
pub fn render(sections: &[Section]) -> String {
    let mut out = String::new();
    let mut parent_states = Vec::new();
    render_siblings(&mut out, sections, &mut parent_states);
    out
}

fn render_siblings(out: &mut String, sections: &[Section], parent_states: &mut Vec<bool>) {
    for (i, section) in sections.iter().enumerate() {
        let is_last = i + 1 == sections.len();
        let prefix = tree_prefix(parent_states.len() + 1, is_last, parent_states);
        let short_id: String = section.id.chars().take(ID_WIDTH).collect();
        out.push_str(&format!(
            "{prefix}{} {} [{}] {short_id}",
            "#".repeat(section.level),
            section.title,
            section.color
        ));

        if section.collapsed && !section.children.is_empty() {
            let hidden = section.subtree_len() - 1;
            out.push_str(&format!(" (+{hidden} folded)\n"));
            continue;
        }
        out.push('\n');

        parent_states.push(!is_last);
        render_siblings(out, &section.children, parent_states);
        parent_states.pop();
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
