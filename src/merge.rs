//! Identity-preserving reconciliation of a fresh parse with the previously edited tree.
//!
//! The merged tree always has exactly the structure and text of the new parse. What carries
//! over from the old tree is identity: `id`, `color` and `collapsed`. Correspondence is decided
//! per sibling list, then recursively for the children of every matched pair.
//!
//! # Matching rules
//!
//! 1. Exact: each new node, in order, claims the first unclaimed old sibling with the same
//!    `(title, level)`.
//! 2. Rename: a node left unmatched takes the old sibling at the same index when the levels
//!    agree and no new sibling still carries that old sibling's `(title, level)`.
//! 3. Anything else keeps the fresh identity minted by the parser, and unclaimed old nodes are
//!    dropped.
//!
//! Among duplicate `(title, level)` siblings the first available old node wins, so identities
//! may shuffle between duplicates from one merge to the next. The rename rule can also pair the
//! wrong nodes when a title edit and a sibling insertion or deletion land in the same re-parse.

use crate::section::{Document, Section};

#[must_use]
/// Merges `new` (fresh parse) with `old` (live tree), reusing old identity where possible.
pub fn merge(new: Document, old: Document) -> Document {
    merge_siblings(new, old)
}

fn merge_siblings(new: Vec<Section>, old: Vec<Section>) -> Vec<Section> {
    // `None` marks an old sibling already consumed by a match.
    let mut old: Vec<Option<Section>> = old.into_iter().map(Some).collect();
    let mut matched: Vec<Option<Section>> = Vec::with_capacity(new.len());

    for candidate in &new {
        let found = old
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|o| o.same_heading(candidate)));
        matched.push(found.and_then(|j| old[j].take()));
    }

    for (i, candidate) in new.iter().enumerate() {
        if matched[i].is_some() {
            continue;
        }
        let Some(Some(previous)) = old.get(i) else {
            continue;
        };
        let renamed = previous.level == candidate.level
            && !new.iter().any(|n| n.same_heading(previous));
        if renamed {
            tracing::debug!(
                id = %previous.id,
                from = %previous.title,
                to = %candidate.title,
                "treating positional match as a rename"
            );
            matched[i] = old[i].take();
        }
    }

    for dropped in old.iter().flatten() {
        tracing::trace!(id = %dropped.id, title = %dropped.title, "dropping unmatched section");
    }

    new.into_iter()
        .zip(matched)
        .map(|(fresh, previous)| match previous {
            Some(previous) => adopt(fresh, previous),
            None => fresh,
        })
        .collect()
}

/// Gives `fresh` the identity of `previous` and reconciles their children.
fn adopt(fresh: Section, previous: Section) -> Section {
    Section {
        id: previous.id,
        color: previous.color,
        collapsed: previous.collapsed,
        title: fresh.title,
        content: fresh.content,
        level: fresh.level,
        children: merge_siblings(fresh.children, previous.children),
    }
}

#[cfg(test)]
#[path = "tests/merge.rs"]
mod tests;
