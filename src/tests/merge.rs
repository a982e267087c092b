use super::merge;
use crate::identity::SequentialIds;
use crate::parser::parse;
use crate::section::{count, Color, Document};

fn parse_with(text: &str, prefix: &str) -> Document {
    parse(text, &mut SequentialIds::new(prefix))
}

fn ids(sections: &Document) -> Vec<&str> {
    sections.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn test_content_edit_keeps_identity_and_metadata() {
    let mut old = parse_with("# Role\nold text\n# Task\nx", "old");
    old[0].collapsed = true;
    old[0].color = Color::Purple;
    let new = parse_with("# Role\nnew text\n# Task\nx", "new");

    let merged = merge(new, old);

    assert_eq!(ids(&merged), vec!["old-0", "old-1"]);
    assert_eq!(merged[0].content, "new text");
    assert!(merged[0].collapsed);
    assert_eq!(merged[0].color, Color::Purple);
}

#[test]
fn test_in_place_rename_adopts_positional_identity() {
    let old = parse_with("# Role\nYou are helpful.\n# Task\nAnswer.", "old");
    let new = parse_with("# Persona\nYou are helpful.\n# Task\nAnswer.", "new");

    let merged = merge(new, old);

    assert_eq!(merged[0].id, "old-0");
    assert_eq!(merged[0].title, "Persona");
    assert_eq!(merged[1].id, "old-1");
}

#[test]
fn test_rename_blocked_when_old_title_still_claimed() {
    // The second old "A" stays unclaimed, but a new sibling still carries ("A", 1),
    // so "Y" must not inherit it positionally.
    let old = parse_with("# A\n# A", "old");
    let new = parse_with("# A\n# Y", "new");

    let merged = merge(new, old);

    assert_eq!(ids(&merged), vec!["old-0", "new-1"]);
}

#[test]
fn test_level_change_gets_fresh_identity() {
    let old = parse_with("# A", "old");
    let new = parse_with("## B", "new");

    let merged = merge(new, old);

    assert_eq!(merged[0].id, "new-0");
    assert_eq!(merged[0].color, Color::Red);
    assert!(!merged[0].collapsed);
}

#[test]
fn test_insertion_keeps_neighbours() {
    let old = parse_with("# A\n# B", "old");
    let new = parse_with("# A\n# New\n# B", "new");

    let merged = merge(new, old);

    assert_eq!(ids(&merged), vec!["old-0", "new-1", "old-1"]);
}

#[test]
fn test_removed_sections_are_dropped() {
    let old = parse_with("# A\n## A1\n# B\n# C", "old");
    let new = parse_with("# A\n# C", "new");
    let expected = count(&new);

    let merged = merge(new, old);

    assert_eq!(count(&merged), expected);
    assert_eq!(ids(&merged), vec!["old-0", "old-3"]);
    assert!(merged[0].children.is_empty(), "A1 is gone from the new parse");
}

#[test]
fn test_children_merge_recursively() {
    let old = parse_with("# A\n## One\n## Two", "old");
    let new = parse_with("# A\n## One\nedited\n## Two\n## Three", "new");

    let merged = merge(new, old);
    let children = &merged[0].children;

    assert_eq!(merged[0].id, "old-0");
    assert_eq!(ids(children), vec!["old-1", "old-2", "new-3"]);
    assert_eq!(children[0].content, "edited");
}

#[test]
fn test_renamed_parent_keeps_child_identity() {
    let old = parse_with("# Role\n## Tone\nwarm", "old");
    let new = parse_with("# Persona\n## Tone\nwarm", "new");

    let merged = merge(new, old);

    assert_eq!(merged[0].id, "old-0");
    assert_eq!(merged[0].children[0].id, "old-1");
}

#[test]
fn test_duplicate_titles_match_first_available() {
    let old = parse_with("# Step\none\n# Step\ntwo", "old");
    let new = parse_with("# Step\nuno\n# Step\ndos", "new");

    let merged = merge(new, old);

    assert_eq!(ids(&merged), vec!["old-0", "old-1"]);
    assert_eq!(merged[1].content, "dos");
}

#[test]
fn test_merge_into_empty_tree_is_the_new_tree() {
    let new = parse_with("# A\n## B", "new");

    let merged = merge(new.clone(), Vec::new());

    assert_eq!(merged, new);
}

#[test]
fn test_unchanged_headings_keep_ids_across_repeated_merges() {
    let first = merge(parse_with("# A\n## B\n# C", "v1"), Vec::new());
    let second = merge(parse_with("# A\n## B\nmore\n# C\n# D", "v2"), first);
    let third = merge(parse_with("# C\n# A\n## B", "v3"), second);

    let a = third.iter().find(|s| s.title == "A").unwrap();
    let c = third.iter().find(|s| s.title == "C").unwrap();
    assert_eq!(a.id, "v1-0");
    assert_eq!(a.children[0].id, "v1-1");
    assert_eq!(c.id, "v1-2");
    assert_eq!(count(&third), 3);
}
