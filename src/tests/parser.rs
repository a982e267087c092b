use super::{heading, parse};
use crate::identity::SequentialIds;
use crate::section::{count, Color, PREAMBLE_TITLE};

fn ids() -> SequentialIds {
    SequentialIds::new("t")
}

#[test]
fn test_two_top_level_sections() {
    let sections = parse(
        "# Role\nYou are an assistant.\n# Task\nAnswer questions.",
        &mut ids(),
    );

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Role");
    assert_eq!(sections[0].level, 1);
    assert_eq!(sections[0].content, "You are an assistant.");
    assert_eq!(sections[1].title, "Task");
    assert_eq!(sections[1].level, 1);
    assert_eq!(sections[1].content, "Answer questions.");
}

#[test]
fn test_heading_needs_markers_and_one_space() {
    assert_eq!(heading("## Title"), Some((2, "Title")));
    assert_eq!(heading("#  Padded"), Some((1, " Padded")));
    assert_eq!(heading("# "), Some((1, "")));
    assert_eq!(heading("#Title"), None);
    assert_eq!(heading("#"), None);
    assert_eq!(heading(" # Indented"), None);
    assert_eq!(heading("text # not a heading"), None);
}

#[test]
fn test_leading_text_becomes_preamble() {
    let sections = parse("Intro line\n\n# A\nbody", &mut ids());

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, PREAMBLE_TITLE);
    assert_eq!(sections[0].level, 1);
    assert_eq!(sections[0].content, "Intro line");
    assert_eq!(sections[1].title, "A");
    assert_eq!(sections[1].content, "body");
}

#[test]
fn test_blank_leading_text_creates_no_preamble() {
    let sections = parse("   \n\n\t\n# A", &mut ids());

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "A");
}

#[test]
fn test_heading_less_text_is_a_single_preamble() {
    let sections = parse("just some words\nacross lines", &mut ids());

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, PREAMBLE_TITLE);
    assert_eq!(sections[0].content, "just some words\nacross lines");
    assert!(sections[0].children.is_empty());
}

#[test]
fn test_empty_and_blank_input_yield_nothing() {
    assert!(parse("", &mut ids()).is_empty());
    assert!(parse("\n\n   \n", &mut ids()).is_empty());
}

#[test]
fn test_nesting_allows_skipped_levels() {
    let sections = parse("# A\n### C\n## B\n# D", &mut ids());

    assert_eq!(sections.len(), 2);
    let a = &sections[0];
    assert_eq!(a.title, "A");
    assert_eq!(a.children.len(), 2, "C and B both nest under A");
    assert_eq!((a.children[0].title.as_str(), a.children[0].level), ("C", 3));
    assert_eq!((a.children[1].title.as_str(), a.children[1].level), ("B", 2));
    assert_eq!(sections[1].title, "D");
    assert!(sections[1].children.is_empty());
}

#[test]
fn test_deeper_heading_first_is_still_top_level() {
    let sections = parse("### Deep\n# Shallow\n## Child", &mut ids());

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].level, 3);
    assert_eq!(sections[1].children[0].title, "Child");
}

#[test]
fn test_node_count_matches_heading_lines() {
    let text = "preface\n# One\n## Two\ntext\n## Three\n#### Four\n# Five\n#not-a-heading";
    let sections = parse(text, &mut ids());

    // five heading lines plus the preamble
    assert_eq!(count(&sections), 6);
    assert_eq!(sections.last().unwrap().content, "#not-a-heading");
}

#[test]
fn test_content_is_trimmed_and_keeps_inner_lines() {
    let sections = parse("# A\n\n  line one\nline two  \n\n# B", &mut ids());

    assert_eq!(sections[0].content, "line one\nline two");
    assert_eq!(sections[1].content, "");
}

#[test]
fn test_crlf_line_endings() {
    let sections = parse("# A\r\nbody\r\n# B\r\n", &mut ids());

    assert_eq!(sections[0].title, "A");
    assert_eq!(sections[0].content, "body");
    assert_eq!(sections[1].title, "B");
}

#[test]
fn test_colors_round_robin_per_parse_call() {
    let text = "intro\n# 1\n# 2\n## 3\n# 4\n# 5";
    let sections = parse(text, &mut ids());
    let mut colors = Vec::new();
    crate::section::walk(&sections, &mut |s| colors.push(s.color));

    assert_eq!(
        colors,
        vec![
            Color::Red,
            Color::Orange,
            Color::Green,
            Color::Blue,
            Color::Purple,
            Color::Red,
        ]
    );

    let again = parse("# first", &mut ids());
    assert_eq!(again[0].color, Color::Red, "counter restarts each call");
}

#[test]
fn test_fresh_ids_in_document_order() {
    let mut source = ids();
    let sections = parse("intro\n# A\n## B\n# C", &mut source);
    let mut seen = Vec::new();
    crate::section::walk(&sections, &mut |s| {
        seen.push(s.id.clone());
        assert!(!s.collapsed);
    });

    assert_eq!(seen, vec!["t-0", "t-1", "t-2", "t-3"]);
}

#[test]
fn test_indented_heading_like_body_keeps_indentation() {
    let sections = parse("# T\n\n  # b\nrest  \n", &mut ids());

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].content, "  # b\nrest");

    let preamble = parse("  # a", &mut ids());
    assert_eq!(preamble[0].title, PREAMBLE_TITLE);
    assert_eq!(preamble[0].content, "  # a");

    let plain = parse("# T\n   indented body  ", &mut ids());
    assert_eq!(plain[0].content, "indented body");
}
