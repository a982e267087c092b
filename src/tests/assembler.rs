use super::assemble;
use crate::identity::SequentialIds;
use crate::parser::parse;
use crate::section::{Color, Section};

fn normalise(text: &str) -> String {
    assemble(&parse(text, &mut SequentialIds::default()))
}

#[test]
fn test_two_sections_separated_by_blank_line() {
    let sections = parse(
        "# Role\nYou are an assistant.\n# Task\nAnswer questions.",
        &mut SequentialIds::default(),
    );

    assert_eq!(
        assemble(&sections),
        "# Role\nYou are an assistant.\n\n# Task\nAnswer questions."
    );
}

#[test]
fn test_nested_sections_in_pre_order() {
    assert_eq!(
        normalise("# A\nalpha\n## B\nbeta\n### C\n# D"),
        "# A\nalpha\n\n## B\nbeta\n\n### C\n\n# D"
    );
}

#[test]
fn test_preamble_is_written_as_heading() {
    assert_eq!(normalise("hello\n# A"), "# preamble\nhello\n\n# A");
}

#[test]
fn test_empty_document_is_empty_text() {
    assert_eq!(assemble(&[]), "");
}

#[test]
fn test_multiline_content_kept_verbatim() {
    let mut section = Section::new("x".to_string(), "Notes", 2, Color::Blue);
    section.content = "- one\n  - nested\n- two".to_string();

    assert_eq!(assemble(&[section]), "## Notes\n- one\n  - nested\n- two");
}

#[test]
fn test_trailing_empty_title_keeps_its_space() {
    let section = Section::new("x".to_string(), "", 1, Color::Red);
    let text = assemble(&[section]);

    assert_eq!(text, "# ");
    assert_eq!(normalise(&text), "# ");
}

#[test]
fn test_reassembly_is_a_fixpoint_after_one_pass() {
    let inputs = [
        "",
        "plain words only",
        "  \n# A\n\n\n  body  \n## B\n#nospace\n### D",
        "# ",
        "# Title  ",
        "intro\n# A\n# \n",
        "### deep\n# shallow\n##### deeper",
        "# A\n```\n# not really code\n```\n",
        "# 角色\n你是一名助手。\n## 任务\n回答问题 {^topic^}",
        "# T\n  # b",
        "  # a",
        "# T\n\n   ## indented\nmore\n",
    ];

    for input in inputs {
        let once = normalise(input);
        let twice = normalise(&once);
        assert_eq!(once, twice, "not a fixpoint for input {input:?}");
    }
}
