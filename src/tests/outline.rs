use super::render;
use crate::identity::SequentialIds;
use crate::parser::parse;

#[test]
fn test_nested_outline_uses_connectors() {
    let sections = parse("# A\n## B\n# C", &mut SequentialIds::new("o"));

    assert_eq!(
        render(&sections),
        "├── # A [red] o-0\n│   └── ## B [orange] o-1\n└── # C [green] o-2\n"
    );
}

#[test]
fn test_folded_section_hides_descendants() {
    let mut sections = parse("# A\n## B\n# C", &mut SequentialIds::new("o"));
    sections[0].collapsed = true;

    assert_eq!(
        render(&sections),
        "├── # A [red] o-0 (+1 folded)\n└── # C [green] o-2\n"
    );
}

#[test]
fn test_last_branch_leaves_blank_gutter() {
    let sections = parse("# A\n## B\n### C\n## D", &mut SequentialIds::new("o"));

    assert_eq!(
        render(&sections),
        "└── # A [red] o-0\n    ├── ## B [orange] o-1\n    │   └── ### C [green] o-2\n    └── ## D [blue] o-3\n"
    );
}

#[test]
fn test_long_ids_are_shortened() {
    let sections = parse("# A", &mut SequentialIds::new("0123456789"));

    assert_eq!(render(&sections), "└── # A [red] 01234567\n");
}

#[test]
fn test_empty_outline_renders_nothing() {
    assert_eq!(render(&[]), "");
}
