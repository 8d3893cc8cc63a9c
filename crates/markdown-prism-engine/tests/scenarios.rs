use markdown_prism_engine::{
    Cmd, Session, TreeCursor, raw_to_rendered, rendered_to_raw,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::bold_inner("a **b** c", 4, 2)]
#[case::bold_after_closer("a **b** c", 7, 3)]
#[case::sub_inner("H<sub>2</sub>O", 6, 1)]
#[case::sub_after_closer("H<sub>2</sub>O", 13, 2)]
#[case::before_image_body("hello ![alt](url) world", 10, 6)]
#[case::unmatched_marker("this is a *", 10, 10)]
#[case::unmatched_marker_end("this is a *", 11, 11)]
fn raw_offsets_map_to_rendered(#[case] content: &str, #[case] raw: usize, #[case] rendered: usize) {
    assert_eq!(raw_to_rendered(content, raw), rendered);
}

#[test]
fn rendered_offset_after_image() {
    assert_eq!(rendered_to_raw("hello ![alt](url) world", 7), 17);
}

#[test]
fn insert_text_at_end() {
    let mut session = Session::from_markdown("hello");
    let p = session.tree().nodes()[0].id;
    session.focus(TreeCursor::at(p, 5));

    let patch = session.apply(Cmd::InsertText { text: "x".into() }).unwrap();
    assert_eq!(patch.tree.get(p).map(|n| n.content.as_str()), Some("hellox"));
    assert_eq!(patch.cursor, TreeCursor::at(p, 6));
}

#[test]
fn split_paragraph() {
    let mut session = Session::from_markdown("first second");
    let p = session.tree().nodes()[0].id;
    session.focus(TreeCursor::at(p, 3));

    let patch = session.apply(Cmd::Split).unwrap();
    let nodes = patch.tree.nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, p);
    assert_eq!(nodes[0].content, "fir");
    assert_eq!(nodes[1].content, "st second");
    assert_eq!(patch.cursor, TreeCursor::at(nodes[1].id, 0));
}
