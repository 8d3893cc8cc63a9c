//! Properties that hold for any content, checked over a small corpus.

use markdown_prism_engine::{OffsetMap, Tree, tokenize};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("a **b** c")]
#[case("H<sub>2</sub>O")]
#[case("hello ![alt](url) world")]
#[case("this is a *")]
#[case("***x*** and _y_ and ~~z~~")]
#[case("[**link**](u) `code` x^2^")]
#[case("<b>nested <i>tags</i></b>")]
#[case("unclosed **bold and `tick")]
#[case("")]
#[case("héllo **wörld** ✓")]
fn rendered_offsets_are_stable_through_a_round_trip(#[case] content: &str) {
    let map = OffsetMap::new(content);
    for raw in 0..=map.raw_len() {
        let rendered = map.raw_to_rendered(raw);
        assert_eq!(
            map.raw_to_rendered(map.rendered_to_raw(rendered)),
            rendered,
            "raw {raw} in {content:?}"
        );
    }
}

#[rstest]
#[case("hello world")]
#[case("plain text, with punctuation.")]
#[case("numbers 1 + 2 = 3")]
#[case("ünïcödé")]
fn plain_text_maps_by_identity(#[case] content: &str) {
    let map = OffsetMap::new(content);
    let len = content.chars().count();
    assert_eq!(map.rendered_len(), len);
    for i in 0..=len {
        assert_eq!(map.raw_to_rendered(i), i);
        assert_eq!(map.rendered_to_raw(i), i);
    }
}

#[rstest]
#[case("mix *of* **all** `the` ~~things~~ <b>here</b> ![i](s) [l](u)")]
#[case("*a **b* c**")]
#[case("<i>a<i>b</i>c</i>")]
fn tokenizing_is_deterministic(#[case] content: &str) {
    assert_eq!(tokenize(content), tokenize(content));
}

#[rstest]
#[case("**open")]
#[case("a `b")]
#[case("x <b>y")]
#[case("[link](")]
#[case("~sub")]
#[case("closing** only")]
fn delimiters_without_a_counterpart_stay_unmatched(#[case] content: &str) {
    assert!(tokenize(content).iter().all(|t| !t.matched), "{content:?}");
}

#[rstest]
#[case("# Title\n\nSome *text*.\n\n- a\n  - b\n- c\n")]
#[case("1) one\n2) two\n\n> quoted\n> lines\n")]
#[case("```rust\nlet x = 1;\n```\n\n| h |\n| --- |\n| c |\n")]
#[case("<section>\n**bold**\n</section>\n\n![img](p.png)\n\n___\n")]
#[case("  indented para\n*  star item\n\n\n#not heading\n")]
#[case("- [X] upper check\n-  two spaces\n")]
fn serialization_is_idempotent(#[case] text: &str) {
    let once = Tree::parse(text).to_markdown();
    assert_eq!(Tree::parse(&once).to_markdown(), once);
}

#[test]
fn fixture_simple_document() {
    assert_fixture("combos/simple_document");
}

#[test]
fn fixture_mixed_blocks() {
    assert_fixture("combos/mixed_blocks");
}

#[test]
fn fixture_inline_markup() {
    assert_fixture("combos/inline_markup");
}

/// Canonical fixtures serialize back byte for byte.
fn assert_fixture(name: &str) {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    assert_eq!(Tree::parse(&md).to_markdown(), md);
}
