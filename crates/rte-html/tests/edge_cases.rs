//! Edge case tests for rte-html
//!
//! Unusual markup the editor still has to load and write back faithfully.

use rte_html::{HtmlSerializer, parse, to_html};

#[test]
fn test_unicode_text_preserved() {
    let html = "<p>日本語 🚀 Ñoño</p>";
    assert_eq!(to_html(&parse(html)), html);
}

#[test]
fn test_zero_width_space_kept() {
    let tree = parse("<p>\u{200B}</p>");
    let p = tree.children(tree.root())[0];
    assert_eq!(tree.text(tree.children(p)[0]), Some("\u{200B}"));
}

#[test]
fn test_nbsp_written_as_entity() {
    assert_eq!(to_html(&parse("<p>a&nbsp;b</p>")), "<p>a&nbsp;b</p>");
}

#[test]
fn test_whitespace_between_paragraphs_kept() {
    let tree = parse("<p>a</p>\n<p>b</p>");
    assert_eq!(tree.children(tree.root()).len(), 3);
}

#[test]
fn test_whitespace_in_list_dropped() {
    let tree = parse("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
    let ul = tree.children(tree.root())[0];
    assert_eq!(tree.children(ul).len(), 2);
}

#[test]
fn test_uppercase_tags_and_attributes_lowered() {
    assert_eq!(to_html(&parse(r#"<P CLASS="x">a</P>"#)), r#"<p class="x">a</p>"#);
}

#[test]
fn test_attribute_quotes_escaped() {
    let html = r#"<p title="say &quot;hi&quot;">a</p>"#;
    assert_eq!(to_html(&parse(html)), html);
}

#[test]
fn test_head_content_discarded() {
    let tree = parse("<title>t</title><p>body</p>");
    assert_eq!(to_html(&tree), "<p>body</p>");
}

#[test]
fn test_outer_html_of_subtree() {
    let tree = parse("<div><p>x</p></div>");
    let div = tree.children(tree.root())[0];
    let p = tree.children(div)[0];
    assert_eq!(HtmlSerializer::new().serialize_outer(&tree, p), "<p>x</p>");
}
