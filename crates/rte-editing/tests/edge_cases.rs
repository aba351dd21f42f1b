//! Edge case tests for rte-editing
//!
//! Empty documents, out-of-range input, placeholders and odd markup.

mod common;

use common::{element, init_tracing, text_node};
use rte_editing::{
    BoundaryPoint, Bookmark, DomTree, EditError, EditingContext, EditorConfig, HostSelection,
    PlaceholderStyle, Selection, StaticSelection, to_plain_text,
};

// ============================================================================
// EMPTY AND DEGENERATE CONTENT
// ============================================================================

#[test]
fn test_empty_document() {
    let mut tree = DomTree::new();
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.total_len(), 0);
    let root = ctx.root();
    assert_eq!(ctx.set_caret_pos(0), Ok(BoundaryPoint::new(root, 0)));
    assert_eq!(ctx.plain_text(root).count(), 0);
}

#[test]
fn test_whitespace_between_blocks_is_not_content() {
    assert_eq!(to_plain_text("<p>a</p>\n   \n<p>b</p>\n"), "a\nb");
}

#[test]
fn test_whitespace_only_paragraph_keeps_its_line() {
    assert_eq!(to_plain_text("<p>a</p><p> </p><p>b</p>"), "a\n \nb");
}

#[test]
fn test_point_in_dropped_whitespace() {
    let mut tree = rte_html::parse("<p>a</p>\n<p>b</p>");
    let gap = text_node(&tree, "\n");
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.caret_pos(BoundaryPoint::new(gap, 0)), 2);
}

#[test]
fn test_empty_inline_wrapper() {
    let mut tree = rte_html::parse("<p><b></b></p><p>x</p>");
    let b = element(&tree, "b");
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.total_len(), 2);
    assert_eq!(ctx.caret_pos(BoundaryPoint::new(b, 0)), 0);
}

// ============================================================================
// OUT-OF-RANGE INPUT
// ============================================================================

#[test]
fn test_set_caret_pos_past_end() {
    let mut tree = rte_html::parse("<p>abc</p>");
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(
        ctx.set_caret_pos(4),
        Err(EditError::PositionOutOfRange { pos: 4, len: 3 })
    );
}

#[test]
fn test_offsets_clamp() {
    let mut tree = rte_html::parse("<p>abc</p>");
    let abc = text_node(&tree, "abc");
    let p = element(&tree, "p");
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.caret_pos(BoundaryPoint::new(abc, 99)), 3);
    assert_eq!(ctx.caret_pos(BoundaryPoint::new(p, 99)), 3);
}

#[test]
fn test_bookmark_beyond_content_is_clamped() -> anyhow::Result<()> {
    init_tracing();
    let mut tree = rte_html::parse("<p>ab</p>");
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    let sel = ctx.restore_bookmark(Bookmark { start_pos: 10, char_cnt: 4 })?;
    assert_eq!(ctx.caret_pos(sel.start), 2);
    assert_eq!(sel.end.map(|e| ctx.caret_pos(e)), Some(2));
    Ok(())
}

#[test]
fn test_split_to_parent_rejects_non_ancestor() {
    let mut tree = rte_html::parse("<p>a</p><p>b</p>");
    let a = text_node(&tree, "a");
    let b = text_node(&tree, "b");
    let p_a = tree.parent(a).unwrap();
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(
        ctx.split_to_parent(p_a, b, 0),
        Err(EditError::NotAnAncestor { ancestor: p_a, node: b })
    );
}

// ============================================================================
// PLACEHOLDERS
// ============================================================================

#[test]
fn test_zero_width_placeholder_is_an_empty_line() -> anyhow::Result<()> {
    let mut tree = rte_html::parse("<p>a</p><p>\u{200B}</p>");
    let zwsp = text_node(&tree, "\u{200B}");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.total_len(), 2);
    assert_eq!(ctx.set_caret_pos(2)?, BoundaryPoint::new(zwsp, 0));

    let point = ctx.insert_text(zwsp, 0, "b")?;
    assert_eq!(ctx.caret_pos(point), 3);
    assert_eq!(rte_html::to_html(ctx.tree()), "<p>a</p><p>b</p>");
    Ok(())
}

#[test]
fn test_break_followed_by_placeholder_text_stays_a_break() {
    assert_eq!(to_plain_text("<p>a<br>\u{200B}</p>"), "a\n");
}

#[test]
fn test_paragraph_insertion_without_placeholders() -> anyhow::Result<()> {
    let config = EditorConfig { placeholder: PlaceholderStyle::None, ..EditorConfig::default() };
    let mut tree = rte_html::parse("<p>ab</p>");
    let ab = text_node(&tree, "ab");
    let mut ctx = EditingContext::new(&mut tree, config);
    ctx.insert_paragraph(ab, Some(2))?;
    assert_eq!(rte_html::to_html(ctx.tree()), "<p>ab</p><p></p>");
    assert_eq!(ctx.total_len(), 3);
    Ok(())
}

#[test]
fn test_split_before_nested_list_keeps_a_line() -> anyhow::Result<()> {
    let mut tree = rte_html::parse("<ul><li>a<ul><li>b</li></ul></li></ul>");
    let a = text_node(&tree, "a");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    ctx.insert_paragraph(a, Some(1))?;
    assert_eq!(
        rte_html::to_html(ctx.tree()),
        "<ul><li>a</li><li><br><ul><li>b</li></ul></li></ul>"
    );
    assert_eq!(to_plain_text(&rte_html::to_html(ctx.tree())), "a\n\nb");
    Ok(())
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_duplicate_structures_endpoint_replaced() -> anyhow::Result<()> {
    let mut tree = rte_html::parse("<p><i>a<i>b</i></i></p>");
    let b = text_node(&tree, "b");
    let inner = tree.parent(b).unwrap();
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    let range = ctx.remove_duplicate_structures(inner, inner)?;
    assert_eq!((range.start, range.end), (b, b));
    assert_eq!(rte_html::to_html(ctx.tree()), "<p><i>ab</i></p>");
    Ok(())
}

#[test]
fn test_different_attributes_are_not_duplicates() -> anyhow::Result<()> {
    let html = r#"<p><span class="x">a<span class="y">b</span></span></p>"#;
    let mut tree = rte_html::parse(html);
    let p = element(&tree, "p");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    ctx.remove_duplicate_structures(p, p)?;
    assert_eq!(rte_html::to_html(ctx.tree()), html);
    Ok(())
}

#[test]
fn test_join_stops_at_atoms() -> anyhow::Result<()> {
    let mut tree = rte_html::parse("<p><b>a</b><br><b>b</b></p>");
    let b = text_node(&tree, "b");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.join_identical_structures(b, true)?, None);
    Ok(())
}

#[test]
fn test_join_following() -> anyhow::Result<()> {
    let mut tree = rte_html::parse(r#"<p><span class="k">ab</span><span class="k">cd</span></p>"#);
    let ab = text_node(&tree, "ab");
    let span = tree.parent(ab).unwrap();
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    let outcome = ctx.join_identical_structures(span, false)?.expect("joinable");
    assert_eq!(outcome.node, ab);
    assert_eq!(outcome.offset, 2);
    assert_eq!(rte_html::to_html(ctx.tree()), r#"<p><span class="k">abcd</span></p>"#);
    Ok(())
}

#[test]
fn test_insert_paragraph_after_image() -> anyhow::Result<()> {
    let mut tree = rte_html::parse(r#"<p>a<img src="x.png"></p>"#);
    let img = element(&tree, "img");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    ctx.insert_paragraph(img, None)?;
    assert_eq!(rte_html::to_html(ctx.tree()), r#"<p>a<img src="x.png"></p><p><br></p>"#);
    Ok(())
}

#[test]
fn test_insert_paragraph_outside_any_block() {
    let mut tree = rte_html::parse("loose text");
    let loose = text_node(&tree, "loose text");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    assert_eq!(ctx.insert_paragraph(loose, Some(2)), Err(EditError::NoFormatScope(loose)));
}

// ============================================================================
// HOST SELECTION
// ============================================================================

#[test]
fn test_capture_without_selection() -> anyhow::Result<()> {
    let mut tree = rte_html::parse("<p>a</p>");
    let ctx = EditingContext::new(&mut tree, EditorConfig::default());
    let host = StaticSelection::default();
    assert_eq!(ctx.capture_bookmark(&host)?, None);
    Ok(())
}

#[test]
fn test_bookmark_round_trip_through_host_after_rewrap() -> anyhow::Result<()> {
    let mut tree = rte_html::parse("one<br>two");
    let two = text_node(&tree, "two");
    let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
    let mut host = StaticSelection::new(Selection::range(
        BoundaryPoint::new(two, 1),
        BoundaryPoint::new(two, 3),
    ));
    let bookmark = ctx.capture_bookmark(&host)?.expect("selection present");
    ctx.ensure_block_content("p", &[])?;
    ctx.restore_into(&mut host, bookmark)?;

    let sel = host.read().expect("selection written");
    assert_eq!(sel.start, BoundaryPoint::new(two, 1));
    assert_eq!(sel.end, Some(BoundaryPoint::new(two, 3)));
    Ok(())
}
