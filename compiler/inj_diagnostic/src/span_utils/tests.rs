use super::*;
use pretty_assertions::assert_eq;

#[test]
fn line_lookup_at_boundaries() {
    let source = "ab\ncd\n\nef";
    let table = LineOffsetTable::build(source);

    assert_eq!(table.line_count(), 4);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(2), 1);
    assert_eq!(table.line_from_offset(3), 2);
    assert_eq!(table.line_from_offset(6), 3);
    assert_eq!(table.line_from_offset(7), 4);
}

#[test]
fn columns_count_characters() {
    let source = "const é = x;";
    let table = LineOffsetTable::build(source);
    // `=` follows a two-byte character.
    let eq = u32::try_from(source.find('=').unwrap()).unwrap();
    assert_eq!(table.offset_to_line_col(source, eq), (1, 9));
}

#[test]
fn offset_past_end_is_clamped() {
    let source = "abc";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 10), (1, 4));
}

#[test]
fn line_text_strips_line_endings() {
    let source = "first\r\nsecond\nthird";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some("third"));
    assert_eq!(table.line_text(source, 4), None);
    assert_eq!(table.line_text(source, 0), None);
}

#[test]
fn span_start_helper() {
    assert_eq!(span_start_line_col("a\nbc", Span::new(3, 4)), (2, 2));
}
