use super::*;
use inj_ir::StringInterner;
use pretty_assertions::assert_eq;

fn tokens(source: &str) -> (TokenList, StringInterner) {
    let interner = StringInterner::new();
    let tokens = inj_lexer::lex(source, &interner);
    (tokens, interner)
}

#[test]
fn advance_stops_at_eof() {
    let (tokens, _) = tokens("a");
    let mut cursor = Cursor::new(&tokens);
    cursor.advance();
    assert!(cursor.is_at_end());
    cursor.advance();
    assert!(cursor.is_at_end());
}

#[test]
fn expect_reports_found_token() {
    let (tokens, _) = tokens(";");
    let mut cursor = Cursor::new(&tokens);
    let err = cursor.expect(TokenKind::Comma).unwrap_err();
    assert_eq!(err.message, "expected `,`, found `;`");
}

#[test]
fn contextual_names() {
    let (tokens, interner) = tokens("from './x'");
    let from = interner.intern("from");
    let mut cursor = Cursor::new(&tokens);
    assert!(cursor.check_name(from));
    assert!(cursor.eat_name(from));
    assert!(matches!(cursor.current_kind(), TokenKind::String(_)));
}

#[test]
fn skip_balanced_handles_nesting() {
    let (tokens, _) = tokens("{ a: [1, (2)], b: { c } } ;");
    let mut cursor = Cursor::new(&tokens);
    let span = cursor.skip_balanced().unwrap();
    assert_eq!(span.start, 0);
    assert!(cursor.check(TokenKind::Semicolon));
}

#[test]
fn skip_balanced_reports_unclosed() {
    let (tokens, _) = tokens("{ a: [1, 2]");
    let mut cursor = Cursor::new(&tokens);
    let err = cursor.skip_balanced().unwrap_err();
    assert_eq!(err.code, inj_diagnostic::ErrorCode::E1003);
    assert_eq!(err.related.map(|(span, _)| span), Some(Span::new(0, 1)));
}

#[test]
fn skip_balanced_reports_mismatch() {
    let (tokens, _) = tokens("( ]");
    let mut cursor = Cursor::new(&tokens);
    let err = cursor.skip_balanced().unwrap_err();
    assert_eq!(err.message, "expected `)`, found `]`");
}

#[test]
fn angle_brackets_with_nested_generics() {
    let (tokens, _) = tokens("<T extends Map<K, V>, U = { a: 1 }> (");
    let mut cursor = Cursor::new(&tokens);
    cursor.skip_angle_brackets().unwrap();
    assert!(cursor.check(TokenKind::LParen));
}

#[test]
fn matching_close_lookahead() {
    let (tokens, _) = tokens("(a, (b)) => c");
    let cursor = Cursor::new(&tokens);
    let close = cursor.matching_close(0).unwrap();
    assert_eq!(cursor.kind_at(close + 1), TokenKind::Arrow);
    assert_eq!(cursor.position(), 0);
}
