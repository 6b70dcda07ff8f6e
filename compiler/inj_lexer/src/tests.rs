use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
    lex(source, interner).iter().map(|t| t.kind).collect()
}

#[test]
fn import_statement() {
    let interner = StringInterner::new();
    let user = interner.intern("UserService");
    let from = interner.intern("from");
    let path = interner.intern("./user");

    assert_eq!(
        kinds("import { UserService } from './user';", &interner),
        vec![
            TokenKind::Import,
            TokenKind::LBrace,
            TokenKind::Ident(user),
            TokenKind::RBrace,
            TokenKind::Ident(from),
            TokenKind::String(path),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_dropped() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    assert_eq!(
        kinds("// leading\nconst /* inline */ x = 1; /** doc\n * more */", &interner),
        vec![
            TokenKind::Const,
            TokenKind::Ident(x),
            TokenKind::Eq,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_need_word_boundaries() {
    let interner = StringInterner::new();
    let imports = interner.intern("imports");
    let constant = interner.intern("constant");
    assert_eq!(
        kinds("imports constant", &interner),
        vec![TokenKind::Ident(imports), TokenKind::Ident(constant), TokenKind::Eof]
    );
}

#[test]
fn identifiers_allow_dollar_and_private_names() {
    let interner = StringInterner::new();
    let dollar = interner.intern("$scope");
    let private = interner.intern("#cache");
    assert_eq!(
        kinds("$scope #cache", &interner),
        vec![TokenKind::Ident(dollar), TokenKind::Ident(private), TokenKind::Eof]
    );
}

#[test]
fn longest_punctuation_wins() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("... ?. ?? => === !== <= >= && ||", &interner),
        vec![
            TokenKind::DotDotDot,
            TokenKind::QuestionDot,
            TokenKind::QuestionQuestion,
            TokenKind::Arrow,
            TokenKind::EqEqEq,
            TokenKind::NotEqEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn number_forms() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("1 1_000 3.14 .5 1e10 0xFF 10n", &interner),
        vec![TokenKind::Number; 7]
            .into_iter()
            .chain([TokenKind::Eof])
            .collect::<Vec<_>>()
    );
}

#[test]
fn strings_are_unescaped_and_interned() {
    let interner = StringInterner::new();
    let tokens = lex(r#"'it\'s' "a\"b""#, &interner);
    assert_eq!(tokens[0].kind, TokenKind::String(interner.intern("it's")));
    assert_eq!(tokens[1].kind, TokenKind::String(interner.intern("a\"b")));
    assert_eq!(tokens[0].span, Span::new(0, 7));
}

#[test]
fn template_with_substitution() {
    let interner = StringInterner::new();
    let tokens = lex("`user-${ids.map(x => `${x}`)}` ;", &interner);
    assert_eq!(tokens[0].kind, TokenKind::Template);
    assert_eq!(tokens[1].kind, TokenKind::Semicolon);
}

#[test]
fn unterminated_string_stops_at_newline() {
    let interner = StringInterner::new();
    let output = lex_with_errors("const a = 'abc\nconst b = 1;", &interner);
    assert_eq!(
        output.errors,
        vec![LexError::new(Span::new(10, 14), LexErrorKind::UnterminatedString)]
    );
    // Lexing resumes on the next line.
    assert!(output.tokens.iter().any(|t| t.kind == TokenKind::Number));
}

#[test]
fn unterminated_block_comment() {
    let interner = StringInterner::new();
    let output = lex_with_errors("x /* never closed", &interner);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedBlockComment);
    assert_eq!(output.errors[0].span, Span::new(2, 17));
}

#[test]
fn unterminated_template() {
    let interner = StringInterner::new();
    let output = lex_with_errors("`abc", &interner);
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedTemplate);
}

#[test]
fn invalid_character_produces_error_token() {
    let interner = StringInterner::new();
    let output = lex_with_errors("a ~~ ^ § b", &interner);
    assert!(!output.errors.is_empty());
    assert!(output
        .errors
        .iter()
        .all(|e| e.kind == LexErrorKind::InvalidCharacter));
    assert_eq!(output.errors[0].span.start, 7);
    assert!(output.tokens.iter().any(|t| t.kind == TokenKind::Error));
    let b = interner.intern("b");
    assert_eq!(output.tokens[output.tokens.len() - 2].kind, TokenKind::Ident(b));
}

#[test]
fn eof_span_is_at_end() {
    let interner = StringInterner::new();
    let tokens = lex("abc  ", &interner);
    assert_eq!(tokens[tokens.len() - 1], Token::new(TokenKind::Eof, Span::point(5)));
}
