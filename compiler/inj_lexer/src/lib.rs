//! Lexer for the analyzed TypeScript subset, using logos with string interning.
//!
//! Produces a `TokenList` per file. Comments are dropped; string literal
//! contents are unescaped and interned so the analyzers can compare
//! descriptions and module specifiers by `Name`.

mod escape;
mod lex_error;

use inj_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // Reserved words
    #[token("import")]
    Import,
    #[token("export")]
    Export,
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("var")]
    Var,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("extends")]
    Extends,
    #[token("implements")]
    Implements,
    #[token("new")]
    New,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("enum")]
    Enum,
    #[token("default")]
    Default,
    #[token("typeof")]
    Typeof,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("void")]
    Void,
    #[token("this")]
    This,

    // Punctuation
    #[token("@")]
    At,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("...")]
    DotDotDot,
    #[token("?")]
    Question,
    #[token("?.")]
    QuestionDot,
    #[token("??")]
    QuestionQuestion,
    #[token("=>")]
    Arrow,

    // Operators
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("===")]
    EqEqEq,
    #[token("!=")]
    NotEq,
    #[token("!==")]
    NotEqEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    // Literals
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?n?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xXoObB][0-9a-fA-F_]+n?")]
    Number,

    #[token("\"", |lex| string_body(lex, '"'))]
    #[token("'", |lex| string_body(lex, '\''))]
    String,

    #[token("`", template_body)]
    Template,

    // `#name` covers private class members.
    #[regex(r"#?[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
}

/// Consume the rest of a block comment after its opening `/*`.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedBlockComment)
        }
    }
}

/// Consume a quoted string after its opening quote.
///
/// Strings end at the matching quote; an unescaped newline or end of input
/// first makes the literal unterminated.
fn string_body(lex: &mut logos::Lexer<RawToken>, quote: char) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' => {
                lex.bump(i);
                return Err(LexErrorKind::UnterminatedString);
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                return Ok(());
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}

/// Consume a template literal after its opening backtick.
///
/// Substitutions (`${ ... }`) are skipped by brace depth; nested templates
/// inside a substitution are not tracked.
fn template_body(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'$' if depth == 0 && bytes.get(i + 1) == Some(&b'{') => {
                depth = 1;
                i += 1;
            }
            b'{' if depth > 0 => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'`' if depth == 0 => {
                lex.bump(i + 1);
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }
    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedTemplate)
}

/// Tokens and errors for one file.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    /// Always terminated by [`TokenKind::Eof`].
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// Lex source code into a `TokenList`, discarding errors.
///
/// Invalid input still produces [`TokenKind::Error`] tokens.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    lex_with_errors(source, interner).tokens
}

/// Lex source code, collecting errors alongside the tokens.
///
/// # Panics
/// Panics if the source exceeds `u32::MAX` bytes.
pub fn lex_with_errors(source: &str, interner: &StringInterner) -> LexOutput {
    let mut output = LexOutput::default();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::LineComment | RawToken::BlockComment) => {}
            Ok(raw) => {
                let kind = convert_token(raw, slice, interner);
                output.tokens.push(Token::new(kind, span));
            }
            Err(kind) => {
                output.tokens.push(Token::new(TokenKind::Error, span));
                output.errors.push(LexError::new(span, kind));
            }
        }
    }

    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source file exceeds {} bytes", u32::MAX));
    output
        .tokens
        .push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    output
}

/// Convert a raw token to a `TokenKind`, interning strings.
fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
        RawToken::String => {
            let body = &slice[1..slice.len() - 1];
            TokenKind::String(interner.intern(&escape::unescape(body)))
        }
        RawToken::Template => TokenKind::Template,
        RawToken::Number => TokenKind::Number,

        RawToken::Import => TokenKind::Import,
        RawToken::Export => TokenKind::Export,
        RawToken::Const => TokenKind::Const,
        RawToken::Let => TokenKind::Let,
        RawToken::Var => TokenKind::Var,
        RawToken::Class => TokenKind::Class,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Extends => TokenKind::Extends,
        RawToken::Implements => TokenKind::Implements,
        RawToken::New => TokenKind::New,
        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::Enum => TokenKind::Enum,
        RawToken::Default => TokenKind::Default,
        RawToken::Typeof => TokenKind::Typeof,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Void => TokenKind::Void,
        RawToken::This => TokenKind::This,

        RawToken::At => TokenKind::At,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotDotDot => TokenKind::DotDotDot,
        RawToken::Question => TokenKind::Question,
        RawToken::QuestionDot => TokenKind::QuestionDot,
        RawToken::QuestionQuestion => TokenKind::QuestionQuestion,
        RawToken::Arrow => TokenKind::Arrow,

        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::EqEqEq => TokenKind::EqEqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::NotEqEq => TokenKind::NotEqEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Amp => TokenKind::Amp,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,

        // Filtered out by the caller.
        RawToken::LineComment | RawToken::BlockComment => TokenKind::Error,
    }
}

#[cfg(test)]
mod tests;
