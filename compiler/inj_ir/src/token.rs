//! Lexer output: token kinds and the token list.

use std::fmt;
use std::ops::Index;

use crate::{Name, Span};

/// A token with its source span.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds of the analyzed TypeScript subset.
///
/// Contextual keywords (`from`, `as`, `type`, `readonly`, ...) lex as
/// identifiers and are recognised by the parser.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Ident(Name),
    /// String literal; the payload is the unescaped content.
    String(Name),
    /// Template literal (content is opaque).
    Template,
    Number,

    // Reserved words
    Import,
    Export,
    Const,
    Let,
    Var,
    Class,
    Interface,
    Extends,
    Implements,
    New,
    Function,
    Return,
    Enum,
    Default,
    Typeof,
    True,
    False,
    Null,
    Void,
    This,

    // Punctuation
    At,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    DotDotDot,
    Question,
    QuestionDot,
    QuestionQuestion,
    Arrow,

    // Operators
    Eq,
    EqEq,
    EqEqEq,
    NotEq,
    NotEqEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Tilde,

    /// Unrecognised input.
    Error,
    Eof,
}

impl TokenKind {
    /// Whether two kinds are the same variant, ignoring payloads.
    #[inline]
    pub fn same_variant(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Reserved word text, if this kind is one.
    ///
    /// Reserved words are still valid property names in object literals and
    /// member declarations.
    pub fn keyword_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Import => "import",
            TokenKind::Export => "export",
            TokenKind::Const => "const",
            TokenKind::Let => "let",
            TokenKind::Var => "var",
            TokenKind::Class => "class",
            TokenKind::Interface => "interface",
            TokenKind::Extends => "extends",
            TokenKind::Implements => "implements",
            TokenKind::New => "new",
            TokenKind::Function => "function",
            TokenKind::Return => "return",
            TokenKind::Enum => "enum",
            TokenKind::Default => "default",
            TokenKind::Typeof => "typeof",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Void => "void",
            TokenKind::This => "this",
            _ => return None,
        })
    }

    /// Short human-readable description for parse errors.
    pub fn display_name(&self) -> &'static str {
        if let Some(kw) = self.keyword_text() {
            return kw;
        }
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::String(_) => "string literal",
            TokenKind::Template => "template literal",
            TokenKind::Number => "number",
            TokenKind::At => "@",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::DotDotDot => "...",
            TokenKind::Question => "?",
            TokenKind::QuestionDot => "?.",
            TokenKind::QuestionQuestion => "??",
            TokenKind::Arrow => "=>",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::EqEqEq => "===",
            TokenKind::NotEq => "!=",
            TokenKind::NotEqEq => "!==",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
            _ => "token",
        }
    }

    /// Binary operator precedence (higher binds tighter), if this is one.
    pub fn binary_precedence(&self) -> Option<u8> {
        Some(match self {
            TokenKind::QuestionQuestion | TokenKind::PipePipe => 1,
            TokenKind::AmpAmp => 2,
            TokenKind::Pipe => 3,
            TokenKind::Caret => 4,
            TokenKind::Amp => 5,
            TokenKind::EqEq | TokenKind::EqEqEq | TokenKind::NotEq | TokenKind::NotEqEq => 6,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => 7,
            TokenKind::Plus | TokenKind::Minus => 8,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 9,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Token stream for one file. Always terminated by [`TokenKind::Eof`].
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
