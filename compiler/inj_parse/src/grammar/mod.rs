//! Grammar rules, split by construct.
//!
//! - `item`: imports, exports, bindings, interfaces, type aliases
//! - `class`: class declarations, members, parameters, decorators
//! - `ty`: type expressions and object type members
//! - `expr`: expressions (data literals in detail, functions opaque)

mod class;
mod expr;
mod item;
mod ty;

use inj_ir::{Name, Span, StringInterner, TokenKind};

use crate::recovery::starts_item;
use crate::{ParseError, Parser};

/// Contextual keywords, interned once per parser.
///
/// These lex as identifiers and are recognised by position.
pub(crate) struct KnownNames {
    pub abstract_: Name,
    pub accessor: Name,
    pub as_: Name,
    pub asserts: Name,
    pub async_: Name,
    pub await_: Name,
    pub constructor: Name,
    pub declare: Name,
    pub delete: Name,
    pub default: Name,
    pub from: Name,
    pub get: Name,
    pub in_: Name,
    pub infer: Name,
    pub instanceof: Name,
    pub is: Name,
    pub keyof: Name,
    pub null: Name,
    pub override_: Name,
    pub private: Name,
    pub protected: Name,
    pub public: Name,
    pub readonly: Name,
    pub satisfies: Name,
    pub set: Name,
    pub static_: Name,
    pub symbol: Name,
    pub type_: Name,
    pub unique: Name,
    pub void: Name,
    pub boolean: Name,
}

impl KnownNames {
    pub fn new(interner: &StringInterner) -> Self {
        KnownNames {
            abstract_: interner.intern("abstract"),
            accessor: interner.intern("accessor"),
            as_: interner.intern("as"),
            asserts: interner.intern("asserts"),
            async_: interner.intern("async"),
            await_: interner.intern("await"),
            constructor: interner.intern("constructor"),
            declare: interner.intern("declare"),
            delete: interner.intern("delete"),
            default: interner.intern("default"),
            from: interner.intern("from"),
            get: interner.intern("get"),
            in_: interner.intern("in"),
            infer: interner.intern("infer"),
            instanceof: interner.intern("instanceof"),
            is: interner.intern("is"),
            keyof: interner.intern("keyof"),
            null: interner.intern("null"),
            override_: interner.intern("override"),
            private: interner.intern("private"),
            protected: interner.intern("protected"),
            public: interner.intern("public"),
            readonly: interner.intern("readonly"),
            satisfies: interner.intern("satisfies"),
            set: interner.intern("set"),
            static_: interner.intern("static"),
            symbol: interner.intern("symbol"),
            type_: interner.intern("type"),
            unique: interner.intern("unique"),
            void: interner.intern("void"),
            boolean: interner.intern("boolean"),
        }
    }
}

impl Parser<'_> {
    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    /// A member or property name: identifier, reserved word, string or
    /// number literal. Returns `None` for numbers, which never name anything
    /// the validator looks up.
    fn parse_property_name(&mut self) -> Result<(Option<Name>, Span), ParseError> {
        let kind = self.cursor.current_kind();
        let name = match kind {
            TokenKind::Ident(name) | TokenKind::String(name) => Some(name),
            TokenKind::Number => None,
            _ => match kind.keyword_text() {
                Some(text) => Some(self.interner.intern(text)),
                None => {
                    return Err(ParseError::expected_identifier(
                        kind,
                        self.cursor.current_span(),
                    ))
                }
            },
        };
        let span = self.cursor.advance().span;
        Ok((name, span))
    }

    /// Whether the token `n` positions ahead can be a property name.
    fn at_property_name(&self, n: usize) -> bool {
        let kind = self.cursor.peek_kind(n);
        matches!(
            kind,
            TokenKind::Ident(_) | TokenKind::String(_) | TokenKind::Number
        ) || kind.keyword_text().is_some()
    }

    /// Whether the current contextual keyword is used as a modifier, i.e. is
    /// followed by something that names a member rather than ending one.
    fn at_modifier(&self, name: Name) -> bool {
        self.cursor.check_name(name)
            && !matches!(
                self.cursor.peek_kind(1),
                TokenKind::LParen
                    | TokenKind::Colon
                    | TokenKind::Question
                    | TokenKind::Bang
                    | TokenKind::Eq
                    | TokenKind::Semicolon
                    | TokenKind::Comma
                    | TokenKind::Lt
                    | TokenKind::RBrace
                    | TokenKind::RParen
                    | TokenKind::Eof
            )
    }

    /// Skip a statement the validator does not analyze.
    ///
    /// Stops after a `;` or before the next declaration keyword, skipping
    /// bracketed groups as units.
    fn skip_statement(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.position();
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof => return Ok(()),
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    return Ok(());
                }
                kind if starts_item(kind) && self.cursor.position() != start => return Ok(()),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.cursor.skip_balanced()?;
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    return Err(ParseError::unexpected(
                        "statement",
                        self.cursor.current_kind(),
                        self.cursor.current_span(),
                    ));
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Consume an optional `;`.
    fn eat_semicolon(&mut self) {
        self.cursor.eat(TokenKind::Semicolon);
    }
}
