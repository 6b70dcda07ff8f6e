//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use inj_ir::{Name, Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Cursor for navigating tokens.
///
/// Invariant: the position is always within the stream, and the last token
/// is always `Eof`, so the cursor never runs past the end.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            tokens
                .as_slice()
                .last()
                .is_some_and(|t| t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Current position, for progress tracking and speculative parsing.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Roll back to a position returned by [`Cursor::position`].
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos < self.tokens.len(), "cursor position {pos} out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Check if the current token is the same variant as `kind`.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind().same_variant(&kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Check for a contextual keyword (an identifier with the given name).
    #[inline]
    pub fn check_name(&self, name: Name) -> bool {
        self.current_kind() == TokenKind::Ident(name)
    }

    /// Kind of the token `n` positions ahead; `Eof` past the end.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .as_slice()
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Advance to the next token and return the consumed token.
    ///
    /// At `Eof` the cursor stays put.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let token = *self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    #[inline]
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the contextual keyword `name` if present.
    #[inline]
    pub fn eat_name(&mut self, name: Name) -> bool {
        if self.check_name(name) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect the current token to be of the given kind, advance and return it.
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: TokenKind) -> ParseError {
        ParseError::unexpected(
            &format!("`{}`", kind.display_name()),
            self.current_kind(),
            self.current_span(),
        )
    }

    /// Expect and consume an identifier, returning its name and span.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(ParseError::expected_identifier(
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    /// Skip a balanced `open ... close` group starting at the current token.
    ///
    /// Nested groups of every bracket kind are skipped too. Returns the span
    /// from the opener through the closer.
    pub fn skip_balanced(&mut self) -> Result<Span, ParseError> {
        let open = self.current();
        let (open_kind, open_span) = (open.kind, open.span);
        let close_kind = match closer(open_kind) {
            Some(close) => close,
            None => {
                return Err(ParseError::unexpected(
                    "`(`, `[` or `{`",
                    open_kind,
                    open_span,
                ))
            }
        };

        let mut stack = vec![close_kind];
        self.advance();
        while let Some(&expected) = stack.last() {
            let kind = self.current_kind();
            if kind == TokenKind::Eof {
                return Err(ParseError::unclosed(
                    open_kind,
                    open_span,
                    close_kind,
                    self.current_span(),
                ));
            }
            if let Some(close) = closer(kind) {
                stack.push(close);
            } else if kind == expected {
                stack.pop();
            } else if is_closer(kind) {
                return Err(ParseError::unexpected(
                    &format!("`{expected}`"),
                    kind,
                    self.current_span(),
                ));
            }
            self.advance();
        }
        Ok(open_span.merge(self.previous_span()))
    }

    /// Skip a balanced `<...>` type parameter or argument list.
    pub fn skip_angle_brackets(&mut self) -> Result<(), ParseError> {
        let open_span = self.expect(TokenKind::Lt)?.span;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current_kind() {
                TokenKind::Eof => {
                    return Err(ParseError::unclosed(
                        TokenKind::Lt,
                        open_span,
                        TokenKind::Gt,
                        self.current_span(),
                    ));
                }
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => depth -= 1,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced()?;
                    continue;
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Position of the token matching the `(`, `[` or `{` at `start`.
    ///
    /// Read-only scan used for lookahead decisions.
    pub fn matching_close(&self, start: usize) -> Option<usize> {
        let tokens = self.tokens.as_slice();
        let mut depth = 0usize;
        for (i, token) in tokens.iter().enumerate().skip(start) {
            if closer(token.kind).is_some() {
                depth += 1;
            } else if is_closer(token.kind) {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            } else if token.kind == TokenKind::Eof {
                return None;
            }
        }
        None
    }

    /// Kind of the token at an absolute position.
    pub fn kind_at(&self, pos: usize) -> TokenKind {
        self.tokens
            .as_slice()
            .get(pos)
            .map_or(TokenKind::Eof, |t| t.kind)
    }
}

fn closer(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

fn is_closer(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
    )
}

#[cfg(test)]
mod tests;
