//! Expressions.
//!
//! Data literals (objects, arrays, calls, member access) are parsed in full
//! since configuration literals are built from them. Function and class
//! expressions are skipped and produce [`ExprKind::Function`].

use inj_ir::{Expr, ExprKind, ObjectProp, PropKey, Span, TokenKind};

use inj_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// An expression, including comma sequences.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let mut expr = self.parse_assign_expr()?;
        while self.cursor.eat(TokenKind::Comma) {
            let right = self.parse_assign_expr()?;
            expr = Expr::new(
                ExprKind::Binary {
                    left: Box::new(expr),
                    right: Box::new(right),
                },
                self.span_from(start),
            );
        }
        Ok(expr)
    }

    /// An assignment-level expression: arrow functions, assignments and
    /// conditionals.
    ///
    /// Every nested literal passes through here, so this is where the stack
    /// is grown.
    pub(crate) fn parse_assign_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assign_expr_inner())
    }

    fn parse_assign_expr_inner(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.check_name(self.names.async_) && self.at_arrow(1) {
            self.cursor.advance();
            return self.skip_arrow(start);
        }
        if self.at_arrow(0) {
            return self.skip_arrow(start);
        }

        let target = self.parse_conditional()?;
        if self.at_compound_assign() {
            self.cursor.advance();
        }
        if self.cursor.eat(TokenKind::Eq) {
            let value = self.parse_assign_expr()?;
            return Ok(Expr::new(
                ExprKind::Binary {
                    left: Box::new(target),
                    right: Box::new(value),
                },
                self.span_from(start),
            ));
        }
        Ok(target)
    }

    /// `+=`, `||=` and friends lex as an operator followed by `=`.
    fn at_compound_assign(&self) -> bool {
        self.cursor.peek_kind(1) == TokenKind::Eq
            && (self.cursor.current_kind().binary_precedence().is_some()
                || self.cursor.check(TokenKind::QuestionQuestion))
    }

    /// Whether an arrow function starts `n` tokens ahead.
    fn at_arrow(&self, n: usize) -> bool {
        let pos = self.cursor.position() + n;
        match self.cursor.kind_at(pos) {
            TokenKind::Ident(_) => self.cursor.kind_at(pos + 1) == TokenKind::Arrow,
            TokenKind::LParen => self.params_then_arrow(pos),
            TokenKind::Lt => self
                .angle_close(pos)
                .is_some_and(|close| self.cursor.kind_at(close + 1) == TokenKind::LParen
                    && self.params_then_arrow(close + 1)),
            _ => false,
        }
    }

    /// Whether the `(` at `pos` closes into `=>`, possibly after a return
    /// type annotation.
    fn params_then_arrow(&self, pos: usize) -> bool {
        let Some(close) = self.cursor.matching_close(pos) else {
            return false;
        };
        match self.cursor.kind_at(close + 1) {
            TokenKind::Arrow => true,
            TokenKind::Colon => self.arrow_after_annotation(close + 2),
            _ => false,
        }
    }

    /// Scan a return type annotation for the `=>` that ends it. A `,`, `;`
    /// or closing bracket at depth zero means this was a ternary branch
    /// instead.
    fn arrow_after_annotation(&self, mut pos: usize) -> bool {
        loop {
            match self.cursor.kind_at(pos) {
                TokenKind::Arrow => return true,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    match self.cursor.matching_close(pos) {
                        Some(close) => pos = close + 1,
                        None => return false,
                    }
                }
                TokenKind::Lt => match self.angle_close(pos) {
                    Some(close) => pos = close + 1,
                    None => return false,
                },
                TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Eq
                | TokenKind::Eof => return false,
                _ => pos += 1,
            }
        }
    }

    /// Position of the `>` matching the `<` at `pos`.
    fn angle_close(&self, pos: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut pos = pos;
        loop {
            match self.cursor.kind_at(pos) {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(pos);
                    }
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    pos = self.cursor.matching_close(pos)?;
                }
                TokenKind::Semicolon | TokenKind::Eof => return None,
                _ => {}
            }
            pos += 1;
        }
    }

    /// `<T>(params): R => body` or `x => body`; the cursor is at the head.
    fn skip_arrow(&mut self, start: Span) -> Result<Expr, ParseError> {
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        if self.cursor.check(TokenKind::LParen) {
            self.cursor.skip_balanced()?;
            if self.cursor.eat(TokenKind::Colon) {
                self.parse_return_type()?;
            }
        } else {
            self.cursor.expect_ident()?;
        }
        self.cursor.expect(TokenKind::Arrow)?;
        if self.cursor.check(TokenKind::LBrace) {
            self.cursor.skip_balanced()?;
        } else {
            self.parse_assign_expr()?;
        }
        Ok(Expr::new(ExprKind::Function, self.span_from(start)))
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let test = self.parse_binary(1)?;
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(test);
        }
        let then = self.parse_assign_expr()?;
        self.cursor.expect(TokenKind::Colon)?;
        let otherwise = self.parse_assign_expr()?;
        Ok(Expr::new(
            ExprKind::Conditional {
                test: Box::new(test),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            self.span_from(start),
        ))
    }

    /// Binary operators by precedence climbing. `as` and `satisfies`
    /// assertions are consumed and leave the operand unchanged.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let mut left = self.parse_unary()?;
        loop {
            if self.cursor.check_name(self.names.as_)
                || self.cursor.check_name(self.names.satisfies)
            {
                self.cursor.advance();
                if !self.cursor.eat(TokenKind::Const) {
                    self.parse_type()?;
                }
                continue;
            }
            let kind = self.cursor.current_kind();
            let prec = match kind {
                TokenKind::Ident(name) if name == self.names.instanceof || name == self.names.in_ => {
                    Some(7)
                }
                _ => kind.binary_precedence(),
            };
            let Some(prec) = prec else {
                return Ok(left);
            };
            if prec < min_prec || self.at_compound_assign() {
                return Ok(left);
            }
            self.cursor.advance();
            // `**` lexes as two `*`.
            if kind == TokenKind::Star {
                self.cursor.eat(TokenKind::Star);
            }
            let right = self.parse_binary(prec + 1)?;
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    right: Box::new(right),
                },
                self.span_from(start),
            );
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let prefix = match self.cursor.current_kind() {
            TokenKind::Bang
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::Tilde
            | TokenKind::Typeof
            | TokenKind::Void => true,
            TokenKind::Ident(name) => {
                (name == self.names.await_ || name == self.names.delete)
                    && !matches!(
                        self.cursor.peek_kind(1),
                        TokenKind::Semicolon
                            | TokenKind::Comma
                            | TokenKind::RParen
                            | TokenKind::RBrace
                            | TokenKind::RBracket
                            | TokenKind::Dot
                            | TokenKind::Eq
                            | TokenKind::Colon
                            | TokenKind::Eof
                    )
            }
            _ => false,
        };
        if prefix {
            self.cursor.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::new(
                ExprKind::Unary(Box::new(operand)),
                self.span_from(start),
            ));
        }
        // `<T>value` type assertion.
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
            return self.parse_unary();
        }
        let primary = if self.cursor.check(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_postfix(primary, start)
    }

    /// `new Callee<T>(args)`; the argument list is optional.
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_new_inner())
    }

    fn parse_new_inner(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(TokenKind::New)?.span;
        if self.cursor.eat(TokenKind::Dot) {
            // `new.target`
            let (property, _) = self.parse_property_name()?;
            let object = Expr::new(ExprKind::Ident(self.interner.intern("new")), start);
            return Ok(Expr::new(
                ExprKind::Member {
                    object: Box::new(object),
                    property: property.unwrap_or_default(),
                },
                self.span_from(start),
            ));
        }
        let callee_start = self.cursor.current_span();
        let mut callee = if self.cursor.check(TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            if self.cursor.eat(TokenKind::Dot) {
                let (property, _) = self.parse_property_name()?;
                callee = Expr::new(
                    ExprKind::Member {
                        object: Box::new(callee),
                        property: property.unwrap_or_default(),
                    },
                    self.span_from(callee_start),
                );
            } else if self.cursor.check(TokenKind::LBracket) {
                self.cursor.advance();
                let index = self.parse_expr()?;
                self.cursor.expect(TokenKind::RBracket)?;
                callee = Expr::new(
                    ExprKind::Index {
                        object: Box::new(callee),
                        index: Box::new(index),
                    },
                    self.span_from(callee_start),
                );
            } else {
                break;
            }
        }
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        let args = if self.cursor.check(TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expr::new(
            ExprKind::New {
                callee: Box::new(callee),
                args,
            },
            self.span_from(start),
        ))
    }

    /// Member access, calls, indexing and non-null assertions.
    fn parse_postfix(&mut self, mut expr: Expr, start: Span) -> Result<Expr, ParseError> {
        loop {
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let (property, _) = self.parse_property_name()?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            property: property.unwrap_or_default(),
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::QuestionDot => {
                    self.cursor.advance();
                    if self.cursor.check(TokenKind::LParen) {
                        let args = self.parse_arguments()?;
                        expr = self.call(expr, Vec::new(), args, start);
                    } else if self.cursor.eat(TokenKind::LBracket) {
                        let index = self.parse_expr()?;
                        self.cursor.expect(TokenKind::RBracket)?;
                        expr = self.index(expr, index, start);
                    } else {
                        let (property, _) = self.parse_property_name()?;
                        expr = Expr::new(
                            ExprKind::Member {
                                object: Box::new(expr),
                                property: property.unwrap_or_default(),
                            },
                            self.span_from(start),
                        );
                    }
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    expr = self.index(expr, index, start);
                }
                TokenKind::LParen => {
                    let args = self.parse_arguments()?;
                    expr = self.call(expr, Vec::new(), args, start);
                }
                TokenKind::Lt => {
                    // `f<T>(...)`: speculative, since `<` may be a comparison.
                    let saved = self.cursor.position();
                    match self.parse_type_args() {
                        Ok(type_args) if self.cursor.check(TokenKind::LParen) => {
                            let args = self.parse_arguments()?;
                            expr = self.call(expr, type_args, args, start);
                        }
                        _ => {
                            self.cursor.set_position(saved);
                            return Ok(expr);
                        }
                    }
                }
                TokenKind::Bang => {
                    self.cursor.advance();
                }
                TokenKind::Template => {
                    // Tagged template.
                    self.cursor.advance();
                    expr = Expr::new(ExprKind::Template, self.span_from(start));
                }
                _ => return Ok(expr),
            }
        }
    }

    fn call(&self, callee: Expr, type_args: Vec<inj_ir::TypeExpr>, args: Vec<Expr>, start: Span) -> Expr {
        Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                type_args,
                args,
            },
            self.span_from(start),
        )
    }

    fn index(&self, object: Expr, index: Expr, start: Span) -> Expr {
        Expr::new(
            ExprKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
            self.span_from(start),
        )
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Ident(name)
                if name == self.names.async_ && self.cursor.peek_kind(1) == TokenKind::Function =>
            {
                self.cursor.advance();
                self.skip_function()?;
                ExprKind::Function
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                ExprKind::Ident(name)
            }
            TokenKind::String(value) => {
                self.cursor.advance();
                ExprKind::String(value)
            }
            TokenKind::Template => {
                self.cursor.advance();
                ExprKind::Template
            }
            TokenKind::Number => {
                self.cursor.advance();
                ExprKind::Number
            }
            TokenKind::True => {
                self.cursor.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.cursor.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Null => {
                self.cursor.advance();
                ExprKind::Null
            }
            TokenKind::This => {
                self.cursor.advance();
                ExprKind::This
            }
            TokenKind::Import => {
                // `import('./m')` or `import.meta`
                self.cursor.advance();
                ExprKind::Ident(self.interner.intern("import"))
            }
            TokenKind::LParen => {
                let open = self.cursor.advance().span;
                let inner = self.parse_expr()?;
                self.cursor
                    .expect(TokenKind::RParen)
                    .map_err(|err| err.with_related(open, "`(` opened here"))?;
                return Ok(inner);
            }
            TokenKind::LBrace => return self.parse_object_literal(),
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::Function => {
                self.skip_function()?;
                ExprKind::Function
            }
            TokenKind::Class | TokenKind::At => {
                self.parse_decorators()?;
                self.cursor.expect(TokenKind::Class)?;
                self.skip_class_tail()?;
                ExprKind::Function
            }
            found => return Err(ParseError::expected_expression(found, start)),
        };
        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// `{ key: value, shorthand, ...spread, [computed]: value, method() {} }`
    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut props = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LBrace,
                    open,
                    TokenKind::RBrace,
                    self.cursor.current_span(),
                ));
            }
            props.push(self.parse_object_prop()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Object(props), self.span_from(open)))
    }

    fn parse_object_prop(&mut self) -> Result<ObjectProp, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.eat(TokenKind::DotDotDot) {
            let value = self.parse_assign_expr()?;
            return Ok(ObjectProp {
                key: PropKey::Spread,
                value,
                span: self.span_from(start),
            });
        }

        // Accessor, async and generator method prefixes.
        let is_prefix = (self.cursor.check_name(self.names.get)
            || self.cursor.check_name(self.names.set)
            || self.cursor.check_name(self.names.async_))
            && (self.at_property_name(1) || self.cursor.peek_kind(1) == TokenKind::LBracket);
        if is_prefix {
            self.cursor.advance();
        }
        let generator = self.cursor.eat(TokenKind::Star);

        let (key, name_span) = if self.cursor.check(TokenKind::LBracket) {
            let open = self.cursor.advance().span;
            self.parse_assign_expr()?;
            self.cursor.expect(TokenKind::RBracket)?;
            (PropKey::Computed, self.span_from(open))
        } else {
            let (name, span) = self.parse_property_name()?;
            (name.map_or(PropKey::Computed, PropKey::Named), span)
        };

        if is_prefix
            || generator
            || self.cursor.check(TokenKind::LParen)
            || self.cursor.check(TokenKind::Lt)
        {
            self.skip_callable_tail()?;
            return Ok(ObjectProp {
                key,
                value: Expr::new(ExprKind::Function, self.span_from(name_span)),
                span: self.span_from(start),
            });
        }

        if self.cursor.eat(TokenKind::Colon) {
            let value = self.parse_assign_expr()?;
            return Ok(ObjectProp {
                key,
                value,
                span: self.span_from(start),
            });
        }

        // Shorthand `{ name }`, or `{ name = default }` in a pattern.
        let PropKey::Named(name) = key else {
            return Err(ParseError::unexpected(
                "`:`",
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        };
        let value = Expr::new(ExprKind::Ident(name), name_span);
        if self.cursor.eat(TokenKind::Eq) {
            self.parse_assign_expr()?;
        }
        Ok(ObjectProp {
            key,
            value,
            span: self.span_from(start),
        })
    }

    /// `[a, ...b, , c]`. Holes are dropped.
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.expect(TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        loop {
            if self.cursor.eat(TokenKind::RBracket) {
                return Ok(Expr::new(ExprKind::Array(elements), self.span_from(open)));
            }
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LBracket,
                    open,
                    TokenKind::RBracket,
                    self.cursor.current_span(),
                ));
            }
            if self.cursor.eat(TokenKind::Comma) {
                continue;
            }
            elements.push(self.parse_spread_or_assign()?);
            if !self.cursor.check(TokenKind::RBracket) {
                self.cursor.expect(TokenKind::Comma)?;
            }
        }
    }

    /// `(a, ...b)` call arguments.
    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let open = self.cursor.expect(TokenKind::LParen)?.span;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LParen,
                    open,
                    TokenKind::RParen,
                    self.cursor.current_span(),
                ));
            }
            args.push(self.parse_spread_or_assign()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor
            .expect(TokenKind::RParen)
            .map_err(|err| err.with_related(open, "`(` opened here"))?;
        Ok(args)
    }

    fn parse_spread_or_assign(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.eat(TokenKind::DotDotDot) {
            let operand = self.parse_assign_expr()?;
            return Ok(Expr::new(
                ExprKind::Spread(Box::new(operand)),
                self.span_from(start),
            ));
        }
        self.parse_assign_expr()
    }
}

#[cfg(test)]
mod tests;
