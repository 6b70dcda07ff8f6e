//! Type expressions and object type members.
//!
//! Forms the validator never compares (conditional, mapped and indexed
//! access types, `keyof`, qualified names) are consumed and produce
//! [`TypeExprKind::Opaque`].

use inj_ir::{Name, Span, TokenKind, TypeExpr, TypeExprKind, TypeMember, TypeMemberKind};

use inj_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// A full type, including conditional types.
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        let check = self.parse_union_type()?;
        if !self.cursor.eat(TokenKind::Extends) {
            return Ok(check);
        }
        self.parse_union_type()?;
        self.cursor.expect(TokenKind::Question)?;
        self.parse_type()?;
        self.cursor.expect(TokenKind::Colon)?;
        self.parse_type()?;
        Ok(self.opaque(start))
    }

    /// A return type annotation. Type predicates (`x is T`, `this is T`)
    /// are `boolean`; assertion signatures are `void`.
    pub(crate) fn parse_return_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.check_name(self.names.asserts)
            && matches!(
                self.cursor.peek_kind(1),
                TokenKind::Ident(_) | TokenKind::This
            )
        {
            self.cursor.advance();
            self.cursor.advance();
            if self.cursor.eat_name(self.names.is) {
                self.parse_type()?;
            }
            return Ok(self.named(self.names.void, start));
        }
        if matches!(
            self.cursor.current_kind(),
            TokenKind::Ident(_) | TokenKind::This
        ) && self.cursor.peek_kind(1) == TokenKind::Ident(self.names.is)
        {
            self.cursor.advance();
            self.cursor.advance();
            self.parse_type()?;
            return Ok(self.named(self.names.boolean, start));
        }
        self.parse_type()
    }

    fn parse_union_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        let leading = self.cursor.eat(TokenKind::Pipe);
        let mut first = self.parse_intersection_type()?;
        if !self.cursor.check(TokenKind::Pipe) {
            if leading {
                first.span = self.span_from(start);
            }
            return Ok(first);
        }
        let mut members = vec![first];
        while self.cursor.eat(TokenKind::Pipe) {
            members.push(self.parse_intersection_type()?);
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Union(members),
            span: self.span_from(start),
        })
    }

    fn parse_intersection_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.eat(TokenKind::Amp);
        let first = self.parse_type_operator()?;
        if !self.cursor.check(TokenKind::Amp) {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.cursor.eat(TokenKind::Amp) {
            members.push(self.parse_type_operator()?);
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Intersection(members),
            span: self.span_from(start),
        })
    }

    /// `keyof T`, `unique symbol`, `readonly T[]`, `infer U` or a postfix
    /// type.
    fn parse_type_operator(&mut self) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| self.parse_type_operator_inner())
    }

    fn parse_type_operator_inner(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        if let TokenKind::Ident(name) = self.cursor.current_kind() {
            let operand_follows = matches!(
                self.cursor.peek_kind(1),
                TokenKind::Ident(_)
                    | TokenKind::LParen
                    | TokenKind::LBracket
                    | TokenKind::LBrace
                    | TokenKind::Typeof
                    | TokenKind::String(_)
                    | TokenKind::This
            );
            if name == self.names.keyof && operand_follows {
                self.cursor.advance();
                self.parse_type_operator()?;
                return Ok(self.opaque(start));
            }
            if name == self.names.unique
                && self.cursor.peek_kind(1) == TokenKind::Ident(self.names.symbol)
            {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(self.named(self.names.symbol, start));
            }
            if name == self.names.readonly && operand_follows {
                self.cursor.advance();
                return self.parse_type_operator();
            }
            if name == self.names.infer && matches!(self.cursor.peek_kind(1), TokenKind::Ident(_))
            {
                self.cursor.advance();
                self.cursor.advance();
                // `infer U extends C` inside a conditional's extends clause.
                if self.cursor.check(TokenKind::Extends)
                    && !self.extends_starts_conditional()
                {
                    self.cursor.advance();
                    self.parse_type_operator()?;
                }
                return Ok(self.opaque(start));
            }
        }
        self.parse_postfix_type()
    }

    /// Whether the `extends` at the cursor begins a conditional type's
    /// branches rather than an `infer` constraint: `extends X ?` with the
    /// `?` at depth zero.
    fn extends_starts_conditional(&self) -> bool {
        let mut pos = self.cursor.position() + 1;
        loop {
            match self.cursor.kind_at(pos) {
                TokenKind::Question => return true,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    match self.cursor.matching_close(pos) {
                        Some(close) => pos = close + 1,
                        None => return false,
                    }
                }
                TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Comma
                | TokenKind::Gt
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::Eof => return false,
                _ => pos += 1,
            }
        }
    }

    /// A primary type followed by `[]` or `[K]`.
    fn parse_postfix_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        let mut ty = self.parse_primary_type()?;
        while self.cursor.check(TokenKind::LBracket) {
            self.cursor.advance();
            if self.cursor.eat(TokenKind::RBracket) {
                ty = TypeExpr {
                    kind: TypeExprKind::Array(Box::new(ty)),
                    span: self.span_from(start),
                };
            } else {
                self.parse_type()?;
                self.cursor.expect(TokenKind::RBracket)?;
                ty = self.opaque(start);
            }
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::LParen => {
                if self.at_function_type() {
                    return self.parse_function_type();
                }
                self.cursor.advance();
                let inner = self.parse_type()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Lt => self.parse_function_type(),
            TokenKind::New => {
                self.cursor.advance();
                self.parse_function_type()?;
                Ok(self.opaque(start))
            }
            TokenKind::Ident(name)
                if name == self.names.abstract_ && self.cursor.peek_kind(1) == TokenKind::New =>
            {
                self.cursor.advance();
                self.cursor.advance();
                self.parse_function_type()?;
                Ok(self.opaque(start))
            }
            TokenKind::LBrace => {
                if self.at_mapped_type() {
                    self.cursor.skip_balanced()?;
                    return Ok(self.opaque(start));
                }
                let members = self.parse_type_members()?;
                Ok(TypeExpr {
                    kind: TypeExprKind::Object(members),
                    span: self.span_from(start),
                })
            }
            TokenKind::LBracket => self.parse_tuple_type(),
            TokenKind::String(value) => {
                self.cursor.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::StringLiteral(value),
                    span: start,
                })
            }
            TokenKind::Number | TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::OtherLiteral,
                    span: start,
                })
            }
            TokenKind::Minus if self.cursor.peek_kind(1) == TokenKind::Number => {
                self.cursor.advance();
                self.cursor.advance();
                Ok(TypeExpr {
                    kind: TypeExprKind::OtherLiteral,
                    span: self.span_from(start),
                })
            }
            TokenKind::Template | TokenKind::This => {
                self.cursor.advance();
                Ok(self.opaque(start))
            }
            TokenKind::Null => {
                self.cursor.advance();
                Ok(self.named(self.names.null, start))
            }
            TokenKind::Void => {
                self.cursor.advance();
                Ok(self.named(self.names.void, start))
            }
            TokenKind::Typeof => self.parse_typeof_type(),
            TokenKind::Import => {
                // `import('./module').Name`
                self.cursor.advance();
                self.cursor.skip_balanced()?;
                self.skip_qualified_tail()?;
                Ok(self.opaque(start))
            }
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.check(TokenKind::Dot) {
                    self.skip_qualified_tail()?;
                    return Ok(self.opaque(start));
                }
                let args = if self.cursor.check(TokenKind::Lt) {
                    self.parse_type_args()?
                } else {
                    Vec::new()
                };
                Ok(TypeExpr {
                    kind: TypeExprKind::Named { name, args },
                    span: self.span_from(start),
                })
            }
            found => Err(ParseError::expected_type(found, start)),
        }
    }

    /// `.a.b<Args>` after the first segment of a qualified name.
    fn skip_qualified_tail(&mut self) -> Result<(), ParseError> {
        while self.cursor.eat(TokenKind::Dot) {
            self.parse_property_name()?;
        }
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        Ok(())
    }

    /// `typeof value`. Only a plain identifier is modelled.
    fn parse_typeof_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.expect(TokenKind::Typeof)?.span;
        if self.cursor.check(TokenKind::Import) {
            self.cursor.advance();
            self.cursor.skip_balanced()?;
            self.skip_qualified_tail()?;
            return Ok(self.opaque(start));
        }
        let (name, _) = self.cursor.expect_ident()?;
        if self.cursor.check(TokenKind::Dot) {
            self.skip_qualified_tail()?;
            return Ok(self.opaque(start));
        }
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        Ok(TypeExpr {
            kind: TypeExprKind::Typeof(name),
            span: self.span_from(start),
        })
    }

    /// `<A, B>` type arguments.
    pub(crate) fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        let open = self.cursor.expect(TokenKind::Lt)?.span;
        let mut args = Vec::new();
        while !self.cursor.check(TokenKind::Gt) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::Lt,
                    open,
                    TokenKind::Gt,
                    self.cursor.current_span(),
                ));
            }
            args.push(self.parse_type()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::Gt)?;
        Ok(args)
    }

    /// Whether the `(` at the cursor opens a function type's parameter list.
    fn at_function_type(&self) -> bool {
        self.cursor
            .matching_close(self.cursor.position())
            .is_some_and(|close| self.cursor.kind_at(close + 1) == TokenKind::Arrow)
    }

    /// `{ [K in Keys]: T }`, optionally with `readonly`/`+`/`-` prefixes.
    fn at_mapped_type(&self) -> bool {
        let mut n = 1;
        if matches!(self.cursor.peek_kind(n), TokenKind::Plus | TokenKind::Minus) {
            n += 1;
        }
        if self.cursor.peek_kind(n) == TokenKind::Ident(self.names.readonly) {
            n += 1;
        }
        self.cursor.peek_kind(n) == TokenKind::LBracket
            && matches!(self.cursor.peek_kind(n + 1), TokenKind::Ident(_))
            && self.cursor.peek_kind(n + 2) == TokenKind::Ident(self.names.in_)
    }

    /// `<T>(a: A) => R`.
    fn parse_function_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        let params = self.parse_params()?;
        self.cursor.expect(TokenKind::Arrow)?;
        let ret = self.parse_return_type()?;
        Ok(TypeExpr {
            kind: TypeExprKind::Function {
                params,
                ret: Box::new(ret),
            },
            span: self.span_from(start),
        })
    }

    /// `[A, B?, ...C[]]`, including labelled elements (`[name: A]`).
    fn parse_tuple_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.cursor.expect(TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        while !self.cursor.check(TokenKind::RBracket) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LBracket,
                    start,
                    TokenKind::RBracket,
                    self.cursor.current_span(),
                ));
            }
            self.cursor.eat(TokenKind::DotDotDot);
            if matches!(self.cursor.current_kind(), TokenKind::Ident(_))
                && (self.cursor.peek_kind(1) == TokenKind::Colon
                    || (self.cursor.peek_kind(1) == TokenKind::Question
                        && self.cursor.peek_kind(2) == TokenKind::Colon))
            {
                self.cursor.advance();
                self.cursor.eat(TokenKind::Question);
                self.cursor.advance();
            }
            elements.push(self.parse_type()?);
            self.cursor.eat(TokenKind::Question);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RBracket)?;
        Ok(TypeExpr {
            kind: TypeExprKind::Tuple(elements),
            span: self.span_from(start),
        })
    }

    /// `{ member; member, ... }` of an interface body or object type.
    ///
    /// Index, call and construct signatures are consumed without producing a
    /// member.
    pub(crate) fn parse_type_members(&mut self) -> Result<Vec<TypeMember>, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut members = Vec::new();
        loop {
            while self.cursor.eat(TokenKind::Semicolon) || self.cursor.eat(TokenKind::Comma) {}
            if self.cursor.eat(TokenKind::RBrace) {
                return Ok(members);
            }
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LBrace,
                    open,
                    TokenKind::RBrace,
                    self.cursor.current_span(),
                ));
            }
            if let Some(member) = self.parse_type_member()? {
                members.push(member);
            }
        }
    }

    fn parse_type_member(&mut self) -> Result<Option<TypeMember>, ParseError> {
        let start = self.cursor.current_span();

        // Call and construct signatures.
        if self.cursor.check(TokenKind::LParen) || self.cursor.check(TokenKind::Lt) {
            self.skip_signature()?;
            return Ok(None);
        }
        if self.cursor.check(TokenKind::New)
            && matches!(self.cursor.peek_kind(1), TokenKind::LParen | TokenKind::Lt)
        {
            self.cursor.advance();
            self.skip_signature()?;
            return Ok(None);
        }

        let readonly = self.at_modifier(self.names.readonly);
        if readonly {
            self.cursor.advance();
        }

        // Index signatures and computed keys.
        if self.cursor.check(TokenKind::LBracket) {
            self.cursor.skip_balanced()?;
            self.cursor.eat(TokenKind::Question);
            if self.cursor.check(TokenKind::LParen) || self.cursor.check(TokenKind::Lt) {
                self.skip_signature()?;
            } else if self.cursor.eat(TokenKind::Colon) {
                self.parse_type()?;
            }
            return Ok(None);
        }

        let mut is_getter = false;
        if (self.cursor.check_name(self.names.get) || self.cursor.check_name(self.names.set))
            && self.at_property_name(1)
        {
            is_getter = self.cursor.check_name(self.names.get);
            self.cursor.advance();
        }

        let (name, _) = self.parse_property_name()?;
        let name = name.unwrap_or(Name::EMPTY);
        let optional = self.cursor.eat(TokenKind::Question);

        if self.cursor.check(TokenKind::LParen) || self.cursor.check(TokenKind::Lt) {
            if self.cursor.check(TokenKind::Lt) {
                self.cursor.skip_angle_brackets()?;
            }
            let params = self.parse_params()?;
            let ret = if self.cursor.eat(TokenKind::Colon) {
                Some(self.parse_return_type()?)
            } else {
                None
            };
            let kind = if is_getter {
                TypeMemberKind::Property(ret)
            } else {
                TypeMemberKind::Method { params, ret }
            };
            return Ok(Some(TypeMember {
                name,
                optional,
                readonly: readonly || is_getter,
                kind,
                span: self.span_from(start),
            }));
        }

        let ty = if self.cursor.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(Some(TypeMember {
            name,
            optional,
            readonly,
            kind: TypeMemberKind::Property(ty),
            span: self.span_from(start),
        }))
    }

    /// `<T>(params): R` of a call signature.
    fn skip_signature(&mut self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        self.parse_params()?;
        if self.cursor.eat(TokenKind::Colon) {
            self.parse_return_type()?;
        }
        Ok(())
    }

    fn named(&self, name: Name, start: Span) -> TypeExpr {
        TypeExpr {
            kind: TypeExprKind::Named {
                name,
                args: Vec::new(),
            },
            span: self.span_from(start),
        }
    }

    fn opaque(&self, start: Span) -> TypeExpr {
        TypeExpr {
            kind: TypeExprKind::Opaque,
            span: self.span_from(start),
        }
    }
}
