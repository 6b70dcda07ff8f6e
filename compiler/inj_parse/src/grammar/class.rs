//! Class declarations, members, parameters and decorators.

use inj_ir::{
    Accessibility, ClassDecl, ClassMember, Constructor, Decorator, Expr, MethodDecl, Name, Param,
    PropertyDecl, TokenKind, TypeExpr, TypeExprKind,
};

use crate::{ParseError, Parser};

/// Modifiers collected in front of a class member or constructor parameter.
#[derive(Default)]
struct Modifiers {
    accessibility: Option<Accessibility>,
    is_static: bool,
    readonly: bool,
}

impl Parser<'_> {
    /// Zero or more `@name`, `@a.b` or `@name(args)` decorators.
    ///
    /// For a dotted decorator the last segment is its name.
    pub(crate) fn parse_decorators(&mut self) -> Result<Vec<Decorator>, ParseError> {
        let mut decorators = Vec::new();
        while self.cursor.check(TokenKind::At) {
            let start = self.cursor.advance().span;
            let (mut name, _) = self.cursor.expect_ident()?;
            while self.cursor.eat(TokenKind::Dot) {
                let (segment, span) = self.parse_property_name()?;
                name = segment
                    .ok_or_else(|| ParseError::expected_identifier(TokenKind::Number, span))?;
            }
            if self.cursor.check(TokenKind::Lt) {
                self.cursor.skip_angle_brackets()?;
            }
            let args = if self.cursor.check(TokenKind::LParen) {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            decorators.push(Decorator {
                name,
                args,
                span: self.span_from(start),
            });
        }
        Ok(decorators)
    }

    /// `class Name<T> extends Base implements A, B { members }`.
    ///
    /// The cursor is on `class`; any `abstract` was consumed by the caller.
    pub(crate) fn parse_class(
        &mut self,
        decorators: Vec<Decorator>,
        is_abstract: bool,
    ) -> Result<ClassDecl, ParseError> {
        self.cursor.expect(TokenKind::Class)?;
        let (name, name_span) = self.cursor.expect_ident()?;
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }

        let mut extends = None;
        if self.cursor.eat(TokenKind::Extends) {
            extends = self.parse_heritage_ref()?;
        }
        let mut implements = Vec::new();
        if self.cursor.eat(TokenKind::Implements) {
            loop {
                if let Some(named) = self.parse_heritage_ref()? {
                    implements.push(named);
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let members = self.parse_class_body()?;
        Ok(ClassDecl {
            name,
            name_span,
            decorators,
            is_abstract,
            extends,
            implements,
            members,
        })
    }

    /// Skip the heritage clauses and body of an anonymous class.
    pub(crate) fn skip_class_tail(&mut self) -> Result<(), ParseError> {
        while !self.cursor.check(TokenKind::LBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unexpected(
                    "class body",
                    TokenKind::Eof,
                    self.cursor.current_span(),
                ));
            }
            if self.cursor.check(TokenKind::Lt) {
                self.cursor.skip_angle_brackets()?;
            } else if self.cursor.check(TokenKind::LParen) {
                self.cursor.skip_balanced()?;
            } else {
                self.cursor.advance();
            }
        }
        self.cursor.skip_balanced()?;
        Ok(())
    }

    /// `{ member* }`. A malformed member is recorded and skipped; the rest
    /// of the class still parses.
    fn parse_class_body(&mut self) -> Result<Vec<ClassMember>, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut members = Vec::new();
        loop {
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
            let start = self.cursor.position();
            match self.parse_class_member() {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(err) => {
                    tracing::trace!(message = %err.message, "class member parse error");
                    self.errors.push(err);
                    self.recover_class_member(start);
                }
            }
        }
    }

    /// Skip to the next member boundary: after `;`, after a `{ }` body or
    /// before the closing brace of the class.
    fn recover_class_member(&mut self, start: usize) {
        if self.cursor.position() == start {
            self.cursor.advance();
        }
        loop {
            match self.cursor.current_kind() {
                TokenKind::Eof | TokenKind::RBrace => return,
                TokenKind::Semicolon => {
                    self.cursor.advance();
                    return;
                }
                TokenKind::LBrace => {
                    let before = self.cursor.position();
                    if self.cursor.skip_balanced().is_err() && self.cursor.position() == before {
                        self.cursor.advance();
                    }
                    return;
                }
                TokenKind::LParen | TokenKind::LBracket => {
                    let before = self.cursor.position();
                    if self.cursor.skip_balanced().is_err() && self.cursor.position() == before {
                        self.cursor.advance();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// One class member. Returns `None` for members the validator ignores
    /// (setters, index signatures, static blocks, stray semicolons).
    fn parse_class_member(&mut self) -> Result<Option<ClassMember>, ParseError> {
        let start = self.cursor.current_span();
        if self.cursor.eat(TokenKind::Semicolon) {
            return Ok(None);
        }
        // Member decorators do not affect injection.
        self.parse_decorators()?;
        let modifiers = self.parse_modifiers();

        // `static { ... }`
        if modifiers.is_static && self.cursor.check(TokenKind::LBrace) {
            self.cursor.skip_balanced()?;
            return Ok(None);
        }
        // `[key: string]: T;`
        if self.cursor.check(TokenKind::LBracket) {
            self.cursor.skip_balanced()?;
            self.cursor.eat(TokenKind::Question);
            if self.cursor.eat(TokenKind::Colon) {
                self.parse_type()?;
            }
            if self.cursor.eat(TokenKind::Eq) {
                self.parse_assign_expr()?;
            }
            if self.cursor.check(TokenKind::LParen) || self.cursor.check(TokenKind::Lt) {
                self.skip_callable_tail()?;
            } else {
                self.eat_semicolon();
            }
            return Ok(None);
        }

        let mut is_getter = false;
        if self.at_accessor_keyword(self.names.get) {
            self.cursor.advance();
            is_getter = true;
        } else if self.at_accessor_keyword(self.names.set) {
            self.cursor.advance();
            self.parse_property_name()?;
            self.skip_callable_tail()?;
            return Ok(None);
        }
        // Generator methods.
        self.cursor.eat(TokenKind::Star);

        let (name, _) = self.parse_property_name()?;
        let name = name.unwrap_or(Name::EMPTY);
        let optional = self.cursor.eat(TokenKind::Question);
        self.cursor.eat(TokenKind::Bang);

        if name == self.names.constructor && self.cursor.check(TokenKind::LParen) {
            let params = self.parse_params()?;
            self.skip_body_or_semicolon()?;
            return Ok(Some(ClassMember::Constructor(Constructor {
                params,
                span: self.span_from(start),
            })));
        }

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
            self.skip_body_or_semicolon()?;
            let accessibility = modifiers.accessibility.unwrap_or_default();
            if is_getter {
                return Ok(Some(ClassMember::Property(PropertyDecl {
                    accessibility,
                    is_static: modifiers.is_static,
                    readonly: true,
                    name,
                    optional,
                    ty: ret,
                    span: self.span_from(start),
                })));
            }
            return Ok(Some(ClassMember::Method(MethodDecl {
                accessibility,
                is_static: modifiers.is_static,
                name,
                optional,
                params,
                ret,
                span: self.span_from(start),
            })));
        }

        let ty = if self.cursor.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let init = if self.cursor.eat(TokenKind::Eq) {
            Some(self.parse_assign_expr()?)
        } else {
            None
        };
        self.eat_semicolon();
        Ok(Some(ClassMember::Property(PropertyDecl {
            accessibility: modifiers.accessibility.unwrap_or_default(),
            is_static: modifiers.is_static,
            readonly: modifiers.readonly,
            name,
            optional,
            ty: ty.or_else(|| init.as_ref().and_then(|init| self.literal_type(init))),
            span: self.span_from(start),
        })))
    }

    /// The declared type of a property initialized with a primitive literal.
    fn literal_type(&self, init: &Expr) -> Option<TypeExpr> {
        let name = match init.kind {
            inj_ir::ExprKind::String(_) | inj_ir::ExprKind::Template => "string",
            inj_ir::ExprKind::Number => "number",
            inj_ir::ExprKind::Bool(_) => "boolean",
            _ => return None,
        };
        Some(TypeExpr {
            kind: TypeExprKind::Named {
                name: self.interner.intern(name),
                args: Vec::new(),
            },
            span: init.span,
        })
    }

    /// `get`/`set` used as an accessor keyword rather than a member name.
    fn at_accessor_keyword(&self, name: Name) -> bool {
        self.cursor.check_name(name)
            && (self.at_property_name(1) || self.cursor.peek_kind(1) == TokenKind::LBracket)
    }

    /// Accessibility, `static`, `readonly` and the modifiers that do not
    /// matter here (`abstract`, `override`, `declare`, `async`, `accessor`).
    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            let TokenKind::Ident(name) = self.cursor.current_kind() else {
                return modifiers;
            };
            if !self.at_modifier(name) {
                return modifiers;
            }
            if name == self.names.public {
                modifiers.accessibility = Some(Accessibility::Public);
            } else if name == self.names.protected {
                modifiers.accessibility = Some(Accessibility::Protected);
            } else if name == self.names.private {
                modifiers.accessibility = Some(Accessibility::Private);
            } else if name == self.names.static_ {
                modifiers.is_static = true;
            } else if name == self.names.readonly {
                modifiers.readonly = true;
            } else if name != self.names.abstract_
                && name != self.names.override_
                && name != self.names.declare
                && name != self.names.async_
                && name != self.names.accessor
            {
                return modifiers;
            }
            self.cursor.advance();
        }
    }

    fn skip_body_or_semicolon(&mut self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::LBrace) {
            self.cursor.skip_balanced()?;
        } else {
            self.eat_semicolon();
        }
        Ok(())
    }

    /// `(param, ...)` for constructors, methods and function types.
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let open = self.cursor.expect(TokenKind::LParen)?.span;
        let mut params = Vec::new();
        while !self.cursor.check(TokenKind::RParen) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LParen,
                    open,
                    TokenKind::RParen,
                    self.cursor.current_span(),
                ));
            }
            params.push(self.parse_param()?);
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(TokenKind::RParen).map_err(|err| {
            err.with_related(open, "`(` opened here")
        })?;
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let start = self.cursor.current_span();
        let decorators = self.parse_decorators()?;
        let modifiers = self.parse_modifiers();
        let rest = self.cursor.eat(TokenKind::DotDotDot);

        let name = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                name
            }
            TokenKind::This => {
                self.cursor.advance();
                Name::EMPTY
            }
            TokenKind::LBrace | TokenKind::LBracket => {
                self.cursor.skip_balanced()?;
                Name::EMPTY
            }
            found => {
                return Err(ParseError::expected_identifier(
                    found,
                    self.cursor.current_span(),
                ))
            }
        };
        let optional = self.cursor.eat(TokenKind::Question);
        let ty = if self.cursor.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let has_default = if self.cursor.eat(TokenKind::Eq) {
            self.parse_assign_expr()?;
            true
        } else {
            false
        };

        Ok(Param {
            decorators,
            accessibility: modifiers.accessibility,
            readonly: modifiers.readonly,
            name,
            // A rest parameter accepts zero arguments.
            optional: optional || rest,
            ty,
            has_default,
            span: self.span_from(start),
        })
    }
}
