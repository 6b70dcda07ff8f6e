//! Top-level declarations: imports, exports, bindings, interfaces and type
//! aliases. Classes live in `class.rs`.

use inj_ir::{
    BindingDecl, Expr, ExportDecl, ExportSpecifier, ImportDecl, ImportSpecifier, InterfaceDecl,
    Item, ItemKind, NamedRef, Span, TokenKind, TypeAliasDecl,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one top-level statement, pushing zero or more items.
    pub(crate) fn parse_item(&mut self, items: &mut Vec<Item>) -> Result<(), ParseError> {
        let start = self.cursor.current_span();
        let mut decorators = self.parse_decorators()?;
        let exported = self.cursor.eat(TokenKind::Export);
        if exported {
            decorators.extend(self.parse_decorators()?);
            if self.cursor.eat(TokenKind::Default) {
                return self.parse_export_default(start, decorators, items);
            }
            if self.cursor.check_name(self.names.type_)
                && self.cursor.peek_kind(1) == TokenKind::LBrace
            {
                self.cursor.advance();
            }
            if self.cursor.check(TokenKind::LBrace) || self.cursor.check(TokenKind::Star) {
                let decl = self.parse_export_list()?;
                items.push(Item {
                    kind: ItemKind::Export(decl),
                    exported: true,
                    span: self.span_from(start),
                });
                return Ok(());
            }
        }

        let kind = self.cursor.current_kind();
        match kind {
            TokenKind::Import
                if !exported
                    && !matches!(
                        self.cursor.peek_kind(1),
                        TokenKind::LParen | TokenKind::Dot
                    ) =>
            {
                let decl = self.parse_import()?;
                items.push(Item {
                    kind: ItemKind::Import(decl),
                    exported: false,
                    span: self.span_from(start),
                });
            }
            TokenKind::Const if self.cursor.peek_kind(1) == TokenKind::Enum => {
                self.cursor.advance();
                self.skip_enum()?;
            }
            TokenKind::Const | TokenKind::Let | TokenKind::Var => {
                self.parse_bindings(start, exported, items)?;
            }
            TokenKind::Class => {
                let class = self.parse_class(decorators, false)?;
                items.push(Item {
                    kind: ItemKind::Class(class),
                    exported,
                    span: self.span_from(start),
                });
            }
            TokenKind::Ident(name)
                if name == self.names.abstract_ && self.cursor.peek_kind(1) == TokenKind::Class =>
            {
                self.cursor.advance();
                let class = self.parse_class(decorators, true)?;
                items.push(Item {
                    kind: ItemKind::Class(class),
                    exported,
                    span: self.span_from(start),
                });
            }
            TokenKind::Interface => {
                let interface = self.parse_interface()?;
                items.push(Item {
                    kind: ItemKind::Interface(interface),
                    exported,
                    span: self.span_from(start),
                });
            }
            TokenKind::Ident(name)
                if name == self.names.type_
                    && matches!(self.cursor.peek_kind(1), TokenKind::Ident(_)) =>
            {
                let alias = self.parse_type_alias()?;
                items.push(Item {
                    kind: ItemKind::TypeAlias(alias),
                    exported,
                    span: self.span_from(start),
                });
            }
            TokenKind::Function => self.skip_function()?,
            TokenKind::Ident(name)
                if name == self.names.async_ && self.cursor.peek_kind(1) == TokenKind::Function =>
            {
                self.cursor.advance();
                self.skip_function()?;
            }
            TokenKind::Enum => self.skip_enum()?,
            TokenKind::Semicolon => {
                self.cursor.advance();
            }
            // `declare ...`, `namespace ...`, `export =` and plain statements.
            _ => self.skip_statement()?,
        }
        Ok(())
    }

    /// `import ...;` in all its forms. Namespace imports bind nothing.
    fn parse_import(&mut self) -> Result<ImportDecl, ParseError> {
        self.cursor.expect(TokenKind::Import)?;

        let mut specifiers = Vec::new();
        if let TokenKind::String(source) = self.cursor.current_kind() {
            let source_span = self.cursor.advance().span;
            self.skip_import_attributes()?;
            self.eat_semicolon();
            return Ok(ImportDecl {
                specifiers,
                source,
                source_span,
            });
        }

        // `import type X from` / `import type { X } from`
        if self.cursor.check_name(self.names.type_)
            && self.cursor.peek_kind(1) != TokenKind::Comma
            && self.cursor.peek_kind(1) != TokenKind::Ident(self.names.from)
        {
            self.cursor.advance();
        }

        // Default import.
        if let TokenKind::Ident(local) = self.cursor.current_kind() {
            let span = self.cursor.advance().span;
            specifiers.push(ImportSpecifier {
                imported: self.names.default,
                local,
                span,
            });
            if !self.cursor.eat(TokenKind::Comma) {
                return self.finish_import(specifiers);
            }
        }

        if self.cursor.eat(TokenKind::Star) {
            if !self.cursor.eat_name(self.names.as_) {
                return Err(ParseError::unexpected(
                    "`as`",
                    self.cursor.current_kind(),
                    self.cursor.current_span(),
                ));
            }
            self.cursor.expect_ident()?;
        } else if self.cursor.check(TokenKind::LBrace) {
            let open = self.cursor.advance().span;
            while !self.cursor.check(TokenKind::RBrace) {
                if self.cursor.is_at_end() {
                    return Err(ParseError::unclosed(
                        TokenKind::LBrace,
                        open,
                        TokenKind::RBrace,
                        self.cursor.current_span(),
                    ));
                }
                if self.at_modifier(self.names.type_) {
                    self.cursor.advance();
                }
                let (imported, span) = self.parse_property_name()?;
                let imported = imported.ok_or_else(|| {
                    ParseError::expected_identifier(TokenKind::Number, span)
                })?;
                let local = if self.cursor.eat_name(self.names.as_) {
                    self.cursor.expect_ident()?.0
                } else {
                    imported
                };
                specifiers.push(ImportSpecifier {
                    imported,
                    local,
                    span: self.span_from(span),
                });
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(TokenKind::RBrace)?;
        } else {
            return Err(ParseError::unexpected(
                "import specifiers",
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        }

        self.finish_import(specifiers)
    }

    /// `from 'source';` after the specifiers.
    fn finish_import(&mut self, specifiers: Vec<ImportSpecifier>) -> Result<ImportDecl, ParseError> {
        let (source, source_span) = self.parse_module_source()?;
        self.skip_import_attributes()?;
        self.eat_semicolon();
        Ok(ImportDecl {
            specifiers,
            source,
            source_span,
        })
    }

    fn parse_module_source(&mut self) -> Result<(inj_ir::Name, Span), ParseError> {
        if !self.cursor.eat_name(self.names.from) {
            return Err(ParseError::unexpected(
                "`from`",
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        }
        match self.cursor.current_kind() {
            TokenKind::String(source) => Ok((source, self.cursor.advance().span)),
            found => Err(ParseError::unexpected(
                "module specifier string",
                found,
                self.cursor.current_span(),
            )),
        }
    }

    /// `with { type: 'json' }` / `assert { ... }` after a module specifier.
    fn skip_import_attributes(&mut self) -> Result<(), ParseError> {
        if self.cursor.check_ident() && self.cursor.peek_kind(1) == TokenKind::LBrace {
            self.cursor.advance();
            self.cursor.skip_balanced()?;
        }
        Ok(())
    }

    /// `{ a, b as c } [from '...']` or `* [as ns] from '...'` after `export`.
    fn parse_export_list(&mut self) -> Result<ExportDecl, ParseError> {
        if self.cursor.eat(TokenKind::Star) {
            let namespace = self.cursor.eat_name(self.names.as_);
            if namespace {
                self.parse_property_name()?;
            }
            let (source, source_span) = self.parse_module_source()?;
            self.eat_semicolon();
            return Ok(ExportDecl {
                specifiers: Vec::new(),
                source: Some(source),
                source_span,
                // A namespace re-export binds one name, which is not modelled.
                all: !namespace,
            });
        }

        let open = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut specifiers = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed(
                    TokenKind::LBrace,
                    open,
                    TokenKind::RBrace,
                    self.cursor.current_span(),
                ));
            }
            if self.at_modifier(self.names.type_) {
                self.cursor.advance();
            }
            let (local, span) = self.parse_property_name()?;
            let local =
                local.ok_or_else(|| ParseError::expected_identifier(TokenKind::Number, span))?;
            let exported = if self.cursor.eat_name(self.names.as_) {
                let (name, name_span) = self.parse_property_name()?;
                name.ok_or_else(|| ParseError::expected_identifier(TokenKind::Number, name_span))?
            } else {
                local
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: self.span_from(span),
            });
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.cursor.expect(TokenKind::RBrace)?.span;

        let (source, source_span) = if self.cursor.check_name(self.names.from) {
            let (source, span) = self.parse_module_source()?;
            (Some(source), span)
        } else {
            (None, close)
        };
        self.eat_semicolon();
        Ok(ExportDecl {
            specifiers,
            source,
            source_span,
            all: false,
        })
    }

    /// `export default ...`.
    ///
    /// Named classes are exported under both names. Any other expression
    /// becomes a binding named `default`, so a default-exported configuration
    /// literal still has a declaration identity.
    fn parse_export_default(
        &mut self,
        start: Span,
        decorators: Vec<inj_ir::Decorator>,
        items: &mut Vec<Item>,
    ) -> Result<(), ParseError> {
        let is_abstract = self.cursor.check_name(self.names.abstract_)
            && self.cursor.peek_kind(1) == TokenKind::Class;
        if is_abstract {
            self.cursor.advance();
        }
        if self.cursor.check(TokenKind::Class) {
            if !matches!(self.cursor.peek_kind(1), TokenKind::Ident(_)) {
                // Anonymous class: nothing can refer to it.
                self.cursor.advance();
                self.skip_class_tail()?;
                return Ok(());
            }
            let class = self.parse_class(decorators, is_abstract)?;
            let name = class.name;
            let name_span = class.name_span;
            items.push(Item {
                kind: ItemKind::Class(class),
                exported: true,
                span: self.span_from(start),
            });
            items.push(self.default_alias(name, name_span));
            return Ok(());
        }
        if self.cursor.check(TokenKind::Interface) {
            let interface = self.parse_interface()?;
            let (name, name_span) = (interface.name, interface.name_span);
            items.push(Item {
                kind: ItemKind::Interface(interface),
                exported: true,
                span: self.span_from(start),
            });
            items.push(self.default_alias(name, name_span));
            return Ok(());
        }
        if self.cursor.check(TokenKind::Function) {
            return self.skip_function();
        }

        // `export default name;`
        if let TokenKind::Ident(name) = self.cursor.current_kind() {
            if matches!(
                self.cursor.peek_kind(1),
                TokenKind::Semicolon | TokenKind::Eof
            ) || crate::recovery::starts_item(self.cursor.peek_kind(1))
            {
                let span = self.cursor.advance().span;
                self.eat_semicolon();
                items.push(self.default_alias(name, span));
                return Ok(());
            }
        }

        let init = self.parse_expr()?;
        let name_span = init.span;
        self.eat_semicolon();
        items.push(Item {
            kind: ItemKind::Binding(BindingDecl {
                name: self.names.default,
                name_span,
                ty: None,
                init: Some(init),
            }),
            exported: true,
            span: self.span_from(start),
        });
        Ok(())
    }

    fn default_alias(&self, local: inj_ir::Name, span: Span) -> Item {
        Item {
            kind: ItemKind::Export(ExportDecl {
                specifiers: vec![ExportSpecifier {
                    local,
                    exported: self.names.default,
                    span,
                }],
                source: None,
                source_span: span,
                all: false,
            }),
            exported: true,
            span,
        }
    }

    /// `const a: T = x, b = y;`: one item per named declarator.
    fn parse_bindings(
        &mut self,
        start: Span,
        exported: bool,
        items: &mut Vec<Item>,
    ) -> Result<(), ParseError> {
        self.cursor.advance();
        let mut first = true;
        loop {
            let declarator_start = self.cursor.current_span();
            let name = match self.cursor.current_kind() {
                TokenKind::Ident(name) => {
                    self.cursor.advance();
                    Some((name, declarator_start))
                }
                TokenKind::LBrace | TokenKind::LBracket => {
                    // Destructuring binds names the validator never resolves.
                    self.cursor.skip_balanced()?;
                    None
                }
                found => return Err(ParseError::expected_identifier(found, declarator_start)),
            };
            self.cursor.eat(TokenKind::Bang);
            let ty = if self.cursor.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let init: Option<Expr> = if self.cursor.eat(TokenKind::Eq) {
                Some(self.parse_assign_expr()?)
            } else {
                None
            };

            if let Some((name, name_span)) = name {
                let item_start = if first { start } else { declarator_start };
                items.push(Item {
                    kind: ItemKind::Binding(BindingDecl {
                        name,
                        name_span,
                        ty,
                        init,
                    }),
                    exported,
                    span: self.span_from(item_start),
                });
            }

            first = false;
            if !self.cursor.eat(TokenKind::Comma) {
                break;
            }
        }
        self.eat_semicolon();
        Ok(())
    }

    /// `interface Name<T> extends A, B { members }`.
    pub(crate) fn parse_interface(&mut self) -> Result<InterfaceDecl, ParseError> {
        self.cursor.expect(TokenKind::Interface)?;
        let (name, name_span) = self.cursor.expect_ident()?;
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        let mut extends = Vec::new();
        if self.cursor.eat(TokenKind::Extends) {
            loop {
                if let Some(named) = self.parse_heritage_ref()? {
                    extends.push(named);
                }
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let members = self.parse_type_members()?;
        Ok(InterfaceDecl {
            name,
            name_span,
            extends,
            members,
        })
    }

    /// A name in an `extends`/`implements` clause, with type arguments
    /// skipped. Qualified names (`ns.Base`) are consumed but not returned.
    pub(crate) fn parse_heritage_ref(&mut self) -> Result<Option<NamedRef>, ParseError> {
        let (name, span) = self.cursor.expect_ident()?;
        let mut qualified = false;
        while self.cursor.eat(TokenKind::Dot) {
            self.parse_property_name()?;
            qualified = true;
        }
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        Ok((!qualified).then_some(NamedRef { name, span }))
    }

    /// `type Name<T> = Type;`
    fn parse_type_alias(&mut self) -> Result<TypeAliasDecl, ParseError> {
        self.cursor.advance();
        let (name, name_span) = self.cursor.expect_ident()?;
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        self.cursor.expect(TokenKind::Eq)?;
        let ty = self.parse_type()?;
        self.eat_semicolon();
        Ok(TypeAliasDecl {
            name,
            name_span,
            ty,
        })
    }

    /// `function name<T>(params): R { body }`: nothing is kept.
    pub(crate) fn skip_function(&mut self) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Function)?;
        self.cursor.eat(TokenKind::Star);
        if self.cursor.check_ident() {
            self.cursor.advance();
        }
        self.skip_callable_tail()
    }

    /// `<T>(params): R { body }` or `(params): R;` after a callable's name.
    pub(crate) fn skip_callable_tail(&mut self) -> Result<(), ParseError> {
        if self.cursor.check(TokenKind::Lt) {
            self.cursor.skip_angle_brackets()?;
        }
        self.parse_params()?;
        if self.cursor.eat(TokenKind::Colon) {
            self.parse_return_type()?;
        }
        if self.cursor.check(TokenKind::LBrace) {
            self.cursor.skip_balanced()?;
        } else {
            self.eat_semicolon();
        }
        Ok(())
    }

    /// `enum Name { ... }`.
    fn skip_enum(&mut self) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Enum)?;
        self.cursor.expect_ident()?;
        if !self.cursor.check(TokenKind::LBrace) {
            return Err(ParseError::unexpected(
                "`{`",
                self.cursor.current_kind(),
                self.cursor.current_span(),
            ));
        }
        self.cursor.skip_balanced()?;
        Ok(())
    }
}
