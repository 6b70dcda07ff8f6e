//! Syntax tree for the analyzed TypeScript subset.
//!
//! Only the shapes the validator inspects are modelled in detail: imports,
//! top-level bindings, classes (decorators, members, constructor parameters),
//! interfaces, type aliases, type expressions and data-literal expressions.
//! Function and method bodies are skipped by the parser and never appear
//! here.

use crate::{Name, Span};

/// One parsed source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    pub items: Vec<Item>,
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub exported: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    Import(ImportDecl),
    Export(ExportDecl),
    Binding(BindingDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
}

/// `import { a, b as c } from './module';`
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    pub specifiers: Vec<ImportSpecifier>,
    /// Module specifier text, e.g. `./tokens`.
    pub source: Name,
    pub source_span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportSpecifier {
    /// Name exported by the source module.
    pub imported: Name,
    /// Name bound in the importing file.
    pub local: Name,
    pub span: Span,
}

/// `export { a, b as c };`, `export { a } from './m';` or `export * from './m';`
#[derive(Clone, Debug, PartialEq)]
pub struct ExportDecl {
    pub specifiers: Vec<ExportSpecifier>,
    /// Re-export source, if any.
    pub source: Option<Name>,
    pub source_span: Span,
    /// `export * from`
    pub all: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportSpecifier {
    /// Name in the exporting scope (or in `source` for re-exports).
    pub local: Name,
    /// Name other modules import.
    pub exported: Name,
    pub span: Span,
}

/// `const name: Ty = init;` (also `let`/`var`).
#[derive(Clone, Debug, PartialEq)]
pub struct BindingDecl {
    pub name: Name,
    pub name_span: Span,
    pub ty: Option<TypeExpr>,
    pub init: Option<Expr>,
}

/// A name used in a heritage clause (`extends Base`, `implements Port`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedRef {
    pub name: Name,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Name,
    pub name_span: Span,
    pub decorators: Vec<Decorator>,
    pub is_abstract: bool,
    pub extends: Option<NamedRef>,
    pub implements: Vec<NamedRef>,
    pub members: Vec<ClassMember>,
}

impl ClassDecl {
    /// The constructor, if the class declares one.
    pub fn constructor(&self) -> Option<&Constructor> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Constructor(ctor) => Some(ctor),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    Constructor(Constructor),
    Property(PropertyDecl),
    Method(MethodDecl),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    pub params: Vec<Param>,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A function, method or constructor parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub decorators: Vec<Decorator>,
    pub accessibility: Option<Accessibility>,
    pub readonly: bool,
    pub name: Name,
    pub optional: bool,
    pub ty: Option<TypeExpr>,
    pub has_default: bool,
    pub span: Span,
}

impl Param {
    /// Constructor parameters with a modifier also declare a class member.
    pub fn is_parameter_property(&self) -> bool {
        self.accessibility.is_some() || self.readonly
    }

    /// Whether callers may omit the argument.
    pub fn is_optional(&self) -> bool {
        self.optional || self.has_default
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDecl {
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub readonly: bool,
    pub name: Name,
    pub optional: bool,
    pub ty: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub name: Name,
    pub optional: bool,
    pub params: Vec<Param>,
    pub ret: Option<TypeExpr>,
    pub span: Span,
}

/// `@name` or `@name(args...)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    pub name: Name,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceDecl {
    pub name: Name,
    pub name_span: Span,
    pub extends: Vec<NamedRef>,
    pub members: Vec<TypeMember>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeAliasDecl {
    pub name: Name,
    pub name_span: Span,
    pub ty: TypeExpr,
}

/// Member of an interface body or object type literal.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeMember {
    pub name: Name,
    pub optional: bool,
    pub readonly: bool,
    pub kind: TypeMemberKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeMemberKind {
    Property(Option<TypeExpr>),
    Method {
        params: Vec<Param>,
        ret: Option<TypeExpr>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn into_kind(mut self) -> TypeExprKind {
        std::mem::replace(&mut self.kind, TypeExprKind::Opaque)
    }
}

impl Drop for TypeExpr {
    fn drop(&mut self) {
        if matches!(self.kind, TypeExprKind::Opaque | TypeExprKind::OtherLiteral) {
            return;
        }
        let kind = std::mem::replace(&mut self.kind, TypeExprKind::Opaque);
        inj_stack::ensure_sufficient_stack(move || drop(kind));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExprKind {
    /// `Name` or `Name<Args>`; primitives are named too (`string`, `void`).
    Named { name: Name, args: Vec<TypeExpr> },
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `A | B`
    Union(Vec<TypeExpr>),
    /// `A & B`
    Intersection(Vec<TypeExpr>),
    /// `{ a: T; m(): U }`
    Object(Vec<TypeMember>),
    /// `(a: T) => R`
    Function { params: Vec<Param>, ret: Box<TypeExpr> },
    /// `[A, B]`
    Tuple(Vec<TypeExpr>),
    /// `'literal'`
    StringLiteral(Name),
    /// Numeric or boolean literal type.
    OtherLiteral,
    /// `typeof value`
    Typeof(Name),
    /// A form the validator does not model (conditional, mapped, indexed
    /// access, `keyof`, template literal types, qualified names).
    Opaque,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// The identifier, if this expression is a bare identifier.
    pub fn as_ident(&self) -> Option<Name> {
        match self.kind {
            ExprKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn into_kind(mut self) -> ExprKind {
        std::mem::replace(&mut self.kind, ExprKind::Null)
    }
}

// Nested literals are dropped one level per call; the stack has to keep up.
impl Drop for Expr {
    fn drop(&mut self) {
        if matches!(
            self.kind,
            ExprKind::Ident(_)
                | ExprKind::String(_)
                | ExprKind::Template
                | ExprKind::Number
                | ExprKind::Bool(_)
                | ExprKind::Null
                | ExprKind::This
                | ExprKind::Function
                | ExprKind::Error
        ) {
            return;
        }
        let kind = std::mem::replace(&mut self.kind, ExprKind::Null);
        inj_stack::ensure_sufficient_stack(move || drop(kind));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Ident(Name),
    String(Name),
    Template,
    Number,
    Bool(bool),
    Null,
    This,
    Object(Vec<ObjectProp>),
    Array(Vec<Expr>),
    /// `...expr` inside an array literal or call arguments.
    Spread(Box<Expr>),
    Call {
        callee: Box<Expr>,
        type_args: Vec<TypeExpr>,
        args: Vec<Expr>,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: Name,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// Arrow function, function or class expression; the body is opaque.
    Function,
    Unary(Box<Expr>),
    Binary {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Placeholder produced by error recovery.
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectProp {
    pub key: PropKey,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropKey {
    /// `name: value`, `name` shorthand, `'name': value` or `name() {}`.
    Named(Name),
    /// `[expr]: value`
    Computed,
    /// `...expr` (the spread operand is the prop value).
    Spread,
}

impl ObjectProp {
    pub fn name(&self) -> Option<Name> {
        match self.key {
            PropKey::Named(name) => Some(name),
            PropKey::Computed | PropKey::Spread => None,
        }
    }
}
