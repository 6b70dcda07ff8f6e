//! inj IR - source model shared by every phase of the validator.
//!
//! - Spans for source locations
//! - Names for interned identifiers
//! - `FileId` / `DeclId` for program-wide identity
//! - Tokens and `TokenList` for lexer output
//! - AST of the analyzed TypeScript subset
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals become `Name(u32)`.
//! - **Identity is allocated, never derived from text**: a declaration is a
//!   `DeclId`, and two declarations spelled the same are still distinct.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod ids;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    Accessibility, BindingDecl, ClassDecl, ClassMember, Constructor, Decorator, ExportDecl,
    ExportSpecifier, Expr, ExprKind, ImportDecl, ImportSpecifier, InterfaceDecl, Item, ItemKind,
    MethodDecl, Module, NamedRef, ObjectProp, Param, PropKey, PropertyDecl, TypeAliasDecl,
    TypeExpr, TypeExprKind, TypeMember, TypeMemberKind,
};
pub use ids::{DeclId, FileId};
pub use interner::{StringInterner, StringLookup};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
