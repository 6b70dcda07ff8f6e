//! Token model: the identity of a DI key.
//!
//! A token expression is a symbol constant (`const LOGGER = Symbol('Logger')`)
//! or a class. Either way its identity is the declaration it resolves to, so
//! two constants that print the same are still distinct tokens, and an
//! imported token is the same token as its export.

use std::fmt;
use std::hash::{Hash, Hasher};

use inj_ir::{DeclId, Expr, ExprKind, FileId, Name};
use inj_types::{DeclKind, Idx, Program};

/// Map key for a token: the declaration it resolves to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey(DeclId);

impl TokenKey {
    pub fn decl(self) -> DeclId {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A `symbol` constant.
    Symbol,
    /// A class used as a key (and possibly as its own implementation).
    Class,
    /// An interface or type alias named by an unannotated constructor
    /// parameter. Types have no runtime identity, so nothing can register it.
    Type,
}

/// A resolved token. Equality and hashing use [`TokenKey`] only.
#[derive(Clone, Debug)]
pub struct Token {
    pub key: TokenKey,
    pub kind: TokenKind,
    /// Name for messages: the symbol description or the declaration name.
    pub display: String,
}

impl Token {
    /// The class token for a class declaration.
    pub fn class(program: &Program, class: DeclId) -> Token {
        Token {
            key: TokenKey(class),
            kind: TokenKind::Class,
            display: program.text(program.decl(class).name).to_owned(),
        }
    }

    /// The token an unannotated parameter typed as an interface or alias
    /// asks for.
    pub fn type_only(program: &Program, decl: DeclId) -> Token {
        Token {
            key: TokenKey(decl),
            kind: TokenKind::Type,
            display: program.text(program.decl(decl).name).to_owned(),
        }
    }

    pub fn is_class(&self) -> bool {
        self.kind == TokenKind::Class
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("`{0}` does not refer to a declaration in the program")]
    Unresolved(String),
    #[error("unsupported token: {0}")]
    Unsupported(String),
}

/// Resolve a token expression written in `file`.
pub fn resolve_token(program: &Program, file: FileId, expr: &Expr) -> Result<Token, TokenError> {
    let Some(name) = expr.as_ident() else {
        return Err(TokenError::Unsupported(
            "expected a class or a symbol constant".to_owned(),
        ));
    };
    let text = program.text(name);
    let decl = program
        .resolve(file, name)
        .ok_or_else(|| TokenError::Unresolved(text.to_owned()))?;

    match program.decl(decl).kind {
        DeclKind::Class => Ok(Token::class(program, decl)),
        DeclKind::Binding => symbol_token(program, decl).ok_or_else(|| {
            TokenError::Unsupported(format!("`{text}` is not a symbol constant"))
        }),
        DeclKind::Interface | DeclKind::TypeAlias => Err(TokenError::Unsupported(format!(
            "`{text}` is a type and has no runtime identity"
        ))),
    }
}

/// A binding initialized with `Symbol(..)`/`Symbol.for(..)` or declared as
/// `symbol`.
fn symbol_token(program: &Program, decl: DeclId) -> Option<Token> {
    let binding = program.binding(decl)?;
    let description = binding
        .init
        .as_ref()
        .and_then(|init| symbol_call(program, program.decl(decl).file, init));
    let is_symbol = match description {
        Some(_) => true,
        None => program.decl_type(decl) == Idx::SYMBOL,
    };
    if !is_symbol {
        return None;
    }
    let display = description
        .flatten()
        .map_or_else(|| program.text(binding.name), |d| program.text(d));
    Some(Token {
        key: TokenKey(decl),
        kind: TokenKind::Symbol,
        display: display.to_owned(),
    })
}

/// `Some(description)` if `expr` calls the global `Symbol` or `Symbol.for`.
fn symbol_call(program: &Program, file: FileId, expr: &Expr) -> Option<Option<Name>> {
    let ExprKind::Call { callee, args, .. } = &expr.kind else {
        return None;
    };
    let global = match &callee.kind {
        ExprKind::Ident(name) => *name,
        ExprKind::Member { object, property } if program.text(*property) == "for" => {
            object.as_ident()?
        }
        _ => return None,
    };
    if program.text(global) != "Symbol" || program.resolve(file, global).is_some() {
        return None;
    }
    let description = args.first().and_then(|arg| match arg.kind {
        ExprKind::String(text) => Some(text),
        _ => None,
    });
    Some(description)
}
