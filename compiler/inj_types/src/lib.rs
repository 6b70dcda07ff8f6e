//! Host program model for the DI validator.
//!
//! [`Program`] owns the parsed sources and answers the questions injection
//! checks ask of them:
//!
//! - which declaration a name refers to in a given file, following imports
//!   and re-exports across files
//! - the type of a declaration or annotation, interned in a [`Pool`]
//! - whether one type is assignable to another
//!
//! Types are addressed by [`Idx`]; declarations by `DeclId`.

mod assign;
mod idx;
mod lower;
mod pool;
mod program;

pub use idx::Idx;
pub use pool::{FnParam, Member, Pool, Signature, TypeData};
pub use program::{Decl, DeclKind, ModuleTarget, Program, Shape, SourceFile};
