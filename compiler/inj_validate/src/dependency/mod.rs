//! Dependency analyzer: what each class's constructor asks for.

use inj_ir::{DeclId, Expr, FileId, Name, Param, Span, TypeExprKind};
use inj_types::{DeclKind, Idx, Program};

use crate::token::{resolve_token, Token};

/// One required constructor parameter.
#[derive(Clone, Debug)]
pub struct RequiredDependency {
    pub token: Token,
    /// The parameter's declared type.
    pub expected: Idx,
    pub param: Name,
    /// Zero-based position in the constructor's parameter list.
    pub index: usize,
    pub file: FileId,
    pub span: Span,
}

/// A class with a constructor and the dependencies it declares.
#[derive(Clone, Debug)]
pub struct AnalyzedClass {
    pub id: DeclId,
    pub name: String,
    pub file: FileId,
    pub dependencies: Vec<RequiredDependency>,
}

const INJECT_DECORATORS: [&str; 2] = ["inject", "Inject"];

/// Analyze every top-level class in `file` that declares a constructor.
pub fn analyze_file(program: &Program, file: FileId) -> Vec<AnalyzedClass> {
    program
        .decls()
        .iter()
        .filter(|decl| decl.file == file && decl.kind == DeclKind::Class)
        .filter_map(|decl| analyze_class(program, decl.id))
        .collect()
}

fn analyze_class(program: &Program, id: DeclId) -> Option<AnalyzedClass> {
    let class = program.class(id)?;
    let ctor = class.constructor()?;
    let file = program.decl(id).file;
    let name = program.text(class.name).to_owned();

    let dependencies = ctor
        .params
        .iter()
        .enumerate()
        .filter_map(|(index, param)| {
            let dependency = required_dependency(program, file, index, param);
            if dependency.is_none() {
                tracing::debug!(
                    class = %name,
                    index,
                    param = program.text(param.name),
                    "parameter has no resolvable token"
                );
            }
            dependency
        })
        .collect();

    Some(AnalyzedClass {
        id,
        name,
        file,
        dependencies,
    })
}

/// The token and expected type of one parameter. Optional parameters and
/// parameters with a default are never required.
fn required_dependency(
    program: &Program,
    file: FileId,
    index: usize,
    param: &Param,
) -> Option<RequiredDependency> {
    if param.is_optional() {
        return None;
    }
    let token = match explicit_token(program, param) {
        Some(arg) => resolve_token(program, file, arg).ok()?,
        None => implicit_token(program, file, param)?,
    };
    let expected = param
        .ty
        .as_ref()
        .map_or(Idx::ANY, |ty| program.lower_type(file, ty));
    Some(RequiredDependency {
        token,
        expected,
        param: param.name,
        index,
        file,
        span: param.span,
    })
}

/// The argument of `@inject(TOKEN)`.
fn explicit_token<'p>(program: &Program, param: &'p Param) -> Option<&'p Expr> {
    param
        .decorators
        .iter()
        .find(|d| INJECT_DECORATORS.contains(&program.text(d.name)))
        .and_then(|d| d.args.first())
}

/// The declared type, when it names a declaration in the program. Interfaces
/// and aliases yield a token nothing can provide; library types that do not
/// resolve are dropped.
fn implicit_token(program: &Program, file: FileId, param: &Param) -> Option<Token> {
    let TypeExprKind::Named { name, .. } = &param.ty.as_ref()?.kind else {
        return None;
    };
    let decl = program.resolve(file, *name)?;
    match program.decl(decl).kind {
        DeclKind::Class => Some(Token::class(program, decl)),
        DeclKind::Interface | DeclKind::TypeAlias => Some(Token::type_only(program, decl)),
        DeclKind::Binding => None,
    }
}

#[cfg(test)]
mod tests;
