//! The analyzed program: source files, declarations, scopes and types.
//!
//! A [`Program`] is built once from in-memory sources and is read-only
//! afterwards, apart from the type pool, which grows when callers lower
//! further type annotations.

mod scope;

use std::sync::Arc;

use inj_diagnostic::{Diagnostic, SourceInfo};
use inj_ir::{
    BindingDecl, ClassDecl, DeclId, FileId, InterfaceDecl, Item, ItemKind, Module, Name, Span,
    StringInterner, TypeExpr,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assign::Checker;
use crate::lower::{LowerCtx, Lowerer, TypeStore};
use crate::{Idx, Pool};

pub use scope::ModuleTarget;

/// One source file of the program.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub id: FileId,
    pub info: SourceInfo,
    pub module: Module,
}

impl SourceFile {
    pub fn path(&self) -> &str {
        &self.info.path
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Interface,
    TypeAlias,
    /// `const`, `let` or `var`.
    Binding,
}

/// A top-level declaration and where it lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub id: DeclId,
    pub name: Name,
    pub name_span: Span,
    pub file: FileId,
    pub kind: DeclKind,
    pub exported: bool,
    /// Index into the file's module items.
    pub item: usize,
}

/// Members of a class or interface, own and inherited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape {
    pub members: Vec<crate::Member>,
    /// Whether any member is `private` or `protected`, which makes the type
    /// nominal: only the class itself and its subclasses are assignable.
    pub nominal: bool,
}

impl Shape {
    pub fn member(&self, name: Name) -> Option<&crate::Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// The whole program under analysis.
pub struct Program {
    interner: StringInterner,
    files: Vec<SourceFile>,
    decls: Vec<Decl>,
    /// Per file: local declarations and resolved imports.
    scopes: Vec<FxHashMap<Name, DeclId>>,
    diagnostics: Vec<Diagnostic>,
    types: RwLock<TypeStore>,
    /// Instance type of classes and interfaces, target of aliases, declared
    /// type of bindings.
    decl_types: Vec<Idx>,
    shapes: FxHashMap<DeclId, Shape>,
    /// Class `extends` edges.
    bases: FxHashMap<DeclId, DeclId>,
}

impl Program {
    /// Lex, parse and resolve a set of `(path, source)` files.
    ///
    /// Files keep their input order; `FileId`s are allocated in that order.
    pub fn from_sources<I, P, S>(sources: I) -> Program
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<String>,
        S: Into<Arc<str>>,
    {
        let sources: Vec<SourceInfo> = sources
            .into_iter()
            .map(|(path, content)| SourceInfo::new(path, content))
            .collect();
        Self::build(sources)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(files = sources.len()))]
    fn build(sources: Vec<SourceInfo>) -> Program {
        let interner = StringInterner::new();
        let mut diagnostics = Vec::new();

        let mut files = Vec::with_capacity(sources.len());
        for (index, info) in sources.into_iter().enumerate() {
            let id = FileId::new(u32::try_from(index).unwrap_or(u32::MAX));
            let lexed = inj_lexer::lex_with_errors(&info.content, &interner);
            diagnostics.extend(lexed.errors.iter().map(|e| e.to_diagnostic(&info)));
            let parsed = inj_parse::parse(&lexed.tokens, &interner);
            diagnostics.extend(parsed.errors.iter().map(|e| e.to_diagnostic(&info)));
            tracing::trace!(
                path = %info.path,
                items = parsed.module.items.len(),
                "parsed file"
            );
            files.push(SourceFile {
                id,
                info,
                module: parsed.module,
            });
        }

        let decls = collect_decls(&files);
        let scopes = scope::resolve_scopes(&files, &decls, &interner, &mut diagnostics);

        let mut program = Program {
            interner,
            files,
            decls,
            scopes,
            diagnostics,
            types: RwLock::new(TypeStore::default()),
            decl_types: Vec::new(),
            shapes: FxHashMap::default(),
            bases: FxHashMap::default(),
        };
        program.lower_declarations();
        tracing::debug!(
            decls = program.decls.len(),
            types = program.types.read().pool.len(),
            "program built"
        );
        program
    }

    /// Lower every declaration's type and compute class/interface shapes.
    fn lower_declarations(&mut self) {
        let ctx = LowerCtx {
            interner: &self.interner,
            files: &self.files,
            decls: &self.decls,
            scopes: &self.scopes,
        };
        let store = self.types.get_mut();
        let mut lowerer = Lowerer::new(ctx, store);

        self.decl_types = self
            .decls
            .iter()
            .map(|decl| lowerer.decl_type(decl.id))
            .collect();
        for decl in &self.decls {
            if matches!(decl.kind, DeclKind::Class | DeclKind::Interface) {
                lowerer.shape(decl.id);
            }
        }
        let (shapes, bases) = lowerer.into_shapes();
        self.shapes = shapes;
        self.bases = bases;
    }

    // === Sources and declarations ===

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Text of an interned name.
    pub fn text(&self, name: Name) -> &'static str {
        self.interner.resolve(name)
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.index()]
    }

    pub fn file_by_path(&self, path: &str) -> Option<FileId> {
        self.files.iter().find(|f| f.path() == path).map(|f| f.id)
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    /// The AST item that declares `id`.
    pub fn item(&self, id: DeclId) -> &Item {
        let decl = self.decl(id);
        &self.file(decl.file).module.items[decl.item]
    }

    pub fn class(&self, id: DeclId) -> Option<&ClassDecl> {
        match &self.item(id).kind {
            ItemKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn interface(&self, id: DeclId) -> Option<&InterfaceDecl> {
        match &self.item(id).kind {
            ItemKind::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    pub fn binding(&self, id: DeclId) -> Option<&BindingDecl> {
        match &self.item(id).kind {
            ItemKind::Binding(binding) => Some(binding),
            _ => None,
        }
    }

    /// Resolve a name in a file's scope: local declarations first, then
    /// imports.
    pub fn resolve(&self, file: FileId, name: Name) -> Option<DeclId> {
        self.scopes.get(file.index())?.get(&name).copied()
    }

    /// [`Program::resolve`] by text.
    pub fn resolve_str(&self, file: FileId, name: &str) -> Option<DeclId> {
        self.resolve(file, self.interner.get(name)?)
    }

    /// Lexer and parser errors and import warnings, in file order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // === Types ===

    /// Type of a declaration: the instance type of a class or interface,
    /// the target of an alias, or the declared type of a binding.
    pub fn decl_type(&self, id: DeclId) -> Idx {
        self.decl_types.get(id.index()).copied().unwrap_or(Idx::ERROR)
    }

    /// Lower a type annotation written in `file`.
    pub fn lower_type(&self, file: FileId, ty: &TypeExpr) -> Idx {
        let ctx = LowerCtx {
            interner: &self.interner,
            files: &self.files,
            decls: &self.decls,
            scopes: &self.scopes,
        };
        let mut store = self.types.write();
        Lowerer::new(ctx, &mut store).lower(file, ty)
    }

    /// Own and inherited members of a class or interface.
    pub fn shape(&self, id: DeclId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Structural assignability: can a value of `source` be used where
    /// `target` is expected?
    pub fn is_assignable(&self, source: Idx, target: Idx) -> bool {
        let store = self.types.read();
        Checker::new(&store.pool, &self.shapes, &self.bases).is_assignable(source, target)
    }

    pub fn format_type(&self, idx: Idx) -> String {
        self.types.read().pool.format_type(idx, &self.interner)
    }

    /// Run `f` with read access to the type pool.
    pub fn with_pool<R>(&self, f: impl FnOnce(&Pool) -> R) -> R {
        f(&self.types.read().pool)
    }
}

impl std::fmt::Debug for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("files", &self.files.len())
            .field("decls", &self.decls.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

/// Allocate one `DeclId` per named top-level declaration, in file order.
fn collect_decls(files: &[SourceFile]) -> Vec<Decl> {
    let mut decls = Vec::new();
    for file in files {
        for (index, item) in file.module.items.iter().enumerate() {
            let (name, name_span, kind) = match &item.kind {
                ItemKind::Class(c) => (c.name, c.name_span, DeclKind::Class),
                ItemKind::Interface(i) => (i.name, i.name_span, DeclKind::Interface),
                ItemKind::TypeAlias(t) => (t.name, t.name_span, DeclKind::TypeAlias),
                ItemKind::Binding(b) => (b.name, b.name_span, DeclKind::Binding),
                ItemKind::Import(_) | ItemKind::Export(_) => continue,
            };
            let id = DeclId::new(u32::try_from(decls.len()).unwrap_or(u32::MAX));
            decls.push(Decl {
                id,
                name,
                name_span,
                file: file.id,
                kind,
                exported: item.exported,
                item: index,
            });
        }
    }
    decls
}

#[cfg(test)]
mod tests;
