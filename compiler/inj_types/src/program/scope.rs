//! File scopes and import/export resolution.
//!
//! Relative module specifiers resolve against the importing file's path,
//! trying the path itself, `<path>.ts` and `<path>/index.ts`. Package
//! specifiers bind nothing and are never reported.

use inj_diagnostic::{Diagnostic, ErrorCode};
use inj_ir::{DeclId, FileId, ImportDecl, ItemKind, Name, StringInterner};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Decl, SourceFile};

/// Outcome of resolving a module specifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModuleTarget {
    File(FileId),
    /// A bare specifier (`tslib`, `@scope/pkg`): outside the program.
    Package,
    /// A relative specifier with no matching file.
    Missing,
}

enum ExportTarget {
    Local(Name),
    ReExport { source: Name, imported: Name },
}

#[derive(Default)]
struct FileScope {
    locals: FxHashMap<Name, DeclId>,
    /// Local name -> (module specifier, imported name).
    imports: FxHashMap<Name, (Name, Name)>,
    exports: FxHashMap<Name, ExportTarget>,
    star_sources: Vec<Name>,
}

struct Resolver<'a> {
    files: &'a [SourceFile],
    scopes: Vec<FileScope>,
    by_path: FxHashMap<String, FileId>,
    interner: &'a StringInterner,
    default: Name,
}

/// Build each file's scope and report unresolvable relative imports.
pub(super) fn resolve_scopes(
    files: &[SourceFile],
    decls: &[Decl],
    interner: &StringInterner,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<FxHashMap<Name, DeclId>> {
    let mut scopes: Vec<FileScope> = files.iter().map(|_| FileScope::default()).collect();
    for decl in decls {
        let scope = &mut scopes[decl.file.index()];
        scope.locals.entry(decl.name).or_insert(decl.id);
        if decl.exported {
            scope
                .exports
                .entry(decl.name)
                .or_insert(ExportTarget::Local(decl.name));
        }
    }
    for file in files {
        let scope = &mut scopes[file.id.index()];
        for item in &file.module.items {
            match &item.kind {
                ItemKind::Import(import) => {
                    for spec in &import.specifiers {
                        scope.imports.insert(spec.local, (import.source, spec.imported));
                    }
                }
                ItemKind::Export(export) => {
                    if export.all {
                        if let Some(source) = export.source {
                            scope.star_sources.push(source);
                        }
                    }
                    for spec in &export.specifiers {
                        let target = match export.source {
                            Some(source) => ExportTarget::ReExport {
                                source,
                                imported: spec.local,
                            },
                            None => ExportTarget::Local(spec.local),
                        };
                        scope.exports.insert(spec.exported, target);
                    }
                }
                _ => {}
            }
        }
    }

    let resolver = Resolver {
        files,
        scopes,
        by_path: files
            .iter()
            .map(|f| (normalize_path(f.path()), f.id))
            .collect(),
        interner,
        default: interner.intern("default"),
    };

    files
        .iter()
        .map(|file| resolver.materialize(file, diagnostics))
        .collect()
}

impl Resolver<'_> {
    /// The final name -> declaration map of one file.
    fn materialize(
        &self,
        file: &SourceFile,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> FxHashMap<Name, DeclId> {
        let mut resolved = self.scopes[file.id.index()].locals.clone();
        for item in &file.module.items {
            if let ItemKind::Import(import) = &item.kind {
                self.bind_import(file, import, &mut resolved, diagnostics);
            }
        }
        resolved
    }

    fn bind_import(
        &self,
        file: &SourceFile,
        import: &ImportDecl,
        resolved: &mut FxHashMap<Name, DeclId>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let spec = self.interner.resolve(import.source);
        let target = match self.resolve_module(file.id, spec) {
            ModuleTarget::File(target) => target,
            ModuleTarget::Package => return,
            ModuleTarget::Missing => {
                tracing::debug!(path = %file.path(), module = spec, "unresolved module");
                diagnostics.push(
                    Diagnostic::warning(ErrorCode::W2001)
                        .with_message(format!("cannot find module `{spec}`"))
                        .with_file_label(import.source_span, "not part of the program", file.info.clone())
                        .with_note("bindings from this import are unresolved and will not be validated"),
                );
                return;
            }
        };

        for specifier in &import.specifiers {
            if resolved.contains_key(&specifier.local) {
                continue;
            }
            let mut visiting = FxHashSet::default();
            match self.lookup_export(target, specifier.imported, &mut visiting) {
                Some(decl) => {
                    resolved.insert(specifier.local, decl);
                }
                None => {
                    let message = if specifier.imported == self.default {
                        format!("module `{spec}` has no default export")
                    } else {
                        format!(
                            "module `{spec}` has no exported member `{}`",
                            self.interner.resolve(specifier.imported)
                        )
                    };
                    tracing::debug!(path = %file.path(), %message, "unresolved import");
                    diagnostics.push(
                        Diagnostic::warning(ErrorCode::W2001)
                            .with_message(message)
                            .with_file_label(specifier.span, "not found", file.info.clone()),
                    );
                }
            }
        }
    }

    /// A name in a file's own scope: a local declaration or an import.
    fn lookup(
        &self,
        file: FileId,
        name: Name,
        visiting: &mut FxHashSet<(FileId, Name)>,
    ) -> Option<DeclId> {
        let scope = &self.scopes[file.index()];
        if let Some(&decl) = scope.locals.get(&name) {
            return Some(decl);
        }
        let &(source, imported) = scope.imports.get(&name)?;
        match self.resolve_module(file, self.interner.resolve(source)) {
            ModuleTarget::File(target) => self.lookup_export(target, imported, visiting),
            ModuleTarget::Package | ModuleTarget::Missing => None,
        }
    }

    /// A name exported by a file, following re-exports.
    fn lookup_export(
        &self,
        file: FileId,
        name: Name,
        visiting: &mut FxHashSet<(FileId, Name)>,
    ) -> Option<DeclId> {
        if !visiting.insert((file, name)) {
            return None;
        }
        let scope = &self.scopes[file.index()];
        match scope.exports.get(&name) {
            Some(ExportTarget::Local(local)) => return self.lookup(file, *local, visiting),
            Some(ExportTarget::ReExport { source, imported }) => {
                return match self.resolve_module(file, self.interner.resolve(*source)) {
                    ModuleTarget::File(target) => self.lookup_export(target, *imported, visiting),
                    ModuleTarget::Package | ModuleTarget::Missing => None,
                };
            }
            None => {}
        }
        // `export *` never forwards a default export.
        if name == self.default {
            return None;
        }
        scope.star_sources.iter().find_map(|source| {
            match self.resolve_module(file, self.interner.resolve(*source)) {
                ModuleTarget::File(target) => self.lookup_export(target, name, visiting),
                ModuleTarget::Package | ModuleTarget::Missing => None,
            }
        })
    }

    fn resolve_module(&self, from: FileId, spec: &str) -> ModuleTarget {
        resolve_module_path(self.files[from.index()].path(), spec, &self.by_path)
    }
}

/// Resolve `spec` imported from the file at `from_path`.
pub(super) fn resolve_module_path(
    from_path: &str,
    spec: &str,
    by_path: &FxHashMap<String, FileId>,
) -> ModuleTarget {
    let is_path = spec.starts_with("./")
        || spec.starts_with("../")
        || spec == "."
        || spec == ".."
        || spec.starts_with('/');
    if !is_path {
        return ModuleTarget::Package;
    }

    let joined = if spec.starts_with('/') {
        spec.to_owned()
    } else {
        match parent_dir(&normalize_path(from_path)) {
            "" => spec.to_owned(),
            dir => format!("{dir}/{spec}"),
        }
    };
    let base = normalize_path(&joined);

    let mut candidates = Vec::with_capacity(4);
    if let Some(stem) = base.strip_suffix(".js") {
        candidates.push(format!("{stem}.ts"));
    }
    candidates.push(base.clone());
    candidates.push(format!("{base}.ts"));
    candidates.push(format!("{base}/index.ts"));

    candidates
        .iter()
        .find_map(|candidate| by_path.get(candidate).copied())
        .map_or(ModuleTarget::Missing, ModuleTarget::File)
}

/// Forward slashes, no `.` segments, `..` applied where possible.
pub(super) fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(&last) if last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i.max(usize::from(path.starts_with('/')))])
}

#[cfg(test)]
mod tests;
