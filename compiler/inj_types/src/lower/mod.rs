//! Lowering of type annotations into the pool.
//!
//! Names resolve through the annotated file's scope. Class and interface
//! names become nominal handles ([`TypeData::Named`](crate::TypeData::Named));
//! aliases are expanded; names with no declaration in the program become
//! [`TypeData::Unresolved`](crate::TypeData::Unresolved).

use inj_ir::{
    ClassMember, DeclId, ExprKind, FileId, ItemKind, Name, Param, StringInterner, TypeExpr,
    TypeExprKind, TypeMember, TypeMemberKind,
};
use inj_ir::{Accessibility, Expr};
use inj_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::program::{Decl, DeclKind, Shape, SourceFile};
use crate::{FnParam, Idx, Member, Pool};

/// Pool plus per-declaration memo, guarded together by the program's lock.
#[derive(Debug, Default)]
pub(crate) struct TypeStore {
    pub(crate) pool: Pool,
    memo: FxHashMap<DeclId, Idx>,
}

/// Read-only program parts the lowerer needs.
#[derive(Copy, Clone)]
pub(crate) struct LowerCtx<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) files: &'a [SourceFile],
    pub(crate) decls: &'a [Decl],
    pub(crate) scopes: &'a [FxHashMap<Name, DeclId>],
}

pub(crate) struct Lowerer<'a> {
    ctx: LowerCtx<'a>,
    store: &'a mut TypeStore,
    /// Aliases and bindings being lowered; re-entry means a cycle.
    in_progress: FxHashSet<DeclId>,
    shaping: FxHashSet<DeclId>,
    shapes: FxHashMap<DeclId, Shape>,
    bases: FxHashMap<DeclId, DeclId>,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(ctx: LowerCtx<'a>, store: &'a mut TypeStore) -> Self {
        Lowerer {
            ctx,
            store,
            in_progress: FxHashSet::default(),
            shaping: FxHashSet::default(),
            shapes: FxHashMap::default(),
            bases: FxHashMap::default(),
        }
    }

    pub(crate) fn into_shapes(self) -> (FxHashMap<DeclId, Shape>, FxHashMap<DeclId, DeclId>) {
        (self.shapes, self.bases)
    }

    fn pool(&mut self) -> &mut Pool {
        &mut self.store.pool
    }

    fn resolve(&self, file: FileId, name: Name) -> Option<&'a Decl> {
        let ctx = self.ctx;
        let id = ctx.scopes.get(file.index())?.get(&name)?;
        ctx.decls.get(id.index())
    }

    fn item_kind(&self, decl: &Decl) -> &'a ItemKind {
        let ctx = self.ctx;
        &ctx.files[decl.file.index()].module.items[decl.item].kind
    }

    // === Declarations ===

    /// Type of a declaration. See [`Program::decl_type`](crate::Program::decl_type).
    pub(crate) fn decl_type(&mut self, id: DeclId) -> Idx {
        ensure_sufficient_stack(|| self.decl_type_inner(id))
    }

    fn decl_type_inner(&mut self, id: DeclId) -> Idx {
        if let Some(&idx) = self.store.memo.get(&id) {
            return idx;
        }
        let Some(decl) = self.ctx.decls.get(id.index()) else {
            return Idx::ERROR;
        };
        let idx = match decl.kind {
            DeclKind::Class | DeclKind::Interface => self.pool().named(id, decl.name),
            DeclKind::TypeAlias | DeclKind::Binding => {
                if !self.in_progress.insert(id) {
                    tracing::trace!(name = self.ctx.interner.resolve(decl.name), "circular type");
                    return Idx::ERROR;
                }
                let idx = match self.item_kind(decl) {
                    ItemKind::TypeAlias(alias) => self.lower(decl.file, &alias.ty),
                    ItemKind::Binding(binding) => match (&binding.ty, &binding.init) {
                        (Some(ty), _) => self.lower(decl.file, ty),
                        (None, Some(init)) => self.infer(decl.file, init),
                        (None, None) => Idx::ANY,
                    },
                    _ => Idx::ERROR,
                };
                self.in_progress.remove(&id);
                idx
            }
        };
        self.store.memo.insert(id, idx);
        idx
    }

    /// Type of an unannotated binding initializer, for the forms `typeof`
    /// needs: literals, `new C()` and `Symbol()`.
    fn infer(&mut self, file: FileId, init: &Expr) -> Idx {
        match &init.kind {
            ExprKind::String(_) | ExprKind::Template => Idx::STRING,
            ExprKind::Number => Idx::NUMBER,
            ExprKind::Bool(_) => Idx::BOOLEAN,
            ExprKind::Null => Idx::NULL,
            ExprKind::New { callee, .. } => match callee.as_ident().and_then(|n| self.resolve(file, n)) {
                Some(decl) if decl.kind == DeclKind::Class => self.decl_type(decl.id),
                _ => Idx::ERROR,
            },
            ExprKind::Call { callee, .. } => match callee.as_ident() {
                Some(name)
                    if self.ctx.interner.resolve(name) == "Symbol"
                        && self.resolve(file, name).is_none() =>
                {
                    Idx::SYMBOL
                }
                _ => Idx::ERROR,
            },
            _ => Idx::ERROR,
        }
    }

    // === Annotations ===

    pub(crate) fn lower(&mut self, file: FileId, ty: &TypeExpr) -> Idx {
        ensure_sufficient_stack(|| self.lower_inner(file, ty))
    }

    fn lower_inner(&mut self, file: FileId, ty: &TypeExpr) -> Idx {
        match &ty.kind {
            TypeExprKind::Named { name, args } => self.lower_named(file, *name, args),
            TypeExprKind::Array(elem) => {
                let elem = self.lower(file, elem);
                self.pool().array(elem)
            }
            TypeExprKind::Union(members) => {
                let members: Vec<Idx> = members.iter().map(|m| self.lower(file, m)).collect();
                self.pool().union(members)
            }
            TypeExprKind::Intersection(members) => {
                let members: Vec<Idx> = members.iter().map(|m| self.lower(file, m)).collect();
                self.pool().intersection(members)
            }
            TypeExprKind::Object(members) => {
                let members = self.lower_members(file, members);
                self.pool().object(members)
            }
            TypeExprKind::Function { params, ret } => {
                let params = self.lower_params(file, params);
                let ret = self.lower(file, ret);
                self.pool().function(params, ret)
            }
            TypeExprKind::Tuple(elems) => {
                let elems: Vec<Idx> = elems.iter().map(|e| self.lower(file, e)).collect();
                self.pool().tuple(elems)
            }
            TypeExprKind::StringLiteral(value) => self.pool().string_literal(*value),
            TypeExprKind::Typeof(name) => match self.resolve(file, *name) {
                Some(decl) if decl.kind == DeclKind::Binding => self.decl_type(decl.id),
                _ => Idx::ERROR,
            },
            TypeExprKind::OtherLiteral | TypeExprKind::Opaque => Idx::ERROR,
        }
    }

    fn lower_named(&mut self, file: FileId, name: Name, args: &[TypeExpr]) -> Idx {
        let text = self.ctx.interner.resolve(name);
        if args.is_empty() {
            if let Some(idx) = Idx::from_keyword(text) {
                return idx;
            }
        }
        if let Some(decl) = self.resolve(file, name) {
            return match decl.kind {
                DeclKind::Class | DeclKind::Interface | DeclKind::TypeAlias => {
                    self.decl_type(decl.id)
                }
                // A value used as a type.
                DeclKind::Binding => Idx::ERROR,
            };
        }
        match (text, args) {
            ("Array" | "ReadonlyArray", [elem]) => {
                let elem = self.lower(file, elem);
                self.pool().array(elem)
            }
            _ => self.pool().unresolved(name),
        }
    }

    fn lower_params(&mut self, file: FileId, params: &[Param]) -> Vec<FnParam> {
        params
            .iter()
            .map(|param| FnParam {
                name: param.name,
                ty: self.lower_opt(file, param.ty.as_ref()),
                optional: param.is_optional(),
            })
            .collect()
    }

    fn lower_opt(&mut self, file: FileId, ty: Option<&TypeExpr>) -> Idx {
        ty.map_or(Idx::ANY, |ty| self.lower(file, ty))
    }

    fn lower_members(&mut self, file: FileId, members: &[TypeMember]) -> Vec<Member> {
        let mut lowered: Vec<Member> = Vec::with_capacity(members.len());
        for member in members {
            if lowered.iter().any(|m| m.name == member.name) {
                continue;
            }
            let (ty, is_method) = match &member.kind {
                TypeMemberKind::Property(ty) => (self.lower_opt(file, ty.as_ref()), false),
                TypeMemberKind::Method { params, ret } => {
                    (self.method_type(file, params, ret.as_ref()), true)
                }
            };
            lowered.push(Member {
                name: member.name,
                optional: member.optional,
                visibility: Accessibility::Public,
                ty,
                is_method,
            });
        }
        lowered
    }

    fn method_type(&mut self, file: FileId, params: &[Param], ret: Option<&TypeExpr>) -> Idx {
        let params = self.lower_params(file, params);
        let ret = self.lower_opt(file, ret);
        self.pool().function(params, ret)
    }

    // === Shapes ===

    /// Compute the shape of a class or interface, including inherited
    /// members. Also records class `extends` edges.
    pub(crate) fn shape(&mut self, id: DeclId) -> Option<&Shape> {
        self.ensure_shape(id);
        self.shapes.get(&id)
    }

    fn ensure_shape(&mut self, id: DeclId) {
        ensure_sufficient_stack(|| self.ensure_shape_inner(id));
    }

    fn ensure_shape_inner(&mut self, id: DeclId) {
        if self.shapes.contains_key(&id) || !self.shaping.insert(id) {
            return;
        }
        let Some(decl) = self.ctx.decls.get(id.index()) else {
            return;
        };
        let file = decl.file;

        let (mut members, parents) = match self.item_kind(decl) {
            ItemKind::Class(class) => {
                let members = self.class_members(file, &class.members);
                let parents: Vec<&Decl> = class
                    .extends
                    .iter()
                    .filter_map(|base| self.resolve(file, base.name))
                    .filter(|base| base.kind == DeclKind::Class)
                    .collect();
                if let Some(base) = parents.first() {
                    self.bases.insert(id, base.id);
                }
                (members, parents)
            }
            ItemKind::Interface(interface) => {
                let members = self.lower_members(file, &interface.members);
                let parents: Vec<&Decl> = interface
                    .extends
                    .iter()
                    .filter_map(|base| self.resolve(file, base.name))
                    .filter(|base| matches!(base.kind, DeclKind::Class | DeclKind::Interface))
                    .collect();
                (members, parents)
            }
            _ => (Vec::new(), Vec::new()),
        };

        for parent in parents {
            self.ensure_shape(parent.id);
            if let Some(inherited) = self.shapes.get(&parent.id) {
                for member in &inherited.members {
                    if !members.iter().any(|m| m.name == member.name) {
                        members.push(member.clone());
                    }
                }
            }
        }

        let nominal = members
            .iter()
            .any(|m| m.visibility != Accessibility::Public);
        self.shaping.remove(&id);
        self.shapes.insert(id, Shape { members, nominal });
    }

    /// Instance members: non-static properties and methods, and
    /// constructor parameter properties.
    fn class_members(&mut self, file: FileId, class_members: &[ClassMember]) -> Vec<Member> {
        let mut members: Vec<Member> = Vec::new();
        let mut push = |member: Member| {
            if !members.iter().any(|m| m.name == member.name) {
                members.push(member);
            }
        };
        for class_member in class_members {
            match class_member {
                ClassMember::Property(prop) if !prop.is_static => push(Member {
                    name: prop.name,
                    optional: prop.optional,
                    visibility: prop.accessibility,
                    ty: self.lower_opt(file, prop.ty.as_ref()),
                    is_method: false,
                }),
                ClassMember::Method(method) if !method.is_static => push(Member {
                    name: method.name,
                    optional: method.optional,
                    visibility: method.accessibility,
                    ty: self.method_type(file, &method.params, method.ret.as_ref()),
                    is_method: true,
                }),
                ClassMember::Constructor(ctor) => {
                    for param in ctor.params.iter().filter(|p| p.is_parameter_property()) {
                        push(Member {
                            name: param.name,
                            optional: param.optional,
                            visibility: param.accessibility.unwrap_or_default(),
                            ty: self.lower_opt(file, param.ty.as_ref()),
                            is_method: false,
                        });
                    }
                }
                ClassMember::Property(_) | ClassMember::Method(_) => {}
            }
        }
        members
    }
}

#[cfg(test)]
mod tests;
