//! Structural assignability.
//!
//! A compatibility check in the spirit of TypeScript's, narrowed to what
//! injection checks need. Anything the program cannot see into (`any`,
//! unresolved library types, unmodelled forms) is compatible both ways, so
//! the checker only reports mismatches it can prove.

use inj_ir::{Accessibility, DeclId};
use inj_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::program::Shape;
use crate::{Idx, Member, Pool, Signature, TypeData};

pub(crate) struct Checker<'a> {
    pool: &'a Pool,
    shapes: &'a FxHashMap<DeclId, Shape>,
    bases: &'a FxHashMap<DeclId, DeclId>,
    /// Pairs under comparison; recursive types assume success on re-entry.
    assuming: FxHashSet<(Idx, Idx)>,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(
        pool: &'a Pool,
        shapes: &'a FxHashMap<DeclId, Shape>,
        bases: &'a FxHashMap<DeclId, DeclId>,
    ) -> Self {
        Checker {
            pool,
            shapes,
            bases,
            assuming: FxHashSet::default(),
        }
    }

    pub(crate) fn is_assignable(&mut self, source: Idx, target: Idx) -> bool {
        ensure_sufficient_stack(|| self.is_assignable_inner(source, target))
    }

    fn is_assignable_inner(&mut self, source: Idx, target: Idx) -> bool {
        if source == target
            || source == Idx::ANY
            || source == Idx::NEVER
            || target == Idx::ANY
            || target == Idx::UNKNOWN
        {
            return true;
        }
        let pool = self.pool;
        if pool.is_indeterminate(source) || pool.is_indeterminate(target) {
            return true;
        }

        let (src, tgt) = (pool.data(source), pool.data(target));
        if let TypeData::Union(members) = src {
            return members.iter().all(|&m| self.is_assignable(m, target));
        }
        if let TypeData::Union(members) = tgt {
            return members.iter().any(|&m| self.is_assignable(source, m));
        }
        if let TypeData::Intersection(members) = tgt {
            return members.iter().all(|&m| self.is_assignable(source, m));
        }
        if let TypeData::Intersection(members) = src {
            if members.iter().any(|&m| self.is_assignable(m, target)) {
                return true;
            }
            return self.structural(source, target);
        }

        if target.is_primitive() {
            return match target {
                Idx::STRING => matches!(src, TypeData::StringLiteral(_)),
                Idx::VOID => source == Idx::UNDEFINED,
                Idx::OBJECT => !source.is_primitive() && !matches!(src, TypeData::StringLiteral(_)),
                _ => false,
            };
        }
        if source.is_primitive() {
            // `string` can stand in for `{}` or `{ length?: number }`.
            return !matches!(source, Idx::NULL | Idx::UNDEFINED | Idx::VOID)
                && self.has_no_required_members(target);
        }

        match (src, tgt) {
            (TypeData::Array(s), TypeData::Array(t)) => self.is_assignable(*s, *t),
            (TypeData::Tuple(elems), TypeData::Array(t)) => {
                elems.iter().all(|&e| self.is_assignable(e, *t))
            }
            (TypeData::Tuple(s), TypeData::Tuple(t)) => {
                s.len() == t.len() && s.iter().zip(t).all(|(&s, &t)| self.is_assignable(s, t))
            }
            (TypeData::Function(s), TypeData::Function(t)) => self.signature(s, t),
            (TypeData::Named { decl: s, .. }, TypeData::Named { decl: t, .. }) => {
                if self.derives_from(*s, *t) {
                    return true;
                }
                if self.shapes.get(t).is_some_and(|shape| shape.nominal) {
                    return false;
                }
                self.structural(source, target)
            }
            (_, TypeData::Named { decl, .. }) => {
                !self.shapes.get(decl).is_some_and(|shape| shape.nominal)
                    && self.structural(source, target)
            }
            (_, TypeData::Object(_)) => self.structural(source, target),
            _ => false,
        }
    }

    /// Parameters compare bivariantly, as for methods; a `void` return
    /// accepts any return.
    fn signature(&mut self, source: &Signature, target: &Signature) -> bool {
        if source.required_params() > target.params.len() {
            return false;
        }
        let params_ok = source.params.iter().zip(&target.params).all(|(s, t)| {
            self.is_assignable(t.ty, s.ty) || self.is_assignable(s.ty, t.ty)
        });
        params_ok && (target.ret == Idx::VOID || self.is_assignable(source.ret, target.ret))
    }

    /// Whether class `decl` is `base` or extends it.
    fn derives_from(&self, decl: DeclId, base: DeclId) -> bool {
        let mut seen = FxHashSet::default();
        let mut current = Some(decl);
        while let Some(id) = current {
            if id == base {
                return true;
            }
            if !seen.insert(id) {
                return false;
            }
            current = self.bases.get(&id).copied();
        }
        false
    }

    /// Every required public member of `target` must exist on `source`
    /// with an assignable type.
    fn structural(&mut self, source: Idx, target: Idx) -> bool {
        let Some(target_members) = self.members(target) else {
            return false;
        };
        if !self.assuming.insert((source, target)) {
            return true;
        }
        let source_members = self.members(source).unwrap_or_default();
        let ok = target_members
            .iter()
            .filter(|m| m.visibility == Accessibility::Public)
            .all(|wanted| {
                match source_members.iter().find(|m| m.name == wanted.name) {
                    Some(found) => {
                        (wanted.optional || !found.optional)
                            && found.visibility == Accessibility::Public
                            && self.is_assignable(found.ty, wanted.ty)
                    }
                    None => wanted.optional,
                }
            });
        self.assuming.remove(&(source, target));
        ok
    }

    fn has_no_required_members(&self, target: Idx) -> bool {
        self.members(target)
            .is_some_and(|members| members.iter().all(|m| m.optional))
    }

    /// Members of a shaped type, or `None` if the type has no shape.
    fn members(&self, idx: Idx) -> Option<Vec<&'a Member>> {
        let pool = self.pool;
        match pool.data(idx) {
            TypeData::Named { decl, .. } => Some(
                self.shapes
                    .get(decl)
                    .map(|shape| shape.members.iter().collect())
                    .unwrap_or_default(),
            ),
            TypeData::Object(members) => Some(members.iter().collect()),
            TypeData::Intersection(parts) => {
                let mut merged: Vec<&'a Member> = Vec::new();
                for &part in parts {
                    for member in self.members(part).unwrap_or_default() {
                        if !merged.iter().any(|m| m.name == member.name) {
                            merged.push(member);
                        }
                    }
                }
                Some(merged)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
