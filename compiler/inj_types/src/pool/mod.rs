//! Type pool: interned type data addressed by [`Idx`].
//!
//! Structurally equal types intern to the same index, so type identity is
//! index equality. Primitive indices are reserved at construction.

mod format;

use inj_ir::{Accessibility, DeclId, Name};
use rustc_hash::FxHashMap;

use crate::Idx;

/// The data behind one pool entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// Reserved slot for a primitive index.
    Primitive,
    /// Instance type of a class or interface declaration.
    Named { decl: DeclId, name: Name },
    /// A named type with no declaration in the program (library types such
    /// as `Promise` or `Map`). Compatible with everything, like `ERROR`,
    /// but keeps its name for messages.
    Unresolved(Name),
    StringLiteral(Name),
    Array(Idx),
    Tuple(Vec<Idx>),
    /// Flattened, deduplicated, at least two members.
    Union(Vec<Idx>),
    Intersection(Vec<Idx>),
    Function(Signature),
    /// Object literal type.
    Object(Vec<Member>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<FnParam>,
    pub ret: Idx,
}

impl Signature {
    /// Number of parameters a caller must pass.
    pub fn required_params(&self) -> usize {
        self.params.iter().take_while(|p| !p.optional).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FnParam {
    pub name: Name,
    pub ty: Idx,
    pub optional: bool,
}

/// A property or method of an object shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Member {
    pub name: Name,
    pub optional: bool,
    pub visibility: Accessibility,
    /// Property type, or the function type of a method.
    pub ty: Idx,
    pub is_method: bool,
}

/// Interned type storage.
#[derive(Clone, Debug)]
pub struct Pool {
    items: Vec<TypeData>,
    index: FxHashMap<TypeData, Idx>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    pub fn new() -> Self {
        let reserved = Idx::FIRST_DYNAMIC as usize;
        Pool {
            items: vec![TypeData::Primitive; reserved],
            index: FxHashMap::default(),
        }
    }

    /// Number of entries, reserved primitive slots included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Data of a pool entry.
    ///
    /// # Panics
    /// Panics if `idx` came from another pool.
    pub fn data(&self, idx: Idx) -> &TypeData {
        &self.items[idx.raw() as usize]
    }

    pub fn intern(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.index.get(&data) {
            return idx;
        }
        let raw = u32::try_from(self.items.len())
            .unwrap_or_else(|_| panic!("type pool exceeded {} entries", u32::MAX));
        let idx = Idx::from_raw(raw);
        self.items.push(data.clone());
        self.index.insert(data, idx);
        idx
    }

    // === Constructors ===

    pub fn named(&mut self, decl: DeclId, name: Name) -> Idx {
        self.intern(TypeData::Named { decl, name })
    }

    pub fn unresolved(&mut self, name: Name) -> Idx {
        self.intern(TypeData::Unresolved(name))
    }

    pub fn string_literal(&mut self, value: Name) -> Idx {
        self.intern(TypeData::StringLiteral(value))
    }

    pub fn array(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::Array(elem))
    }

    pub fn tuple(&mut self, elems: Vec<Idx>) -> Idx {
        self.intern(TypeData::Tuple(elems))
    }

    /// `A | B`. Nested unions are flattened and repeats dropped; a union of
    /// one member is that member and an empty union is `never`.
    pub fn union(&mut self, members: impl IntoIterator<Item = Idx>) -> Idx {
        let flat = self.flatten(members, |data| match data {
            TypeData::Union(inner) => Some(inner),
            _ => None,
        });
        match flat.as_slice() {
            [] => Idx::NEVER,
            [single] => *single,
            _ => self.intern(TypeData::Union(flat)),
        }
    }

    /// `A & B`, flattened like [`Pool::union`]; an empty intersection is
    /// `unknown`.
    pub fn intersection(&mut self, members: impl IntoIterator<Item = Idx>) -> Idx {
        let flat = self.flatten(members, |data| match data {
            TypeData::Intersection(inner) => Some(inner),
            _ => None,
        });
        match flat.as_slice() {
            [] => Idx::UNKNOWN,
            [single] => *single,
            _ => self.intern(TypeData::Intersection(flat)),
        }
    }

    fn flatten(
        &self,
        members: impl IntoIterator<Item = Idx>,
        nested: impl Fn(&TypeData) -> Option<&Vec<Idx>>,
    ) -> Vec<Idx> {
        let mut flat: Vec<Idx> = Vec::new();
        for member in members {
            match nested(self.data(member)) {
                Some(inner) => {
                    for &idx in inner {
                        if !flat.contains(&idx) {
                            flat.push(idx);
                        }
                    }
                }
                None => {
                    if !flat.contains(&member) {
                        flat.push(member);
                    }
                }
            }
        }
        flat
    }

    pub fn function(&mut self, params: Vec<FnParam>, ret: Idx) -> Idx {
        self.intern(TypeData::Function(Signature { params, ret }))
    }

    pub fn object(&mut self, members: Vec<Member>) -> Idx {
        self.intern(TypeData::Object(members))
    }

    // === Queries ===

    /// Whether the type is unknown to the program (`ERROR` or unresolved).
    pub fn is_indeterminate(&self, idx: Idx) -> bool {
        idx.is_error() || matches!(self.data(idx), TypeData::Unresolved(_))
    }
}

#[cfg(test)]
mod tests;
