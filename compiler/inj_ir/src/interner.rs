//! String interner for identifiers and string literals.
//!
//! Interned strings are leaked to obtain `'static` lifetimes, so lookups hand
//! out `&'static str` without holding the lock. A program's identifier set is
//! bounded by its source size, which keeps the leak proportional to input.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

#[derive(Default)]
struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

/// Read access to interned strings.
///
/// Lets downstream crates format names without depending on the concrete
/// interner (test doubles implement it over a plain `Vec`).
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringInterner {
    /// Create an interner with the empty string pre-interned as [`Name::EMPTY`].
    pub fn new() -> Self {
        let mut table = InternTable::default();
        table.map.insert("", Name::EMPTY);
        table.strings.push("");
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut table = self.table.write();
        if let Some(&name) = table.map.get(s) {
            return name;
        }

        let index = u32::try_from(table.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded {} entries", u32::MAX));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_index(index);
        table.strings.push(leaked);
        table.map.insert(leaked, name);
        name
    }

    /// Look up an interned name without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    /// Resolve a name to its text.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner.
    pub fn resolve(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }

    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string is always present.
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        self.resolve(name)
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}
