//! Program-wide identities.
//!
//! Both ids are allocated explicitly, one per source file and one per
//! top-level declaration. Identity comparisons anywhere in the validator go
//! through these, never through names.

use std::fmt;

/// Index of a source file in a program.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct FileId(u32);

impl FileId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        FileId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

/// Identity of one top-level declaration (class, interface, alias or binding).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        DeclId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}
