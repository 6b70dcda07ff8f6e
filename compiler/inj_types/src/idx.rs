//! Type index handle.
//!
//! All types live in a [`Pool`](crate::Pool) and are referenced by a 32-bit
//! index. Primitive types have fixed indices, so they can be named without a
//! pool and compared by index.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-12) ===

    pub const ANY: Self = Self(0);
    pub const UNKNOWN: Self = Self(1);
    /// Bottom type; assignable to everything.
    pub const NEVER: Self = Self(2);
    pub const VOID: Self = Self(3);
    pub const UNDEFINED: Self = Self(4);
    pub const NULL: Self = Self(5);
    pub const STRING: Self = Self(6);
    pub const NUMBER: Self = Self(7);
    pub const BOOLEAN: Self = Self(8);
    pub const SYMBOL: Self = Self(9);
    pub const BIGINT: Self = Self(10);
    /// The non-primitive `object` type.
    pub const OBJECT: Self = Self(11);
    /// A type that could not be determined; compatible in both directions.
    pub const ERROR: Self = Self(12);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 13;

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = 64;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    /// Source spelling of a primitive type, or `None` for pool types.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("any"),
            1 => Some("unknown"),
            2 => Some("never"),
            3 => Some("void"),
            4 => Some("undefined"),
            5 => Some("null"),
            6 => Some("string"),
            7 => Some("number"),
            8 => Some("boolean"),
            9 => Some("symbol"),
            10 => Some("bigint"),
            11 => Some("object"),
            12 => Some("<error>"),
            _ => None,
        }
    }

    /// Primitive type for a source keyword (`string`, `void`, ...).
    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "any" => Self::ANY,
            "unknown" => Self::UNKNOWN,
            "never" => Self::NEVER,
            "void" => Self::VOID,
            "undefined" => Self::UNDEFINED,
            "null" => Self::NULL,
            "string" => Self::STRING,
            "number" => Self::NUMBER,
            "boolean" => Self::BOOLEAN,
            "symbol" => Self::SYMBOL,
            "bigint" => Self::BIGINT,
            "object" => Self::OBJECT,
            _ => return None,
        })
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx::{}", name.trim_matches(&['<', '>'][..]).to_uppercase()),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);
