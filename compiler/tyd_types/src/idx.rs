//! Interned handles.
//!
//! `Idx` is the only type representation handed around by the engine.
//! Basic types are pre-interned at fixed indices, in the order of
//! [`BasicKind::ALL`](crate::BasicKind::ALL).

use std::fmt;

/// A 32-bit index into the type [`Pool`](crate::Pool).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Basic Types (indices 0-19) ===

    /// A type the host could not infer. Calls with such arguments are deferred.
    pub const INVALID: Self = Self(0);
    pub const BOOL: Self = Self(1);
    pub const INT: Self = Self(2);
    pub const INT8: Self = Self(3);
    pub const INT16: Self = Self(4);
    pub const INT32: Self = Self(5);
    pub const INT64: Self = Self(6);
    pub const UINT: Self = Self(7);
    pub const UINT8: Self = Self(8);
    pub const UINT16: Self = Self(9);
    pub const UINT32: Self = Self(10);
    pub const UINT64: Self = Self(11);
    pub const UINTPTR: Self = Self(12);
    pub const FLOAT32: Self = Self(13);
    pub const FLOAT64: Self = Self(14);
    pub const COMPLEX64: Self = Self(15);
    pub const COMPLEX128: Self = Self(16);
    pub const STRING: Self = Self(17);
    pub const UNSAFE_POINTER: Self = Self(18);
    pub const UNTYPED_NIL: Self = Self(19);

    /// `byte` is an alias of `uint8`.
    pub const BYTE: Self = Self::UINT8;
    /// `rune` is an alias of `int32`.
    pub const RUNE: Self = Self::INT32;

    /// Number of pre-interned basic types.
    pub const BASIC_COUNT: u32 = 20;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is one of the pre-interned basic types.
    #[inline]
    pub const fn is_basic(self) -> bool {
        self.0 < Self::BASIC_COUNT
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.0)
    }
}

/// Handle to a named type's side table entry (underlying type and methods).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NamedId(u32);

impl NamedId {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to an interned package reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct PkgId(u32);

impl PkgId {
    /// The universe scope, home of predeclared types such as `error`.
    pub const UNIVERSE: Self = Self(0);

    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
