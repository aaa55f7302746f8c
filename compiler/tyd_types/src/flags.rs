//! Derived type properties.
//!
//! Flags are computed by walking the type's shape. Named types contribute
//! the flags of their underlying type plus `IS_NAMED`; a named type reached
//! again while its own flags are being computed contributes nothing, which
//! only happens for declarations Go itself would reject.

use bitflags::bitflags;
use rustc_hash::FxHashSet;

use crate::{ensure_sufficient_stack, Idx, Pool, TypeKind};

bitflags! {
    /// Structural properties of a type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Category Flags (bits 0-7) ===

        /// Basic type after following names.
        const IS_BASIC = 1 << 0;
        /// Named type.
        const IS_NAMED = 1 << 1;
        /// Struct type after following names.
        const IS_STRUCT = 1 << 2;

        // === Capability Flags (bits 8-15) ===

        /// Values can be compared with `==` and copied with `=` as one block:
        /// basics, and arrays/structs built only from bulk-comparable parts.
        const BULK_COMPARABLE = 1 << 8;
        /// The zero value is `nil`.
        const NULLABLE = 1 << 9;
        /// Pointer, slice or map: writes through a parameter are visible to the caller.
        const REFERENCE = 1 << 10;
        /// Valid Go map key.
        const MAP_KEY = 1 << 11;
        /// Supports the `<` operator.
        const ORDERED = 1 << 12;
    }
}

impl Pool {
    /// Compute the flags of a type.
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        let mut visiting = FxHashSet::default();
        self.flags_in(idx, &mut visiting)
    }

    pub fn is_bulk_comparable(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::BULK_COMPARABLE)
    }

    pub fn is_nullable(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::NULLABLE)
    }

    fn flags_in(&self, idx: Idx, visiting: &mut FxHashSet<Idx>) -> TypeFlags {
        ensure_sufficient_stack(|| match self.kind(idx) {
            TypeKind::Basic(kind) => {
                if !kind.is_concrete() {
                    return TypeFlags::IS_BASIC;
                }
                let mut flags =
                    TypeFlags::IS_BASIC | TypeFlags::BULK_COMPARABLE | TypeFlags::MAP_KEY;
                if kind.is_ordered() {
                    flags |= TypeFlags::ORDERED;
                }
                flags
            }
            TypeKind::Pointer(_) => TypeFlags::NULLABLE | TypeFlags::REFERENCE | TypeFlags::MAP_KEY,
            TypeKind::Slice(_) | TypeKind::Map { .. } => TypeFlags::NULLABLE | TypeFlags::REFERENCE,
            TypeKind::Chan { .. } | TypeKind::Interface(_) => {
                TypeFlags::NULLABLE | TypeFlags::MAP_KEY
            }
            TypeKind::Signature { .. } => TypeFlags::NULLABLE,
            TypeKind::Array { elem, .. } => {
                self.flags_in(*elem, visiting) & (TypeFlags::BULK_COMPARABLE | TypeFlags::MAP_KEY)
            }
            TypeKind::Struct(fields) => {
                let mut flags =
                    TypeFlags::IS_STRUCT | TypeFlags::BULK_COMPARABLE | TypeFlags::MAP_KEY;
                for field in fields.iter() {
                    let field_flags = self.flags_in(field.ty, visiting);
                    flags &= field_flags | TypeFlags::IS_STRUCT;
                }
                flags
            }
            TypeKind::Named(_) => {
                if !visiting.insert(idx) {
                    return TypeFlags::IS_NAMED;
                }
                let underlying = self.underlying(idx);
                let flags = if underlying.is_invalid() {
                    TypeFlags::empty()
                } else {
                    self.flags_in(underlying, visiting)
                };
                visiting.remove(&idx);
                flags | TypeFlags::IS_NAMED
            }
        })
    }
}
