//! Type model for the derivation engine.
//!
//! Every type the host type checker reports is interned into a [`Pool`] and
//! referenced by a 32-bit [`Idx`]. Interning gives the two identities the
//! engine relies on:
//!
//! - unnamed types (pointers, slices, maps, ...) are identical iff they have
//!   the same structure;
//! - named types are identical iff they have the same package and name.
//!
//! So `Identical(T, U)` is plain index equality.
//!
//! # Shapes
//!
//! Each index classifies into exactly one [`TypeKind`]. Generators match on
//! the kind exhaustively; named types are followed to their underlying
//! shape through [`Pool::underlying`].

mod basic;
mod flags;
mod format;
mod idx;
mod kind;
mod label;
mod pool;
mod stack;

pub use basic::BasicKind;
pub use flags::TypeFlags;
pub use format::{PackageNames, Qualifier, RelativeTo};
pub use idx::{Idx, NamedId, PkgId};
pub use kind::{ChanDir, Field, InterfaceMethod, Method, NamedInfo, PackageRef, TypeKind};
pub use label::{capitalize, label, label_tuple};
pub use stack::ensure_sufficient_stack;
pub use pool::Pool;
