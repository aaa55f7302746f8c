//! The derivation operations.
//!
//! Each module exports a [`Plugin`] descriptor: the operation name used in
//! configuration (`--equal.prefix=...`), its default call prefix, the
//! operations whose functions it calls, and a constructor for a fresh
//! generator. The engine builds new generators for every pass.
//!
//! | Operation | Request | Generated |
//! |-----------|---------|-----------|
//! | equal | `deriveEqual(a, b T)` | `bool` deep equality |
//! | compare | `deriveCompare(a, b T)` | `int` total order |
//! | copyto | `deriveCopyTo(src, dst T)` | deep copy into `dst` |
//! | gostring | `deriveGoString(v T)` | Go source rebuilding `v` |
//! | keys | `deriveKeys(m)` | keys of a map |
//! | sort | `deriveSort(list)` | sorted list |
//! | set | `deriveSet(list)` | `map[T]struct{}` |
//! | max, min | `deriveMax(a, b)`, `deriveMax(list, def)` | extremum |
//! | fmap | `deriveFmap(f, list)` | mapped list |
//! | join | `deriveJoin(lists)` | flattened list |
//! | compose | `deriveCompose(f, g)` | chained fallible functions |

mod compare;
mod compose;
mod copyto;
mod equal;
mod extremum;
mod fmap;
mod gostring;
mod join;
mod keys;
mod set;
mod sort;
mod util;

use tyd_engine::Plugin;

/// Every operation, dependencies included.
pub const ALL: &[Plugin] = &[
    equal::PLUGIN,
    compare::PLUGIN,
    copyto::PLUGIN,
    gostring::PLUGIN,
    keys::PLUGIN,
    sort::PLUGIN,
    set::PLUGIN,
    extremum::MAX,
    extremum::MIN,
    fmap::PLUGIN,
    join::PLUGIN,
    compose::PLUGIN,
];
