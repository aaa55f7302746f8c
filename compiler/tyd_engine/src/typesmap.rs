//! Naming and memoization of generated functions.
//!
//! Each operation owns a [`TypesMap`] from argument tuples to generated
//! function records. [`Registries`] owns all of them plus the names of user
//! functions, so every name decision of a pass goes through one owner and
//! the first reservation of a name wins.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tyd_source::Location;
use tyd_types::{label_tuple, Idx, PkgId, Pool};

use crate::{EngineConfig, NamingConflict};

/// Ordered argument types of a derivation request.
pub type Args = SmallVec<[Idx; 2]>;

/// How a record came to exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Named by a call site.
    Requested,
    /// Created for a nested type while generating another function.
    Helper,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Pending,
    Emitted,
}

/// The call site a record was created for.
///
/// Helpers inherit the requester of the function whose generation created
/// them, so a failure deep in a type walk still points at a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requester {
    pub location: Location,
    /// Operation of the call.
    pub op: &'static str,
    /// Function name the call asked for.
    pub name: String,
    /// The call's argument types, for diagnostics.
    pub types: String,
}

#[derive(Clone, Debug)]
struct Record {
    args: Args,
    name: String,
    origin: Origin,
    state: State,
    requester: Option<Requester>,
}

/// Outcome of [`Registries::reserve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    /// The name the call site must use.
    pub name: String,
    /// Whether a new record was created.
    pub newly: bool,
}

/// Generated function records of one operation, in insertion order.
#[derive(Clone, Debug)]
pub struct TypesMap {
    op: &'static str,
    prefix: String,
    records: Vec<Record>,
    by_args: FxHashMap<Args, usize>,
}

impl TypesMap {
    fn new(op: &'static str, prefix: &str) -> Self {
        TypesMap {
            op,
            prefix: prefix.to_string(),
            records: Vec::new(),
            by_args: FxHashMap::default(),
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn get(&self, args: &[Idx]) -> Option<&Record> {
        self.by_args.get(args).map(|&i| &self.records[i])
    }

    fn insert(&mut self, args: &[Idx], name: String, origin: Origin, requester: Option<Requester>) {
        let args: Args = args.iter().copied().collect();
        self.by_args.insert(args.clone(), self.records.len());
        self.records.push(Record {
            args,
            name,
            origin,
            state: State::Pending,
            requester,
        });
    }
}

/// All naming state of one pass.
pub struct Registries {
    current: PkgId,
    autoname: bool,
    dedup: bool,
    maps: Vec<TypesMap>,
    by_op: FxHashMap<&'static str, usize>,
    /// Every name in use: user functions and all records of all operations.
    taken: FxHashSet<String>,
    /// Attached to every record created until the next change.
    requester: Option<Requester>,
}

impl Registries {
    /// Create one map per `(operation, default prefix)`, applying prefix overrides.
    pub fn new(config: &EngineConfig, current: PkgId, ops: &[(&'static str, &str)]) -> Self {
        let maps: Vec<TypesMap> = ops
            .iter()
            .map(|&(op, default)| TypesMap::new(op, config.prefix(op, default)))
            .collect();
        let by_op = maps.iter().enumerate().map(|(i, m)| (m.op, i)).collect();
        Registries {
            current,
            autoname: config.autoname,
            dedup: config.dedup,
            maps,
            by_op,
            taken: FxHashSet::default(),
            requester: None,
        }
    }

    pub fn map(&self, op: &str) -> Option<&TypesMap> {
        self.by_op.get(op).map(|&i| &self.maps[i])
    }

    pub fn maps(&self) -> &[TypesMap] {
        &self.maps
    }

    /// Set the call that new records are created for.
    pub fn set_requester(&mut self, requester: Option<Requester>) {
        self.requester = requester;
    }

    /// The call the record of `args` under `op` was created for.
    pub fn requester(&self, op: &str, args: &[Idx]) -> Option<&Requester> {
        self.map(op)?.get(args)?.requester.as_ref()
    }

    /// Record a name defined by the user.
    pub fn add_user_func(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// The operation whose prefix is the longest prefix of `name`.
    pub fn route(&self, name: &str) -> Option<&'static str> {
        self.maps
            .iter()
            .filter(|m| !m.prefix.is_empty() && name.starts_with(&m.prefix))
            .max_by_key(|m| m.prefix.len())
            .map(|m| m.op)
    }

    /// Reserve `requested` for `args` under `op`.
    ///
    /// Panics if `op` was not registered.
    pub fn reserve(
        &mut self,
        pool: &Pool,
        op: &str,
        requested: &str,
        args: &[Idx],
    ) -> Result<Reservation, NamingConflict> {
        let i = self.index(op);
        if let Some(record) = self.maps[i].get(args) {
            if record.name == requested {
                return Ok(Reservation {
                    name: record.name.clone(),
                    newly: false,
                });
            }
            if self.dedup {
                tracing::debug!(requested, existing = %record.name, "deduplicated request");
                return Ok(Reservation {
                    name: record.name.clone(),
                    newly: false,
                });
            }
            return Err(NamingConflict::Duplicate {
                requested: requested.to_string(),
                existing: record.name.clone(),
                types: describe(pool, args),
            });
        }

        let name = if !self.taken.contains(requested) {
            requested.to_string()
        } else if self.autoname {
            self.canonical(pool, i, args)
        } else {
            return Err(NamingConflict::Taken {
                name: requested.to_string(),
            });
        };
        self.taken.insert(name.clone());
        let requester = self.requester.clone();
        self.maps[i].insert(args, name.clone(), Origin::Requested, requester);
        Ok(Reservation { name, newly: true })
    }

    /// The name of the function for `args` under `op`, recording a pending
    /// helper with the canonical name if none exists yet.
    pub fn func_name(&mut self, pool: &Pool, op: &str, args: &[Idx]) -> String {
        let i = self.index(op);
        if let Some(record) = self.maps[i].get(args) {
            return record.name.clone();
        }
        let name = self.canonical(pool, i, args);
        self.taken.insert(name.clone());
        let requester = self.requester.clone();
        self.maps[i].insert(args, name.clone(), Origin::Helper, requester);
        name
    }

    /// The recorded name, without creating anything.
    pub fn lookup(&self, op: &str, args: &[Idx]) -> Option<&str> {
        self.map(op)?.get(args).map(|r| r.name.as_str())
    }

    pub fn origin(&self, op: &str, args: &[Idx]) -> Option<Origin> {
        self.map(op)?.get(args).map(|r| r.origin)
    }

    /// Argument tuples of pending records of `op`, in insertion order.
    pub fn pending(&self, op: &str) -> Vec<Args> {
        self.map(op)
            .map(|m| {
                m.records
                    .iter()
                    .filter(|r| r.state == State::Pending)
                    .map(|r| r.args.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_pending(&self) -> bool {
        self.maps
            .iter()
            .any(|m| m.records.iter().any(|r| r.state == State::Pending))
    }

    /// Mark the record of `args` under `op` as emitted.
    pub fn generating(&mut self, op: &str, args: &[Idx]) {
        let i = self.index(op);
        if let Some(&r) = self.maps[i].by_args.get(args) {
            self.maps[i].records[r].state = State::Emitted;
        }
    }

    /// Canonical `prefix + label`, suffixed `_1`, `_2`, ... until unused.
    fn canonical(&self, pool: &Pool, i: usize, args: &[Idx]) -> String {
        let base = format!("{}{}", self.maps[i].prefix, label_tuple(pool, args, self.current));
        if !self.taken.contains(&base) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|name| !self.taken.contains(name))
            .unwrap_or(base)
    }

    fn index(&self, op: &str) -> usize {
        match self.by_op.get(op) {
            Some(&i) => i,
            None => panic!("operation `{op}` is not registered"),
        }
    }
}

/// Argument types joined for a diagnostic.
pub(crate) fn describe(pool: &Pool, args: &[Idx]) -> String {
    args.iter()
        .map(|&a| pool.display(a))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests;
