//! The analyzed package as seen by the engine.
//!
//! Calls are stored in one arena per package and referenced by [`CallId`];
//! argument calls are children of the call they appear in. The package is
//! mutated between passes: renamed call sites get their new callee, and the
//! signatures of freshly generated functions replace the previous derived
//! symbols, which is what lets a nested call's type become known on the
//! next pass.

use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tyd_types::{BasicKind, Idx, PkgId, Pool};

use crate::parser::Scope;

/// File name of the generated output in each package directory.
pub const DERIVED_FILE: &str = "derived.gen.go";

/// Go builtin functions. Calls to these are never undefined.
const BUILTINS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Handle to a call in the package arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct CallId(u32);

impl CallId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a source unit (file) of the package.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct UnitId(u32);

impl UnitId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A call argument.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Arg {
    Type(Idx),
    /// The argument is a call; its type is the callee's single result.
    Call(CallId),
    /// The host could not infer a type.
    Unknown,
}

/// A call expression whose callee is a plain identifier.
#[derive(Clone, Debug)]
pub struct CallSite {
    pub name: String,
    pub unit: UnitId,
    /// Byte offset of the callee identifier in the unit's file.
    pub offset: usize,
    pub line: u32,
    pub column: u32,
    pub args: SmallVec<[Arg; 2]>,
}

/// A source file and its top-level calls in source order.
#[derive(Clone, Debug)]
pub struct Unit {
    pub path: String,
    pub calls: Vec<CallId>,
}

impl Unit {
    /// Whether this is the engine's own output file.
    pub fn is_derived(&self) -> bool {
        is_derived_file(&self.path)
    }
}

/// A package-level function.
#[derive(Clone, Debug)]
pub struct FuncSymbol {
    pub name: String,
    /// File that declares the function.
    pub file: String,
    pub sig: Idx,
}

impl FuncSymbol {
    pub fn is_derived(&self) -> bool {
        is_derived_file(&self.file)
    }
}

fn is_derived_file(path: &str) -> bool {
    Path::new(path)
        .file_name()
        .is_some_and(|name| name == DERIVED_FILE)
}

/// Source position of a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Replacement of one callee identifier in a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEdit {
    pub file: String,
    pub offset: usize,
    pub old: String,
    pub new: String,
}

/// One package: its types, functions and call sites.
pub struct Package {
    pub pool: Pool,
    id: PkgId,
    path: String,
    name: String,
    dir: PathBuf,
    scope: Scope,
    units: Vec<Unit>,
    calls: Vec<CallSite>,
    funcs: FxHashMap<String, FuncSymbol>,
}

impl Package {
    pub(crate) fn new(pool: Pool, id: PkgId, scope: Scope, dir: PathBuf) -> Self {
        let pkg_ref = pool.package_ref(id).clone();
        Package {
            pool,
            id,
            path: pkg_ref.path,
            name: pkg_ref.name,
            dir,
            scope,
            units: Vec::new(),
            calls: Vec::new(),
            funcs: FxHashMap::default(),
        }
    }

    pub fn id(&self) -> PkgId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    // === Units and Calls ===

    #[expect(
        clippy::cast_possible_truncation,
        reason = "file count is bounded by the package size"
    )]
    pub(crate) fn add_unit(&mut self, path: &str) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(Unit {
            path: path.to_string(),
            calls: Vec::new(),
        });
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "call count is bounded by the package size"
    )]
    pub(crate) fn add_call(&mut self, call: CallSite, top_level: bool) -> CallId {
        let id = CallId(self.calls.len() as u32);
        if top_level {
            self.units[call.unit.index()].calls.push(id);
        }
        self.calls.push(call);
        id
    }

    pub(crate) fn set_arg(&mut self, id: CallId, position: usize, arg: Arg) {
        self.calls[id.index()].args[position] = arg;
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "file count is bounded by the package size"
    )]
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, unit)| (UnitId(i as u32), unit))
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    pub fn call(&self, id: CallId) -> &CallSite {
        &self.calls[id.index()]
    }

    /// Argument types of a call. Unknown arguments and calls to functions
    /// without a single result are `Idx::INVALID`.
    pub fn arg_types(&self, id: CallId) -> SmallVec<[Idx; 2]> {
        self.call(id).args.iter().map(|&arg| self.arg_type(arg)).collect()
    }

    pub fn arg_type(&self, arg: Arg) -> Idx {
        match arg {
            Arg::Type(ty) => ty,
            Arg::Unknown => Idx::INVALID,
            Arg::Call(id) => {
                let callee = &self.call(id).name;
                self.funcs
                    .get(callee)
                    .and_then(|f| self.pool.signature_parts(f.sig))
                    .and_then(|(_, results, _)| match results {
                        [single] => Some(*single),
                        _ => None,
                    })
                    .unwrap_or(Idx::INVALID)
            }
        }
    }

    pub fn location(&self, id: CallId) -> Location {
        let call = self.call(id);
        Location {
            file: self.unit(call.unit).path.clone(),
            line: call.line,
            column: call.column,
        }
    }

    /// Point a call at a new callee. Offsets of later calls in the same file
    /// shift by the length difference, so they keep matching the rewritten text.
    pub fn rename_call(&mut self, id: CallId, new_name: &str) -> SourceEdit {
        let (unit, offset, old) = {
            let call = &mut self.calls[id.index()];
            let old = std::mem::replace(&mut call.name, new_name.to_string());
            (call.unit, call.offset, old)
        };
        let (grow, shrink) = if new_name.len() >= old.len() {
            (new_name.len() - old.len(), 0)
        } else {
            (0, old.len() - new_name.len())
        };
        for call in &mut self.calls {
            if call.unit == unit && call.offset > offset {
                call.offset = call.offset + grow - shrink;
            }
        }
        SourceEdit {
            file: self.unit(unit).path.clone(),
            offset,
            old,
            new: new_name.to_string(),
        }
    }

    // === Symbols ===

    pub fn func(&self, name: &str) -> Option<&FuncSymbol> {
        self.funcs.get(name)
    }

    pub fn funcs(&self) -> impl Iterator<Item = &FuncSymbol> {
        self.funcs.values()
    }

    pub(crate) fn insert_func(&mut self, func: FuncSymbol) -> bool {
        if self.funcs.contains_key(&func.name) {
            return false;
        }
        self.funcs.insert(func.name.clone(), func);
        true
    }

    /// Replace every symbol of the derived file with freshly generated signatures.
    pub fn replace_derived(&mut self, generated: impl IntoIterator<Item = (String, Idx)>) {
        self.funcs.retain(|_, f| !f.is_derived());
        for (name, sig) in generated {
            self.funcs.insert(
                name.clone(),
                FuncSymbol {
                    name,
                    file: DERIVED_FILE.to_string(),
                    sig,
                },
            );
        }
    }

    /// Whether `name` refers to something other than a package function:
    /// a builtin, or a conversion to a predeclared or local named type.
    pub fn is_builtin_or_type(&self, name: &str) -> bool {
        BUILTINS.contains(&name)
            || BasicKind::from_name(name).is_some()
            || matches!(name, "error" | "any")
            || self.pool.lookup_named(self.id, name).is_some()
    }
}

#[cfg(test)]
mod tests;
