//! Building a [`Package`] from a snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use smallvec::SmallVec;
use tyd_types::{Idx, Method, PkgId, Pool, TypeKind};

use crate::package::{Arg, CallId, CallSite, FuncSymbol, Package, UnitId};
use crate::parser::{parse_type, Scope};
use crate::snapshot::{ArgDecl, CallDecl, Snapshot};
use crate::LoadError;

/// Read and load a snapshot file. The package directory is resolved
/// relative to the snapshot's own directory.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_snapshot(path: &Path) -> Result<Package, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = Snapshot::from_json(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Package::from_snapshot(&snapshot, base.join(&snapshot.dir))
}

/// Default package name for an import path: its last element.
fn default_name(path: &str) -> String {
    path.rsplit('/')
        .next()
        .unwrap_or(path)
        .replace(['-', '.'], "_")
}

impl Package {
    /// Resolve a snapshot into a package rooted at `dir`.
    pub fn from_snapshot(snapshot: &Snapshot, dir: PathBuf) -> Result<Package, LoadError> {
        let mut pool = Pool::new();
        let id = pool.package(&snapshot.path, &snapshot.name);
        let mut scope = Scope::new(id);
        for import in &snapshot.imports {
            let pkg = pool.package(&import.path, &import.name);
            scope.add_import(&import.name, pkg);
        }

        // Declare every named type first so declarations can refer to each other.
        let mut declared = Vec::with_capacity(snapshot.types.len());
        for decl in &snapshot.types {
            let pkg = match &decl.package {
                Some(path) if *path != snapshot.path => match pool.lookup_package(path) {
                    Some(pkg) => pkg,
                    None => pool.package(path, &default_name(path)),
                },
                _ => id,
            };
            if pool.lookup_named(pkg, &decl.name).is_some() {
                return Err(LoadError::Duplicate {
                    name: decl.name.clone(),
                });
            }
            declared.push((pool.declare_named(pkg, &decl.name), pkg));
        }

        for (decl, &(named, pkg)) in snapshot.types.iter().zip(&declared) {
            // Field and method types resolve in the declaring package.
            let decl_scope = scoped(&scope, pkg);
            let underlying = parse_type(&mut pool, &decl_scope, &decl.ty)?;
            pool.set_underlying(named, underlying);
            for method in &decl.methods {
                let sig = parse_signature(&mut pool, &decl_scope, &method.name, &method.ty)?;
                pool.add_method(
                    named,
                    Method {
                        name: method.name.clone(),
                        sig,
                        pointer_receiver: method.pointer,
                    },
                );
            }
        }

        let mut package = Package::new(pool, id, scope, dir);

        let scope = package.scope().clone();
        for func in &snapshot.funcs {
            let sig = parse_signature(&mut package.pool, &scope, &func.name, &func.ty)?;
            let inserted = package.insert_func(FuncSymbol {
                name: func.name.clone(),
                file: func.file.clone(),
                sig,
            });
            if !inserted {
                return Err(LoadError::Duplicate {
                    name: func.name.clone(),
                });
            }
        }

        for file in &snapshot.files {
            let unit = package.add_unit(&file.path);
            for call in &file.calls {
                package.load_call(unit, call, true)?;
            }
        }

        tracing::debug!(
            package = %package.path(),
            units = snapshot.files.len(),
            funcs = snapshot.funcs.len(),
            types = snapshot.types.len(),
            "loaded package"
        );
        Ok(package)
    }

    /// Add a call and, after it, the calls among its arguments.
    fn load_call(
        &mut self,
        unit: UnitId,
        decl: &CallDecl,
        top_level: bool,
    ) -> Result<CallId, LoadError> {
        let scope = self.scope().clone();
        let mut args = SmallVec::new();
        let mut nested = Vec::new();
        for (position, arg) in decl.args.iter().enumerate() {
            match arg {
                Some(ArgDecl::Type(expr)) => {
                    args.push(Arg::Type(parse_type(&mut self.pool, &scope, expr)?));
                }
                Some(ArgDecl::Call { call }) => {
                    args.push(Arg::Unknown);
                    nested.push((position, call));
                }
                None => args.push(Arg::Unknown),
            }
        }
        let id = self.add_call(
            CallSite {
                name: decl.name.clone(),
                unit,
                offset: decl.offset,
                line: decl.line,
                column: decl.column,
                args,
            },
            top_level,
        );
        for (position, call) in nested {
            let child = self.load_call(unit, call, false)?;
            self.set_arg(id, position, Arg::Call(child));
        }
        Ok(id)
    }
}

fn scoped(scope: &Scope, pkg: PkgId) -> Scope {
    if pkg == scope.current() {
        scope.clone()
    } else {
        Scope::new(pkg)
    }
}

fn parse_signature(
    pool: &mut Pool,
    scope: &Scope,
    name: &str,
    expr: &str,
) -> Result<Idx, LoadError> {
    let sig = parse_type(pool, scope, expr)?;
    match pool.kind(sig) {
        TypeKind::Signature { .. } => Ok(sig),
        _ => Err(LoadError::NotAFunction {
            name: name.to_string(),
            expr: expr.to_string(),
        }),
    }
}
