//! Host side of the derivation engine.
//!
//! The host front end (parser and type checker) is an external collaborator.
//! It reports one package at a time as a JSON [`Snapshot`]: named types with
//! their underlying types and methods, package functions, and every call to a
//! plain identifier with the types of its arguments. Loading resolves the
//! snapshot into a [`Package`], interning every type expression into a
//! [`tyd_types::Pool`].

mod error;
mod lexer;
mod load;
mod package;
mod parser;
mod snapshot;

pub use error::LoadError;
pub use load::load_snapshot;
pub use package::{
    Arg, CallId, CallSite, FuncSymbol, Location, Package, SourceEdit, Unit, UnitId, DERIVED_FILE,
};
pub use parser::{parse_type, Scope};
pub use snapshot::{ArgDecl, CallDecl, FileDecl, FuncDecl, ImportDecl, MethodDecl, Snapshot, TypeDecl};
