//! Error types of the derivation engine.

use tyd_source::Location;

/// A call site asked for something its operation cannot derive.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("{name} expects {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("{name} has arguments of different types: {first} != {second}")]
    Mismatch {
        name: String,
        first: String,
        second: String,
    },

    #[error("{name}: {ty} is not a pointer, slice or map and cannot be copied into")]
    NotReference { name: String, ty: String },

    #[error("{name}: {detail}")]
    InvalidArgument { name: String, detail: String },

    #[error("unsupported type {ty}")]
    Unsupported { ty: String },

    #[error("private field `{field}` of {ty} is not supported by this operation")]
    PrivateField { field: String, ty: String },

    /// A failure while emitting the function a call asked for, or one of its helpers.
    #[error("{name}({types}): {source}")]
    Generating {
        name: String,
        types: String,
        source: Box<RequestError>,
    },

    #[error(transparent)]
    Naming(#[from] NamingConflict),
}

/// A requested function name cannot be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NamingConflict {
    #[error("`{name}` is already defined for other types; use --autoname to pick a free name")]
    Taken { name: String },

    #[error("`{requested}` derives the same function as `{existing}` for {types}; use --dedup to reuse it")]
    Duplicate {
        requested: String,
        existing: String,
        types: String,
    },
}

/// A fatal error of one derivation run.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    #[error("{location}: {op}: {source}")]
    Request {
        location: Location,
        op: &'static str,
        #[source]
        source: RequestError,
    },

    /// Generation failed for a function no call site asked for.
    #[error("{op}: {source}")]
    Generate {
        op: &'static str,
        #[source]
        source: RequestError,
    },

    #[error("{location}: {source}")]
    Naming {
        location: Location,
        #[source]
        source: NamingConflict,
    },

    #[error("operation `{op}` needs `{dep}`, which is not registered")]
    MissingDependency { op: &'static str, dep: &'static str },

    #[error("cannot generate {} call(s):{}", unresolved.len(), list(unresolved))]
    Convergence { unresolved: Vec<Unresolved> },

    #[error("rewriting {file}: {source}")]
    Rewrite {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// A call left without a generated function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unresolved {
    pub location: Location,
    pub call: String,
}

fn list(unresolved: &[Unresolved]) -> String {
    unresolved
        .iter()
        .map(|u| format!("\n  {}: {}", u.location, u.call))
        .collect()
}
