//! Errors raised while loading a package snapshot.

use std::path::PathBuf;

/// A package could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown type `{name}` in `{expr}`")]
    UnknownType { name: String, expr: String },

    #[error("bad type expression `{expr}` at byte {offset}: {message}")]
    BadType {
        expr: String,
        offset: usize,
        message: String,
    },

    #[error("duplicate declaration of `{name}`")]
    Duplicate { name: String },

    #[error("`{name}` has type `{expr}`, which is not a function type")]
    NotAFunction { name: String, expr: String },
}
