//! Fatal errors of a command-line run.

use std::path::PathBuf;

use tyd_engine::DeriveError;
use tyd_source::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{package}: {source}")]
    Derive {
        package: String,
        #[source]
        source: DeriveError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
