//! The `tyderive` command.
//!
//! Each snapshot argument names one package reported by the host front end.
//! The package is driven to convergence with every built-in operation, the
//! generated functions are written to `derived.gen.go` next to its sources,
//! and calls renamed by `--autoname` or `--dedup` are rewritten in place.

mod error;
mod options;
mod rewrite;

use std::fs;
use std::path::{Path, PathBuf};

use tyd_engine::{derive_package, EngineConfig};
use tyd_source::{load_snapshot, DERIVED_FILE};

pub use error::CliError;
pub use options::{parse_args, Command, Options, USAGE};
pub use rewrite::FsRewriter;

/// What one package run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The derived file, if anything was generated.
    pub written: Option<PathBuf>,
    pub functions: Vec<String>,
    pub renames: usize,
}

/// Install the log subscriber: `RUST_LOG` if set, otherwise `warn` (`info` when verbose).
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{prelude::*, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
        .init();
}

/// Derive every snapshot in order, stopping at the first failure.
pub fn execute(options: &Options) -> Result<Vec<Report>, CliError> {
    options
        .snapshots
        .iter()
        .map(|path| derive_snapshot(path, &options.config))
        .collect()
}

/// Load, derive and write one package.
pub fn derive_snapshot(path: &Path, config: &EngineConfig) -> Result<Report, CliError> {
    let mut package = load_snapshot(path)?;
    let mut rewriter = FsRewriter::new(package.dir());
    let output = derive_package(&mut package, tyd_plugins::ALL, config, &mut rewriter).map_err(
        |source| CliError::Derive {
            package: package.path().to_string(),
            source,
        },
    )?;

    let written = match output.source {
        Some(source) => {
            let target = package.dir().join(DERIVED_FILE);
            fs::write(&target, source).map_err(|source| CliError::Write {
                path: target.clone(),
                source,
            })?;
            tracing::info!(path = %target.display(), functions = output.functions.len(), "wrote derived file");
            Some(target)
        }
        None => None,
    };
    Ok(Report {
        written,
        functions: output.functions,
        renames: output.renames.len(),
    })
}
