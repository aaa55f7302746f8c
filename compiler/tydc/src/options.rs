//! Command-line parsing.

use std::path::PathBuf;

use tyd_engine::{EngineConfig, Plugin};

use crate::CliError;

pub const USAGE: &str = "\
Usage: tyderive [options] <snapshot.json>...

Options:
  --<op>.prefix=<prefix>  Function prefix of an operation (e.g. --equal.prefix=eq)
  --autoname              Rename calls whose name is taken by other types
  --dedup                 Point duplicate derivations at the first function
  -v, --verbose           Log renames and written files
  -h, --help              Print this help
  --version               Print the version";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Derive(Options),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub config: EngineConfig,
    pub verbose: bool,
    pub snapshots: Vec<PathBuf>,
}

/// Parse the arguments after the program name against the known operations.
pub fn parse_args(args: &[String], plugins: &[Plugin]) -> Result<Command, CliError> {
    let mut options = Options::default();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--version" => return Ok(Command::Version),
            "--autoname" => options.config.autoname = true,
            "--dedup" => options.config.dedup = true,
            "-v" | "--verbose" => options.verbose = true,
            flag if flag.starts_with('-') => {
                let (op, prefix) = prefix_flag(flag, plugins)?;
                options.config = options.config.with_prefix(op, prefix);
            }
            path => options.snapshots.push(PathBuf::from(path)),
        }
    }
    if options.snapshots.is_empty() {
        return Err(CliError::Usage("missing snapshot path".to_string()));
    }
    Ok(Command::Derive(options))
}

/// Split `--<op>.prefix=<prefix>`.
fn prefix_flag<'a>(flag: &'a str, plugins: &[Plugin]) -> Result<(&'a str, &'a str), CliError> {
    let unknown = || CliError::Usage(format!("unknown option `{flag}`"));
    let (key, prefix) = flag
        .strip_prefix("--")
        .and_then(|rest| rest.split_once('='))
        .ok_or_else(unknown)?;
    let op = key.strip_suffix(".prefix").ok_or_else(unknown)?;
    if !plugins.iter().any(|p| p.name == op) {
        return Err(CliError::Usage(format!("unknown operation `{op}` in `{flag}`")));
    }
    if !is_identifier(prefix) {
        return Err(CliError::Usage(format!(
            "prefix `{prefix}` of `{op}` is not a Go identifier"
        )));
    }
    Ok((op, prefix))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests;
