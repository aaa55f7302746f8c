#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::{parse_args, Command, Options};
use crate::CliError;

fn parse(args: &[&str]) -> Result<Command, CliError> {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    parse_args(&args, tyd_plugins::ALL)
}

fn usage(args: &[&str]) -> String {
    match parse(args) {
        Err(CliError::Usage(message)) => message,
        other => panic!("expected a usage error, got {other:?}"),
    }
}

#[test]
fn snapshots_and_switches() {
    let Command::Derive(options) = parse(&["--dedup", "a.json", "-v", "b.json"]).unwrap() else {
        panic!("expected a derive command");
    };
    assert_eq!(
        options,
        Options {
            config: tyd_engine::EngineConfig {
                dedup: true,
                ..Default::default()
            },
            verbose: true,
            snapshots: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
        }
    );
}

#[test]
fn prefix_overrides() {
    let Command::Derive(options) =
        parse(&["--equal.prefix=eq", "--autoname", "pkg.json"]).unwrap()
    else {
        panic!("expected a derive command");
    };
    assert!(options.config.autoname);
    assert_eq!(options.config.prefix("equal", "deriveEqual"), "eq");
    assert_eq!(options.config.prefix("sort", "deriveSort"), "deriveSort");
}

#[test]
fn help_and_version_win() {
    assert_eq!(parse(&["pkg.json", "--help"]).unwrap(), Command::Help);
    assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
    assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
}

#[test]
fn snapshots_are_required() {
    assert_eq!(usage(&["--dedup"]), "missing snapshot path");
}

#[test]
fn unknown_flags_are_rejected() {
    assert_eq!(usage(&["--fast", "pkg.json"]), "unknown option `--fast`");
    assert_eq!(usage(&["--equal.suffix=x", "pkg.json"]), "unknown option `--equal.suffix=x`");
    assert_eq!(
        usage(&["--hash.prefix=h", "pkg.json"]),
        "unknown operation `hash` in `--hash.prefix=h`"
    );
}

#[test]
fn prefixes_must_be_identifiers() {
    assert_eq!(
        usage(&["--sort.prefix=1sort", "pkg.json"]),
        "prefix `1sort` of `sort` is not a Go identifier"
    );
    assert_eq!(
        usage(&["--sort.prefix=", "pkg.json"]),
        "prefix `` of `sort` is not a Go identifier"
    );
}
