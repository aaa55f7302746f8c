#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

//! The command pipeline over snapshots and Go files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tyd_engine::{EngineConfig, HEADER};
use tydc::{derive_snapshot, execute, CliError, Options};

const MAIN: &str = "package app

func main() {
	a, b := &T{}, &T{}
	_ = deriveEqualFirst(a, b)
	_ = deriveEqualSecond(a, b)
}
";

/// A package directory holding `main.go` and its snapshot.
fn workspace(main: &str, calls: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.go"), main).unwrap();
    let calls: Vec<String> = calls
        .iter()
        .map(|name| {
            let offset = main.find(name).unwrap();
            let line = main[..offset].matches('\n').count() + 1;
            let column = offset - main[..offset].rfind('\n').map_or(0, |i| i + 1) + 1;
            format!(
                r#"{{ "name": "{name}", "offset": {offset}, "line": {line}, "column": {column}, "args": ["*T", "*T"] }}"#
            )
        })
        .collect();
    let snapshot = format!(
        r#"{{
  "path": "example.com/app",
  "name": "app",
  "types": [{{ "name": "T", "type": "struct {{ ValueA int64; RefB *string }}" }}],
  "funcs": [{{ "name": "main", "file": "main.go", "type": "func()" }}],
  "files": [{{ "path": "main.go", "calls": [{}] }}]
}}"#,
        calls.join(", ")
    );
    let path = dir.path().join("snapshot.json");
    fs::write(&path, snapshot).unwrap();
    (dir, path)
}

fn derived(dir: &Path) -> String {
    fs::read_to_string(dir.join("derived.gen.go")).unwrap()
}

#[test]
fn writes_the_derived_file_next_to_the_sources() {
    let (dir, snapshot) = workspace(MAIN, &["deriveEqualFirst"]);
    let report = derive_snapshot(&snapshot, &EngineConfig::default()).unwrap();

    assert_eq!(report.written, Some(dir.path().join("derived.gen.go")));
    assert_eq!(
        report.functions,
        vec!["deriveEqualFirst".to_string(), "deriveEqualPtrToString".to_string()]
    );
    let text = derived(dir.path());
    assert!(text.starts_with(&format!("{HEADER}\n\npackage app\n")));
    assert!(text.contains("func deriveEqualFirst(this, that *T) bool {"));
    assert_eq!(fs::read_to_string(dir.path().join("main.go")).unwrap(), MAIN);
}

#[test]
fn dedup_rewrites_the_second_call() {
    let (dir, snapshot) = workspace(MAIN, &["deriveEqualFirst", "deriveEqualSecond"]);
    let config = EngineConfig {
        dedup: true,
        ..EngineConfig::default()
    };
    let report = derive_snapshot(&snapshot, &config).unwrap();

    assert_eq!(report.renames, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("main.go")).unwrap(),
        MAIN.replace("deriveEqualSecond", "deriveEqualFirst")
    );
    assert!(!derived(dir.path()).contains("deriveEqualSecond"));
}

#[test]
fn duplicates_without_dedup_write_nothing() {
    let (dir, snapshot) = workspace(MAIN, &["deriveEqualFirst", "deriveEqualSecond"]);
    let err = derive_snapshot(&snapshot, &EngineConfig::default()).unwrap_err();

    assert!(matches!(err, CliError::Derive { ref package, .. } if package == "example.com/app"));
    assert!(err.to_string().contains("use --dedup to reuse it"));
    assert!(!dir.path().join("derived.gen.go").exists());
    assert_eq!(fs::read_to_string(dir.path().join("main.go")).unwrap(), MAIN);
}

#[test]
fn nothing_to_derive_writes_no_file() {
    let (dir, snapshot) = workspace(MAIN, &[]);
    let report = derive_snapshot(&snapshot, &EngineConfig::default()).unwrap();

    assert_eq!(report.written, None);
    assert!(report.functions.is_empty());
    assert!(!dir.path().join("derived.gen.go").exists());
}

#[test]
fn missing_snapshots_stop_the_run() {
    let (dir, snapshot) = workspace(MAIN, &["deriveEqualFirst"]);
    let options = Options {
        snapshots: vec![dir.path().join("absent.json"), snapshot],
        ..Options::default()
    };
    let err = execute(&options).unwrap_err();

    assert!(matches!(err, CliError::Load(_)));
    assert!(err.to_string().starts_with("cannot read "));
    assert!(!dir.path().join("derived.gen.go").exists());
}
