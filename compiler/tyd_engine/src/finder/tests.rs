#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tyd_source::{Package, Snapshot};
use tyd_types::Idx;

use super::*;

const SOURCE: &str = r#"{
  "path": "example.com/app",
  "name": "app",
  "dir": ".",
  "types": [{ "name": "Celsius", "type": "float64" }],
  "funcs": [
    { "name": "helper", "file": "util.go", "type": "func(int) int" },
    { "name": "deriveKeysOld", "file": "derived.gen.go", "type": "func(map[int]int) []int" }
  ],
  "files": [{ "path": "main.go", "calls": [
    { "name": "deriveSort", "offset": 10, "line": 1, "column": 1,
      "args": [{ "call": { "name": "deriveKeysOld", "offset": 21, "line": 1, "column": 12,
                 "args": ["map[int]int"] } }] },
    { "name": "helper", "offset": 50, "line": 2, "column": 1, "args": ["int"] },
    { "name": "len", "offset": 60, "line": 3, "column": 1, "args": ["[]int"] },
    { "name": "Celsius", "offset": 70, "line": 4, "column": 1, "args": ["float64"] },
    { "name": "deriveJoin", "offset": 80, "line": 5, "column": 1,
      "args": [{ "call": { "name": "deriveFmap", "offset": 91, "line": 5, "column": 12,
                 "args": ["func(string) []string", "[]string"] } }] }
  ] }]
}"#;

fn load() -> Package {
    let snapshot = Snapshot::from_json(SOURCE).unwrap();
    Package::from_snapshot(&snapshot, PathBuf::from(".")).unwrap()
}

fn names(package: &Package, found: &FoundCalls) -> Vec<(String, CallKind)> {
    found
        .calls
        .iter()
        .map(|c| (package.call(c.id).name.clone(), c.kind))
        .collect()
}

#[test]
fn classifies_in_preorder() {
    let package = load();
    let (unit, _) = package.units().next().unwrap();
    let found = find(&package, unit);
    assert_eq!(
        names(&package, &found),
        vec![
            ("deriveSort".to_string(), CallKind::Undefined),
            ("deriveKeysOld".to_string(), CallKind::Derived),
            ("deriveJoin".to_string(), CallKind::Undefined),
            ("deriveFmap".to_string(), CallKind::Undefined),
        ]
    );
    assert_eq!(found.user_funcs, vec!["helper".to_string()]);
}

#[test]
fn nested_call_types_come_from_known_callees() {
    let package = load();
    let (unit, _) = package.units().next().unwrap();
    let found = find(&package, unit);

    // deriveKeysOld is known, so deriveSort sees its []int result.
    let sort = &found.calls[0];
    assert!(!sort.has_undefined_arg());
    assert_eq!(package.pool.display(sort.args[0]), "[]int");

    // deriveFmap is not generated yet.
    let join = &found.calls[2];
    assert_eq!(join.args.as_slice(), &[Idx::INVALID]);
    assert!(join.has_undefined_arg());
    assert!(!found.calls[3].has_undefined_arg());
}
