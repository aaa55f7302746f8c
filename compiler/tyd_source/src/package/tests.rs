#![allow(clippy::unwrap_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;

use super::*;
use crate::Snapshot;

fn package(json: &str) -> Package {
    let snapshot = Snapshot::from_json(json).unwrap();
    Package::from_snapshot(&snapshot, PathBuf::new()).unwrap()
}

const CALLS: &str = r#"{
  "path": "p", "name": "p",
  "types": [{ "name": "Point", "type": "struct { X, Y int }" }],
  "funcs": [{ "name": "mk", "file": "a.go", "type": "func() []int" }],
  "files": [{ "path": "a.go", "calls": [
    { "name": "deriveA", "offset": 10, "line": 1, "column": 11, "args": ["int"] },
    { "name": "deriveB", "offset": 30, "line": 2, "column": 5,
      "args": [{ "call": { "name": "mk", "offset": 38, "line": 2, "column": 13, "args": [] } }] }
  ] }, { "path": "b.go", "calls": [
    { "name": "deriveC", "offset": 40, "line": 3, "column": 1, "args": [] }
  ] }]
}"#;

#[test]
fn nested_call_type_is_callee_result() {
    let package = package(CALLS);
    let (_, unit) = package.units().next().unwrap();
    let types = package.arg_types(unit.calls[1]);
    assert_eq!(package.pool.display(types[0]), "[]int");
}

#[test]
fn rename_shifts_later_offsets_in_same_file() {
    let mut package = package(CALLS);
    let (_, unit) = package.units().next().unwrap();
    let (first, second) = (unit.calls[0], unit.calls[1]);
    let other = package.units().nth(1).unwrap().1.calls[0];

    let edit = package.rename_call(first, "deriveAlpha");
    assert_eq!(
        edit,
        SourceEdit {
            file: "a.go".to_string(),
            offset: 10,
            old: "deriveA".to_string(),
            new: "deriveAlpha".to_string(),
        }
    );
    assert_eq!(package.call(first).name, "deriveAlpha");
    assert_eq!(package.call(second).offset, 34);
    assert_eq!(package.location(second).to_string(), "a.go:2:5");
    assert_eq!(package.call(other).offset, 40);
}

#[test]
fn replace_derived_symbols() {
    let mut package = package(CALLS);
    let sig = package.pool.signature(&[], &[Idx::BOOL], false);
    package.replace_derived([("deriveNew".to_string(), sig)]);
    assert!(package.func("deriveNew").unwrap().is_derived());
    assert!(package.func("mk").is_some());

    package.replace_derived(Vec::new());
    assert!(package.func("deriveNew").is_none());
}

#[test]
fn builtins_and_conversions() {
    let package = package(CALLS);
    assert!(package.is_builtin_or_type("len"));
    assert!(package.is_builtin_or_type("string"));
    assert!(package.is_builtin_or_type("Point"));
    assert!(!package.is_builtin_or_type("deriveA"));
}
