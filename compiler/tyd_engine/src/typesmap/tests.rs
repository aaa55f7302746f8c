#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;
use tyd_types::{Idx, PkgId, Pool};

use super::*;
use crate::EngineConfig;

const OPS: &[(&str, &str)] = &[("equal", "deriveEqual"), ("compare", "deriveCompare")];

fn setup(config: &EngineConfig) -> (Pool, PkgId, Registries) {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/shapes", "shapes");
    let registries = Registries::new(config, pkg, OPS);
    (pool, pkg, registries)
}

fn args(types: &[Idx]) -> Args {
    types.iter().copied().collect()
}

#[test]
fn reserve_is_idempotent() {
    let (pool, _, mut reg) = setup(&EngineConfig::default());
    let first = reg
        .reserve(&pool, "equal", "deriveEqualInts", &[Idx::INT, Idx::INT])
        .unwrap();
    assert_eq!(
        first,
        Reservation {
            name: "deriveEqualInts".to_string(),
            newly: true
        }
    );
    let second = reg
        .reserve(&pool, "equal", "deriveEqualInts", &[Idx::INT, Idx::INT])
        .unwrap();
    assert!(!second.newly);
    assert_eq!(reg.pending("equal"), vec![args(&[Idx::INT, Idx::INT])]);
}

#[test]
fn duplicate_request_without_dedup_is_a_conflict() {
    let (pool, _, mut reg) = setup(&EngineConfig::default());
    reg.reserve(&pool, "equal", "deriveEqualA", &[Idx::INT, Idx::INT])
        .unwrap();
    let err = reg
        .reserve(&pool, "equal", "deriveEqualB", &[Idx::INT, Idx::INT])
        .unwrap_err();
    assert_eq!(
        err,
        NamingConflict::Duplicate {
            requested: "deriveEqualB".to_string(),
            existing: "deriveEqualA".to_string(),
            types: "int, int".to_string(),
        }
    );
}

#[test]
fn dedup_reuses_the_first_name() {
    let config = EngineConfig {
        dedup: true,
        ..EngineConfig::default()
    };
    let (pool, _, mut reg) = setup(&config);
    reg.reserve(&pool, "equal", "deriveEqualA", &[Idx::INT, Idx::INT])
        .unwrap();
    let r = reg
        .reserve(&pool, "equal", "deriveEqualB", &[Idx::INT, Idx::INT])
        .unwrap();
    assert_eq!(r.name, "deriveEqualA");
    assert!(!r.newly);
    assert_eq!(reg.pending("equal").len(), 1);
}

#[test]
fn taken_name_without_autoname_is_a_conflict() {
    let (pool, _, mut reg) = setup(&EngineConfig::default());
    reg.add_user_func("deriveEqualX");
    let err = reg
        .reserve(&pool, "equal", "deriveEqualX", &[Idx::STRING, Idx::STRING])
        .unwrap_err();
    assert_eq!(
        err,
        NamingConflict::Taken {
            name: "deriveEqualX".to_string()
        }
    );
}

#[test]
fn autoname_picks_the_canonical_name_then_numbers() {
    let config = EngineConfig {
        autoname: true,
        ..EngineConfig::default()
    };
    let (mut pool, _, mut reg) = setup(&config);
    reg.add_user_func("deriveEqualX");
    reg.add_user_func("deriveEqualString");
    let r = reg
        .reserve(&pool, "equal", "deriveEqualX", &[Idx::STRING, Idx::STRING])
        .unwrap();
    assert_eq!(r.name, "deriveEqualString_1");

    let ints = pool.slice(Idx::INT);
    let r = reg
        .reserve(&pool, "equal", "deriveEqualX", &[ints, ints])
        .unwrap();
    assert_eq!(r.name, "deriveEqualSliceOfInt");
}

#[test]
fn helpers_get_canonical_names_and_are_pending() {
    let (mut pool, pkg, mut reg) = setup(&EngineConfig::default());
    let point = pool.declare_named(pkg, "point");
    let ptr = pool.pointer(point);
    let name = reg.func_name(&pool, "compare", &[ptr, ptr]);
    assert_eq!(name, "deriveComparePtrTopoint");
    assert_eq!(reg.func_name(&pool, "compare", &[ptr, ptr]), name);
    assert_eq!(reg.origin("compare", &[ptr, ptr]), Some(Origin::Helper));
    assert!(reg.is_taken(&name));

    assert!(reg.has_pending());
    reg.generating("compare", &[ptr, ptr]);
    assert!(!reg.has_pending());
    assert!(reg.pending("compare").is_empty());
    assert_eq!(reg.lookup("compare", &[ptr, ptr]), Some(name.as_str()));
}

#[test]
fn helper_names_avoid_user_functions() {
    let (pool, _, mut reg) = setup(&EngineConfig::default());
    reg.add_user_func("deriveEqualInt");
    assert_eq!(
        reg.func_name(&pool, "equal", &[Idx::INT, Idx::INT]),
        "deriveEqualInt_1"
    );
}

#[test]
fn names_are_shared_across_operations() {
    let (pool, _, mut reg) = setup(&EngineConfig::default());
    reg.reserve(&pool, "equal", "deriveCompareInt", &[Idx::INT, Idx::INT])
        .unwrap();
    assert_eq!(
        reg.func_name(&pool, "compare", &[Idx::INT, Idx::INT]),
        "deriveCompareInt_1"
    );
}

#[test]
fn routing_prefers_the_longest_prefix() {
    let config = EngineConfig::default().with_prefix("compare", "deriveEqualCmp");
    let (_, _, reg) = setup(&config);
    assert_eq!(reg.route("deriveEqualCmpThings"), Some("compare"));
    assert_eq!(reg.route("deriveEqualThings"), Some("equal"));
    assert_eq!(reg.route("somethingElse"), None);
    assert_eq!(reg.map("compare").map(TypesMap::prefix), Some("deriveEqualCmp"));
}

#[test]
fn records_keep_the_call_they_were_created_for() {
    let (pool, _, mut reg) = setup(&EngineConfig::default());
    let requester = Requester {
        location: tyd_source::Location {
            file: "main.go".to_string(),
            line: 3,
            column: 7,
        },
        op: "equal",
        name: "deriveEqualInts".to_string(),
        types: "[]int, []int".to_string(),
    };
    reg.set_requester(Some(requester.clone()));
    let ints = [Idx::INT, Idx::INT];
    reg.reserve(&pool, "equal", "deriveEqualInts", &ints).unwrap();
    reg.func_name(&pool, "compare", &[Idx::STRING, Idx::STRING]);
    reg.set_requester(None);
    reg.func_name(&pool, "compare", &[Idx::BOOL, Idx::BOOL]);

    assert_eq!(reg.requester("equal", &ints), Some(&requester));
    assert_eq!(reg.requester("compare", &[Idx::STRING, Idx::STRING]), Some(&requester));
    assert_eq!(reg.requester("compare", &[Idx::BOOL, Idx::BOOL]), None);
}
