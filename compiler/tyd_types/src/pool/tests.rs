use pretty_assertions::assert_eq;

use super::*;

#[test]
fn basics_at_fixed_indices() {
    let pool = Pool::new();

    for kind in BasicKind::ALL {
        assert_eq!(pool.kind(kind.idx()), &TypeKind::Basic(kind));
    }
    assert_eq!(pool.basic(Idx::BYTE), Some(BasicKind::Uint8));
    assert_eq!(pool.basic(Idx::RUNE), Some(BasicKind::Int32));
}

#[test]
fn structural_identity_is_index_identity() {
    let mut pool = Pool::new();

    let a = pool.pointer(Idx::STRING);
    let b = pool.pointer(Idx::STRING);
    assert_eq!(a, b);

    let s1 = pool.slice(a);
    let s2 = pool.slice(b);
    assert!(pool.identical(s1, s2));

    let m1 = pool.map(Idx::STRING, Idx::INT);
    let m2 = pool.map(Idx::INT, Idx::STRING);
    assert_ne!(m1, m2);
}

#[test]
fn named_identity_is_nominal() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");

    let t = pool.declare_named(pkg, "T");
    let u = pool.declare_named(pkg, "U");
    let st = pool.structure(vec![Field::new("X", Idx::INT)]);
    pool.set_underlying(t, st);
    pool.set_underlying(u, st);

    assert_ne!(t, u);
    assert_eq!(pool.declare_named(pkg, "T"), t);
    assert_eq!(pool.underlying(t), pool.underlying(u));
}

#[test]
fn recursive_named_type() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/list", "list");

    let node = pool.declare_named(pkg, "Node");
    let next = pool.pointer(node);
    let st = pool.structure(vec![Field::new("Val", Idx::INT), Field::new("Next", next)]);
    pool.set_underlying(node, st);

    let fields = pool.struct_fields(node).unwrap_or_default();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].ty, next);
    assert_eq!(pool.pointer_elem(next), Some(node));
}

#[test]
fn unresolved_named_has_invalid_underlying() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let t = pool.declare_named(pkg, "Later");
    assert!(pool.underlying(t).is_invalid());
}

#[test]
fn assignability() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let ints = pool.slice(Idx::INT);
    let named = pool.declare_named(pkg, "Ints");
    pool.set_underlying(named, ints);
    let other = pool.declare_named(pkg, "Other");
    pool.set_underlying(other, ints);

    assert!(pool.assignable(ints, named));
    assert!(pool.assignable(named, ints));
    assert!(!pool.assignable(named, other));
    assert!(pool.assignable(Idx::UNTYPED_NIL, ints));
    assert!(!pool.assignable(Idx::UNTYPED_NIL, Idx::INT));

    let any = pool.empty_interface();
    assert!(pool.assignable(Idx::INT, any));
}

#[test]
fn error_interface_satisfaction() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let my_err = pool.declare_named(pkg, "MyErr");
    pool.set_underlying(my_err, Idx::STRING);
    let sig = pool.signature(&[], &[Idx::STRING], false);
    pool.add_method(
        my_err,
        Method {
            name: "Error".to_string(),
            sig,
            pointer_receiver: true,
        },
    );
    let ptr = pool.pointer(my_err);
    let error = pool.error_type();

    assert!(pool.assignable(ptr, error));
    assert!(!pool.assignable(my_err, error));
    assert!(pool.assignable(error, error));
    assert!(pool.is_error(error));
}

#[test]
fn method_lookup() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let t = pool.declare_named(pkg, "T");
    let ptr = pool.pointer(t);
    let sig = pool.signature(&[ptr], &[Idx::BOOL], false);
    pool.add_method(
        t,
        Method {
            name: "Equal".to_string(),
            sig,
            pointer_receiver: true,
        },
    );

    assert_eq!(pool.method(t, "Equal").map(|m| m.sig), Some(sig));
    assert!(pool.method(t, "Compare").is_none());
    assert!(pool.method(ptr, "Equal").is_none());
}
