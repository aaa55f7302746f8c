use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::FxHashMap;

use super::*;
use crate::Field;

#[test]
fn capitalize_first_char() {
    assert_eq!(capitalize("int64"), "Int64");
    assert_eq!(capitalize("T"), "T");
    assert_eq!(capitalize(""), "");
}

#[test]
fn composite_labels() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let t = pool.declare_named(pkg, "T");
    let ptr = pool.pointer(t);
    let slice = pool.slice(ptr);
    let arr = pool.array(4, Idx::INT);
    let map = pool.map(Idx::STRING, arr);

    assert_eq!(label(&pool, slice, pkg), "SliceOfPtrToT");
    assert_eq!(label(&pool, map, pkg), "MapOfStringToArray4OfInt");
    assert_eq!(label(&pool, Idx::INT64, pkg), "Int64");
}

#[test]
fn external_named_types_carry_package() {
    let mut pool = Pool::new();
    let here = pool.package("example.com/here", "here");
    let ext = pool.package("example.com/ext", "ext");
    let hidden = pool.declare_named(ext, "hidden");

    assert_eq!(label(&pool, hidden, here), "Ext_hidden");
    assert_eq!(label(&pool, hidden, ext), "hidden");
    assert_eq!(label(&pool, pool.error_type(), here), "Error");
}

#[test]
fn functions_and_structs() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let error = pool.error_type();
    let f = pool.signature(&[Idx::STRING], &[Idx::INT, error], false);
    let st = pool.structure(vec![Field::new("a", Idx::INT), Field::new("B", Idx::BOOL)]);

    assert_eq!(label(&pool, f, pkg), "FuncOfStringToIntAndError");
    assert_eq!(label(&pool, st, pkg), "StructOfaIntAndBBool");
}

#[test]
fn named_types_keep_their_case() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let lower = pool.declare_named(pkg, "t");
    let upper = pool.declare_named(pkg, "T");
    let (lower_ptr, upper_ptr) = (pool.pointer(lower), pool.pointer(upper));

    assert_eq!(label(&pool, lower_ptr, pkg), "PtrTot");
    assert_eq!(label(&pool, upper_ptr, pkg), "PtrToT");
}

#[test]
fn tuples() {
    let mut pool = Pool::new();
    let pkg = pool.package("example.com/a", "a");
    let ints = pool.slice(Idx::INT);

    assert_eq!(label_tuple(&pool, &[ints, ints], pkg), "SliceOfInt");
    assert_eq!(label_tuple(&pool, &[ints, Idx::INT], pkg), "SliceOfIntAndInt");
    assert_eq!(label_tuple(&pool, &[], pkg), "");
}

/// Named types generated by [`shape_strategy`], differing only by case.
const NAMES: &[&str] = &["t", "T", "point", "Point", "pOINT"];

/// A type shape built from basics, named types, pointers, slices, arrays and maps.
#[derive(Clone, Debug)]
enum Shape {
    Basic(usize),
    Named(usize),
    Pointer(Box<Shape>),
    Slice(Box<Shape>),
    Array(u64, Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (1..BasicKind::ALL.len() - 1).prop_map(Shape::Basic),
        (0..NAMES.len()).prop_map(Shape::Named),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Pointer(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Slice(Box::new(s))),
            (0u64..16, inner.clone()).prop_map(|(n, s)| Shape::Array(n, Box::new(s))),
            (inner.clone(), inner).prop_map(|(k, v)| Shape::Map(Box::new(k), Box::new(v))),
        ]
    })
}

fn build(pool: &mut Pool, shape: &Shape) -> Idx {
    match shape {
        Shape::Basic(i) => BasicKind::ALL[*i].idx(),
        Shape::Named(i) => {
            let pkg = pool.package("example.com/shapes", "shapes");
            pool.declare_named(pkg, NAMES[*i])
        }
        Shape::Pointer(s) => {
            let elem = build(pool, s);
            pool.pointer(elem)
        }
        Shape::Slice(s) => {
            let elem = build(pool, s);
            pool.slice(elem)
        }
        Shape::Array(n, s) => {
            let elem = build(pool, s);
            pool.array(*n, elem)
        }
        Shape::Map(k, v) => {
            let key = build(pool, k);
            let value = build(pool, v);
            pool.map(key, value)
        }
    }
}

proptest! {
    #[test]
    fn labels_are_pure(shape in shape_strategy()) {
        let mut pool = Pool::new();
        let a = build(&mut pool, &shape);
        let b = build(&mut pool, &shape);
        prop_assert_eq!(label(&pool, a, PkgId::UNIVERSE), label(&pool, b, PkgId::UNIVERSE));
    }

    #[test]
    fn labels_are_injective(shapes in prop::collection::vec(shape_strategy(), 2..12)) {
        let mut pool = Pool::new();
        let mut seen: FxHashMap<String, Idx> = FxHashMap::default();
        for shape in &shapes {
            let idx = build(&mut pool, shape);
            let l = label(&pool, idx, PkgId::UNIVERSE);
            if let Some(&other) = seen.get(&l) {
                prop_assert_eq!(other, idx);
            }
            seen.insert(l, idx);
        }
    }
}
