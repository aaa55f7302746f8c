#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;

use crate::tests::{call, error, file, source, AGGREGATE};

#[test]
fn bulk_comparable_types_use_the_operator() {
    let src = source(&[], &[call("deriveEqual", 10, r#""[3]int", "[3]int""#)]);
    assert_eq!(
        src,
        file(
            &[],
            &[
                "",
                "func deriveEqual(this, that [3]int) bool {",
                "\treturn this == that",
                "}",
            ]
        )
    );
}

#[test]
fn maps_compare_entries() {
    let src = source(&[], &[call("deriveEqual", 10, r#""map[string]int", "map[string]int""#)]);
    assert_eq!(
        src,
        file(
            &[],
            &[
                "",
                "func deriveEqual(this, that map[string]int) bool {",
                "\tif this == nil || that == nil {",
                "\t\treturn this == nil && that == nil",
                "\t}",
                "\tif len(this) != len(that) {",
                "\t\treturn false",
                "\t}",
                "\tfor k, v := range this {",
                "\t\tthatv, ok := that[k]",
                "\t\tif !ok {",
                "\t\t\treturn false",
                "\t\t}",
                "\t\tif !(v == thatv) {",
                "\t\t\treturn false",
                "\t\t}",
                "\t}",
                "\treturn true",
                "}",
            ]
        )
    );
}

#[test]
fn slices_of_aggregates_use_a_pointer_helper() {
    let src = source(&[AGGREGATE], &[call("deriveEqual", 10, r#""[]T", "[]T""#)]);
    assert!(src.contains(
        "\tfor i := 0; i < len(this); i++ {\n\t\tif !(deriveEqualPtrToT(&this[i], &that[i])) {\n"
    ));
    assert!(src.contains("func deriveEqualPtrToT(this, that *T) bool {"));
}

#[test]
fn named_value_roots_delegate_to_the_pointer_function() {
    let src = source(&[AGGREGATE], &[call("deriveEqual", 10, r#""T", "T""#)]);
    assert!(src.contains("func deriveEqual(this, that T) bool {\n\treturn deriveEqualPtrToT(&this, &that)\n}\n"));
}

#[test]
fn nested_equal_methods_are_called() {
    let types = [
        r#"{ "name": "Inner", "type": "struct { Items []int }",
             "methods": [{ "name": "Equal", "type": "func(*Inner) bool", "pointer": true }] }"#,
        r#"{ "name": "Outer", "type": "struct { In Inner; Name string }" }"#,
    ];
    let src = source(&types, &[call("deriveEqual", 10, r#""*Outer", "*Outer""#)]);
    assert!(src.contains("\treturn this.In.Equal(&that.In) &&\n\t\tthis.Name == that.Name\n"));
    assert!(!src.contains("deriveEqualPtrToInner"));
}

#[test]
fn byte_slices_use_bytes_equal() {
    let types = [r#"{ "name": "Blob", "type": "struct { Data []byte }" }"#];
    let src = source(&types, &[call("deriveEqual", 10, r#""*Blob", "*Blob""#)]);
    assert!(src.starts_with(&file(&["bytes"], &[])));
    assert!(src.contains("\treturn bytes.Equal(this.Data, that.Data)\n}\n"));
}

#[test]
fn empty_structs_are_always_equal() {
    let types = [r#"{ "name": "None", "type": "struct {}" }"#];
    let src = source(&types, &[call("deriveEqual", 10, r#""*None", "*None""#)]);
    assert!(src.contains("\t}\n\treturn true\n}\n"));
}

#[test]
fn mismatched_arguments() {
    assert_eq!(
        error(&[], &[call("deriveEqual", 10, r#""int", "string""#)]),
        "main.go:1:10: equal: deriveEqual has arguments of different types: int != string"
    );
}

#[test]
fn functions_are_unsupported() {
    assert_eq!(
        error(&[], &[call("deriveEqual", 10, r#""[]func()", "[]func()""#)]),
        "main.go:1:10: equal: deriveEqual([]func(), []func()): unsupported type func()"
    );
}

#[test]
fn private_fields_of_other_packages_are_read_through_reflect() {
    let hidden = r#"{ "package": "example.com/ext", "name": "Hidden",
                      "type": "struct { Name string; n int }" }"#;
    let src = source(&[hidden], &[call("deriveEqual", 10, r#""*ext.Hidden", "*ext.Hidden""#)]);
    assert!(src.contains("\t\"reflect\"\n\t\"unsafe\"\n"));
    assert!(src.contains(
        "\tthisv := reflect.Indirect(reflect.ValueOf(this))\n\
         \tthatv := reflect.Indirect(reflect.ValueOf(that))\n"
    ));
    assert!(src.contains(
        "*(*int)(unsafe.Pointer(thisv.Field(1).UnsafeAddr())) == \
         *(*int)(unsafe.Pointer(thatv.Field(1).UnsafeAddr()))"
    ));
}

#[test]
fn nested_failures_point_at_the_call() {
    let types = [r#"{ "name": "T", "type": "struct { A int; C chan int }" }"#];
    assert_eq!(
        error(&types, &[call("deriveEqual", 10, r#""*T", "*T""#)]),
        "main.go:1:10: equal: deriveEqual(*app.T, *app.T): unsupported type chan int"
    );
}

#[test]
fn helpers_inherit_the_requesting_call() {
    let types = [
        r#"{ "name": "Leaf", "type": "struct { C chan int }" }"#,
        r#"{ "name": "Tree", "type": "struct { Leaves []*Leaf }" }"#,
    ];
    assert_eq!(
        error(&types, &[call("deriveEqual", 10, r#""*Tree", "*Tree""#)]),
        "main.go:1:10: equal: deriveEqual(*app.Tree, *app.Tree): unsupported type chan int"
    );
}
