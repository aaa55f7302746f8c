#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use pretty_assertions::assert_eq;

use crate::tests::{call, derive, file, source};

#[test]
fn strings_use_strings_compare() {
    let src = source(&[], &[call("deriveCompare", 10, r#""string", "string""#)]);
    assert_eq!(
        src,
        file(
            &["strings"],
            &[
                "",
                "func deriveCompare(this, that string) int {",
                "\treturn strings.Compare(this, that)",
                "}",
            ]
        )
    );
}

#[test]
fn named_strings_are_converted() {
    let types = [r#"{ "name": "Name", "type": "string" }"#];
    let src = source(&types, &[call("deriveCompare", 10, r#""Name", "Name""#)]);
    assert!(src.contains("\treturn strings.Compare(string(this), string(that))\n"));
}

#[test]
fn false_sorts_before_true() {
    let src = source(&[], &[call("deriveCompare", 10, r#""bool", "bool""#)]);
    assert!(src.contains(
        "\tif this == that {\n\t\treturn 0\n\t}\n\tif that {\n\t\treturn -1\n\t}\n\treturn 1\n"
    ));
}

#[test]
fn numbers_compare_by_magnitude() {
    let src = source(&[], &[call("deriveCompare", 10, r#""float64", "float64""#)]);
    assert_eq!(
        src,
        file(
            &[],
            &[
                "",
                "func deriveCompare(this, that float64) int {",
                "\tif this != that {",
                "\t\tif this < that {",
                "\t\t\treturn -1",
                "\t\t}",
                "\t\treturn 1",
                "\t}",
                "\treturn 0",
                "}",
            ]
        )
    );
}

#[test]
fn complex_numbers_compare_real_parts_first() {
    let src = source(&[], &[call("deriveCompare", 10, r#""complex128", "complex128""#)]);
    assert!(src.contains("\tif thisr, thatr := real(this), real(that); thisr == thatr {\n"));
    assert!(src.contains("\t\tif thisi, thati := imag(this), imag(that); thisi == thati {\n"));
}

#[test]
fn maps_walk_sorted_keys() {
    let output = derive(&[], &[call("deriveCompare", 10, r#""map[string]int", "map[string]int""#)])
        .unwrap();
    assert_eq!(
        output.functions,
        vec![
            "deriveCompare".to_string(),
            "deriveKeysMapOfStringToInt".to_string(),
            "deriveSortSliceOfString".to_string(),
            "deriveCompareInt".to_string(),
        ]
    );
    let src = output.source.unwrap();
    assert!(src.contains(
        "\tthiskeys := deriveSortSliceOfString(deriveKeysMapOfStringToInt(this))\n\
         \tthatkeys := deriveSortSliceOfString(deriveKeysMapOfStringToInt(that))\n"
    ));
    assert!(src.contains("\t\t\tif c := deriveCompareInt(thisvalue, thatvalue); c != 0 {\n"));
    assert!(src.contains("\t\t\tif c := strings.Compare(thiskey, thatkey); c != 0 {\n"));
}

#[test]
fn nested_compare_methods_are_called() {
    let types = [
        r#"{ "name": "Version", "type": "struct { Parts []int }",
             "methods": [{ "name": "Compare", "type": "func(*Version) int", "pointer": true }] }"#,
        r#"{ "name": "Release", "type": "struct { V Version; Latest *Version }" }"#,
    ];
    let src = source(&types, &[call("deriveCompare", 10, r#""*Release", "*Release""#)]);
    assert!(src.contains("\tif c := this.V.Compare(&that.V); c != 0 {\n"));
    assert!(src.contains("\tif c := this.Latest.Compare(that.Latest); c != 0 {\n"));
    assert!(!src.contains("deriveComparePtrToVersion"));
}

#[test]
fn byte_slices_use_bytes_compare() {
    let types = [r#"{ "name": "Blob", "type": "struct { Data []byte }" }"#];
    let src = source(&types, &[call("deriveCompare", 10, r#""*Blob", "*Blob""#)]);
    assert!(src.contains("\tif c := bytes.Compare(this.Data, that.Data); c != 0 {\n"));
}

#[test]
fn hidden_structs_compare_every_field_through_reflect() {
    let hidden = r#"{ "package": "example.com/ext", "name": "Hidden",
                      "type": "struct { n int; P *int; S []string }" }"#;
    let src = source(&[hidden], &[call("deriveCompare", 10, r#""*ext.Hidden", "*ext.Hidden""#)]);
    assert_eq!(src.matches("thisv := reflect.Indirect(reflect.ValueOf(this))").count(), 1);
    assert_eq!(src.matches("thatv := reflect.Indirect(reflect.ValueOf(that))").count(), 1);
    for (i, ty) in ["int", "*int", "[]string"].iter().enumerate() {
        let args = format!(
            "(*(*{ty})(unsafe.Pointer(thisv.Field({i}).UnsafeAddr())), \
             *(*{ty})(unsafe.Pointer(thatv.Field({i}).UnsafeAddr())))"
        );
        assert!(src.contains(&args), "field {i} is not read through reflect:\n{src}");
    }
    assert!(!src.contains("this.P") && !src.contains("that.P"));
    assert!(!src.contains("this.S") && !src.contains("that.S"));
}
