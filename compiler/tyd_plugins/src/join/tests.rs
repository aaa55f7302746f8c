use pretty_assertions::assert_eq;

use crate::tests::{call, error, file, source};

#[test]
fn slices_of_slices() {
    let src = source(&[], &[call("deriveJoin", 10, r#""[][]int""#)]);
    assert_eq!(
        src,
        file(
            &[],
            &[
                "",
                "func deriveJoin(list [][]int) []int {",
                "\tif list == nil {",
                "\t\treturn nil",
                "\t}",
                "\tl := 0",
                "\tfor _, elem := range list {",
                "\t\tl += len(elem)",
                "\t}",
                "\tout := make([]int, 0, l)",
                "\tfor _, elem := range list {",
                "\t\tout = append(out, elem...)",
                "\t}",
                "\treturn out",
                "}",
            ]
        )
    );
}

#[test]
fn strings_are_concatenated() {
    let src = source(&[], &[call("deriveJoin", 10, r#""[]string""#)]);
    assert_eq!(
        src,
        file(
            &["strings"],
            &[
                "",
                "func deriveJoin(list []string) string {",
                "\treturn strings.Join(list, \"\")",
                "}",
            ]
        )
    );
}

#[test]
fn fallible_step_after_an_error() {
    let src = source(&[], &[call("deriveJoin", 10, r#""func() (int, error)", "error""#)]);
    assert_eq!(
        src,
        file(
            &[],
            &[
                "",
                "func deriveJoin(f func() (int, error), err error) (int, error) {",
                "\tif err != nil {",
                "\t\treturn 0, err",
                "\t}",
                "\treturn f()",
                "}",
            ]
        )
    );
}

#[test]
fn flat_slices_are_rejected() {
    assert_eq!(
        error(&[], &[call("deriveJoin", 10, r#""[]int""#)]),
        "main.go:1:10: join: deriveJoin: []int is not a slice of slices or of strings"
    );
}

#[test]
fn three_arguments_are_rejected() {
    assert_eq!(
        error(&[], &[call("deriveJoin", 10, r#""[]int", "[]int", "[]int""#)]),
        "main.go:1:10: join: deriveJoin expects 1 or 2 argument(s), found 3"
    );
}
