//! `deriveSort(list []T) []T`: sorts in place and returns the list.
//!
//! `int`, `float64` and `string` slices use the dedicated functions of the
//! `sort` package, other ordered types `<`, and everything else the compare
//! operation.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::{Idx, TypeFlags};

use crate::util::{expect_arity, invalid, shape, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "sort",
    prefix: "deriveSort",
    deps: &["compare"],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Sort)
}

struct Sort;

impl Generator for Sort {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_arity(name, args, "1", args.len() == 1)?;
        if !matches!(shape(cx, args[0]), Shape::Slice(_)) {
            return Err(invalid(name, format!("{} is not a slice", cx.display(args[0]))));
        }
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let ty = args[0];
        let Shape::Slice(elem) = shape(cx, ty) else {
            return Err(cx.unsupported(ty));
        };
        let name = cx.func_name(args);
        let ty_str = cx.type_string(ty);
        cx.line("");
        cx.line(format!("func {name}(list {ty_str}) {ty_str} {{"));
        cx.indent();
        let sort = cx.import("sort");
        match elem {
            Idx::INT => cx.line(format!("{sort}.Ints(list)")),
            Idx::FLOAT64 => cx.line(format!("{sort}.Float64s(list)")),
            Idx::STRING => cx.line(format!("{sort}.Strings(list)")),
            _ => {
                let less = if cx.pool.flags(elem).contains(TypeFlags::ORDERED) {
                    "list[i] < list[j]".to_string()
                } else {
                    let compare = cx.dep_func_name("compare", &[elem, elem]);
                    format!("{compare}(list[i], list[j]) < 0")
                };
                cx.line(format!("{sort}.Slice(list, func(i, j int) bool {{"));
                cx.indent();
                cx.line(format!("return {less}"));
                cx.dedent();
                cx.line("})");
            }
        }
        cx.line("return list");
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty], &[ty], false);
        Ok(())
    }
}
