//! `deriveFmap`: apply a function to every element.
//!
//! ```go
//! func deriveFmap(f func(A) B, list []A) []B
//! func deriveFmap(f func(rune) B, s string) []B
//! ```

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::{BasicKind, Idx};

use crate::util::{expect_arity, invalid, shape, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "fmap",
    prefix: "deriveFmap",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Fmap)
}

struct Fmap;

/// The mapped function's parameter and result types.
fn parts(cx: &DeriveContext<'_>, name: &str, f: Idx) -> Result<(Idx, Idx), RequestError> {
    match cx.pool.signature_parts(f) {
        Some((&[param], &[result], false)) => Ok((param, result)),
        _ => Err(invalid(
            name,
            format!(
                "the first argument, {}, is not a function with one parameter and one result",
                cx.display(f)
            ),
        )),
    }
}

impl Generator for Fmap {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_arity(name, args, "2", args.len() == 2)?;
        let (param, _) = parts(cx, name, args[0])?;
        let ok = match shape(cx, args[1]) {
            Shape::Slice(elem) => cx.pool.assignable(elem, param),
            Shape::Basic(BasicKind::String) => param == Idx::RUNE,
            _ => false,
        };
        if !ok {
            return Err(invalid(
                name,
                format!(
                    "{} cannot be mapped by {}",
                    cx.display(args[1]),
                    cx.display(args[0])
                ),
            ));
        }
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let name = cx.func_name(args);
        let (f, input) = (args[0], args[1]);
        let (_, result) = parts(cx, &name, f)?;
        let out = cx.pool.slice(result);
        let (f_str, input_str, out_str) =
            (cx.type_string(f), cx.type_string(input), cx.type_string(out));
        cx.line("");
        if matches!(shape(cx, input), Shape::Slice(_)) {
            cx.line(format!("func {name}(f {f_str}, list {input_str}) {out_str} {{"));
            cx.indent();
            cx.line(format!("out := make({out_str}, len(list))"));
            cx.line("for i, elem := range list {");
            cx.indent();
            cx.line("out[i] = f(elem)");
        } else {
            cx.line(format!("func {name}(f {f_str}, s {input_str}) {out_str} {{"));
            cx.indent();
            cx.line(format!("out := make({out_str}, 0, len(s))"));
            cx.line("for _, elem := range s {");
            cx.indent();
            cx.line("out = append(out, f(elem))");
        }
        cx.dedent();
        cx.line("}");
        cx.line("return out");
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[f, input], &[out], false);
        Ok(())
    }
}
