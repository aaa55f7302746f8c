//! `deriveJoin`: flatten one level.
//!
//! ```go
//! func deriveJoin(list [][]T) []T
//! func deriveJoin(list []string) string
//! func deriveJoin(f func() (T..., error), err error) (T..., error)
//! ```
//!
//! The last form chains a fallible step after a previous error: `f` only
//! runs when `err` is nil.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::Idx;

use crate::util::{invalid, results, shape, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "join",
    prefix: "deriveJoin",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Join)
}

struct Join;

enum Form {
    /// `[][]T`, with `[]T`.
    Slices(Idx),
    /// `[]string`.
    Strings,
    /// `func() (T..., error)` followed by `error`, with the `T...` results.
    Error(Vec<Idx>),
}

fn form(cx: &DeriveContext<'_>, name: &str, args: &[Idx]) -> Result<Form, RequestError> {
    match args {
        [list] => match shape(cx, *list) {
            Shape::Slice(Idx::STRING) => Ok(Form::Strings),
            Shape::Slice(inner) => match shape(cx, inner) {
                Shape::Slice(_) => Ok(Form::Slices(inner)),
                _ => Err(invalid(
                    name,
                    format!("{} is not a slice of slices or of strings", cx.display(*list)),
                )),
            },
            _ => Err(invalid(name, format!("{} is not a slice", cx.display(*list)))),
        },
        [f, err] => {
            if !cx.pool.is_error(*err) {
                return Err(invalid(
                    name,
                    format!("the second argument, {}, is not an error", cx.display(*err)),
                ));
            }
            match cx.pool.signature_parts(*f) {
                Some((&[], [values @ .., last], false)) if cx.pool.is_error(*last) => {
                    Ok(Form::Error(values.to_vec()))
                }
                _ => Err(invalid(
                    name,
                    format!(
                        "the first argument, {}, is not a function without parameters returning an error last",
                        cx.display(*f)
                    ),
                )),
            }
        }
        _ => Err(RequestError::Arity {
            name: name.to_string(),
            expected: "1 or 2",
            found: args.len(),
        }),
    }
}

impl Generator for Join {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        form(cx, name, args)?;
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let name = cx.func_name(args);
        let ty = args[0];
        let ty_str = cx.type_string(ty);
        cx.line("");
        match form(cx, &name, args)? {
            Form::Slices(inner) => {
                let inner_str = cx.type_string(inner);
                cx.line(format!("func {name}(list {ty_str}) {inner_str} {{"));
                cx.indent();
                cx.line("if list == nil {");
                cx.indent();
                cx.line("return nil");
                cx.dedent();
                cx.line("}");
                cx.line("l := 0");
                cx.line("for _, elem := range list {");
                cx.indent();
                cx.line("l += len(elem)");
                cx.dedent();
                cx.line("}");
                cx.line(format!("out := make({inner_str}, 0, l)"));
                cx.line("for _, elem := range list {");
                cx.indent();
                cx.line("out = append(out, elem...)");
                cx.dedent();
                cx.line("}");
                cx.line("return out");
                cx.dedent();
                cx.line("}");
                cx.declare(&name, &[ty], &[inner], false);
            }
            Form::Strings => {
                let strings = cx.import("strings");
                cx.line(format!("func {name}(list {ty_str}) string {{"));
                cx.indent();
                cx.line(format!("return {strings}.Join(list, \"\")"));
                cx.dedent();
                cx.line("}");
                cx.declare(&name, &[ty], &[Idx::STRING], false);
            }
            Form::Error(values) => {
                let error = cx.pool.error_type();
                let mut types: Vec<String> = values.iter().map(|&v| cx.type_string(v)).collect();
                types.push("error".to_string());
                let mut zeros: Vec<String> = values.iter().map(|&v| cx.zero_value(v)).collect();
                zeros.push("err".to_string());
                cx.line(format!(
                    "func {name}(f {ty_str}, err error) {} {{",
                    results(&types)
                ));
                cx.indent();
                cx.line("if err != nil {");
                cx.indent();
                cx.line(format!("return {}", zeros.join(", ")));
                cx.dedent();
                cx.line("}");
                cx.line("return f()");
                cx.dedent();
                cx.line("}");
                let mut out = values;
                out.push(error);
                cx.declare(&name, &[ty, error], &out, false);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
