//! `deriveCompose`: chain two fallible functions.
//!
//! ```go
//! func deriveCompose(f func(A...) (B..., error), g func(B...) (C..., error)) func(A...) (C..., error)
//! func deriveCompose(f func() (B..., error), g func(B...) (C..., error)) (C..., error)
//! ```
//!
//! Without parameters on `f` the composition is applied right away.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::Idx;

use crate::util::{expect_arity, invalid, results, vars};

pub const PLUGIN: Plugin = Plugin {
    name: "compose",
    prefix: "deriveCompose",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Compose)
}

struct Compose;

/// Parameters of `f`, results of `f` and results of `g`, errors excluded.
struct Chain {
    a: Vec<Idx>,
    b: Vec<Idx>,
    c: Vec<Idx>,
}

/// Split a signature into parameters and the results before its trailing error.
fn fallible<'p>(
    cx: &'p DeriveContext<'_>,
    name: &str,
    which: &str,
    f: Idx,
) -> Result<(&'p [Idx], &'p [Idx]), RequestError> {
    let Some((params, results, variadic)) = cx.pool.signature_parts(f) else {
        return Err(invalid(
            name,
            format!("the {which} argument, {}, is not a function", cx.display(f)),
        ));
    };
    if variadic {
        return Err(invalid(
            name,
            format!("the {which} function, {}, is variadic", cx.display(f)),
        ));
    }
    match results {
        [values @ .., last] if cx.pool.is_error(*last) => Ok((params, values)),
        _ => Err(invalid(
            name,
            format!(
                "the {which} function, {}, does not return an error last",
                cx.display(f)
            ),
        )),
    }
}

fn chain(cx: &DeriveContext<'_>, name: &str, args: &[Idx]) -> Result<Chain, RequestError> {
    expect_arity(name, args, "2", args.len() == 2)?;
    let (a, b) = fallible(cx, name, "first", args[0])?;
    let (b2, c) = fallible(cx, name, "second", args[1])?;
    let accepts = b.len() == b2.len()
        && b.iter()
            .zip(b2)
            .all(|(&out, &input)| cx.pool.assignable(out, input));
    if !accepts {
        return Err(invalid(
            name,
            format!(
                "the second function's ({}) parameters do not accept the first function's ({}) results",
                cx.display(args[1]),
                cx.display(args[0])
            ),
        ));
    }
    Ok(Chain {
        a: a.to_vec(),
        b: b.to_vec(),
        c: c.to_vec(),
    })
}

impl Generator for Compose {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        chain(cx, name, args)?;
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let name = cx.func_name(args);
        let Chain { a, b, c } = chain(cx, &name, args)?;
        let error = cx.pool.error_type();
        let (f_str, g_str) = (cx.type_string(args[0]), cx.type_string(args[1]));

        let mut c_types: Vec<String> = c.iter().map(|&t| cx.type_string(t)).collect();
        c_types.push("error".to_string());
        let c_results = results(&c_types);
        let mut zeros: Vec<String> = c.iter().map(|&t| cx.zero_value(t)).collect();
        zeros.push("err".to_string());

        let b_vars = vars("b", b.len());
        let mut b_assign = b_vars.clone();
        b_assign.push("err".to_string());

        let mut c_errs = c;
        c_errs.push(error);

        cx.line("");
        if a.is_empty() {
            cx.line(format!("func {name}(f {f_str}, g {g_str}) {c_results} {{"));
            cx.indent();
            body(cx, &b_assign, "", &zeros, &b_vars);
            cx.dedent();
            cx.line("}");
            cx.declare(&name, args, &c_errs, false);
            return Ok(());
        }

        let composed = cx.pool.signature(&a, &c_errs, false);
        let composed_str = cx.type_string(composed);
        let a_vars = vars("a", a.len());
        let a_params: Vec<String> = a_vars
            .iter()
            .zip(&a)
            .map(|(v, &t)| format!("{v} {}", cx.type_string(t)))
            .collect();
        cx.line(format!("func {name}(f {f_str}, g {g_str}) {composed_str} {{"));
        cx.indent();
        cx.line(format!("return func({}) {c_results} {{", a_params.join(", ")));
        cx.indent();
        body(cx, &b_assign, &a_vars.join(", "), &zeros, &b_vars);
        cx.dedent();
        cx.line("}");
        cx.dedent();
        cx.line("}");
        cx.declare(&name, args, &[composed], false);
        Ok(())
    }
}

/// Call `f`, return early on its error, then hand its results to `g`.
fn body(
    cx: &mut DeriveContext<'_>,
    assign: &[String],
    f_args: &str,
    zeros: &[String],
    g_args: &[String],
) {
    cx.line(format!("{} := f({f_args})", assign.join(", ")));
    cx.line("if err != nil {");
    cx.indent();
    cx.line(format!("return {}", zeros.join(", ")));
    cx.dedent();
    cx.line("}");
    cx.line(format!("return g({})", g_args.join(", ")));
}
