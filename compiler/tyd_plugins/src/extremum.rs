//! `deriveMax` and `deriveMin`.
//!
//! ```go
//! func deriveMax(a, b T) T
//! func deriveMax(list []T, def T) T // def if list is empty
//! ```
//!
//! Ordered types use `>`/`<`, everything else the compare operation.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::{Idx, TypeFlags};

use crate::util::{expect_arity, invalid, shape, Shape};

pub const MAX: Plugin = Plugin {
    name: "max",
    prefix: "deriveMax",
    deps: &["compare"],
    new: new_max,
};

pub const MIN: Plugin = Plugin {
    name: "min",
    prefix: "deriveMin",
    deps: &["compare"],
    new: new_min,
};

fn new_max() -> Box<dyn Generator> {
    Box::new(Extremum { op: ">" })
}

fn new_min() -> Box<dyn Generator> {
    Box::new(Extremum { op: "<" })
}

struct Extremum {
    /// `>` keeps the larger value, `<` the smaller one.
    op: &'static str,
}

impl Generator for Extremum {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_arity(name, args, "2", args.len() == 2)?;
        if args[0] != args[1] {
            let Shape::Slice(elem) = shape(cx, args[0]) else {
                return Err(invalid(
                    name,
                    format!("the first argument, {}, is not a slice", cx.display(args[0])),
                ));
            };
            if !cx.pool.assignable(args[1], elem) {
                return Err(invalid(
                    name,
                    format!(
                        "the second argument, {}, is not assignable to the elements of {}",
                        cx.display(args[1]),
                        cx.display(args[0])
                    ),
                ));
            }
        }
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let name = cx.func_name(args);
        if args[0] == args[1] {
            self.two(cx, &name, args[0]);
            return Ok(());
        }
        let Shape::Slice(elem) = shape(cx, args[0]) else {
            return Err(cx.unsupported(args[0]));
        };
        self.list(cx, &name, args[0], elem);
        Ok(())
    }
}

impl Extremum {
    /// Condition under which `x` replaces `y`.
    fn wins(&self, cx: &mut DeriveContext<'_>, ty: Idx, x: &str, y: &str) -> String {
        if cx.pool.flags(ty).contains(TypeFlags::ORDERED) {
            format!("{x} {} {y}", self.op)
        } else {
            let compare = cx.dep_func_name("compare", &[ty, ty]);
            format!("{compare}({x}, {y}) {} 0", self.op)
        }
    }

    fn two(&self, cx: &mut DeriveContext<'_>, name: &str, ty: Idx) {
        let ty_str = cx.type_string(ty);
        cx.line("");
        cx.line(format!("func {name}(a, b {ty_str}) {ty_str} {{"));
        cx.indent();
        let cond = self.wins(cx, ty, "a", "b");
        cx.line(format!("if {cond} {{"));
        cx.indent();
        cx.line("return a");
        cx.dedent();
        cx.line("}");
        cx.line("return b");
        cx.dedent();
        cx.line("}");
        cx.declare(name, &[ty, ty], &[ty], false);
    }

    fn list(&self, cx: &mut DeriveContext<'_>, name: &str, ty: Idx, elem: Idx) {
        let (ty_str, elem_str) = (cx.type_string(ty), cx.type_string(elem));
        cx.line("");
        cx.line(format!("func {name}(list {ty_str}, def {elem_str}) {elem_str} {{"));
        cx.indent();
        cx.line("if len(list) == 0 {");
        cx.indent();
        cx.line("return def");
        cx.dedent();
        cx.line("}");
        cx.line("m := list[0]");
        cx.line("list = list[1:]");
        cx.line("for i, v := range list {");
        cx.indent();
        let cond = self.wins(cx, elem, "v", "m");
        cx.line(format!("if {cond} {{"));
        cx.indent();
        cx.line("m = list[i]");
        cx.dedent();
        cx.line("}");
        cx.dedent();
        cx.line("}");
        cx.line("return m");
        cx.dedent();
        cx.line("}");
        cx.declare(name, &[ty, elem], &[elem], false);
    }
}
