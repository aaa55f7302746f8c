//! `deriveSet(list []T) map[T]struct{}`.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::{Idx, TypeFlags};

use crate::util::{expect_arity, invalid, shape, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "set",
    prefix: "deriveSet",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Set)
}

struct Set;

impl Generator for Set {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_arity(name, args, "1", args.len() == 1)?;
        let Shape::Slice(elem) = shape(cx, args[0]) else {
            return Err(invalid(name, format!("{} is not a slice", cx.display(args[0]))));
        };
        if !cx.pool.flags(elem).contains(TypeFlags::MAP_KEY) {
            return Err(invalid(name, format!("{} cannot be a map key", cx.display(elem))));
        }
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let ty = args[0];
        let Shape::Slice(elem) = shape(cx, ty) else {
            return Err(cx.unsupported(ty));
        };
        let name = cx.func_name(args);
        let empty = cx.pool.structure(Vec::new());
        let set = cx.pool.map(elem, empty);
        let (ty_str, set_str) = (cx.type_string(ty), cx.type_string(set));
        cx.line("");
        cx.line(format!("func {name}(list {ty_str}) {set_str} {{"));
        cx.indent();
        cx.line(format!("set := make({set_str}, len(list))"));
        cx.line("for _, v := range list {");
        cx.indent();
        cx.line("set[v] = struct{}{}");
        cx.dedent();
        cx.line("}");
        cx.line("return set");
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty], &[set], false);
        Ok(())
    }
}
