//! `deriveKeys(m map[K]V) []K`: the keys of a map, in iteration order.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::Idx;

use crate::util::{expect_arity, invalid, shape, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "keys",
    prefix: "deriveKeys",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Keys)
}

struct Keys;

impl Generator for Keys {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_arity(name, args, "1", args.len() == 1)?;
        if !matches!(shape(cx, args[0]), Shape::Map(..)) {
            return Err(invalid(name, format!("{} is not a map", cx.display(args[0]))));
        }
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let ty = args[0];
        let Shape::Map(key, _) = shape(cx, ty) else {
            return Err(cx.unsupported(ty));
        };
        let name = cx.func_name(args);
        let keys = cx.pool.slice(key);
        let (ty_str, keys_str) = (cx.type_string(ty), cx.type_string(keys));
        cx.line("");
        cx.line(format!("func {name}(m {ty_str}) {keys_str} {{"));
        cx.indent();
        cx.line(format!("keys := make({keys_str}, 0, len(m))"));
        cx.line("for key := range m {");
        cx.indent();
        cx.line("keys = append(keys, key)");
        cx.dedent();
        cx.line("}");
        cx.line("return keys");
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty], &[keys], false);
        Ok(())
    }
}
