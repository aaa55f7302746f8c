//! `deriveCompare(this, that T) int`: a total order, returning -1, 0 or 1.
//!
//! nil sorts before non-nil, shorter slices and maps before longer ones,
//! and structs compare field by field. Maps are compared by walking both
//! key sets in sorted order, which is why this operation depends on the
//! keys and sort operations.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::{BasicKind, Idx};

use crate::util::{expect_pair, is_named_struct, method_param, return_if, shape, wrap, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "compare",
    prefix: "deriveCompare",
    deps: &["keys", "sort"],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Compare)
}

struct Compare;

impl Generator for Compare {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_pair(cx, name, args)?;
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let ty = args[0];
        let name = cx.func_name(args);
        let ty_str = cx.type_string(ty);
        cx.line("");
        cx.line(format!("func {name}(this, that {ty_str}) int {{"));
        cx.indent();
        statement(cx, ty)?;
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty, ty], &[Idx::INT], false);
        Ok(())
    }
}

/// nil sorts first; returns early unless both are non-nil.
fn nil_checks(cx: &mut DeriveContext<'_>) {
    cx.line("if this == nil {");
    cx.indent();
    return_if(cx, "that == nil", "0");
    cx.line("return -1");
    cx.dedent();
    cx.line("}");
    return_if(cx, "that == nil", "1");
}

fn length_check(cx: &mut DeriveContext<'_>) {
    cx.line("if len(this) != len(that) {");
    cx.indent();
    return_if(cx, "len(this) < len(that)", "-1");
    cx.line("return 1");
    cx.dedent();
    cx.line("}");
}

/// Emit `if c := expr; c != 0 { return c }`.
fn return_nonzero(cx: &mut DeriveContext<'_>, expr: &str) {
    return_if(cx, &format!("c := {expr}; c != 0"), "c");
}

fn statement(cx: &mut DeriveContext<'_>, ty: Idx) -> Result<(), RequestError> {
    match shape(cx, ty) {
        Shape::Pointer(elem) => {
            nil_checks(cx);
            if !is_named_struct(cx, elem) {
                let cmp = field_expr(cx, "*this", "*that", elem)?;
                cx.line(format!("return {cmp}"));
                return Ok(());
            }
            let fields = cx.fields(elem).ok_or_else(|| cx.unsupported(elem))?;
            fields.prelude(cx.printer, "this");
            fields.prelude(cx.printer, "that");
            for (i, field) in fields.fields().iter().enumerate() {
                let this_field = fields.access(cx.printer, cx.pool, "this", i);
                let that_field = fields.access(cx.printer, cx.pool, "that", i);
                let cmp = field_expr(cx, &this_field, &that_field, field.ty)?;
                return_nonzero(cx, &cmp);
            }
            cx.line("return 0");
        }
        Shape::Basic(kind) => basic(cx, ty, kind)?,
        Shape::Slice(elem) => {
            nil_checks(cx);
            length_check(cx);
            elements(cx, elem)?;
        }
        Shape::Array(elem) => elements(cx, elem)?,
        Shape::Map(key, value) => {
            nil_checks(cx);
            length_check(cx);
            let keys_ty = cx.pool.slice(key);
            let keys = cx.dep_func_name("keys", &[ty]);
            let sort = cx.dep_func_name("sort", &[keys_ty]);
            cx.line(format!("thiskeys := {sort}({keys}(this))"));
            cx.line(format!("thatkeys := {sort}({keys}(that))"));
            cx.line("for i, thiskey := range thiskeys {");
            cx.indent();
            cx.line("thatkey := thatkeys[i]");
            cx.line("if thiskey == thatkey {");
            cx.indent();
            cx.line("thisvalue := this[thiskey]");
            cx.line("thatvalue := that[thatkey]");
            let cmp = field_expr(cx, "thisvalue", "thatvalue", value)?;
            return_nonzero(cx, &cmp);
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            let cmp = field_expr(cx, "thiskey", "thatkey", key)?;
            return_nonzero(cx, &cmp);
            cx.dedent();
            cx.line("}");
            cx.dedent();
            cx.line("}");
            cx.line("return 0");
        }
        Shape::Struct if cx.pool.is_named(ty) => {
            // The root is always walked, even when the type has its own method.
            let ptr = cx.pool.pointer(ty);
            let func = cx.func_name(&[ptr, ptr]);
            cx.line(format!("return {func}(&this, &that)"));
        }
        _ => return Err(cx.unsupported(ty)),
    }
    Ok(())
}

fn basic(cx: &mut DeriveContext<'_>, ty: Idx, kind: BasicKind) -> Result<(), RequestError> {
    match kind {
        BasicKind::String => {
            let strings = cx.import("strings");
            if cx.pool.is_named(ty) {
                cx.line(format!("return {strings}.Compare(string(this), string(that))"));
            } else {
                cx.line(format!("return {strings}.Compare(this, that)"));
            }
        }
        BasicKind::Complex64 | BasicKind::Complex128 => {
            cx.line("if thisr, thatr := real(this), real(that); thisr == thatr {");
            cx.indent();
            cx.line("if thisi, thati := imag(this), imag(that); thisi == thati {");
            cx.indent();
            cx.line("return 0");
            cx.dedent();
            cx.line("} else if thisi < thati {");
            cx.indent();
            cx.line("return -1");
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            cx.line("return 1");
            cx.dedent();
            cx.line("}");
            cx.dedent();
            cx.line("} else if thisr < thatr {");
            cx.indent();
            cx.line("return -1");
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            cx.line("return 1");
            cx.dedent();
            cx.line("}");
        }
        BasicKind::Bool => {
            return_if(cx, "this == that", "0");
            return_if(cx, "that", "-1");
            cx.line("return 1");
        }
        kind if kind.is_ordered() => {
            cx.line("if this != that {");
            cx.indent();
            return_if(cx, "this < that", "-1");
            cx.line("return 1");
            cx.dedent();
            cx.line("}");
            cx.line("return 0");
        }
        _ => return Err(cx.unsupported(ty)),
    }
    Ok(())
}

fn elements(cx: &mut DeriveContext<'_>, elem: Idx) -> Result<(), RequestError> {
    cx.line("for i := 0; i < len(this); i++ {");
    cx.indent();
    let cmp = field_expr(cx, "this[i]", "that[i]", elem)?;
    return_nonzero(cx, &cmp);
    cx.dedent();
    cx.line("}");
    cx.line("return 0");
    Ok(())
}

/// Integer expression comparing two values of type `ty`.
fn field_expr(
    cx: &mut DeriveContext<'_>,
    this: &str,
    that: &str,
    ty: Idx,
) -> Result<String, RequestError> {
    if cx.pool.is_named(ty) {
        let ptr = cx.pool.pointer(ty);
        if method_param(cx, ty, "Compare", Some(Idx::INT)) == Some(ptr) {
            return Ok(format!("{}.Compare(&{that})", wrap(this)));
        }
        if is_named_struct(cx, ty) {
            return field_expr(cx, &format!("&{this}"), &format!("&{that}"), ptr);
        }
    }
    match shape(cx, ty) {
        Shape::Basic(BasicKind::String) if !cx.pool.is_named(ty) => {
            let strings = cx.import("strings");
            Ok(format!("{strings}.Compare({this}, {that})"))
        }
        Shape::Basic(_) => Ok(helper(cx, ty, this, that)),
        Shape::Pointer(elem) => {
            if cx.pool.is_named(elem)
                && method_param(cx, elem, "Compare", Some(Idx::INT)) == Some(ty)
            {
                return Ok(format!("{}.Compare({that})", wrap(this)));
            }
            Ok(helper(cx, ty, this, that))
        }
        Shape::Slice(Idx::BYTE) => {
            let bytes = cx.import("bytes");
            Ok(format!("{bytes}.Compare({this}, {that})"))
        }
        Shape::Slice(_) | Shape::Array(_) | Shape::Map(..) => Ok(helper(cx, ty, this, that)),
        _ => Err(cx.unsupported(ty)),
    }
}

fn helper(cx: &mut DeriveContext<'_>, ty: Idx, this: &str, that: &str) -> String {
    let func = cx.func_name(&[ty, ty]);
    format!("{func}({this}, {that})")
}

#[cfg(test)]
mod tests;
