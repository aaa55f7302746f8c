//! `deriveEqual(this, that T) bool`: deep equality.
//!
//! Types comparable as one block use `==`. Pointers, slices and maps are
//! equal when both are nil or both are non-nil with equal contents. Named
//! structs compare field by field in declaration order. A nested named type
//! with an `Equal(*T) bool` method is compared through that method.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::Idx;

use crate::util::{expect_pair, is_named_struct, method_param, not, return_if, shape, wrap, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "equal",
    prefix: "deriveEqual",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(Equal)
}

struct Equal;

impl Generator for Equal {
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
        cx.line(format!("func {name}(this, that {ty_str}) bool {{"));
        cx.indent();
        statement(cx, ty)?;
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty, ty], &[Idx::BOOL], false);
        Ok(())
    }
}

fn statement(cx: &mut DeriveContext<'_>, ty: Idx) -> Result<(), RequestError> {
    if cx.pool.is_bulk_comparable(ty) {
        cx.line("return this == that");
        return Ok(());
    }
    match shape(cx, ty) {
        Shape::Pointer(elem) if is_named_struct(cx, elem) => {
            return_if(cx, "this == nil || that == nil", "this == nil && that == nil");
            let fields = cx.fields(elem).ok_or_else(|| cx.unsupported(elem))?;
            if fields.is_empty() {
                cx.line("return true");
                return Ok(());
            }
            fields.prelude(cx.printer, "this");
            fields.prelude(cx.printer, "that");
            let mut exprs = Vec::with_capacity(fields.fields().len());
            for (i, field) in fields.fields().iter().enumerate() {
                let this_field = fields.access(cx.printer, cx.pool, "this", i);
                let that_field = fields.access(cx.printer, cx.pool, "that", i);
                exprs.push(field_expr(cx, &this_field, &that_field, field.ty)?);
            }
            let last = exprs.len() - 1;
            for (i, expr) in exprs.iter().enumerate() {
                let text = match (i == 0, i == last) {
                    (true, true) => format!("return {expr}"),
                    (true, false) => format!("return {expr} &&"),
                    (false, true) => expr.clone(),
                    (false, false) => format!("{expr} &&"),
                };
                cx.line(text);
                if i == 0 {
                    cx.indent();
                }
            }
            cx.dedent();
        }
        Shape::Pointer(elem) => {
            let eq = field_expr(cx, "*this", "*that", elem)?;
            cx.line(format!(
                "return (this == nil && that == nil) || (this != nil && that != nil && {eq})"
            ));
        }
        Shape::Slice(elem) => {
            return_if(cx, "this == nil || that == nil", "this == nil && that == nil");
            return_if(cx, "len(this) != len(that)", "false");
            elements(cx, elem)?;
        }
        Shape::Array(elem) => elements(cx, elem)?,
        Shape::Map(_, value) => {
            return_if(cx, "this == nil || that == nil", "this == nil && that == nil");
            return_if(cx, "len(this) != len(that)", "false");
            cx.line("for k, v := range this {");
            cx.indent();
            cx.line("thatv, ok := that[k]");
            return_if(cx, "!ok", "false");
            let eq = field_expr(cx, "v", "thatv", value)?;
            return_if(cx, &not(&eq), "false");
            cx.dedent();
            cx.line("}");
            cx.line("return true");
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

fn elements(cx: &mut DeriveContext<'_>, elem: Idx) -> Result<(), RequestError> {
    cx.line("for i := 0; i < len(this); i++ {");
    cx.indent();
    let eq = field_expr(cx, "this[i]", "that[i]", elem)?;
    return_if(cx, &not(&eq), "false");
    cx.dedent();
    cx.line("}");
    cx.line("return true");
    Ok(())
}

/// Boolean expression comparing two values of type `ty`.
fn field_expr(
    cx: &mut DeriveContext<'_>,
    this: &str,
    that: &str,
    ty: Idx,
) -> Result<String, RequestError> {
    if cx.pool.is_bulk_comparable(ty) {
        return Ok(format!("{this} == {that}"));
    }
    if cx.pool.is_named(ty) {
        let ptr = cx.pool.pointer(ty);
        if method_param(cx, ty, "Equal", Some(Idx::BOOL)) == Some(ptr) {
            return Ok(format!("{}.Equal(&{that})", wrap(this)));
        }
        if is_named_struct(cx, ty) {
            return field_expr(cx, &format!("&{this}"), &format!("&{that}"), ptr);
        }
    }
    match shape(cx, ty) {
        Shape::Pointer(elem) => {
            if cx.pool.is_named(elem) && method_param(cx, elem, "Equal", Some(Idx::BOOL)) == Some(ty) {
                return Ok(format!("{}.Equal({that})", wrap(this)));
            }
            Ok(helper(cx, ty, this, that))
        }
        Shape::Slice(Idx::BYTE) => {
            let bytes = cx.import("bytes");
            Ok(format!("{bytes}.Equal({this}, {that})"))
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
