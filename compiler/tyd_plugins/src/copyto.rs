//! `deriveCopyTo(this, that T)`: deep copy of `this` into `that`.
//!
//! `T` must be a pointer, slice or map so the copy is visible to the caller.
//! Destination slices are resized in place when their capacity allows it;
//! nil sources produce nil destinations.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::Idx;

use crate::util::{expect_pair, is_named_struct, method_param, prepend, shape, wrap, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "copyto",
    prefix: "deriveCopyTo",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(CopyTo)
}

struct CopyTo;

impl Generator for CopyTo {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        let ty = expect_pair(cx, name, args)?;
        if !matches!(shape(cx, ty), Shape::Pointer(_) | Shape::Slice(_) | Shape::Map(..)) {
            return Err(RequestError::NotReference {
                name: name.to_string(),
                ty: cx.display(ty),
            });
        }
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let ty = args[0];
        let name = cx.func_name(args);
        let ty_str = cx.type_string(ty);
        cx.line("");
        cx.line(format!("func {name}(this, that {ty_str}) {{"));
        cx.indent();
        statement(cx, ty, "this", "that")?;
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty, ty], &[], false);
        Ok(())
    }
}

fn can_copy(cx: &DeriveContext<'_>, ty: Idx) -> bool {
    cx.pool.is_bulk_comparable(ty)
}

/// Copy the contents of `this` into the existing `that`.
fn statement(
    cx: &mut DeriveContext<'_>,
    ty: Idx,
    this: &str,
    that: &str,
) -> Result<(), RequestError> {
    if can_copy(cx, ty) {
        cx.line(format!("{that} = {this}"));
        return Ok(());
    }
    match shape(cx, ty) {
        Shape::Pointer(elem) if is_named_struct(cx, elem) => {
            let fields = cx.fields(elem).ok_or_else(|| cx.unsupported(elem))?;
            fields.prelude(cx.printer, this);
            fields.prelude(cx.printer, that);
            for (i, field) in fields.fields().iter().enumerate() {
                let this_field = fields.access(cx.printer, cx.pool, this, i);
                let that_field = fields.access(cx.printer, cx.pool, that, i);
                field_stmt(cx, field.ty, &this_field, &that_field)?;
            }
        }
        Shape::Pointer(elem) => match shape(cx, elem) {
            Shape::Array(_) => {
                statement(cx, elem, &format!("*{this}"), &format!("*{that}"))?;
            }
            Shape::Struct => return Err(cx.unsupported(elem)),
            _ => field_stmt(cx, elem, &format!("*{this}"), &format!("*{that}"))?,
        },
        Shape::Slice(elem) if can_copy(cx, elem) => {
            cx.line(format!("copy({that}, {this})"));
        }
        Shape::Slice(elem) | Shape::Array(elem) => {
            let (index, value) = (prepend(this, "i"), prepend(this, "value"));
            cx.line(format!("for {index}, {value} := range {this} {{"));
            cx.indent();
            field_stmt(cx, elem, &value, &format!("{}[{index}]", wrap(that)))?;
            cx.dedent();
            cx.line("}");
        }
        Shape::Map(_, value_ty) => {
            let (key, value) = (prepend(this, "key"), prepend(this, "value"));
            let target = format!("{}[{key}]", wrap(that));
            cx.line(format!("for {key}, {value} := range {this} {{"));
            cx.indent();
            field_stmt(cx, value_ty, &value, &target)?;
            cx.dedent();
            cx.line("}");
        }
        _ => return Err(cx.unsupported(ty)),
    }
    Ok(())
}

/// Assign a deep copy of `this` to `that`, allocating as needed.
fn field_stmt(
    cx: &mut DeriveContext<'_>,
    ty: Idx,
    this: &str,
    that: &str,
) -> Result<(), RequestError> {
    if can_copy(cx, ty) {
        cx.line(format!("{that} = {this}"));
        return Ok(());
    }
    let field_shape = shape(cx, ty);
    match field_shape {
        Shape::Pointer(elem) => {
            cx.line(format!("if {this} == nil {{"));
            cx.indent();
            cx.line(format!("{that} = nil"));
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            let elem_str = cx.type_string(elem);
            cx.line(format!("{that} = new({elem_str})"));
            if method_param(cx, elem, "CopyTo", None) == Some(ty) {
                cx.line(format!("{}.CopyTo({that})", wrap(this)));
            } else if can_copy(cx, elem) {
                cx.line(format!("*{that} = *{this}"));
            } else {
                let func = cx.func_name(&[ty, ty]);
                cx.line(format!("{func}({this}, {that})"));
            }
            cx.dedent();
            cx.line("}");
        }
        Shape::Slice(elem) => {
            let ty_str = cx.type_string(ty);
            cx.line(format!("if {this} == nil {{"));
            cx.indent();
            cx.line(format!("{that} = nil"));
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            cx.line(format!("if {that} != nil {{"));
            cx.indent();
            cx.line(format!("if len({this}) > len({that}) {{"));
            cx.indent();
            cx.line(format!("if cap({that}) >= len({this}) {{"));
            cx.indent();
            cx.line(format!("{that} = ({that})[:len({this})]"));
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            cx.line(format!("{that} = make({ty_str}, len({this}))"));
            cx.dedent();
            cx.line("}");
            cx.dedent();
            cx.line(format!("}} else if len({this}) < len({that}) {{"));
            cx.indent();
            cx.line(format!("{that} = ({that})[:len({this})]"));
            cx.dedent();
            cx.line("}");
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            cx.line(format!("{that} = make({ty_str}, len({this}))"));
            cx.dedent();
            cx.line("}");
            if can_copy(cx, elem) {
                cx.line(format!("copy({that}, {this})"));
            } else {
                let func = cx.func_name(&[ty, ty]);
                cx.line(format!("{func}({this}, {that})"));
            }
            cx.dedent();
            cx.line("}");
        }
        Shape::Map(..) => {
            let ty_str = cx.type_string(ty);
            let func = cx.func_name(&[ty, ty]);
            cx.line(format!("if {this} != nil {{"));
            cx.indent();
            cx.line(format!("{that} = make({ty_str}, len({this}))"));
            cx.line(format!("{func}({this}, {that})"));
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            cx.line(format!("{that} = nil"));
            cx.dedent();
            cx.line("}");
        }
        // Values that are not addressable everywhere (map entries) are
        // copied through a fresh pointer.
        Shape::Array(_) | Shape::Struct
            if cx.pool.is_named(ty) || matches!(field_shape, Shape::Array(_)) =>
        {
            let ptr = cx.pool.pointer(ty);
            let ty_str = cx.type_string(ty);
            cx.line("{");
            cx.indent();
            cx.line(format!("field := new({ty_str})"));
            if method_param(cx, ty, "CopyTo", None) == Some(ptr) {
                cx.line(format!("{}.CopyTo(field)", wrap(this)));
            } else {
                let func = cx.func_name(&[ptr, ptr]);
                cx.line(format!("{func}(&{this}, field)"));
            }
            cx.line(format!("{that} = *field"));
            cx.dedent();
            cx.line("}");
        }
        _ => return Err(cx.unsupported(ty)),
    }
    Ok(())
}
