//! `deriveGoString(this T) string`: Go source that rebuilds a value.
//!
//! The output is a function literal, `func() T { ... }()`, so nested values
//! can be spliced in as expressions. Useful for turning values seen in a
//! debugger into test fixtures.

use tyd_engine::{DeriveContext, Generator, Plugin, RequestError};
use tyd_types::Idx;

use crate::util::{expect_arity, is_named_struct, shape, wrap, Shape};

pub const PLUGIN: Plugin = Plugin {
    name: "gostring",
    prefix: "deriveGoString",
    deps: &[],
    new,
};

fn new() -> Box<dyn Generator> {
    Box::new(GoString)
}

struct GoString;

impl Generator for GoString {
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError> {
        expect_arity(name, args, "1", args.len() == 1)?;
        cx.reserve(name, args)
    }

    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError> {
        let ty = args[0];
        let name = cx.func_name(args);
        let ty_str = cx.type_string(ty);
        let bytes = cx.import("bytes");
        let fmt = cx.import("fmt");
        cx.line("");
        cx.line(format!("func {name}(this {ty_str}) string {{"));
        cx.indent();
        cx.line(format!("buf := {bytes}.NewBuffer(nil)"));
        cx.line(format!("{fmt}.Fprintf(buf, \"func() {ty_str} {{\\n\")"));
        statement(cx, ty)?;
        cx.line(format!("{fmt}.Fprintf(buf, \"}}()\")"));
        cx.line("return buf.String()");
        cx.dedent();
        cx.line("}");
        cx.declare(&name, &[ty], &[Idx::STRING], false);
        Ok(())
    }
}

/// Emit a constant line of the rebuilt source.
fn write(cx: &mut DeriveContext<'_>, text: &str) {
    let fmt = cx.import("fmt");
    cx.line(format!("{fmt}.Fprintf(buf, \"{text}\\n\")"));
}

/// Emit a line of the rebuilt source with `format` verbs filled from `args`.
fn writef(cx: &mut DeriveContext<'_>, format: &str, args: &str) {
    let fmt = cx.import("fmt");
    cx.line(format!("{fmt}.Fprintf(buf, \"{format}\\n\", {args})"));
}

fn statement(cx: &mut DeriveContext<'_>, ty: Idx) -> Result<(), RequestError> {
    match shape(cx, ty) {
        Shape::Basic(_) => writef(cx, "return %#v", "this"),
        Shape::Pointer(elem) => {
            cx.line("if this == nil {");
            cx.indent();
            write(cx, "return nil");
            cx.dedent();
            cx.line("} else {");
            cx.indent();
            if is_named_struct(cx, elem) {
                struct_fields(cx, elem)?;
                write(cx, "return this");
            } else if matches!(shape(cx, elem), Shape::Struct) {
                return Err(cx.unsupported(elem));
            } else {
                let elem_str = cx.type_string(elem);
                write(cx, &format!("this := new({elem_str})"));
                field(cx, elem, "*this")?;
                write(cx, "return this");
            }
            cx.dedent();
            cx.line("}");
        }
        Shape::Struct if cx.pool.is_named(ty) => {
            struct_fields(cx, ty)?;
            write(cx, "return *this");
        }
        Shape::Slice(_) | Shape::Array(_) | Shape::Map(..) => {
            let ty_str = cx.type_string(ty);
            write(cx, &format!("var this {ty_str}"));
            field(cx, ty, "this")?;
            write(cx, "return this");
        }
        _ => return Err(cx.unsupported(ty)),
    }
    Ok(())
}

/// `this := &T{}` followed by one assignment per field.
fn struct_fields(cx: &mut DeriveContext<'_>, ty: Idx) -> Result<(), RequestError> {
    let fields = cx.fields(ty).ok_or_else(|| cx.unsupported(ty))?;
    if let Some(private) = fields.private_field() {
        return Err(RequestError::PrivateField {
            field: private.name.clone(),
            ty: cx.display(ty),
        });
    }
    let ty_str = cx.type_string(ty);
    write(cx, &format!("this := &{ty_str}{{}}"));
    for f in fields.fields() {
        field(cx, f.ty, &format!("this.{}", f.name))?;
    }
    Ok(())
}

/// Emit the assignment of `this` (an expression of type `ty`) if it is not the zero value.
fn field(cx: &mut DeriveContext<'_>, ty: Idx, this: &str) -> Result<(), RequestError> {
    match shape(cx, ty) {
        Shape::Basic(_) => writef(cx, &format!("{this} = %#v"), this),
        Shape::Struct if !cx.pool.is_named(ty) => writef(cx, &format!("{this} = %#v"), this),
        Shape::Pointer(_) => {
            let func = cx.func_name(&[ty]);
            cx.line(format!("if {this} != nil {{"));
            cx.indent();
            writef(cx, &format!("{this} = %s"), &format!("{func}({this})"));
            cx.dedent();
            cx.line("}");
        }
        Shape::Struct => {
            let func = cx.func_name(&[ty]);
            writef(cx, &format!("{this} = %s"), &format!("{func}({this})"));
        }
        Shape::Slice(elem) => {
            cx.line(format!("if {this} != nil {{"));
            cx.indent();
            if matches!(shape(cx, elem), Shape::Basic(_)) {
                writef(cx, &format!("{this} = %#v"), this);
            } else {
                let ty_str = cx.type_string(ty);
                writef(cx, &format!("{this} = make({ty_str}, %d)"), &format!("len({this})"));
                elements(cx, elem, this);
            }
            cx.dedent();
            cx.line("}");
        }
        Shape::Array(elem) => {
            if matches!(shape(cx, elem), Shape::Basic(_)) {
                writef(cx, &format!("{this} = %#v"), this);
            } else {
                elements(cx, elem, this);
            }
        }
        Shape::Map(key, value) => {
            if !matches!(shape(cx, key), Shape::Basic(_)) {
                return Err(cx.unsupported(ty));
            }
            let ty_str = cx.type_string(ty);
            cx.line(format!("if {this} != nil {{"));
            cx.indent();
            writef(cx, &format!("{this} = make({ty_str}, %d)"), &format!("len({this})"));
            let target = wrap(this);
            cx.line(format!("for k, v := range {this} {{"));
            cx.indent();
            if matches!(shape(cx, value), Shape::Basic(_)) {
                writef(cx, &format!("{target}[%#v] = %#v"), "k, v");
            } else {
                let func = cx.func_name(&[value]);
                writef(cx, &format!("{target}[%#v] = %s"), &format!("k, {func}(v)"));
            }
            cx.dedent();
            cx.line("}");
            cx.dedent();
            cx.line("}");
        }
        Shape::Signature | Shape::Opaque => return Err(cx.unsupported(ty)),
    }
    Ok(())
}

/// One assignment per element, each rebuilt by the element's own function.
fn elements(cx: &mut DeriveContext<'_>, elem: Idx, this: &str) {
    let func = cx.func_name(&[elem]);
    let target = wrap(this);
    cx.line(format!("for i := range {this} {{"));
    cx.indent();
    writef(cx, &format!("{target}[%d] = %s"), &format!("i, {func}({target}[i])"));
    cx.dedent();
    cx.line("}");
}
