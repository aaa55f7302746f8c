//! Helpers shared by the generators.

use tyd_engine::{DeriveContext, RequestError};
use tyd_types::{BasicKind, Idx, TypeKind};

/// Negate a boolean expression.
pub(crate) fn not(expr: &str) -> String {
    if expr.starts_with('(') && expr.ends_with(')') {
        format!("!{expr}")
    } else {
        format!("!({expr})")
    }
}

/// Parenthesize an expression that starts with a unary operator, so a
/// selector or index can follow it.
pub(crate) fn wrap(expr: &str) -> String {
    if expr.starts_with('*') || expr.starts_with('&') {
        format!("({expr})")
    } else {
        expr.to_string()
    }
}

/// `prefix0, prefix1, ...`.
pub(crate) fn vars(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

/// A result list in Go syntax: `T`, or `(T, U)` for several.
pub(crate) fn results(types: &[String]) -> String {
    match types {
        [single] => single.clone(),
        many => format!("({})", many.join(", ")),
    }
}

/// A variable name derived from an expression: `*this.Field` gives `this_suffix`.
pub(crate) fn prepend(expr: &str, suffix: &str) -> String {
    let base = expr.split('.').next().unwrap_or(expr);
    let base: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    format!("{base}_{suffix}")
}

pub(crate) fn expect_arity(
    name: &str,
    args: &[Idx],
    expected: &'static str,
    ok: bool,
) -> Result<(), RequestError> {
    if ok {
        Ok(())
    } else {
        Err(RequestError::Arity {
            name: name.to_string(),
            expected,
            found: args.len(),
        })
    }
}

/// Check a `(T, T)` request and return `T`.
pub(crate) fn expect_pair(
    cx: &DeriveContext<'_>,
    name: &str,
    args: &[Idx],
) -> Result<Idx, RequestError> {
    expect_arity(name, args, "2", args.len() == 2)?;
    if args[0] != args[1] {
        return Err(RequestError::Mismatch {
            name: name.to_string(),
            first: cx.display(args[0]),
            second: cx.display(args[1]),
        });
    }
    Ok(args[0])
}

pub(crate) fn invalid(name: &str, detail: String) -> RequestError {
    RequestError::InvalidArgument {
        name: name.to_string(),
        detail,
    }
}

/// Parameter type of a one-argument method `method` returning `result`
/// (nothing when `None`) on the named type behind `ty`.
pub(crate) fn method_param(
    cx: &DeriveContext<'_>,
    ty: Idx,
    method: &str,
    result: Option<Idx>,
) -> Option<Idx> {
    let method = cx.user_method(ty, method)?;
    let (params, results, _) = cx.pool.signature_parts(method.sig)?;
    let returns = match result {
        Some(r) => matches!(results, [only] if *only == r),
        None => results.is_empty(),
    };
    match params {
        [param] if returns => Some(*param),
        _ => None,
    }
}

/// Emit `if cond { return value }`.
pub(crate) fn return_if(cx: &mut DeriveContext<'_>, cond: &str, value: &str) {
    cx.line(format!("if {cond} {{"));
    cx.indent();
    cx.line(format!("return {value}"));
    cx.dedent();
    cx.line("}");
}

/// Whether `ty` is a named type whose underlying type is a struct.
pub(crate) fn is_named_struct(cx: &DeriveContext<'_>, ty: Idx) -> bool {
    cx.pool.is_named(ty) && cx.pool.struct_fields(ty).is_some()
}

/// Underlying shape of a type, detached from the pool borrow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    Basic(BasicKind),
    Pointer(Idx),
    Slice(Idx),
    Array(Idx),
    Map(Idx, Idx),
    Struct,
    Signature,
    /// Channels and interfaces.
    Opaque,
}

pub(crate) fn shape(cx: &DeriveContext<'_>, ty: Idx) -> Shape {
    match cx.pool.kind(cx.pool.underlying(ty)) {
        TypeKind::Basic(kind) => Shape::Basic(*kind),
        TypeKind::Pointer(elem) => Shape::Pointer(*elem),
        TypeKind::Slice(elem) => Shape::Slice(*elem),
        TypeKind::Array { elem, .. } => Shape::Array(*elem),
        TypeKind::Map { key, value } => Shape::Map(*key, *value),
        TypeKind::Struct(_) => Shape::Struct,
        TypeKind::Signature { .. } => Shape::Signature,
        TypeKind::Chan { .. } | TypeKind::Interface(_) | TypeKind::Named(_) => Shape::Opaque,
    }
}
