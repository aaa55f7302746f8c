//! Canonical identifier-safe labels for types.
//!
//! A label is a pure function of a type's shape (and, for named types, its
//! identity relative to the generating package). Generated function names
//! are `prefix + label`, so structurally identical argument tuples always
//! name the same function.

use std::fmt::Write as _;

use crate::{ensure_sufficient_stack, BasicKind, ChanDir, Idx, PkgId, Pool, TypeKind};

/// Upper-case the first character of `s`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label of one type as seen from package `current`.
pub fn label(pool: &Pool, idx: Idx, current: PkgId) -> String {
    let mut out = String::new();
    write_label(pool, &mut out, idx, current);
    out
}

/// Label of an argument tuple.
///
/// A tuple of identical types (`deriveEqual(a, b)`) is labelled by its
/// single type; otherwise the labels are joined by `And`.
pub fn label_tuple(pool: &Pool, args: &[Idx], current: PkgId) -> String {
    match args {
        [] => String::new(),
        [first, rest @ ..] if rest.iter().all(|a| a == first) => label(pool, *first, current),
        _ => args
            .iter()
            .map(|&a| label(pool, a, current))
            .collect::<Vec<_>>()
            .join("And"),
    }
}

fn write_label(pool: &Pool, out: &mut String, idx: Idx, current: PkgId) {
    ensure_sufficient_stack(|| match pool.kind(idx) {
        TypeKind::Basic(kind) => match kind {
            BasicKind::UnsafePointer => out.push_str("UnsafePointer"),
            BasicKind::UntypedNil => out.push_str("Nil"),
            BasicKind::Invalid => out.push_str("Invalid"),
            _ => out.push_str(&capitalize(kind.name())),
        },
        TypeKind::Pointer(elem) => {
            out.push_str("PtrTo");
            write_label(pool, out, *elem, current);
        }
        TypeKind::Slice(elem) => {
            out.push_str("SliceOf");
            write_label(pool, out, *elem, current);
        }
        TypeKind::Array { len, elem } => {
            let _ = write!(out, "Array{len}Of");
            write_label(pool, out, *elem, current);
        }
        TypeKind::Map { key, value } => {
            out.push_str("MapOf");
            write_label(pool, out, *key, current);
            out.push_str("To");
            write_label(pool, out, *value, current);
        }
        TypeKind::Chan { dir, elem } => {
            out.push_str(match dir {
                ChanDir::Both => "ChanOf",
                ChanDir::Recv => "RecvChanOf",
                ChanDir::Send => "SendChanOf",
            });
            write_label(pool, out, *elem, current);
        }
        TypeKind::Signature {
            params,
            results,
            variadic,
        } => {
            out.push_str(if *variadic { "VariadicFunc" } else { "Func" });
            if !params.is_empty() {
                out.push_str("Of");
                write_joined(pool, out, params, current);
            }
            if !results.is_empty() {
                out.push_str("To");
                write_joined(pool, out, results, current);
            }
        }
        TypeKind::Struct(fields) => {
            out.push_str("Struct");
            for (i, field) in fields.iter().enumerate() {
                out.push_str(if i == 0 { "Of" } else { "And" });
                if !field.embedded {
                    out.push_str(&field.name);
                }
                write_label(pool, out, field.ty, current);
            }
        }
        TypeKind::Interface(methods) => {
            out.push_str("Interface");
            for (i, method) in methods.iter().enumerate() {
                out.push_str(if i == 0 { "Of" } else { "And" });
                out.push_str(&method.name);
            }
        }
        TypeKind::Named(_) => {
            if let Some(info) = pool.named_info(idx) {
                if info.pkg != current && info.pkg != PkgId::UNIVERSE {
                    out.push_str(&capitalize(&pool.package_ref(info.pkg).name));
                    out.push('_');
                }
                // Kept as declared: `t` and `T` are different types.
                out.push_str(&info.name);
            }
        }
    });
}

fn write_joined(pool: &Pool, out: &mut String, items: &[Idx], current: PkgId) {
    for (i, &item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str("And");
        }
        write_label(pool, out, item, current);
    }
}

#[cfg(test)]
mod tests;
