//! Go syntax for types.
//!
//! Named types from other packages are qualified through a [`Qualifier`],
//! which lets the printer register an import and hand back its alias while
//! the type string is being built.

use std::fmt::Write as _;

use crate::{ensure_sufficient_stack, ChanDir, Idx, PackageRef, PkgId, Pool, TypeKind};

/// Decides how a named type's package is spelled.
pub trait Qualifier {
    /// Prefix (without the dot) for a named type declared in `pkg`, or
    /// `None` to leave it unqualified.
    fn qualify(&mut self, pkg: PkgId, pkg_ref: &PackageRef) -> Option<String>;
}

/// Leaves types of one package unqualified and spells every other package
/// by its package name.
#[derive(Copy, Clone, Debug)]
pub struct RelativeTo(pub PkgId);

impl Qualifier for RelativeTo {
    fn qualify(&mut self, pkg: PkgId, pkg_ref: &PackageRef) -> Option<String> {
        if pkg == self.0 || pkg == PkgId::UNIVERSE {
            None
        } else {
            Some(pkg_ref.name.clone())
        }
    }
}

/// Spells every package by its package name. Used for diagnostics.
#[derive(Copy, Clone, Debug, Default)]
pub struct PackageNames;

impl Qualifier for PackageNames {
    fn qualify(&mut self, pkg: PkgId, pkg_ref: &PackageRef) -> Option<String> {
        (pkg != PkgId::UNIVERSE).then(|| pkg_ref.name.clone())
    }
}

impl Pool {
    /// Render a type in Go syntax.
    pub fn type_string(&self, idx: Idx, q: &mut dyn Qualifier) -> String {
        let mut out = String::new();
        self.write_type(&mut out, idx, q);
        out
    }

    /// Render a type for error messages.
    pub fn display(&self, idx: Idx) -> String {
        self.type_string(idx, &mut PackageNames)
    }

    /// A Go expression for the zero value of a type.
    pub fn zero_value(&self, idx: Idx, q: &mut dyn Qualifier) -> String {
        let underlying = self.underlying(idx);
        match self.kind(underlying) {
            TypeKind::Basic(kind) if kind.is_numeric() => "0".to_string(),
            TypeKind::Basic(crate::BasicKind::String) => "\"\"".to_string(),
            TypeKind::Basic(crate::BasicKind::Bool) => "false".to_string(),
            TypeKind::Struct(_) | TypeKind::Array { .. } => {
                format!("{}{{}}", self.type_string(idx, q))
            }
            _ => "nil".to_string(),
        }
    }

    fn write_type(&self, out: &mut String, idx: Idx, q: &mut dyn Qualifier) {
        ensure_sufficient_stack(|| match self.kind(idx) {
            TypeKind::Basic(kind) => out.push_str(kind.name()),
            TypeKind::Pointer(elem) => {
                out.push('*');
                self.write_type(out, *elem, q);
            }
            TypeKind::Array { len, elem } => {
                let _ = write!(out, "[{len}]");
                self.write_type(out, *elem, q);
            }
            TypeKind::Slice(elem) => {
                out.push_str("[]");
                self.write_type(out, *elem, q);
            }
            TypeKind::Map { key, value } => {
                out.push_str("map[");
                self.write_type(out, *key, q);
                out.push(']');
                self.write_type(out, *value, q);
            }
            TypeKind::Chan { dir, elem } => {
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                // `chan (<-chan T)` needs parentheses to keep its meaning.
                let paren = *dir == ChanDir::Both
                    && matches!(self.kind(*elem), TypeKind::Chan { dir: ChanDir::Recv, .. });
                if paren {
                    out.push('(');
                }
                self.write_type(out, *elem, q);
                if paren {
                    out.push(')');
                }
            }
            TypeKind::Signature {
                params,
                results,
                variadic,
            } => {
                out.push_str("func");
                self.write_signature(out, params, results, *variadic, q);
            }
            TypeKind::Struct(fields) => {
                if fields.is_empty() {
                    out.push_str("struct{}");
                    return;
                }
                out.push_str("struct { ");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    self.write_type(out, field.ty, q);
                }
                out.push_str(" }");
            }
            TypeKind::Interface(methods) => {
                if methods.is_empty() {
                    out.push_str("interface{}");
                    return;
                }
                out.push_str("interface { ");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    if let Some((params, results, variadic)) = self.signature_parts(method.sig) {
                        self.write_signature(out, params, results, variadic, q);
                    }
                }
                out.push_str(" }");
            }
            TypeKind::Named(_) => {
                if let Some(info) = self.named_info(idx) {
                    if let Some(prefix) = q.qualify(info.pkg, self.package_ref(info.pkg)) {
                        out.push_str(&prefix);
                        out.push('.');
                    }
                    out.push_str(&info.name);
                }
            }
        });
    }

    fn write_signature(
        &self,
        out: &mut String,
        params: &[Idx],
        results: &[Idx],
        variadic: bool,
        q: &mut dyn Qualifier,
    ) {
        out.push('(');
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let last = i + 1 == params.len();
            match self.kind(param) {
                TypeKind::Slice(elem) if variadic && last => {
                    out.push_str("...");
                    self.write_type(out, *elem, q);
                }
                _ => self.write_type(out, param, q),
            }
        }
        out.push(')');
        match results {
            [] => {}
            [single] => {
                out.push(' ');
                self.write_type(out, *single, q);
            }
            many => {
                out.push_str(" (");
                for (i, &result) in many.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, result, q);
                }
                out.push(')');
            }
        }
    }
}
