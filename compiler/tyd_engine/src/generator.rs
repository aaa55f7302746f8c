//! The operation plugin interface.

use tyd_types::{Idx, Method, PkgId, Pool};

use crate::fields::StructFields;
use crate::typesmap::Registries;
use crate::{Printer, RequestError};

/// Generates the functions of one operation.
pub trait Generator {
    /// Validate a call's argument types and reserve a function for them.
    ///
    /// Returns the name the call must use, which differs from `name` only
    /// under autoname or dedup.
    fn add(
        &mut self,
        cx: &mut DeriveContext<'_>,
        name: &str,
        args: &[Idx],
    ) -> Result<String, RequestError>;

    /// Emit one pending function and declare its signature.
    fn generate(&mut self, cx: &mut DeriveContext<'_>, args: &[Idx]) -> Result<(), RequestError>;
}

/// A registered operation.
#[derive(Clone, Copy)]
pub struct Plugin {
    pub name: &'static str,
    /// Default function name prefix.
    pub prefix: &'static str,
    /// Operations whose functions this one calls.
    pub deps: &'static [&'static str],
    pub new: fn() -> Box<dyn Generator>,
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Everything a generator may touch while handling one request.
pub struct DeriveContext<'a> {
    pub pool: &'a mut Pool,
    pub printer: &'a mut Printer,
    pub registries: &'a mut Registries,
    current: PkgId,
    op: &'static str,
    signatures: &'a mut Vec<(String, Idx)>,
}

impl<'a> DeriveContext<'a> {
    pub fn new(
        pool: &'a mut Pool,
        printer: &'a mut Printer,
        registries: &'a mut Registries,
        current: PkgId,
        op: &'static str,
        signatures: &'a mut Vec<(String, Idx)>,
    ) -> Self {
        DeriveContext {
            pool,
            printer,
            registries,
            current,
            op,
            signatures,
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn current(&self) -> PkgId {
        self.current
    }

    // === Naming ===

    /// Reserve `name` for `args` under this operation.
    pub fn reserve(&mut self, name: &str, args: &[Idx]) -> Result<String, RequestError> {
        let reservation = self.registries.reserve(self.pool, self.op, name, args)?;
        if reservation.newly {
            tracing::debug!(op = self.op, name = %reservation.name, "reserved");
        }
        Ok(reservation.name)
    }

    /// Name of this operation's function for `args`, scheduling it if needed.
    pub fn func_name(&mut self, args: &[Idx]) -> String {
        self.registries.func_name(self.pool, self.op, args)
    }

    /// Name of another operation's function for `args`, scheduling it if needed.
    pub fn dep_func_name(&mut self, op: &str, args: &[Idx]) -> String {
        self.registries.func_name(self.pool, op, args)
    }

    /// Record the signature of a generated function.
    pub fn declare(&mut self, name: &str, params: &[Idx], results: &[Idx], variadic: bool) {
        let sig = self.pool.signature(params, results, variadic);
        tracing::debug!(op = self.op, name, "generated");
        self.signatures.push((name.to_string(), sig));
    }

    // === Types ===

    /// Go spelling of a type in the generated file.
    pub fn type_string(&mut self, idx: Idx) -> String {
        self.printer.type_string(self.pool, idx)
    }

    pub fn zero_value(&mut self, idx: Idx) -> String {
        self.printer.zero_value(self.pool, idx)
    }

    pub fn import(&mut self, path: &str) -> String {
        self.printer.import(path)
    }

    /// A type for diagnostics.
    pub fn display(&self, idx: Idx) -> String {
        self.pool.display(idx)
    }

    /// Whether `idx` is a named type declared in another package.
    pub fn is_external(&self, idx: Idx) -> bool {
        self.pool
            .named_info(idx)
            .is_some_and(|info| info.pkg != self.current && info.pkg != PkgId::UNIVERSE)
    }

    /// A method of the named type `ty` or of the named type `ty` points to.
    pub fn user_method(&self, ty: Idx, name: &str) -> Option<&Method> {
        let named = self.pool.pointer_elem(ty).unwrap_or(ty);
        self.pool.method(named, name)
    }

    pub fn fields(&self, ty: Idx) -> Option<StructFields> {
        StructFields::new(&*self.pool, ty, self.current)
    }

    // === Output ===

    pub fn line(&mut self, text: impl AsRef<str>) {
        self.printer.line(text);
    }

    pub fn indent(&mut self) {
        self.printer.indent();
    }

    pub fn dedent(&mut self) {
        self.printer.dedent();
    }

    pub fn unsupported(&self, idx: Idx) -> RequestError {
        RequestError::Unsupported {
            ty: self.display(idx),
        }
    }
}
