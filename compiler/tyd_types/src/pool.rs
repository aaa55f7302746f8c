//! The type pool: interning, construction and shape queries.

use rustc_hash::FxHashMap;

use crate::{
    BasicKind, ChanDir, Field, Idx, InterfaceMethod, Method, NamedId, NamedInfo, PackageRef, PkgId,
    TypeKind,
};

/// Follow at most this many named links when looking for an underlying type.
const MAX_NAMED_CHAIN: usize = 64;

/// Interned storage for every type of one package analysis.
pub struct Pool {
    kinds: Vec<TypeKind>,
    map: FxHashMap<TypeKind, Idx>,
    named: Vec<NamedInfo>,
    named_by_key: FxHashMap<(PkgId, String), Idx>,
    packages: Vec<PackageRef>,
    package_by_path: FxHashMap<String, PkgId>,
    error: Idx,
}

impl Pool {
    /// Create a pool with the basic types and the predeclared `error` type.
    pub fn new() -> Self {
        let mut pool = Pool {
            kinds: Vec::with_capacity(128),
            map: FxHashMap::default(),
            named: Vec::new(),
            named_by_key: FxHashMap::default(),
            packages: Vec::new(),
            package_by_path: FxHashMap::default(),
            error: Idx::INVALID,
        };

        for kind in BasicKind::ALL {
            let idx = pool.intern(TypeKind::Basic(kind));
            debug_assert_eq!(idx, kind.idx());
        }

        let universe = pool.package("", "");
        debug_assert_eq!(universe, PkgId::UNIVERSE);

        // type error interface { Error() string }
        let error_sig = pool.signature(&[], &[Idx::STRING], false);
        let iface = pool.interface(vec![InterfaceMethod {
            name: "Error".to_string(),
            sig: error_sig,
        }]);
        let error = pool.declare_named(PkgId::UNIVERSE, "error");
        pool.set_underlying(error, iface);
        pool.error = error;

        pool
    }

    /// Intern a shape, returning the existing index for an identical shape.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a package never approaches u32::MAX distinct types"
    )]
    pub fn intern(&mut self, kind: TypeKind) -> Idx {
        if let Some(&idx) = self.map.get(&kind) {
            return idx;
        }
        let idx = Idx::from_raw(self.kinds.len() as u32);
        self.kinds.push(kind.clone());
        self.map.insert(kind, idx);
        idx
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// The shape of a type.
    ///
    /// # Panics
    /// Panics if `idx` was not created by this pool.
    pub fn kind(&self, idx: Idx) -> &TypeKind {
        &self.kinds[idx.index()]
    }

    // === Constructors ===

    pub fn pointer(&mut self, elem: Idx) -> Idx {
        self.intern(TypeKind::Pointer(elem))
    }

    pub fn slice(&mut self, elem: Idx) -> Idx {
        self.intern(TypeKind::Slice(elem))
    }

    pub fn array(&mut self, len: u64, elem: Idx) -> Idx {
        self.intern(TypeKind::Array { len, elem })
    }

    pub fn map(&mut self, key: Idx, value: Idx) -> Idx {
        self.intern(TypeKind::Map { key, value })
    }

    pub fn chan(&mut self, dir: ChanDir, elem: Idx) -> Idx {
        self.intern(TypeKind::Chan { dir, elem })
    }

    pub fn signature(&mut self, params: &[Idx], results: &[Idx], variadic: bool) -> Idx {
        self.intern(TypeKind::Signature {
            params: params.into(),
            results: results.into(),
            variadic,
        })
    }

    pub fn structure(&mut self, fields: Vec<Field>) -> Idx {
        self.intern(TypeKind::Struct(fields.into_boxed_slice()))
    }

    pub fn interface(&mut self, methods: Vec<InterfaceMethod>) -> Idx {
        self.intern(TypeKind::Interface(methods.into_boxed_slice()))
    }

    /// `interface{}`
    pub fn empty_interface(&mut self) -> Idx {
        self.interface(Vec::new())
    }

    // === Packages ===

    /// Intern a package by import path.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "package count is tiny compared to u32::MAX"
    )]
    pub fn package(&mut self, path: &str, name: &str) -> PkgId {
        if let Some(&id) = self.package_by_path.get(path) {
            return id;
        }
        let id = PkgId::new(self.packages.len() as u32);
        self.packages.push(PackageRef {
            path: path.to_string(),
            name: name.to_string(),
        });
        self.package_by_path.insert(path.to_string(), id);
        id
    }

    pub fn lookup_package(&self, path: &str) -> Option<PkgId> {
        self.package_by_path.get(path).copied()
    }

    pub fn package_ref(&self, id: PkgId) -> &PackageRef {
        &self.packages[id.index()]
    }

    // === Named Types ===

    /// Declare a named type, or return the existing one with the same identity.
    ///
    /// The underlying type is set separately with [`Pool::set_underlying`]
    /// so declarations can refer to each other recursively.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "named type count is bounded by the package size"
    )]
    pub fn declare_named(&mut self, pkg: PkgId, name: &str) -> Idx {
        let key = (pkg, name.to_string());
        if let Some(&idx) = self.named_by_key.get(&key) {
            return idx;
        }
        let id = NamedId::new(self.named.len() as u32);
        self.named.push(NamedInfo {
            pkg,
            name: name.to_string(),
            underlying: Idx::INVALID,
            methods: Vec::new(),
        });
        let idx = self.intern(TypeKind::Named(id));
        self.named_by_key.insert(key, idx);
        idx
    }

    pub fn lookup_named(&self, pkg: PkgId, name: &str) -> Option<Idx> {
        self.named_by_key.get(&(pkg, name.to_string())).copied()
    }

    /// Set the underlying type of a declared named type.
    ///
    /// Named types never have a named underlying type, so a named argument
    /// is replaced by its own underlying type when that is already known.
    pub fn set_underlying(&mut self, named: Idx, underlying: Idx) {
        let resolved = match self.kind(underlying) {
            TypeKind::Named(_) => {
                let u = self.underlying(underlying);
                if u.is_invalid() {
                    underlying
                } else {
                    u
                }
            }
            _ => underlying,
        };
        let id = match self.kind(named) {
            TypeKind::Named(id) => *id,
            _ => return,
        };
        self.named[id.index()].underlying = resolved;
    }

    pub fn add_method(&mut self, named: Idx, method: Method) {
        let id = match self.kind(named) {
            TypeKind::Named(id) => *id,
            _ => return,
        };
        self.named[id.index()].methods.push(method);
    }

    /// Side table entry of a named type, `None` for unnamed types.
    pub fn named_info(&self, idx: Idx) -> Option<&NamedInfo> {
        match self.kind(idx) {
            TypeKind::Named(id) => Some(&self.named[id.index()]),
            _ => None,
        }
    }

    pub fn is_named(&self, idx: Idx) -> bool {
        matches!(self.kind(idx), TypeKind::Named(_))
    }

    /// The predeclared `error` type.
    pub fn error_type(&self) -> Idx {
        self.error
    }

    pub fn is_error(&self, idx: Idx) -> bool {
        idx == self.error
    }

    // === Shape Queries ===

    /// Follow named types to their underlying shape.
    ///
    /// Returns `Idx::INVALID` for a named type whose declaration was never
    /// resolved.
    pub fn underlying(&self, idx: Idx) -> Idx {
        let mut current = idx;
        for _ in 0..MAX_NAMED_CHAIN {
            match self.kind(current) {
                TypeKind::Named(id) => current = self.named[id.index()].underlying,
                _ => return current,
            }
        }
        Idx::INVALID
    }

    /// The basic kind of a type's underlying shape.
    pub fn basic(&self, idx: Idx) -> Option<BasicKind> {
        match self.kind(self.underlying(idx)) {
            TypeKind::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Element type of a pointer (not following names).
    pub fn pointer_elem(&self, idx: Idx) -> Option<Idx> {
        match self.kind(idx) {
            TypeKind::Pointer(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Element type of a slice (not following names).
    pub fn slice_elem(&self, idx: Idx) -> Option<Idx> {
        match self.kind(idx) {
            TypeKind::Slice(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Fields of a struct type, following names.
    pub fn struct_fields(&self, idx: Idx) -> Option<&[Field]> {
        match self.kind(self.underlying(idx)) {
            TypeKind::Struct(fields) => Some(&fields[..]),
            _ => None,
        }
    }

    /// Parameters, results and variadic flag of a signature type.
    pub fn signature_parts(&self, idx: Idx) -> Option<(&[Idx], &[Idx], bool)> {
        match self.kind(self.underlying(idx)) {
            TypeKind::Signature {
                params,
                results,
                variadic,
            } => Some((&params[..], &results[..], *variadic)),
            _ => None,
        }
    }

    /// A method declared on a named type.
    pub fn method(&self, named: Idx, name: &str) -> Option<&Method> {
        self.named_info(named)?
            .methods
            .iter()
            .find(|m| m.name == name)
    }

    /// Go type identity.
    #[inline]
    pub fn identical(&self, a: Idx, b: Idx) -> bool {
        a == b
    }

    /// Go assignability of a value of type `value` to a variable of type `target`.
    pub fn assignable(&self, value: Idx, target: Idx) -> bool {
        if value == target {
            return true;
        }
        if value.is_invalid() || target.is_invalid() {
            return false;
        }
        let (vu, tu) = (self.underlying(value), self.underlying(target));
        if vu == tu && (!self.is_named(value) || !self.is_named(target)) {
            return true;
        }
        if value == Idx::UNTYPED_NIL {
            return matches!(
                self.kind(tu),
                TypeKind::Pointer(_)
                    | TypeKind::Slice(_)
                    | TypeKind::Map { .. }
                    | TypeKind::Chan { .. }
                    | TypeKind::Signature { .. }
                    | TypeKind::Interface(_)
            );
        }
        match self.kind(tu) {
            TypeKind::Interface(methods) => methods.iter().all(|m| self.implements(value, m)),
            _ => false,
        }
    }

    /// Whether `ty` provides `method` with an identical signature.
    fn implements(&self, ty: Idx, method: &InterfaceMethod) -> bool {
        let (named, through_pointer) = match self.kind(ty) {
            TypeKind::Pointer(elem) => (*elem, true),
            _ => (ty, false),
        };
        if let Some(m) = self.method(named, &method.name) {
            return m.sig == method.sig && (through_pointer || !m.pointer_receiver);
        }
        match self.kind(self.underlying(ty)) {
            TypeKind::Interface(methods) => methods
                .iter()
                .any(|m| m.name == method.name && m.sig == method.sig),
            _ => false,
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
