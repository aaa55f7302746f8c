//! Type shapes stored in the pool.

use crate::{BasicKind, Idx, NamedId, PkgId};

/// The shape of an interned type.
///
/// Children are referenced by [`Idx`], so equal shapes intern to equal
/// indices. Named types only carry their [`NamedId`]; the underlying type
/// lives in the pool's side table so it can refer back to the named type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Basic(BasicKind),
    Pointer(Idx),
    Array {
        len: u64,
        elem: Idx,
    },
    Slice(Idx),
    Map {
        key: Idx,
        value: Idx,
    },
    Chan {
        dir: ChanDir,
        elem: Idx,
    },
    /// Function type. A variadic signature stores its last parameter as a slice.
    Signature {
        params: Box<[Idx]>,
        results: Box<[Idx]>,
        variadic: bool,
    },
    /// Struct with fields in declaration order.
    Struct(Box<[Field]>),
    Interface(Box<[InterfaceMethod]>),
    Named(NamedId),
}

/// Channel direction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// A struct field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    pub name: String,
    pub ty: Idx,
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Idx) -> Self {
        Field {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    /// Go exports identifiers that start with an upper case letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// A method declared in an interface type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InterfaceMethod {
    pub name: String,
    pub sig: Idx,
}

/// A method declared on a named type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Method {
    pub name: String,
    /// Signature without the receiver.
    pub sig: Idx,
    pub pointer_receiver: bool,
}

/// Side table entry of a named type.
#[derive(Clone, Debug)]
pub struct NamedInfo {
    pub pkg: PkgId,
    pub name: String,
    /// `Idx::INVALID` until the declaration has been resolved.
    pub underlying: Idx,
    pub methods: Vec<Method>,
}

/// A package as seen by the type model.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackageRef {
    /// Import path, empty for the universe scope.
    pub path: String,
    /// Package name used as default import alias.
    pub name: String,
}
