//! Serialized output of the host front end.
//!
//! One snapshot describes one package: its declared named types (including
//! types of other packages it refers to), its top-level functions with the
//! file that declares them, and, per source file, the call expressions whose
//! callee is a plain identifier, with argument types as Go type expressions.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Import path of the package.
    pub path: String,
    /// Package name used in the package clause.
    pub name: String,
    /// Directory of the package's files, relative to the snapshot file.
    #[serde(default)]
    pub dir: String,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub funcs: Vec<FuncDecl>,
    #[serde(default)]
    pub files: Vec<FileDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub path: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Declaring package's import path; the snapshot's own package when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub name: String,
    /// Underlying type.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// Signature without receiver, as `func(...) ...`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Declared on the pointer receiver.
    #[serde(default)]
    pub pointer: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub file: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDecl {
    pub path: String,
    #[serde(default)]
    pub calls: Vec<CallDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDecl {
    pub name: String,
    /// Byte offset of the callee identifier in the file.
    pub offset: usize,
    pub line: u32,
    pub column: u32,
    /// `null` for arguments whose type the host could not report.
    #[serde(default)]
    pub args: Vec<Option<ArgDecl>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgDecl {
    /// Argument of a known type.
    Type(String),
    /// Argument that is itself a call to a plain identifier.
    Call { call: Box<CallDecl> },
}

impl Snapshot {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
