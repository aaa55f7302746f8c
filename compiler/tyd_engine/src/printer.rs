//! Go source printer for generated functions.
//!
//! Generators emit one line at a time while the printer tracks the
//! indentation level. Imports are requested by path and answered with an
//! alias that does not clash with any other import of the file.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use tyd_types::{Idx, PackageRef, PkgId, Pool, Qualifier};

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by tyderive. DO NOT EDIT.";

pub struct Printer {
    package_name: String,
    current: PkgId,
    /// Import path to alias, sorted by path for output.
    imports: BTreeMap<String, String>,
    /// Alias to import path.
    aliases: FxHashMap<String, String>,
    body: String,
    indent: usize,
}

impl Printer {
    pub fn new(package_name: &str, current: PkgId) -> Self {
        Printer {
            package_name: package_name.to_string(),
            current,
            imports: BTreeMap::new(),
            aliases: FxHashMap::default(),
            body: String::new(),
            indent: 0,
        }
    }

    /// Emit one line at the current indentation. Empty lines carry no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.body.push('\t');
            }
            self.body.push_str(text);
        }
        self.body.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Import a standard library package by path.
    pub fn import(&mut self, path: &str) -> String {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        self.import_named(path, &name)
    }

    /// Import `path`, preferring `name` as alias; numbered on conflict.
    pub fn import_named(&mut self, path: &str, name: &str) -> String {
        if let Some(alias) = self.imports.get(path) {
            return alias.clone();
        }
        let mut alias = name.to_string();
        let mut n = 1;
        while self.aliases.contains_key(&alias) || alias == self.package_name {
            alias = format!("{name}{n}");
            n += 1;
        }
        self.imports.insert(path.to_string(), alias.clone());
        self.aliases.insert(alias.clone(), path.to_string());
        alias
    }

    /// Go spelling of a type, importing the packages it mentions.
    pub fn type_string(&mut self, pool: &Pool, idx: Idx) -> String {
        pool.type_string(idx, self)
    }

    /// Go zero value of a type, importing the packages it mentions.
    pub fn zero_value(&mut self, pool: &Pool, idx: Idx) -> String {
        pool.zero_value(idx, self)
    }

    pub fn has_content(&self) -> bool {
        !self.body.is_empty()
    }

    /// The complete file.
    pub fn output(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(HEADER);
        let _ = write!(out, "\n\npackage {}\n", self.package_name);
        if !self.imports.is_empty() {
            out.push_str("\nimport (\n");
            for (path, alias) in &self.imports {
                let default = path.rsplit('/').next().unwrap_or(path);
                if alias == default {
                    let _ = writeln!(out, "\t{path:?}");
                } else {
                    let _ = writeln!(out, "\t{alias} {path:?}");
                }
            }
            out.push_str(")\n");
        }
        out.push_str(&self.body);
        out
    }
}

impl Qualifier for Printer {
    fn qualify(&mut self, pkg: PkgId, pkg_ref: &PackageRef) -> Option<String> {
        if pkg == self.current || pkg == PkgId::UNIVERSE {
            return None;
        }
        Some(self.import_named(&pkg_ref.path, &pkg_ref.name))
    }
}
