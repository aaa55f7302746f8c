//! Engine configuration.

use rustc_hash::FxHashMap;

/// Settings for one run, passed explicitly into the driver.
///
/// Absent `autoname` and `dedup`, every naming conflict is fatal and no
/// caller source is ever rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Rename a call whose requested name is taken by an unrelated function.
    pub autoname: bool,
    /// Point a call at an earlier function derived for the same types.
    pub dedup: bool,
    /// Prefix overrides by operation name.
    pub prefixes: FxHashMap<String, String>,
}

impl EngineConfig {
    /// The configured prefix of an operation, or its default.
    pub fn prefix<'a>(&'a self, op: &str, default: &'a str) -> &'a str {
        self.prefixes.get(op).map_or(default, String::as_str)
    }

    pub fn with_prefix(mut self, op: &str, prefix: &str) -> Self {
        self.prefixes.insert(op.to_string(), prefix.to_string());
        self
    }
}
