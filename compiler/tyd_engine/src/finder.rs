//! Discovery of derivation requests in a source unit.

use tyd_source::{Arg, CallId, Package, UnitId};

use crate::typesmap::Args;

/// Why a call is a derivation candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallKind {
    /// The callee does not exist yet.
    Undefined,
    /// The callee lives in the derived file and is regenerated every run.
    Derived,
}

#[derive(Clone, Debug)]
pub struct FoundCall {
    pub id: CallId,
    pub kind: CallKind,
    /// Resolved argument types; `Idx::INVALID` where unknown.
    pub args: Args,
}

impl FoundCall {
    /// Whether some argument type cannot be inferred yet.
    pub fn has_undefined_arg(&self) -> bool {
        self.args.iter().any(|a| a.is_invalid())
    }
}

#[derive(Clone, Debug, Default)]
pub struct FoundCalls {
    pub calls: Vec<FoundCall>,
    /// Callees that resolve to user-defined functions.
    pub user_funcs: Vec<String>,
}

/// Walk the calls of `unit` in pre-order and classify every callee.
pub fn find(package: &Package, unit: UnitId) -> FoundCalls {
    let mut found = FoundCalls::default();
    let mut stack: Vec<CallId> = package.unit(unit).calls.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let call = package.call(id);
        for arg in call.args.iter().rev() {
            if let Arg::Call(child) = arg {
                stack.push(*child);
            }
        }

        let kind = match package.func(&call.name) {
            Some(func) if func.is_derived() => CallKind::Derived,
            Some(_) => {
                if !found.user_funcs.contains(&call.name) {
                    found.user_funcs.push(call.name.clone());
                }
                continue;
            }
            None if package.is_builtin_or_type(&call.name) => continue,
            None => CallKind::Undefined,
        };
        found.calls.push(FoundCall {
            id,
            kind,
            args: package.arg_types(id),
        });
    }
    found
}

#[cfg(test)]
mod tests;
