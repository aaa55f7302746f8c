//! The multi-pass derivation loop.
//!
//! One pass discovers every candidate call, routes it to the operation whose
//! prefix it carries, and drains all pending work into a fresh printer. The
//! generated signatures then replace the package's derived symbols, so a
//! call whose argument is itself a derived call can be typed on the next
//! pass. Passes repeat until no call is left unresolved; a pass that does not
//! reduce the unresolved count is fatal.

use tyd_source::{CallId, Package, SourceEdit, UnitId};
use tyd_types::Idx;

use crate::finder::find;
use crate::generator::{DeriveContext, Generator, Plugin};
use crate::typesmap::{describe, Registries, Requester};
use crate::{DeriveError, EngineConfig, Printer, RequestError, Unresolved};

/// Applies renamed call sites to the caller's source files.
pub trait SourceRewriter {
    fn rewrite(&mut self, edit: &SourceEdit) -> std::io::Result<()>;
}

/// Collects edits without touching any file.
impl SourceRewriter for Vec<SourceEdit> {
    fn rewrite(&mut self, edit: &SourceEdit) -> std::io::Result<()> {
        self.push(edit.clone());
        Ok(())
    }
}

/// Result of deriving one package.
#[derive(Clone, Debug, Default)]
pub struct DeriveOutput {
    /// Content of the derived file; `None` if nothing was generated.
    pub source: Option<String>,
    /// Every call site rename, in the order applied.
    pub renames: Vec<SourceEdit>,
    /// Names of the generated functions, in generation order.
    pub functions: Vec<String>,
}

/// State produced by one pass.
struct Pass {
    printer: Printer,
    signatures: Vec<(String, Idx)>,
    unresolved: Vec<CallId>,
}

/// Drive `package` to convergence.
#[tracing::instrument(level = "debug", skip_all, fields(package = %package.path()))]
pub fn derive_package(
    package: &mut Package,
    plugins: &[Plugin],
    config: &EngineConfig,
    rewriter: &mut dyn SourceRewriter,
) -> Result<DeriveOutput, DeriveError> {
    check_dependencies(plugins)?;
    let mut renames = Vec::new();
    let mut previous: Option<usize> = None;
    let mut number = 0;
    loop {
        number += 1;
        let pass = run_pass(package, plugins, config, rewriter, &mut renames)?;
        tracing::debug!(
            pass = number,
            generated = pass.signatures.len(),
            unresolved = pass.unresolved.len(),
            "pass finished"
        );

        if pass.unresolved.is_empty() {
            let functions = pass.signatures.iter().map(|(n, _)| n.clone()).collect();
            package.replace_derived(pass.signatures);
            let source = pass.printer.has_content().then(|| pass.printer.output());
            return Ok(DeriveOutput {
                source,
                renames,
                functions,
            });
        }
        if previous.is_some_and(|p| pass.unresolved.len() >= p) {
            let unresolved = pass
                .unresolved
                .iter()
                .map(|&id| Unresolved {
                    location: package.location(id),
                    call: package.call(id).name.clone(),
                })
                .collect();
            return Err(DeriveError::Convergence { unresolved });
        }
        previous = Some(pass.unresolved.len());
        package.replace_derived(pass.signatures);
    }
}

fn run_pass(
    package: &mut Package,
    plugins: &[Plugin],
    config: &EngineConfig,
    rewriter: &mut dyn SourceRewriter,
    renames: &mut Vec<SourceEdit>,
) -> Result<Pass, DeriveError> {
    let current = package.id();
    let ops: Vec<(&'static str, &str)> = plugins.iter().map(|p| (p.name, p.prefix)).collect();
    let mut registries = Registries::new(config, current, &ops);
    for func in package.funcs().filter(|f| !f.is_derived()) {
        registries.add_user_func(&func.name);
    }
    let mut generators: Vec<Box<dyn Generator>> = plugins.iter().map(|p| (p.new)()).collect();
    let mut printer = Printer::new(package.name(), current);
    let mut signatures = Vec::new();
    let mut unresolved = Vec::new();

    let units: Vec<UnitId> = package
        .units()
        .filter(|(_, unit)| !unit.is_derived())
        .map(|(id, _)| id)
        .collect();

    // Classify and add.
    for unit in units {
        let found = find(package, unit);
        for name in &found.user_funcs {
            registries.add_user_func(name);
        }
        for call in found.calls {
            let name = package.call(call.id).name.clone();
            let Some(op) = registries.route(&name) else {
                tracing::warn!(call = %name, at = %package.location(call.id), "no operation matches this call");
                unresolved.push(call.id);
                continue;
            };
            if call.has_undefined_arg() {
                tracing::debug!(call = %name, at = %package.location(call.id), "deferred");
                unresolved.push(call.id);
                continue;
            }
            let Some(index) = plugins.iter().position(|p| p.name == op) else {
                unresolved.push(call.id);
                continue;
            };

            registries.set_requester(Some(Requester {
                location: package.location(call.id),
                op,
                name: name.clone(),
                types: describe(&package.pool, &call.args),
            }));
            let mut cx = DeriveContext::new(
                &mut package.pool,
                &mut printer,
                &mut registries,
                current,
                op,
                &mut signatures,
            );
            let reserved = generators[index]
                .add(&mut cx, &name, &call.args)
                .map_err(|source| request_error(package, call.id, op, source))?;

            if reserved != name {
                tracing::info!(from = %name, to = %reserved, "renamed call");
                let edit = package.rename_call(call.id, &reserved);
                rewriter
                    .rewrite(&edit)
                    .map_err(|source| DeriveError::Rewrite {
                        file: edit.file.clone(),
                        source,
                    })?;
                renames.push(edit);
            }
        }
    }

    // Generate until no operation has pending work.
    while registries.has_pending() {
        for (plugin, generator) in plugins.iter().zip(generators.iter_mut()) {
            for args in registries.pending(plugin.name) {
                registries.generating(plugin.name, &args);
                let requester = registries.requester(plugin.name, &args).cloned();
                registries.set_requester(requester.clone());
                let mut cx = DeriveContext::new(
                    &mut package.pool,
                    &mut printer,
                    &mut registries,
                    current,
                    plugin.name,
                    &mut signatures,
                );
                generator
                    .generate(&mut cx, &args)
                    .map_err(|source| generate_error(requester, plugin.name, source))?;
            }
        }
    }

    Ok(Pass {
        printer,
        signatures,
        unresolved,
    })
}

fn request_error(
    package: &Package,
    id: CallId,
    op: &'static str,
    source: RequestError,
) -> DeriveError {
    let location = package.location(id);
    match source {
        RequestError::Naming(source) => DeriveError::Naming { location, source },
        source => DeriveError::Request {
            location,
            op,
            source,
        },
    }
}

/// Blame a generation failure on the call that led to it.
fn generate_error(
    requester: Option<Requester>,
    op: &'static str,
    source: RequestError,
) -> DeriveError {
    match requester {
        Some(requester) => DeriveError::Request {
            location: requester.location,
            op: requester.op,
            source: RequestError::Generating {
                name: requester.name,
                types: requester.types,
                source: Box::new(source),
            },
        },
        None => DeriveError::Generate { op, source },
    }
}

/// Every operation a plugin calls into must be registered.
fn check_dependencies(plugins: &[Plugin]) -> Result<(), DeriveError> {
    for plugin in plugins {
        if let Some(dep) = plugin
            .deps
            .iter()
            .find(|dep| !plugins.iter().any(|p| p.name == **dep))
        {
            return Err(DeriveError::MissingDependency {
                op: plugin.name,
                dep: *dep,
            });
        }
    }
    Ok(())
}
