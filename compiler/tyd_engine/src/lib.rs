//! Type-directed derivation of Go functions.
//!
//! A call to an undefined function whose name starts with an operation
//! prefix (`deriveEqual`, `deriveSort`, ...) is a request: the types of its
//! arguments select the function to generate. The engine names, memoizes and
//! schedules those functions; operation plugins emit their bodies.
//!
//! # Passes
//!
//! [`derive_package`] repeats a pass until every request is served:
//!
//! 1. **Discover**: [`finder::find`] lists undefined and previously derived
//!    calls in each source unit.
//! 2. **Classify and add**: each call is routed by prefix to its
//!    [`Generator`], which validates the arguments and reserves a name in the
//!    [`Registries`]. Renames from autoname or dedup are flushed through a
//!    [`SourceRewriter`].
//! 3. **Generate**: pending functions are emitted into the [`Printer`] until
//!    none is left, including helpers created for nested types.
//!
//! A call whose argument is itself a call to a not yet generated function
//! is typed on the following pass.

mod config;
mod driver;
mod error;
pub mod fields;
pub mod finder;
mod generator;
mod printer;
pub mod typesmap;

pub use config::EngineConfig;
pub use driver::{derive_package, DeriveOutput, SourceRewriter};
pub use error::{DeriveError, NamingConflict, RequestError, Unresolved};
pub use fields::StructFields;
pub use generator::{DeriveContext, Generator, Plugin};
pub use printer::{Printer, HEADER};
pub use typesmap::{Args, Origin, Registries, Requester, Reservation};
