//! # actiongen
//!
//! Compiles declarative action definitions into Rust source.
//!
//! An action is a named transform over datasets, described in TOML or JSON by
//! an id, typed parameters and a body expression. For every binding in a
//! module definition this crate merges the bound action sets and generates one
//! unit holding a struct per action, its transform trait implementation and a
//! registry pairing each action id with its type.
//!
//! ## Architecture
//!
//! - [`ir`] - Definition records and their merge semantics
//! - [`loader`] - Reading TOML/JSON records and resolving config-file globs
//! - [`synth`] - Parsing configured fragments into syntax nodes
//! - [`registry`] - Building the id-to-type registry
//! - [`emitter`] - Printing syntax nodes as Rust source
//! - [`generate`] - Running the pipeline for a whole module
//! - [`writer`] - File output, dry-run and freshness checks
//! - [`error`] - Error types and handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use actiongen::{FileWriter, ModuleGenerator};
//!
//! let units = ModuleGenerator::new().generate_from_file("actions/module.toml")?;
//! FileWriter::new(false).write_all("src/generated".as_ref(), &units)?;
//! ```

pub mod emitter;
pub mod error;
pub mod generate;
pub mod ir;
pub mod loader;
pub mod registry;
pub mod synth;
pub mod writer;

// Re-export main types for convenience
pub use emitter::{CodeGenerator, EmitterConfig, RustEmitter};
pub use error::{Error, FragmentKind, LoadError, Result, SyntaxError, WriteError};
pub use generate::{GeneratedUnit, ModuleGenerator};
pub use ir::{ActionConfig, ActionDefinition, ActionsDefinitions, ModuleDefinition, ParamDefinition};
pub use registry::RegistryGenerator;
pub use synth::{CompilationUnit, Synthesizer};
pub use writer::{FileWriter, Freshness, WriteResult};
