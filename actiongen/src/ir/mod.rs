//! Intermediate Representation (IR) module.
//!
//! Plain data built from configuration before any syntax is produced. None of
//! these types know how they will be printed; the synthesizer consumes them.

pub mod action;
pub mod definitions;
pub mod module;
pub mod param;

pub use action::ActionDefinition;
pub use definitions::ActionsDefinitions;
pub use module::{ActionConfig, ModuleDefinition};
pub use param::ParamDefinition;
