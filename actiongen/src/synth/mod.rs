//! Syntax synthesis.
//!
//! Turns IR definitions into a tree of parsed syntax nodes, ready for an
//! emitter to print.

mod nodes;
mod synthesizer;

pub use nodes::{
    AliasExpr, ClassDecl, CompanionDecl, CompilationUnit, FieldDecl, ImportDecl, NamedTypeEntry,
    OutputArity, PackageRef, RegistryDecl, SerdeAnnotation,
};
pub use synthesizer::Synthesizer;
