//! Code generator trait definition.
//!
//! Syntax nodes hold what a unit contains; a `CodeGenerator` decides how it is
//! printed.

use crate::error::Result;
use crate::synth::CompilationUnit;

/// Trait for unit printers.
///
/// # Example
///
/// ```rust,ignore
/// use actiongen::emitter::{CodeGenerator, EmitterConfig};
/// use actiongen::synth::CompilationUnit;
///
/// struct Outline;
///
/// impl CodeGenerator for Outline {
///     fn id(&self) -> &'static str { "outline" }
///     fn name(&self) -> &'static str { "Action Outline" }
///     fn file_extension(&self) -> &'static str { "txt" }
///
///     fn generate(&self, unit: &CompilationUnit, _config: &EmitterConfig) -> actiongen::Result<String> {
///         Ok(unit.registry.entries.iter().map(|e| e.discriminator.clone()).collect::<Vec<_>>().join("\n"))
///     }
/// }
/// ```
pub trait CodeGenerator: Send + Sync {
    /// Short lowercase identifier, e.g. `"rust"`.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Extension of generated files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Print one compilation unit.
    fn generate(&self, unit: &CompilationUnit, config: &EmitterConfig) -> Result<String>;
}

/// Emitter configuration options.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Whether to emit doc comments on generated types
    pub generate_docs: bool,

    /// Extra derive paths added to every generated action type
    pub extra_derives: Vec<String>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            extra_derives: Vec::new(),
        }
    }
}

impl EmitterConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to emit doc comments.
    pub fn with_generate_docs(mut self, generate_docs: bool) -> Self {
        self.generate_docs = generate_docs;
        self
    }

    /// Add an extra derive path, e.g. `Eq` or `::schemars::JsonSchema`.
    pub fn with_extra_derive(mut self, path: impl Into<String>) -> Self {
        self.extra_derives.push(path.into());
        self
    }
}
