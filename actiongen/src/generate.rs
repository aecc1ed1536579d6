//! Module generation.
//!
//! Drives the pipeline for a whole module: resolve each binding's config
//! files, load and merge them, synthesize the unit and print it. A module is
//! generated completely or not at all.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::emitter::{CodeGenerator, EmitterConfig, RustEmitter};
use crate::error::Result;
use crate::ir::{ActionsDefinitions, ModuleDefinition};
use crate::loader;
use crate::synth::Synthesizer;

/// One generated source unit, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Unit name from the binding
    pub class_name: String,

    /// Output path relative to the output root
    pub path: PathBuf,

    /// Printed source
    pub content: String,
}

/// Generates every unit of a module.
pub struct ModuleGenerator {
    emitter: Box<dyn CodeGenerator>,
    config: EmitterConfig,
}

impl fmt::Debug for ModuleGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleGenerator")
            .field("emitter", &self.emitter.id())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for ModuleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleGenerator {
    /// Create a generator printing Rust with default settings.
    pub fn new() -> Self {
        Self::with_emitter(RustEmitter::new())
    }

    /// Create a generator with a custom emitter.
    pub fn with_emitter(emitter: impl CodeGenerator + 'static) -> Self {
        Self {
            emitter: Box::new(emitter),
            config: EmitterConfig::default(),
        }
    }

    /// Set the emitter configuration.
    pub fn with_config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate one unit from an in-memory action set.
    pub fn generate_unit(
        &self,
        definitions: &ActionsDefinitions,
        module: &ModuleDefinition,
        class_name: &str,
    ) -> Result<GeneratedUnit> {
        let unit = Synthesizer::unit(definitions, module, class_name)?;
        let content = self.emitter.generate(&unit, &self.config)?;
        let path = module.file_path(class_name, self.emitter.file_extension());

        info!(
            unit = %class_name,
            path = %path.display(),
            actions = definitions.len(),
            emitter = self.emitter.id(),
            "generated unit"
        );

        Ok(GeneratedUnit {
            class_name: class_name.to_string(),
            path,
            content,
        })
    }

    /// Generate every binding of `module`.
    ///
    /// Config files resolve against `base_dir`. The first failing binding
    /// fails the whole module.
    pub fn generate(&self, module: &ModuleDefinition, base_dir: &Path) -> Result<Vec<GeneratedUnit>> {
        module
            .action_config
            .iter()
            .map(|binding| {
                let files = loader::resolve_config_files(base_dir, &binding.config_files)?;
                let definitions = loader::load_action_sets(&files)?;
                self.generate_unit(&definitions, module, &binding.name)
            })
            .collect()
    }

    /// Load a module file and generate it, resolving config files against
    /// the module file's directory.
    pub fn generate_from_file(&self, module_path: impl AsRef<Path>) -> Result<Vec<GeneratedUnit>> {
        let module_path = module_path.as_ref();
        let module = loader::load_module(module_path)?;
        let base_dir = module_path.parent().unwrap_or_else(|| Path::new(""));
        self.generate(&module, base_dir)
    }
}

impl ActionsDefinitions {
    /// Print this set as one Rust unit named `class_name` in `module`.
    pub fn code(&self, module: &ModuleDefinition, class_name: &str) -> Result<String> {
        ModuleGenerator::new()
            .generate_unit(self, module, class_name)
            .map(|unit| unit.content)
    }
}
