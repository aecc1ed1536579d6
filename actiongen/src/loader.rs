//! Configuration loading.
//!
//! Module and action-set records are read from TOML or JSON files, chosen by
//! extension. Config-file patterns in a module resolve against the module
//! file's directory.

use crate::error::LoadError;
use crate::ir::{ActionsDefinitions, ModuleDefinition};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load one action set.
pub fn load_actions(path: impl AsRef<Path>) -> Result<ActionsDefinitions, LoadError> {
    let path = path.as_ref();
    let definitions: ActionsDefinitions = read_record(path)?;
    debug!(
        path = %path.display(),
        definitions = definitions.len(),
        imports = definitions.imports.len(),
        "loaded action definitions"
    );
    Ok(definitions)
}

/// Load several action sets and merge them left to right.
pub fn load_action_sets<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<ActionsDefinitions, LoadError> {
    paths
        .into_iter()
        .try_fold(ActionsDefinitions::default(), |merged, path| {
            Ok(merged.merge(&load_actions(path)?))
        })
}

/// Load a module definition.
pub fn load_module(path: impl AsRef<Path>) -> Result<ModuleDefinition, LoadError> {
    let path = path.as_ref();
    let module: ModuleDefinition = read_record(path)?;
    debug!(
        path = %path.display(),
        package = %module.module_package,
        bindings = module.action_config.len(),
        "loaded module definition"
    );
    Ok(module)
}

/// Resolve config-file entries against `base_dir`.
///
/// Entries containing glob metacharacters are expanded and sorted; a pattern
/// matching nothing is an error. Plain entries are kept as they are, so a
/// missing file is reported when it is loaded.
pub fn resolve_config_files(
    base_dir: &Path,
    patterns: &[String],
) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            files.push(base_dir.join(pattern));
            continue;
        }

        let full_pattern = if Path::new(pattern).is_absolute() {
            PathBuf::from(pattern)
        } else {
            PathBuf::from(glob::Pattern::escape(&base_dir.to_string_lossy())).join(pattern)
        };

        let entries = glob::glob(&full_pattern.to_string_lossy())
            .map_err(|e| LoadError::invalid_pattern(pattern.as_str(), e.to_string()))?;

        let mut matched = entries
            .map(|entry| {
                entry.map_err(|e| {
                    let path = e.path().to_path_buf();
                    LoadError::io(path, e.into_error())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if matched.is_empty() {
            return Err(LoadError::NoMatch {
                pattern: pattern.clone(),
            });
        }

        matched.sort();
        debug!(pattern = %pattern, matched = matched.len(), "expanded config file pattern");
        files.extend(matched);
    }

    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;

    match format {
        ConfigFormat::Toml => {
            toml::from_str(&content).map_err(|e| LoadError::invalid_toml(path, e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(&content).map_err(|e| LoadError::invalid_json(path, e.to_string()))
        }
    }
}
