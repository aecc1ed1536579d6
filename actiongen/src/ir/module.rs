//! Module IR definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A generation target: where units go and what they share.
///
/// Every `action_config` binding produces one unit named after the binding,
/// placed in `module_package`, with all actions operating over `dataset_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    /// Dataset type every generated action is parameterized by
    pub dataset_type: String,

    /// Imports added to every unit, after each action set's own imports
    #[serde(default)]
    pub imports: Vec<String>,

    /// Dot-separated target package, e.g. `com.acme.actions`
    #[serde(rename = "package")]
    pub module_package: String,

    /// Unit name to config-file bindings
    #[serde(default)]
    pub action_config: Vec<ActionConfig>,
}

/// Binds a unit name to the config files whose actions it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Unit name: the registration type and file name
    pub name: String,

    /// Config file paths or glob patterns, merged in order
    pub config_files: Vec<String>,
}

impl ModuleDefinition {
    /// Create a new module with no imports and no bindings.
    pub fn new(dataset_type: impl Into<String>, module_package: impl Into<String>) -> Self {
        Self {
            dataset_type: dataset_type.into(),
            imports: Vec::new(),
            module_package: module_package.into(),
            action_config: Vec::new(),
        }
    }

    /// Set the imports.
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Add an action-config binding.
    pub fn with_action_config(mut self, config: ActionConfig) -> Self {
        self.action_config.push(config);
        self
    }

    /// Package segments in order. An empty package has no segments.
    pub fn package_segments(&self) -> Vec<&str> {
        if self.module_package.is_empty() {
            Vec::new()
        } else {
            self.module_package.split('.').collect()
        }
    }

    /// Relative output path of a unit: `a.b.c` + `Foo` + `rs` is `a/b/c/Foo.rs`.
    pub fn file_path(&self, unit_name: &str, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.package_segments().into_iter().collect();
        path.push(format!("{}.{}", unit_name, extension));
        path
    }
}

impl ActionConfig {
    /// Create a new binding.
    pub fn new(name: impl Into<String>, config_files: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            config_files: config_files.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path() {
        let module = ModuleDefinition::new("DataFrame", "a.b.c");
        assert_eq!(module.file_path("Foo", "rs"), PathBuf::from("a/b/c/Foo.rs"));
    }

    #[test]
    fn test_file_path_empty_package() {
        let module = ModuleDefinition::new("DataFrame", "");
        assert_eq!(module.file_path("Foo", "rs"), PathBuf::from("Foo.rs"));
        assert!(module.package_segments().is_empty());
    }

    #[test]
    fn test_package_segments() {
        let module = ModuleDefinition::new("DataFrame", "com.acme.actions");
        assert_eq!(module.package_segments(), vec!["com", "acme", "actions"]);
    }

    #[test]
    fn test_module_deserialize() {
        let toml = r#"
dataset_type = "DataFrame"
package = "com.acme"
imports = ["crate::runtime::*"]

[[action_config]]
name = "StringActions"
config_files = ["strings.toml", "more/*.toml"]
"#;
        let module: ModuleDefinition = toml::from_str(toml).unwrap();
        assert_eq!(module.dataset_type, "DataFrame");
        assert_eq!(module.module_package, "com.acme");
        assert_eq!(module.imports, vec!["crate::runtime::*"]);
        assert_eq!(
            module.action_config,
            vec![ActionConfig::new("StringActions", ["strings.toml", "more/*.toml"])]
        );
    }

    #[test]
    fn test_module_deserialize_requires_package() {
        let result: Result<ModuleDefinition, _> = toml::from_str("dataset_type = \"DataFrame\"");
        assert!(result.is_err());
    }
}
