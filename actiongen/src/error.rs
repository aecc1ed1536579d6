//! Error types for action generation.
//!
//! Every failure is fatal for the module being generated: nothing is retried
//! and no partial output is produced.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A configured source fragment failed to parse.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A configuration source could not be read or decoded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Generated output could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// The assembled tokens did not form a valid source file.
    #[error("Generated code for '{unit}' is not a valid source file: {message}")]
    Emit { unit: String, message: String },
}

/// The kind of source fragment that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// A parameter's type expression.
    ParamType,
    /// A parameter's field name.
    ParamName,
    /// An action's body expression.
    Expression,
    /// An import declaration.
    Import,
    /// The module's dataset type.
    DatasetType,
    /// A generated type or module name.
    ClassName,
    /// A segment of the target package.
    Package,
    /// An extra derive path from the emitter configuration.
    Derive,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FragmentKind::ParamType => "parameter type",
            FragmentKind::ParamName => "parameter name",
            FragmentKind::Expression => "body expression",
            FragmentKind::Import => "import",
            FragmentKind::DatasetType => "dataset type",
            FragmentKind::ClassName => "class name",
            FragmentKind::Package => "package",
            FragmentKind::Derive => "derive path",
        };
        f.write_str(name)
    }
}

/// A type, import, identifier or body expression that is not valid syntax.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Syntax error in {kind} of '{owner}': {message}\n  source: {source_text}")]
pub struct SyntaxError {
    /// Which fragment failed.
    pub kind: FragmentKind,
    /// The action, parameter or module the fragment belongs to.
    pub owner: String,
    /// The offending text.
    pub source_text: String,
    /// Parser message.
    pub message: String,
}

impl SyntaxError {
    /// Create a syntax error for a fragment.
    pub fn new(
        kind: FragmentKind,
        owner: impl Into<String>,
        source_text: impl Into<String>,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            kind,
            owner: owner.into(),
            source_text: source_text.into(),
            message: error.to_string(),
        }
    }
}

/// Error reading a configuration source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading a file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML syntax or shape.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid JSON syntax or shape.
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// File extension is neither `.toml` nor `.json`.
    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Invalid glob pattern.
    #[error("Invalid config file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Glob pattern matched no files.
    #[error("No config files match '{pattern}'")]
    NoMatch { pattern: String },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read an existing file for comparison.
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Create an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid JSON error.
    pub fn invalid_json(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_names_owner_and_kind() {
        let err = SyntaxError::new(FragmentKind::ParamType, "to_upper.column", "Vec<", "oops");
        let text = err.to_string();
        assert!(text.contains("parameter type"));
        assert!(text.contains("'to_upper.column'"));
        assert!(text.contains("Vec<"));
        assert!(text.contains("oops"));
    }

    #[test]
    fn test_error_is_transparent_over_syntax() {
        let err: Error = SyntaxError::new(FragmentKind::Import, "m", "use ;", "bad").into();
        assert!(err.to_string().starts_with("Syntax error in import"));
    }

    #[test]
    fn test_load_error_constructors() {
        let err = LoadError::invalid_toml("a.toml", "missing field `id`");
        assert_eq!(err.to_string(), "Invalid TOML in a.toml: missing field `id`");

        let err = LoadError::invalid_pattern("[", "unclosed");
        assert!(err.to_string().contains("'['"));
    }
}
