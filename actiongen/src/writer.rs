//! File writer for outputting generated units.
//!
//! Writes units below an output root, with support for dry-run mode and for
//! checking whether files on disk are current.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, WriteError};
use crate::generate::GeneratedUnit;

/// Outcome of writing one unit.
#[derive(Debug)]
pub enum WriteResult {
    /// The unit was written below the output root.
    Written {
        /// Destination of the unit.
        path: PathBuf,
        /// Size of the unit source.
        bytes: usize,
    },
    /// Dry run: the unit was rendered but left off disk.
    DryRun {
        /// Unit source that was not written.
        content: String,
        /// Destination the unit would have been written to.
        path: PathBuf,
    },
}

/// State of a generated file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// File matches the generated content.
    UpToDate,
    /// File exists with different content.
    Stale,
    /// File does not exist.
    Missing,
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write one unit below `root`.
    ///
    /// In dry-run mode, returns the content without touching the disk.
    pub fn write_unit(&self, root: &Path, unit: &GeneratedUnit) -> Result<WriteResult> {
        let path = root.join(&unit.path);

        if self.dry_run {
            debug!(path = %path.display(), "dry run, skipping write");
            return Ok(WriteResult::DryRun {
                content: unit.content.clone(),
                path,
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(&path, &unit.content).map_err(|e| WriteError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(unit = %unit.class_name, path = %path.display(), "wrote unit");

        Ok(WriteResult::Written {
            bytes: unit.content.len(),
            path,
        })
    }

    /// Write units in order, stopping at the first failure.
    pub fn write_all(&self, root: &Path, units: &[GeneratedUnit]) -> Result<Vec<WriteResult>> {
        units.iter().map(|unit| self.write_unit(root, unit)).collect()
    }

    /// Compare a unit with the file on disk, ignoring surrounding whitespace.
    pub fn check(&self, root: &Path, unit: &GeneratedUnit) -> Result<Freshness> {
        let path = root.join(&unit.path);
        if !path.exists() {
            return Ok(Freshness::Missing);
        }

        let existing = std::fs::read_to_string(&path).map_err(|e| WriteError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        if existing.trim() == unit.content.trim() {
            Ok(Freshness::UpToDate)
        } else {
            Ok(Freshness::Stale)
        }
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    /// Destination of the unit, written or not.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } | WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Whether the unit reached the disk.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Bytes of unit source on disk; a dry run writes none.
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unit(path: &str, content: &str) -> GeneratedUnit {
        GeneratedUnit {
            class_name: "CustomActions".to_string(),
            path: PathBuf::from(path),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_write_unit_creates_directories() {
        let dir = TempDir::new().unwrap();
        let unit = unit("com/acme/CustomActions.rs", "pub struct CustomActions;\n");

        let result = FileWriter::new(false).write_unit(dir.path(), &unit).unwrap();

        let path = dir.path().join("com/acme/CustomActions.rs");
        assert!(result.was_written());
        assert_eq!(result.path(), path.as_path());
        assert_eq!(result.bytes(), unit.content.len());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), unit.content);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let unit = unit("CustomActions.rs", "pub struct CustomActions;\n");

        let writer = FileWriter::new(true);
        assert!(writer.is_dry_run());
        let result = writer.write_unit(dir.path(), &unit).unwrap();

        assert!(!result.was_written());
        assert_eq!(result.bytes(), 0);
        assert!(!dir.path().join("CustomActions.rs").exists());
        if let WriteResult::DryRun { content, .. } = result {
            assert_eq!(content, unit.content);
        }
    }

    #[test]
    fn test_write_all_in_order() {
        let dir = TempDir::new().unwrap();
        let units = vec![unit("a/First.rs", "// first\n"), unit("a/Second.rs", "// second\n")];

        let results = FileWriter::new(false).write_all(dir.path(), &units).unwrap();
        let names: Vec<_> = results
            .iter()
            .map(|r| r.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["First.rs", "Second.rs"]);
    }

    #[test]
    fn test_check_freshness() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(false);
        let current = unit("x/Unit.rs", "pub struct Unit;\n");

        assert_eq!(writer.check(dir.path(), &current).unwrap(), Freshness::Missing);

        writer.write_unit(dir.path(), &current).unwrap();
        assert_eq!(writer.check(dir.path(), &current).unwrap(), Freshness::UpToDate);

        let trailing = unit("x/Unit.rs", "pub struct Unit;\n\n\n");
        assert_eq!(writer.check(dir.path(), &trailing).unwrap(), Freshness::UpToDate);

        let changed = unit("x/Unit.rs", "pub struct Other;\n");
        assert_eq!(writer.check(dir.path(), &changed).unwrap(), Freshness::Stale);
    }
}
