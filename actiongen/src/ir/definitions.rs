//! Action set IR definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use super::action::ActionDefinition;

/// A set of actions plus the imports their bodies need.
///
/// Loaded from one config source; several sources combine through
/// [`ActionsDefinitions::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsDefinitions {
    /// Actions in declaration order
    pub definitions: Vec<ActionDefinition>,

    /// Imports needed by the action bodies
    #[serde(default)]
    pub imports: Vec<String>,
}

impl ActionsDefinitions {
    /// Create a new action set.
    pub fn new(definitions: Vec<ActionDefinition>) -> Self {
        Self {
            definitions,
            imports: Vec::new(),
        }
    }

    /// Set the imports.
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Combine two sets.
    ///
    /// Definitions and imports are concatenated (`self` first) and then
    /// de-duplicated by structural equality, keeping first-seen order. Two
    /// different definitions sharing an id are both kept.
    pub fn merge(&self, other: &ActionsDefinitions) -> ActionsDefinitions {
        let merged = ActionsDefinitions {
            definitions: distinct(self.definitions.iter().chain(&other.definitions)),
            imports: distinct(self.imports.iter().chain(&other.imports)),
        };

        tracing::trace!(
            left = self.definitions.len(),
            right = other.definitions.len(),
            merged = merged.definitions.len(),
            "merged action definitions"
        );

        merged
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the set has no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn distinct<'a, T>(items: impl Iterator<Item = &'a T>) -> Vec<T>
where
    T: Eq + Hash + Clone + 'a,
{
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(*item)).cloned().collect()
}
