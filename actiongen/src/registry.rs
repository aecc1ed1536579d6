//! Registry generation.
//!
//! The registry pairs each generated action type with its literal id so the
//! runtime can resolve a serialized action back to its type.

use std::collections::HashMap;

use proc_macro2::Ident;
use tracing::warn;

use crate::synth::{ClassDecl, NamedTypeEntry, RegistryDecl};

/// Builds the registration type of a unit.
pub struct RegistryGenerator;

impl RegistryGenerator {
    /// Discriminator pair for one class.
    pub fn entry(class: &ClassDecl) -> NamedTypeEntry {
        NamedTypeEntry {
            class: class.ident.clone(),
            discriminator: class.discriminator.clone(),
        }
    }

    /// Build the registry for `classes`, one entry each, in order.
    ///
    /// Duplicate discriminators are kept and reported with a warning.
    pub fn build(
        ident: Ident,
        companion: Ident,
        dataset_type: syn::Type,
        classes: &[ClassDecl],
    ) -> RegistryDecl {
        let entries: Vec<NamedTypeEntry> = classes.iter().map(Self::entry).collect();

        for discriminator in Self::duplicate_discriminators(&entries) {
            warn!(
                registry = %ident,
                discriminator = %discriminator,
                "duplicate action id; the runtime will see ambiguous discriminators"
            );
        }

        RegistryDecl {
            ident,
            companion,
            dataset_type,
            entries,
        }
    }

    /// Discriminators that occur more than once, in first-seen order.
    pub fn duplicate_discriminators(entries: &[NamedTypeEntry]) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in entries {
            *counts.entry(entry.discriminator.as_str()).or_default() += 1;
        }

        let mut duplicates: Vec<&str> = Vec::new();
        for entry in entries {
            let id = entry.discriminator.as_str();
            if counts[id] > 1 && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}
