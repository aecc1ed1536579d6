//! Action IR definitions.

use serde::{Deserialize, Serialize};

use super::param::ParamDefinition;

/// One generated action.
///
/// The `id` doubles as the discriminator string in the registry and as the
/// source of the generated type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Discriminator, e.g. `to_upper`
    pub id: String,

    /// Parameters in declaration order
    #[serde(default)]
    pub params: Vec<ParamDefinition>,

    /// Body of the transform function
    pub expr: String,

    /// Whether the action produces several datasets
    #[serde(default, rename = "is_multi_out")]
    pub is_multi_output: bool,

    /// Doc comment for the generated type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionDefinition {
    /// Create a new single-output action with no parameters.
    pub fn new(id: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: Vec::new(),
            expr: expr.into(),
            is_multi_output: false,
            description: None,
        }
    }

    /// Set the parameters.
    pub fn with_params(mut self, params: Vec<ParamDefinition>) -> Self {
        self.params = params;
        self
    }

    /// Append one parameter.
    pub fn add_param(mut self, param: ParamDefinition) -> Self {
        self.params.push(param);
        self
    }

    /// Set whether the action is multi-output.
    pub fn with_multi_output(mut self, multi_output: bool) -> Self {
        self.is_multi_output = multi_output;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name of the generated type.
    ///
    /// Splits the id on `_`, upper-cases the first character of every segment
    /// and appends `Action`: `to_upper` becomes `ToUpperAction`.
    pub fn class_name(&self) -> String {
        let mut name: String = self.id.split('_').map(capitalize).collect();
        name.push_str("Action");
        name
    }

    /// Parameters naming a single input dataset, in declaration order.
    pub fn single_refs(&self) -> impl Iterator<Item = &ParamDefinition> {
        self.params.iter().filter(|p| p.is_dataset_reference)
    }

    /// Parameters naming a list of input datasets, in declaration order.
    pub fn list_refs(&self) -> impl Iterator<Item = &ParamDefinition> {
        self.params.iter().filter(|p| p.is_dataset_reference_list)
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
