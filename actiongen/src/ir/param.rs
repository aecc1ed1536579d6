//! Parameter IR definitions.

use serde::{Deserialize, Serialize};

/// One parameter of a generated action.
///
/// Becomes a field of the generated action type. The flags control the
/// serialization annotation, the SQL-expression marker and whether the value
/// names an input dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDefinition {
    /// Field name in the generated type
    pub name: String,

    /// Type expression text (must parse as a Rust type)
    #[serde(rename = "type")]
    pub param_type: String,

    /// External field name override used when (de)serializing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_name: Option<String>,

    /// Whether the field must be present when deserializing
    #[serde(default)]
    pub is_required: bool,

    /// Whether the value is a SQL expression evaluated downstream
    #[serde(default)]
    pub is_sql_expr: bool,

    /// Whether the value names one input dataset
    #[serde(default, rename = "is_dataset_ref")]
    pub is_dataset_reference: bool,

    /// Whether the value names an optional list of input datasets
    #[serde(default, rename = "is_dataset_ref_list")]
    pub is_dataset_reference_list: bool,
}

impl ParamDefinition {
    /// Create a new parameter with all flags unset.
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            mapped_name: None,
            is_required: false,
            is_sql_expr: false,
            is_dataset_reference: false,
            is_dataset_reference_list: false,
        }
    }

    /// Set the external field name.
    pub fn with_mapped_name(mut self, mapped_name: impl Into<String>) -> Self {
        self.mapped_name = Some(mapped_name.into());
        self
    }

    /// Set whether the parameter is required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.is_required = required;
        self
    }

    /// Set whether the parameter holds a SQL expression.
    pub fn with_sql_expr(mut self, sql_expr: bool) -> Self {
        self.is_sql_expr = sql_expr;
        self
    }

    /// Set whether the parameter names a single input dataset.
    pub fn with_dataset_reference(mut self, reference: bool) -> Self {
        self.is_dataset_reference = reference;
        self
    }

    /// Set whether the parameter names a list of input datasets.
    pub fn with_dataset_reference_list(mut self, reference_list: bool) -> Self {
        self.is_dataset_reference_list = reference_list;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_defaults() {
        let param = ParamDefinition::new("column", "String");
        assert_eq!(param.name, "column");
        assert_eq!(param.param_type, "String");
        assert!(param.mapped_name.is_none());
        assert!(!param.is_required);
        assert!(!param.is_sql_expr);
        assert!(!param.is_dataset_reference);
        assert!(!param.is_dataset_reference_list);
    }

    #[test]
    fn test_param_builder() {
        let param = ParamDefinition::new("input", "String")
            .with_mapped_name("inputAlias")
            .with_required(true)
            .with_dataset_reference(true);
        assert_eq!(param.mapped_name.as_deref(), Some("inputAlias"));
        assert!(param.is_required);
        assert!(param.is_dataset_reference);
    }

    #[test]
    fn test_param_deserialize_uses_config_field_names() {
        let json = r#"{
            "name": "inputs",
            "type": "Option<Vec<String>>",
            "mapped_name": "sources",
            "is_dataset_ref_list": true
        }"#;
        let param: ParamDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(param.param_type, "Option<Vec<String>>");
        assert_eq!(param.mapped_name.as_deref(), Some("sources"));
        assert!(param.is_dataset_reference_list);
        assert!(!param.is_dataset_reference);
        assert!(!param.is_required);
    }
}
