//! Visibility configuration for the Documentation Filter
//!
//! A flat map of named boolean defaults, one `{plural master switch,
//! singular default}` pair per element category, in the camelCase shape
//! users write in their configuration files. Unrecognized keys are
//! ignored; omitted keys default to `true`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Defaults driving the per-element visibility rule.
///
/// The plural switch (`queriesDocumented`, `objectsDocumented`, ...) turns a
/// whole category off regardless of per-element overrides; the singular
/// default (`queryDocumentedDefault`, ...) is what an element without
/// metadata falls back to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    pub queries_documented: bool,
    pub query_documented_default: bool,
    pub mutations_documented: bool,
    pub mutation_documented_default: bool,
    pub subscriptions_documented: bool,
    pub subscription_documented_default: bool,
    pub objects_documented: bool,
    pub object_documented_default: bool,
    pub inputs_documented: bool,
    pub input_documented_default: bool,
    pub unions_documented: bool,
    pub union_documented_default: bool,
    pub enums_documented: bool,
    pub enum_documented_default: bool,
    pub fields_documented: bool,
    pub field_documented_default: bool,
    pub input_fields_documented: bool,
    pub input_field_documented_default: bool,
    pub enum_values_documented: bool,
    pub enum_value_documented_default: bool,
    pub args_documented: bool,
    pub arg_documented_default: bool,
    /// Root-category argument defaults; fall back to `argDocumentedDefault`
    pub query_arg_documented_default: Option<bool>,
    pub mutation_arg_documented_default: Option<bool>,
    pub subscription_arg_documented_default: Option<bool>,
    /// Advisory: cascades always run to preserve referential integrity
    pub hide_queries_with_undocumented_return_type: bool,
    pub hide_mutations_with_undocumented_return_type: bool,
    pub hide_fields_of_undocumented_type: bool,
    /// Key under which per-element metadata was attached
    pub metadata_key: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            queries_documented: true,
            query_documented_default: true,
            mutations_documented: true,
            mutation_documented_default: true,
            subscriptions_documented: true,
            subscription_documented_default: true,
            objects_documented: true,
            object_documented_default: true,
            inputs_documented: true,
            input_documented_default: true,
            unions_documented: true,
            union_documented_default: true,
            enums_documented: true,
            enum_documented_default: true,
            fields_documented: true,
            field_documented_default: true,
            input_fields_documented: true,
            input_field_documented_default: true,
            enum_values_documented: true,
            enum_value_documented_default: true,
            args_documented: true,
            arg_documented_default: true,
            query_arg_documented_default: None,
            mutation_arg_documented_default: None,
            subscription_arg_documented_default: None,
            hide_queries_with_undocumented_return_type: true,
            hide_mutations_with_undocumented_return_type: true,
            hide_fields_of_undocumented_type: true,
            metadata_key: "metadata".to_string(),
        }
    }
}

impl FilterOptions {
    /// Parse options from a JSON value
    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse options from YAML configuration text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::Internal {
            message: format!("invalid filter options: {}", e),
            source: anyhow::Error::new(e),
        })
    }
}
