//! Field definition records as stored in the entity sidecar descriptor.

use crate::{PointsmithError, Result};
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// The only field kind this tool generates.
pub const POINT_KIND: &str = "point";

/// Validation rules the scaffolder understands. Sidecar records written by
/// sibling generators may carry any of these; records written by this tool
/// only ever carry `required`.
pub const SUPPORTED_VALIDATION_RULES: &[&str] = &[
    "required",
    "unique",
    "min",
    "max",
    "minlength",
    "maxlength",
    "minbytes",
    "maxbytes",
    "pattern",
];

/// Rules offered by this tool's wizard, as (label, tag) pairs.
pub const WIZARD_VALIDATION_RULES: &[(&str, &str)] = &[("Required", "required")];

/// One geospatial field attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    /// snake_case form of `name`, used for generated column names.
    pub key: String,
    pub kind: String,
    #[serde(default)]
    pub validation_rules: Vec<String>,
}

impl FieldDefinition {
    /// Build a point field from a validated wizard name.
    pub fn point(name: &str, validation_rules: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            key: name.to_case(Case::Snake),
            kind: POINT_KIND.to_string(),
            validation_rules,
        }
    }

    /// Java member name (`location` -> `locationPoint`).
    pub fn member_name(&self) -> String {
        format!("{}Point", self.name)
    }

    /// Accessor suffix (`location` -> `LocationPoint`).
    pub fn accessor_suffix(&self) -> String {
        ucfirst(&self.member_name())
    }

    /// Database column name (`dropZone` -> `drop_zone_point`).
    pub fn column_name(&self) -> String {
        format!("{}_point", self.key)
    }
}

fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A field record as it appears in the sidecar before validation. Sidecar
/// files are owned by the scaffolder and hand-editable, so nothing about the
/// record shape can be trusted at load time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFieldRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub validation_rules: Option<serde_json::Value>,
}

impl RawFieldRecord {
    /// Validate the record and convert it into a typed definition. `source`
    /// names the sidecar file for error messages.
    pub fn into_field(self, source: &str) -> Result<FieldDefinition> {
        let name = self.name.filter(|n| !n.is_empty()).ok_or_else(|| {
            PointsmithError::Validation(format!("field name is missing in {source}"))
        })?;
        let kind = self.kind.filter(|k| !k.is_empty()).ok_or_else(|| {
            PointsmithError::Validation(format!(
                "field kind is missing in {source} for field `{name}`"
            ))
        })?;
        let validation_rules = match self.validation_rules {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(values)) => {
                let mut rules = Vec::with_capacity(values.len());
                for value in values {
                    match value.as_str() {
                        Some(rule) => rules.push(rule.to_string()),
                        None => {
                            return Err(PointsmithError::Validation(format!(
                                "validationRules must be an array of strings in {source} for field `{name}`"
                            )))
                        }
                    }
                }
                rules
            }
            Some(_) => {
                return Err(PointsmithError::Validation(format!(
                    "validationRules is not an array in {source} for field `{name}`"
                )))
            }
        };
        let key = self
            .key
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| name.to_case(Case::Snake));
        Ok(FieldDefinition {
            name,
            key,
            kind,
            validation_rules,
        })
    }
}

/// Reject any field whose validation rules fall outside the supported
/// vocabulary. Runs after the wizard, before any file is mutated.
pub fn validate_field_set(source: &str, fields: &[FieldDefinition]) -> Result<()> {
    for field in fields {
        for rule in &field.validation_rules {
            if !SUPPORTED_VALIDATION_RULES.contains(&rule.as_str()) {
                return Err(PointsmithError::Validation(format!(
                    "validationRules contains unknown validation rule `{rule}` in {source} for field `{}` (supported rules: {})",
                    field.name,
                    SUPPORTED_VALIDATION_RULES.join(", ")
                )));
            }
        }
    }
    Ok(())
}
