use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a culture's members tend to sit on an entity kind's semantic plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBias {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// A culture. Naming and visual payloads belong to the naming and style
/// editors; this crate carries them through merges untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CultureDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_framework: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Keyed by entity kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_biases: Option<BTreeMap<String, AxisBias>>,
    /// Keyed by entity kind; values are semantic region ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_regions: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<serde_json::Value>,
}

impl CultureDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            is_framework: None,
            color: None,
            axis_biases: None,
            home_regions: None,
            naming: None,
            visual: None,
        }
    }

    pub fn axis_bias(&self, kind: &str) -> Option<AxisBias> {
        self.axis_biases.as_ref()?.get(kind).copied()
    }
}
