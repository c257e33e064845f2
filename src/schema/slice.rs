use serde::{Deserialize, Serialize};

use super::culture::CultureDefinition;
use super::entity_kind::EntityKindDefinition;
use super::relationship_kind::RelationshipKindDefinition;
use super::tag::TagDefinition;

/// A semantic axis shared by entity kinds' planes, anchored by two tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisDefinition {
    pub id: String,
    pub name: String,
    pub low_tag: String,
    pub high_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The unit of schema composition: a framework baseline, a project's
/// additions and overrides, or the resolved result of merging the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonrySchemaSlice {
    #[serde(default)]
    pub entity_kinds: Vec<EntityKindDefinition>,
    #[serde(default)]
    pub relationship_kinds: Vec<RelationshipKindDefinition>,
    #[serde(default)]
    pub cultures: Vec<CultureDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_registry: Option<Vec<TagDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis_definitions: Option<Vec<AxisDefinition>>,
    /// Editor layout state. Opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_config: Option<serde_json::Value>,
}

impl CanonrySchemaSlice {
    pub fn entity_kind(&self, kind: &str) -> Option<&EntityKindDefinition> {
        self.entity_kinds.iter().find(|k| k.kind == kind)
    }

    pub fn relationship_kind(&self, kind: &str) -> Option<&RelationshipKindDefinition> {
        self.relationship_kinds.iter().find(|k| k.kind == kind)
    }

    pub fn culture(&self, id: &str) -> Option<&CultureDefinition> {
        self.cultures.iter().find(|c| c.id == id)
    }

    pub fn tag(&self, tag: &str) -> Option<&TagDefinition> {
        self.tag_registry.as_ref()?.iter().find(|t| t.tag == tag)
    }

    /// Returns true if the slice carries no definitions at all.
    pub fn is_empty(&self) -> bool {
        self.entity_kinds.is_empty()
            && self.relationship_kinds.is_empty()
            && self.cultures.is_empty()
            && self.tag_registry.as_ref().map_or(true, Vec::is_empty)
            && self.axis_definitions.as_ref().map_or(true, Vec::is_empty)
    }
}
