use serde::{Deserialize, Serialize};

/// A subtype of an entity kind (e.g. `hero`, `merchant` under `npc`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtype {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_authority: Option<bool>,
}

/// Whether entering a status is good, bad, or neither for the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

/// A lifecycle status an entity of this kind can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    pub name: String,
    pub is_terminal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
    /// Verb used when narrating the transition into this status ("fell", "was founded").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_verb: Option<String>,
}

/// A relationship every entity of this kind is expected to carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredRelationshipRule {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Display hints for editors and the archive viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityKindStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Axis assignment for the semantic plane. Values are axis definition ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticAxes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<String>,
}

/// A named rectangle on the semantic plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticRegion {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `[x_min, y_min, x_max, y_max]` in axis units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[f64; 4]>,
}

/// Layout of an entity kind's 2D/3D semantic plane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticPlane {
    #[serde(default)]
    pub axes: SemanticAxes,
    #[serde(default)]
    pub regions: Vec<SemanticRegion>,
}

/// An entity kind: `npc`, `location`, `faction`, `era`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityKindDefinition {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_framework: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub subtypes: Vec<Subtype>,
    #[serde(default)]
    pub statuses: Vec<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_relationships: Option<Vec<RequiredRelationshipRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EntityKindStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_plane: Option<SemanticPlane>,
}

impl EntityKindDefinition {
    /// A bare kind with no subtypes or statuses.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: None,
            is_framework: None,
            category: None,
            subtypes: Vec::new(),
            statuses: Vec::new(),
            required_relationships: None,
            default_status: None,
            style: None,
            semantic_plane: None,
        }
    }

    pub fn status(&self, id: &str) -> Option<&Status> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn subtype(&self, id: &str) -> Option<&Subtype> {
        self.subtypes.iter().find(|s| s.id == id)
    }

    /// Statuses after which an entity leaves the active world.
    pub fn terminal_statuses(&self) -> impl Iterator<Item = &Status> {
        self.statuses.iter().filter(|s| s.is_terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_era() -> EntityKindDefinition {
        EntityKindDefinition {
            statuses: vec![
                Status {
                    id: "current".to_string(),
                    name: "Current".to_string(),
                    is_terminal: false,
                    polarity: None,
                    transition_verb: None,
                },
                Status {
                    id: "historical".to_string(),
                    name: "Historical".to_string(),
                    is_terminal: true,
                    polarity: Some(Polarity::Neutral),
                    transition_verb: Some("passed into history".to_string()),
                },
            ],
            ..EntityKindDefinition::new("era")
        }
    }

    #[test]
    fn status_lookup() {
        let era = make_era();
        assert!(era.status("current").is_some());
        assert!(era.status("dormant").is_none());
        assert!(era.subtype("anything").is_none());
    }

    #[test]
    fn terminal_statuses_filtered() {
        let era = make_era();
        let terminal: Vec<&str> = era.terminal_statuses().map(|s| s.id.as_str()).collect();
        assert_eq!(terminal, vec!["historical"]);
    }

    #[test]
    fn json_field_names_are_camel_case() {
        let era = make_era();
        let json = serde_json::to_string(&era).unwrap();
        assert!(json.contains("\"isTerminal\":true"));
        assert!(json.contains("\"transitionVerb\""));
        assert!(!json.contains("isFramework"));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let parsed: EntityKindDefinition =
            serde_json::from_str(r#"{ "kind": "npc", "isFramework": false }"#).unwrap();
        assert_eq!(parsed.kind, "npc");
        assert!(parsed.subtypes.is_empty());
        assert!(parsed.statuses.is_empty());
        assert_eq!(parsed.is_framework, Some(false));
    }
}
