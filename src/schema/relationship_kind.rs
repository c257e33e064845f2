use serde::{Deserialize, Serialize};

use super::entity_kind::Polarity;

/// Verbs used when narrating a relationship forming or ending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipVerbs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<String>,
}

/// A typed edge kind between entities.
///
/// An empty `src_kinds` / `dst_kinds` list means the endpoint is
/// unrestricted: any entity kind may appear there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipKindDefinition {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_framework: Option<bool>,
    #[serde(default)]
    pub src_kinds: Vec<String>,
    #[serde(default)]
    pub dst_kinds: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetric: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Whether the simulation may prune weak instances of this relationship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbs: Option<RelationshipVerbs>,
}

impl RelationshipKindDefinition {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            description: None,
            is_framework: None,
            src_kinds: Vec::new(),
            dst_kinds: Vec::new(),
            symmetric: None,
            category: None,
            cullable: None,
            decay_rate: None,
            polarity: None,
            verbs: None,
        }
    }

    /// Returns true if an entity of `kind` may be the source of this relationship.
    pub fn allows_source(&self, kind: &str) -> bool {
        self.src_kinds.is_empty() || self.src_kinds.iter().any(|k| k == kind)
    }

    /// Returns true if an entity of `kind` may be the destination of this relationship.
    pub fn allows_destination(&self, kind: &str) -> bool {
        self.dst_kinds.is_empty() || self.dst_kinds.iter().any(|k| k == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_endpoints_are_unrestricted() {
        let rel = RelationshipKindDefinition::new("active_during");
        assert!(rel.allows_source("npc"));
        assert!(rel.allows_destination("anything"));
    }

    #[test]
    fn restricted_endpoints() {
        let rel = RelationshipKindDefinition {
            src_kinds: vec!["npc".to_string()],
            dst_kinds: vec!["era".to_string()],
            ..RelationshipKindDefinition::new("lived_during")
        };
        assert!(rel.allows_source("npc"));
        assert!(!rel.allows_source("faction"));
        assert!(rel.allows_destination("era"));
        assert!(!rel.allows_destination("npc"));
    }

    #[test]
    fn parses_editor_json() {
        let rel: RelationshipKindDefinition = serde_json::from_str(
            r#"{ "kind": "rival_of", "srcKinds": ["npc"], "dstKinds": ["npc"],
                 "symmetric": true, "decayRate": 0.05, "polarity": "negative" }"#,
        )
        .unwrap();
        assert_eq!(rel.symmetric, Some(true));
        assert_eq!(rel.decay_rate, Some(0.05));
        assert_eq!(rel.polarity, Some(Polarity::Negative));
    }
}
