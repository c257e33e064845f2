use serde::{Deserialize, Serialize};

/// How often a tag should appear across generated entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// A registered tag with its cross-references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<TagRarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_framework: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_kinds: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_tags: Option<Vec<String>>,
}

impl TagDefinition {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            category: None,
            rarity: None,
            description: None,
            is_framework: None,
            usage_count: None,
            templates: None,
            entity_kinds: None,
            related_tags: None,
            conflicting_tags: None,
        }
    }

    /// Returns true if this tag declares `other` as conflicting.
    pub fn conflicts_with(&self, other: &str) -> bool {
        self.conflicting_tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == other))
    }

    /// Returns true if the tag may be applied to entities of `kind`.
    /// No `entity_kinds` list means any kind.
    pub fn applies_to(&self, kind: &str) -> bool {
        match &self.entity_kinds {
            Some(kinds) if !kinds.is_empty() => kinds.iter().any(|k| k == kind),
            _ => true,
        }
    }
}
