use serde::{Deserialize, Serialize};

/// Prefix marking a category pattern in an exclusion rule (`cat:document`).
pub const CATEGORY_PREFIX: &str = "cat:";

/// An entry of the artistic style catalog (`watercolor`, `manuscript-page`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtisticStyle {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_fragment: Option<String>,
}

/// An entry of the composition style catalog (`portrait`, `establishing-shot`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionStyle {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitable_for_kinds: Option<Vec<String>>,
}

/// A rule barring style/composition pairs from random selection.
///
/// `styles` and `compositions` mix literal ids with `cat:<category>`
/// patterns. `allow` lists `[style, composition]` pairs exempt from this
/// rule only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomExclusionRule {
    pub reason: String,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub compositions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<(String, String)>>,
}

impl RandomExclusionRule {
    /// Returns true if `(style_id, composition_id)` is in this rule's allow list.
    pub fn allows(&self, style_id: &str, composition_id: &str) -> bool {
        self.allow.as_ref().is_some_and(|pairs| {
            pairs
                .iter()
                .any(|(s, c)| s == style_id && c == composition_id)
        })
    }
}

/// Splits a rule entry into a category pattern or a literal id.
pub(crate) fn category_pattern(entry: &str) -> Option<&str> {
    entry.strip_prefix(CATEGORY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_pairs_from_json_arrays() {
        let rule: RandomExclusionRule = serde_json::from_str(
            r#"{ "reason": "documents are flat", "styles": ["cat:document"],
                 "compositions": ["cat:character"],
                 "allow": [["museum-catalog", "portrait"]] }"#,
        )
        .unwrap();
        assert!(rule.allows("museum-catalog", "portrait"));
        assert!(!rule.allows("portrait", "museum-catalog"));
        assert!(!rule.allows("manuscript-page", "portrait"));
    }

    #[test]
    fn category_pattern_split() {
        assert_eq!(category_pattern("cat:document"), Some("document"));
        assert_eq!(category_pattern("watercolor"), None);
        assert_eq!(category_pattern("cat:"), Some(""));
    }
}
