/// Style exclusion resolver: decides which (artistic style, composition)
/// pairs random selection must skip.
///
/// Rules only gate the random path. A user picking a pair by hand is never
/// restricted; callers enforce that by only consulting this module when
/// choosing at random.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::schema::style::{
    category_pattern, ArtisticStyle, CompositionStyle, RandomExclusionRule,
};

#[derive(Debug, Error)]
pub enum ExclusionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns true if random selection must not produce this pair.
///
/// A rule matches when the style is in its expanded `styles` set and the
/// composition in its expanded `compositions` set. A pair in the rule's
/// `allow` list escapes that rule only; any other matching rule still
/// excludes it. Category patterns are expanded against the catalogs on
/// every call; use [`ExclusionIndex`] for repeated checks.
pub fn is_excluded_pair(
    style_id: &str,
    composition_id: &str,
    rules: &[RandomExclusionRule],
    artistic_styles: &[ArtisticStyle],
    composition_styles: &[CompositionStyle],
) -> bool {
    for rule in rules {
        let style_in = rule
            .styles
            .iter()
            .any(|entry| style_entry_matches(entry, style_id, artistic_styles));
        if !style_in {
            continue;
        }
        let composition_in = rule
            .compositions
            .iter()
            .any(|entry| composition_entry_matches(entry, composition_id, composition_styles));
        if !composition_in {
            continue;
        }
        if rule.allows(style_id, composition_id) {
            continue;
        }
        tracing::trace!(
            target: "canonry::exclusion",
            style = style_id,
            composition = composition_id,
            reason = %rule.reason,
            "pair excluded"
        );
        return true;
    }
    false
}

/// Styles that may be randomly paired with `composition_id`.
pub fn filter_styles_for_composition<'a>(
    composition_id: &str,
    rules: &[RandomExclusionRule],
    artistic_styles: &'a [ArtisticStyle],
    composition_styles: &[CompositionStyle],
) -> Vec<&'a ArtisticStyle> {
    artistic_styles
        .iter()
        .filter(|style| {
            !is_excluded_pair(
                &style.id,
                composition_id,
                rules,
                artistic_styles,
                composition_styles,
            )
        })
        .collect()
}

/// Compositions that may be randomly paired with `style_id`.
pub fn filter_compositions_for_style<'a>(
    style_id: &str,
    rules: &[RandomExclusionRule],
    artistic_styles: &[ArtisticStyle],
    composition_styles: &'a [CompositionStyle],
) -> Vec<&'a CompositionStyle> {
    composition_styles
        .iter()
        .filter(|composition| {
            !is_excluded_pair(
                style_id,
                &composition.id,
                rules,
                artistic_styles,
                composition_styles,
            )
        })
        .collect()
}

fn style_entry_matches(entry: &str, style_id: &str, styles: &[ArtisticStyle]) -> bool {
    match category_pattern(entry) {
        Some(category) => styles
            .iter()
            .any(|s| s.id == style_id && s.category == category),
        None => entry == style_id,
    }
}

fn composition_entry_matches(
    entry: &str,
    composition_id: &str,
    compositions: &[CompositionStyle],
) -> bool {
    match category_pattern(entry) {
        Some(category) => compositions
            .iter()
            .any(|c| c.id == composition_id && c.target_category.as_deref() == Some(category)),
        None => entry == composition_id,
    }
}

/// A rule with its patterns expanded to concrete ids.
#[derive(Debug, Clone)]
struct IndexedRule {
    reason: String,
    styles: FxHashSet<String>,
    compositions: FxHashSet<String>,
    /// style id → compositions exempt from this rule.
    allow: FxHashMap<String, FxHashSet<String>>,
}

impl IndexedRule {
    fn matches(&self, style_id: &str, composition_id: &str) -> bool {
        self.styles.contains(style_id)
            && self.compositions.contains(composition_id)
            && !self
                .allow
                .get(style_id)
                .is_some_and(|c| c.contains(composition_id))
    }
}

/// Exclusion rules with category patterns expanded once against fixed
/// catalogs. Answers exactly as [`is_excluded_pair`] does for the same
/// rules and catalogs.
#[derive(Debug, Clone, Default)]
pub struct ExclusionIndex {
    rules: Vec<IndexedRule>,
}

impl ExclusionIndex {
    pub fn new(
        rules: &[RandomExclusionRule],
        artistic_styles: &[ArtisticStyle],
        composition_styles: &[CompositionStyle],
    ) -> Self {
        let mut styles_by_category: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for style in artistic_styles {
            styles_by_category
                .entry(style.category.as_str())
                .or_default()
                .push(style.id.as_str());
        }
        let mut compositions_by_category: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for composition in composition_styles {
            if let Some(category) = composition.target_category.as_deref() {
                compositions_by_category
                    .entry(category)
                    .or_default()
                    .push(composition.id.as_str());
            }
        }

        let rules = rules
            .iter()
            .map(|rule| {
                let mut allow: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
                for (style, composition) in rule.allow.iter().flatten() {
                    allow
                        .entry(style.clone())
                        .or_default()
                        .insert(composition.clone());
                }
                IndexedRule {
                    reason: rule.reason.clone(),
                    styles: expand(&rule.styles, &styles_by_category),
                    compositions: expand(&rule.compositions, &compositions_by_category),
                    allow,
                }
            })
            .collect();

        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_excluded(&self, style_id: &str, composition_id: &str) -> bool {
        self.excluding_reason(style_id, composition_id).is_some()
    }

    /// Reason of the first rule excluding the pair, if any.
    pub fn excluding_reason(&self, style_id: &str, composition_id: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(style_id, composition_id))
            .map(|rule| rule.reason.as_str())
    }

    pub fn filter_styles_for_composition<'a>(
        &self,
        composition_id: &str,
        artistic_styles: &'a [ArtisticStyle],
    ) -> Vec<&'a ArtisticStyle> {
        artistic_styles
            .iter()
            .filter(|s| !self.is_excluded(&s.id, composition_id))
            .collect()
    }

    pub fn filter_compositions_for_style<'a>(
        &self,
        style_id: &str,
        composition_styles: &'a [CompositionStyle],
    ) -> Vec<&'a CompositionStyle> {
        composition_styles
            .iter()
            .filter(|c| !self.is_excluded(style_id, &c.id))
            .collect()
    }
}

fn expand(entries: &[String], by_category: &FxHashMap<&str, Vec<&str>>) -> FxHashSet<String> {
    let mut ids = FxHashSet::default();
    for entry in entries {
        match category_pattern(entry) {
            Some(category) => {
                if let Some(members) = by_category.get(category) {
                    ids.extend(members.iter().map(|id| id.to_string()));
                }
            }
            None => {
                ids.insert(entry.clone());
            }
        }
    }
    ids
}

/// Pick a random (style, composition) pair that no rule excludes, uniformly
/// over all allowed pairs. `None` if a catalog is empty or every pair is
/// excluded.
pub fn pick_random_pair<'a>(
    index: &ExclusionIndex,
    artistic_styles: &'a [ArtisticStyle],
    composition_styles: &'a [CompositionStyle],
    rng: &mut StdRng,
) -> Option<(&'a ArtisticStyle, &'a CompositionStyle)> {
    let allowed: Vec<(&ArtisticStyle, &CompositionStyle)> = artistic_styles
        .iter()
        .flat_map(|s| composition_styles.iter().map(move |c| (s, c)))
        .filter(|(s, c)| !index.is_excluded(&s.id, &c.id))
        .collect();
    if allowed.is_empty() {
        tracing::debug!(
            target: "canonry::exclusion",
            styles = artistic_styles.len(),
            compositions = composition_styles.len(),
            "no allowed style/composition pair"
        );
    }
    allowed.choose(rng).copied()
}

/// Random composition to go with a style the user chose by hand.
pub fn pick_random_composition<'a>(
    index: &ExclusionIndex,
    style_id: &str,
    composition_styles: &'a [CompositionStyle],
    rng: &mut StdRng,
) -> Option<&'a CompositionStyle> {
    index
        .filter_compositions_for_style(style_id, composition_styles)
        .choose(rng)
        .copied()
}

/// Random style to go with a composition the user chose by hand.
pub fn pick_random_style<'a>(
    index: &ExclusionIndex,
    composition_id: &str,
    artistic_styles: &'a [ArtisticStyle],
    rng: &mut StdRng,
) -> Option<&'a ArtisticStyle> {
    index
        .filter_styles_for_composition(composition_id, artistic_styles)
        .choose(rng)
        .copied()
}

/// A suspicious entry in a rule set. Lints never change resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLint {
    /// A style entry that names no catalog style or empty category.
    UnmatchedStyle { rule: usize, entry: String },
    /// A composition entry that names no catalog composition or empty category.
    UnmatchedComposition { rule: usize, entry: String },
    /// An allow pair the rule would not exclude anyway.
    RedundantAllow {
        rule: usize,
        style: String,
        composition: String,
    },
}

impl fmt::Display for RuleLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedStyle { rule, entry } => {
                write!(f, "rule #{rule}: style entry '{entry}' matches no artistic style")
            }
            Self::UnmatchedComposition { rule, entry } => write!(
                f,
                "rule #{rule}: composition entry '{entry}' matches no composition style"
            ),
            Self::RedundantAllow {
                rule,
                style,
                composition,
            } => write!(
                f,
                "rule #{rule}: allow pair ('{style}', '{composition}') is not excluded by this rule"
            ),
        }
    }
}

/// Check rules against the catalogs for entries that can never match.
pub fn lint_rules(
    rules: &[RandomExclusionRule],
    artistic_styles: &[ArtisticStyle],
    composition_styles: &[CompositionStyle],
) -> Vec<RuleLint> {
    let mut lints = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        for entry in &rule.styles {
            let hit = artistic_styles
                .iter()
                .any(|s| style_entry_matches(entry, &s.id, artistic_styles));
            if !hit {
                lints.push(RuleLint::UnmatchedStyle {
                    rule: i,
                    entry: entry.clone(),
                });
            }
        }
        for entry in &rule.compositions {
            let hit = composition_styles
                .iter()
                .any(|c| composition_entry_matches(entry, &c.id, composition_styles));
            if !hit {
                lints.push(RuleLint::UnmatchedComposition {
                    rule: i,
                    entry: entry.clone(),
                });
            }
        }
        for (style, composition) in rule.allow.iter().flatten() {
            let covered = rule
                .styles
                .iter()
                .any(|e| style_entry_matches(e, style, artistic_styles))
                && rule
                    .compositions
                    .iter()
                    .any(|e| composition_entry_matches(e, composition, composition_styles));
            if !covered {
                lints.push(RuleLint::RedundantAllow {
                    rule: i,
                    style: style.clone(),
                    composition: composition.clone(),
                });
            }
        }
    }
    lints
}

/// Load exclusion rules from a RON or JSON list.
pub fn load_rules(path: &Path) -> Result<Vec<RandomExclusionRule>, ExclusionError> {
    load_list(path)
}

/// Load the artistic style catalog from a RON or JSON list.
pub fn load_artistic_styles(path: &Path) -> Result<Vec<ArtisticStyle>, ExclusionError> {
    load_list(path)
}

/// Load the composition style catalog from a RON or JSON list.
pub fn load_composition_styles(path: &Path) -> Result<Vec<CompositionStyle>, ExclusionError> {
    load_list(path)
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExclusionError> {
    let contents = std::fs::read_to_string(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("json") {
        Ok(serde_json::from_str(&contents)?)
    } else {
        Ok(ron::from_str(&contents)?)
    }
}
