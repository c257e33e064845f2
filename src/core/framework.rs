/// Framework baseline: the embedded read-only schema every project extends,
/// plus slice loading and framework-id guards.
use once_cell::sync::OnceCell;
use std::path::Path;
use thiserror::Error;

use crate::core::merge::merge_framework_schema;
use crate::schema::slice::CanonrySchemaSlice;

const BASELINE_RON: &str = include_str!("../../framework_data/baseline.ron");

static BASELINE: OnceCell<CanonrySchemaSlice> = OnceCell::new();

#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The framework baseline shipped with the crate, parsed on first use.
pub fn framework_baseline() -> Result<&'static CanonrySchemaSlice, FrameworkError> {
    BASELINE.get_or_try_init(|| parse_slice_ron(BASELINE_RON))
}

/// Merge a project slice over the embedded framework baseline.
pub fn resolve_project_schema(
    project: &CanonrySchemaSlice,
) -> Result<CanonrySchemaSlice, FrameworkError> {
    Ok(merge_framework_schema(framework_baseline()?, project))
}

/// Parse a schema slice from a RON string.
pub fn parse_slice_ron(input: &str) -> Result<CanonrySchemaSlice, FrameworkError> {
    Ok(ron::from_str(input)?)
}

/// Parse a schema slice from editor JSON.
pub fn parse_slice_json(input: &str) -> Result<CanonrySchemaSlice, FrameworkError> {
    Ok(serde_json::from_str(input)?)
}

/// Load a schema slice from disk. `.json` files are read as JSON,
/// anything else as RON.
pub fn load_slice(path: &Path) -> Result<CanonrySchemaSlice, FrameworkError> {
    let contents = std::fs::read_to_string(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("json") {
        parse_slice_json(&contents)
    } else {
        parse_slice_ron(&contents)
    }
}

/// Returns true if `kind` names a framework entity kind.
pub fn is_framework_entity_kind(kind: &str) -> bool {
    framework_baseline().is_ok_and(|b| b.entity_kind(kind).is_some())
}

/// Returns true if `kind` names a framework relationship kind.
pub fn is_framework_relationship_kind(kind: &str) -> bool {
    framework_baseline().is_ok_and(|b| b.relationship_kind(kind).is_some())
}

/// Returns true if `id` names a framework culture.
pub fn is_framework_culture(id: &str) -> bool {
    framework_baseline().is_ok_and(|b| b.culture(id).is_some())
}

/// Returns true if `tag` names a framework tag.
pub fn is_framework_tag(tag: &str) -> bool {
    framework_baseline().is_ok_and(|b| b.tag(tag).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_baseline_parses() {
        let baseline = framework_baseline().unwrap();
        let era = baseline.entity_kind("era").unwrap();
        let statuses: Vec<&str> = era.statuses.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(statuses, vec!["current", "future", "historical"]);
        assert!(baseline.relationship_kind("active_during").is_some());
        assert!(baseline.culture("world").is_some());
        assert!(baseline.tag("temporal").is_some());
    }

    #[test]
    fn baseline_relationship_endpoints() {
        let baseline = framework_baseline().unwrap();
        let active = baseline.relationship_kind("active_during").unwrap();
        assert!(active.src_kinds.is_empty());
        assert_eq!(active.dst_kinds, vec!["era".to_string()]);
        assert_eq!(active.cullable, Some(false));
    }

    #[test]
    fn framework_guards() {
        assert!(is_framework_entity_kind("era"));
        assert!(is_framework_entity_kind("occurrence"));
        assert!(!is_framework_entity_kind("npc"));
        assert!(is_framework_relationship_kind("supersedes"));
        assert!(!is_framework_relationship_kind("rival_of"));
        assert!(is_framework_culture("world"));
        assert!(!is_framework_culture("nightshelf"));
        assert!(is_framework_tag("catastrophic"));
        assert!(!is_framework_tag("peaceful"));
    }

    #[test]
    fn resolve_empty_project_keeps_baseline() {
        let resolved = resolve_project_schema(&CanonrySchemaSlice::default()).unwrap();
        let baseline = framework_baseline().unwrap();
        assert_eq!(resolved.entity_kinds.len(), baseline.entity_kinds.len());
        assert!(resolved
            .entity_kinds
            .iter()
            .all(|k| k.is_framework == Some(true)));
    }

    #[test]
    fn parse_ron_error_surfaces() {
        assert!(matches!(
            parse_slice_ron("(entityKinds: [ (kind: ) ])"),
            Err(FrameworkError::Ron(_))
        ));
        assert!(matches!(
            parse_slice_json("{ not json"),
            Err(FrameworkError::Json(_))
        ));
    }
}
