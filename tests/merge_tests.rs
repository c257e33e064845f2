/// Schema merge integration tests: project fixture over the embedded baseline.

use canonry::core::framework::{framework_baseline, load_slice, resolve_project_schema};
use canonry::core::merge::merge_framework_schema;
use canonry::schema::entity_kind::{EntityKindDefinition, Status};
use canonry::schema::relationship_kind::RelationshipKindDefinition;
use canonry::schema::slice::CanonrySchemaSlice;
use canonry::schema::tag::TagRarity;
use rustc_hash::FxHashSet;
use std::path::Path;

fn project() -> CanonrySchemaSlice {
    load_slice(Path::new("tests/fixtures/project_slice.json")).unwrap()
}

fn resolved() -> CanonrySchemaSlice {
    resolve_project_schema(&project()).unwrap()
}

#[test]
fn era_gains_dormant_status_in_order() {
    let resolved = resolved();
    let era = resolved.entity_kind("era").unwrap();
    let statuses: Vec<&str> = era.statuses.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(statuses, vec!["current", "future", "historical", "dormant"]);
    assert_eq!(era.is_framework, Some(true));
}

#[test]
fn era_subtypes_union_without_duplicates() {
    let resolved = resolved();
    let era = resolved.entity_kind("era").unwrap();
    let subtypes: Vec<&str> = era.subtypes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(subtypes, vec!["age", "epoch", "thaw"]);
    // The baseline's "age" wins over the project's duplicate.
    assert_eq!(era.subtype("age").unwrap().name, "Age");
    assert_eq!(
        era.description.as_deref(),
        Some("Ages of the berg, counted in thaws.")
    );
    assert_eq!(era.default_status.as_deref(), Some("future"));
}

#[test]
fn project_kinds_follow_framework_kinds() {
    let resolved = resolved();
    let kinds: Vec<&str> = resolved
        .entity_kinds
        .iter()
        .map(|k| k.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["era", "occurrence", "npc", "location"]);

    let npc = resolved.entity_kind("npc").unwrap();
    // A project kind cannot claim to be part of the framework.
    assert_eq!(npc.is_framework, None);
    assert_eq!(npc.subtypes.len(), 2);
    assert_eq!(npc.default_status.as_deref(), Some("alive"));
}

#[test]
fn relationship_restriction_and_fixed_business_rules() {
    let resolved = resolved();

    let active = resolved.relationship_kind("active_during").unwrap();
    assert_eq!(active.src_kinds, vec!["npc".to_string()]);
    assert_eq!(active.dst_kinds, vec!["era".to_string()]);
    assert_eq!(active.cullable, Some(false));
    assert_eq!(active.decay_rate, Some(0.0));
    assert_eq!(active.is_framework, Some(true));

    let supersedes = resolved.relationship_kind("supersedes").unwrap();
    assert_eq!(supersedes.src_kinds, vec!["era".to_string()]);
    assert_eq!(
        supersedes.description.as_deref(),
        Some("One age melts into the next.")
    );

    let rival = resolved.relationship_kind("rival_of").unwrap();
    assert_eq!(rival.symmetric, Some(true));
    assert_eq!(rival.is_framework, None);
}

#[test]
fn restriction_invariant_on_unrestricted_framework_kind() {
    let baseline = CanonrySchemaSlice {
        relationship_kinds: vec![RelationshipKindDefinition::new("created_during")],
        ..CanonrySchemaSlice::default()
    };

    let restrict = CanonrySchemaSlice {
        relationship_kinds: vec![RelationshipKindDefinition {
            src_kinds: vec!["npc".to_string()],
            ..RelationshipKindDefinition::new("created_during")
        }],
        ..CanonrySchemaSlice::default()
    };
    let merged = merge_framework_schema(&baseline, &restrict);
    assert_eq!(merged.relationship_kinds[0].src_kinds, vec!["npc".to_string()]);

    let empty = CanonrySchemaSlice {
        relationship_kinds: vec![RelationshipKindDefinition::new("created_during")],
        ..CanonrySchemaSlice::default()
    };
    let merged = merge_framework_schema(&baseline, &empty);
    assert!(merged.relationship_kinds[0].src_kinds.is_empty());
}

#[test]
fn cultures_keep_framework_identity() {
    let resolved = resolved();
    let world = resolved.culture("world").unwrap();
    assert_eq!(world.name, "World");
    assert_eq!(world.color.as_deref(), Some("#9ca3af"));
    assert_eq!(
        world.naming.as_ref().unwrap()["domains"][0]["id"],
        "world_titles"
    );
    assert_eq!(world.axis_bias("npc").map(|b| b.y), Some(50.0));
    assert_eq!(world.is_framework, Some(true));

    let nightshelf = resolved.culture("nightshelf").unwrap();
    assert_eq!(nightshelf.is_framework, None);
    assert_eq!(
        nightshelf.home_regions.as_ref().unwrap()["location"],
        vec!["deep_ice".to_string()]
    );
}

#[test]
fn tags_take_project_fields_but_stay_framework() {
    let resolved = resolved();
    let temporal = resolved.tag("temporal").unwrap();
    assert_eq!(temporal.description.as_deref(), Some("Project wording."));
    assert_eq!(temporal.rarity, Some(TagRarity::Uncommon));
    assert_eq!(temporal.category.as_deref(), Some("system"));
    assert_eq!(temporal.is_framework, Some(true));

    let tags: Vec<&str> = resolved
        .tag_registry
        .as_ref()
        .unwrap()
        .iter()
        .map(|t| t.tag.as_str())
        .collect();
    assert_eq!(tags, vec!["temporal", "prophesied", "catastrophic", "peaceful"]);
}

#[test]
fn project_owned_sections_pass_through() {
    let resolved = resolved();
    let axes = resolved.axis_definitions.as_ref().unwrap();
    assert_eq!(axes[0].id, "order_chaos");
    assert_eq!(resolved.ui_config.as_ref().unwrap()["lastOpenedTab"], "entities");
}

#[test]
fn ids_unique_in_every_collection() {
    let resolved = resolved();
    let kinds: FxHashSet<&str> = resolved.entity_kinds.iter().map(|k| k.kind.as_str()).collect();
    assert_eq!(kinds.len(), resolved.entity_kinds.len());
    let rels: FxHashSet<&str> = resolved
        .relationship_kinds
        .iter()
        .map(|k| k.kind.as_str())
        .collect();
    assert_eq!(rels.len(), resolved.relationship_kinds.len());
    let cultures: FxHashSet<&str> = resolved.cultures.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(cultures.len(), resolved.cultures.len());
}

#[test]
fn empty_project_returns_flagged_baseline() {
    let baseline = framework_baseline().unwrap();
    let merged = merge_framework_schema(baseline, &CanonrySchemaSlice::default());

    assert_eq!(merged.entity_kinds.len(), baseline.entity_kinds.len());
    for (m, b) in merged.entity_kinds.iter().zip(&baseline.entity_kinds) {
        assert_eq!(
            m,
            &EntityKindDefinition {
                is_framework: Some(true),
                ..b.clone()
            }
        );
    }
    assert!(merged
        .relationship_kinds
        .iter()
        .all(|r| r.is_framework == Some(true)));
    assert!(merged.cultures.iter().all(|c| c.is_framework == Some(true)));
    assert!(merged
        .tag_registry
        .as_ref()
        .unwrap()
        .iter()
        .all(|t| t.is_framework == Some(true)));
}

#[test]
fn override_adding_subtype_never_removes_baseline_entries() {
    let baseline = framework_baseline().unwrap();
    for kind in &baseline.entity_kinds {
        let project = CanonrySchemaSlice {
            entity_kinds: vec![EntityKindDefinition {
                statuses: vec![Status {
                    id: "added".to_string(),
                    name: "Added".to_string(),
                    is_terminal: false,
                    polarity: None,
                    transition_verb: None,
                }],
                ..EntityKindDefinition::new(kind.kind.clone())
            }],
            ..CanonrySchemaSlice::default()
        };
        let merged = merge_framework_schema(baseline, &project);
        let merged_kind = merged.entity_kind(&kind.kind).unwrap();
        assert_eq!(merged_kind.statuses.len(), kind.statuses.len() + 1);
        assert_eq!(&merged_kind.statuses[..kind.statuses.len()], &kind.statuses[..]);
        assert_eq!(merged_kind.subtypes, kind.subtypes);
    }
}

#[test]
fn resolved_slice_survives_json_round_trip() {
    let resolved = resolved();
    let json = serde_json::to_string(&resolved).unwrap();
    assert!(json.contains("\"isFramework\":true"));
    let back: CanonrySchemaSlice = serde_json::from_str(&json).unwrap();
    assert_eq!(back, resolved);
}
