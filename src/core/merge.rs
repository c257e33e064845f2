/// Schema merger: composes the framework baseline with a project slice.
///
/// Each collection merges differently:
/// - entity kinds union their subtype, status and required-relationship
///   lists, with project scalars overriding the baseline's;
/// - relationship kinds let a project restrict `src_kinds`/`dst_kinds` by
///   supplying a non-empty list, while `cullable`/`decay_rate` stay fixed;
/// - cultures keep the baseline's name and let the project supply naming,
///   axis biases, home regions and visuals;
/// - tags take every field the project sets, except `tag` itself.
///
/// Framework items always come out with `is_framework: Some(true)`. Project
/// items that match no framework id are appended after them in project order.
use rustc_hash::{FxHashMap, FxHashSet};

use crate::schema::culture::CultureDefinition;
use crate::schema::entity_kind::{
    EntityKindDefinition, RequiredRelationshipRule, Status, Subtype,
};
use crate::schema::relationship_kind::RelationshipKindDefinition;
use crate::schema::slice::CanonrySchemaSlice;
use crate::schema::tag::TagDefinition;

/// A record with a stable identifier inside its collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Subtype {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Status {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RequiredRelationshipRule {
    fn key(&self) -> &str {
        &self.kind
    }
}

impl Keyed for EntityKindDefinition {
    fn key(&self) -> &str {
        &self.kind
    }
}

impl Keyed for RelationshipKindDefinition {
    fn key(&self) -> &str {
        &self.kind
    }
}

impl Keyed for CultureDefinition {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for TagDefinition {
    fn key(&self) -> &str {
        &self.tag
    }
}

/// A record carrying the framework provenance flag.
trait FrameworkFlag {
    fn framework_flag(&mut self) -> &mut Option<bool>;
}

impl FrameworkFlag for EntityKindDefinition {
    fn framework_flag(&mut self) -> &mut Option<bool> {
        &mut self.is_framework
    }
}

impl FrameworkFlag for RelationshipKindDefinition {
    fn framework_flag(&mut self) -> &mut Option<bool> {
        &mut self.is_framework
    }
}

impl FrameworkFlag for CultureDefinition {
    fn framework_flag(&mut self) -> &mut Option<bool> {
        &mut self.is_framework
    }
}

impl FrameworkFlag for TagDefinition {
    fn framework_flag(&mut self) -> &mut Option<bool> {
        &mut self.is_framework
    }
}

/// Merge a project slice over the framework baseline.
///
/// Never fails: missing project data keeps the baseline, unknown project
/// items are appended.
pub fn merge_framework_schema(
    baseline: &CanonrySchemaSlice,
    project: &CanonrySchemaSlice,
) -> CanonrySchemaSlice {
    let tag_registry = if baseline.tag_registry.is_none() && project.tag_registry.is_none() {
        None
    } else {
        Some(merge_tags(
            baseline.tag_registry.as_deref().unwrap_or(&[]),
            project.tag_registry.as_deref().unwrap_or(&[]),
        ))
    };

    let merged = CanonrySchemaSlice {
        entity_kinds: merge_entity_kinds(&baseline.entity_kinds, &project.entity_kinds),
        relationship_kinds: merge_relationship_kinds(
            &baseline.relationship_kinds,
            &project.relationship_kinds,
        ),
        cultures: merge_cultures(&baseline.cultures, &project.cultures),
        tag_registry,
        axis_definitions: project
            .axis_definitions
            .clone()
            .or_else(|| baseline.axis_definitions.clone()),
        ui_config: project
            .ui_config
            .clone()
            .or_else(|| baseline.ui_config.clone()),
    };

    tracing::debug!(
        target: "canonry::merge",
        entity_kinds = merged.entity_kinds.len(),
        relationship_kinds = merged.relationship_kinds.len(),
        cultures = merged.cultures.len(),
        tags = merged.tag_registry.as_ref().map_or(0, Vec::len),
        "merged project schema over framework baseline"
    );

    merged
}

/// Entity kinds: override scalars, union lists.
pub fn merge_entity_kinds(
    baseline: &[EntityKindDefinition],
    project: &[EntityKindDefinition],
) -> Vec<EntityKindDefinition> {
    merge_collection(baseline, project, |base, over| EntityKindDefinition {
        kind: base.kind.clone(),
        description: over
            .description
            .clone()
            .or_else(|| base.description.clone()),
        is_framework: Some(true),
        category: base.category.clone().or_else(|| over.category.clone()),
        subtypes: union_by_key(&base.subtypes, &over.subtypes),
        statuses: union_by_key(&base.statuses, &over.statuses),
        required_relationships: union_optional(
            base.required_relationships.as_deref(),
            over.required_relationships.as_deref(),
        ),
        default_status: over
            .default_status
            .clone()
            .or_else(|| base.default_status.clone()),
        style: over.style.clone().or_else(|| base.style.clone()),
        semantic_plane: over
            .semantic_plane
            .clone()
            .or_else(|| base.semantic_plane.clone()),
    })
}

/// Relationship kinds: a non-empty project endpoint list replaces the
/// baseline's; culling and decay are never overridden.
pub fn merge_relationship_kinds(
    baseline: &[RelationshipKindDefinition],
    project: &[RelationshipKindDefinition],
) -> Vec<RelationshipKindDefinition> {
    merge_collection(baseline, project, |base, over| RelationshipKindDefinition {
        kind: base.kind.clone(),
        name: over.name.clone().or_else(|| base.name.clone()),
        description: over
            .description
            .clone()
            .or_else(|| base.description.clone()),
        is_framework: Some(true),
        src_kinds: replace_if_non_empty(&base.src_kinds, &over.src_kinds),
        dst_kinds: replace_if_non_empty(&base.dst_kinds, &over.dst_kinds),
        symmetric: base.symmetric,
        category: base.category.clone(),
        cullable: base.cullable,
        decay_rate: base.decay_rate,
        polarity: over.polarity.or(base.polarity),
        verbs: over.verbs.clone().or_else(|| base.verbs.clone()),
    })
}

/// Cultures: the baseline names the culture, the project supplies its data.
pub fn merge_cultures(
    baseline: &[CultureDefinition],
    project: &[CultureDefinition],
) -> Vec<CultureDefinition> {
    merge_collection(baseline, project, |base, over| CultureDefinition {
        id: base.id.clone(),
        name: base.name.clone(),
        description: base
            .description
            .clone()
            .or_else(|| over.description.clone()),
        is_framework: Some(true),
        color: base.color.clone().or_else(|| over.color.clone()),
        axis_biases: over
            .axis_biases
            .clone()
            .or_else(|| base.axis_biases.clone()),
        home_regions: over
            .home_regions
            .clone()
            .or_else(|| base.home_regions.clone()),
        naming: over.naming.clone().or_else(|| base.naming.clone()),
        visual: over.visual.clone().or_else(|| base.visual.clone()),
    })
}

/// Tags: every field the project sets wins, then `tag` and the framework
/// flag are restored.
pub fn merge_tags(baseline: &[TagDefinition], project: &[TagDefinition]) -> Vec<TagDefinition> {
    merge_collection(baseline, project, |base, over| TagDefinition {
        tag: base.tag.clone(),
        category: over.category.clone().or_else(|| base.category.clone()),
        rarity: over.rarity.or(base.rarity),
        description: over
            .description
            .clone()
            .or_else(|| base.description.clone()),
        is_framework: Some(true),
        usage_count: over.usage_count.or(base.usage_count),
        templates: over.templates.clone().or_else(|| base.templates.clone()),
        entity_kinds: over
            .entity_kinds
            .clone()
            .or_else(|| base.entity_kinds.clone()),
        related_tags: over
            .related_tags
            .clone()
            .or_else(|| base.related_tags.clone()),
        conflicting_tags: over
            .conflicting_tags
            .clone()
            .or_else(|| base.conflicting_tags.clone()),
    })
}

/// Shared driver: baseline items in order (merged with their override when
/// one exists), then project-only items in project order.
///
/// The first project item with a given id is the override; later duplicates
/// are dropped so ids stay unique in the result.
fn merge_collection<T, F>(baseline: &[T], project: &[T], merge_one: F) -> Vec<T>
where
    T: Keyed + FrameworkFlag + Clone,
    F: Fn(&T, &T) -> T,
{
    let mut overrides: FxHashMap<&str, &T> = FxHashMap::default();
    for item in project {
        overrides.entry(item.key()).or_insert(item);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut merged = Vec::with_capacity(baseline.len() + project.len());

    for base in baseline {
        seen.insert(base.key());
        let item = match overrides.get(base.key()) {
            Some(&over) => merge_one(base, over),
            None => {
                let mut item = base.clone();
                *item.framework_flag() = Some(true);
                item
            }
        };
        merged.push(item);
    }

    for item in project {
        if !seen.insert(item.key()) {
            continue;
        }
        let mut appended = item.clone();
        // Only the baseline can grant framework status.
        if *appended.framework_flag() == Some(true) {
            tracing::debug!(
                target: "canonry::merge",
                id = item.key(),
                "dropping framework claim on a project-only item"
            );
            *appended.framework_flag() = None;
        }
        merged.push(appended);
    }

    merged
}

/// Baseline entries in order, then entries of `extra` whose key is new.
fn union_by_key<T: Keyed + Clone>(base: &[T], extra: &[T]) -> Vec<T> {
    let mut seen: FxHashSet<&str> = base.iter().map(Keyed::key).collect();
    let mut out = base.to_vec();
    for item in extra {
        if seen.insert(item.key()) {
            out.push(item.clone());
        }
    }
    out
}

fn union_optional<T: Keyed + Clone>(base: Option<&[T]>, extra: Option<&[T]>) -> Option<Vec<T>> {
    match (base, extra) {
        (None, None) => None,
        (base, extra) => Some(union_by_key(
            base.unwrap_or(&[]),
            extra.unwrap_or(&[]),
        )),
    }
}

fn replace_if_non_empty(base: &[String], over: &[String]) -> Vec<String> {
    if over.is_empty() {
        base.to_vec()
    } else {
        over.to_vec()
    }
}
