/// Style exclusion integration tests over the fixture catalogs and rules.

use canonry::core::exclusion::{
    filter_compositions_for_style, filter_styles_for_composition, is_excluded_pair, lint_rules,
    load_artistic_styles, load_composition_styles, load_rules, pick_random_pair, ExclusionIndex,
};
use canonry::schema::style::{ArtisticStyle, CompositionStyle, RandomExclusionRule};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use std::path::Path;

fn fixtures() -> (
    Vec<RandomExclusionRule>,
    Vec<ArtisticStyle>,
    Vec<CompositionStyle>,
) {
    (
        load_rules(Path::new("tests/fixtures/exclusion_rules.ron")).unwrap(),
        load_artistic_styles(Path::new("tests/fixtures/artistic_styles.ron")).unwrap(),
        load_composition_styles(Path::new("tests/fixtures/composition_styles.ron")).unwrap(),
    )
}

#[test]
fn fixtures_load() {
    let (rules, styles, compositions) = fixtures();
    assert_eq!(rules.len(), 3);
    assert_eq!(styles.len(), 6);
    assert_eq!(compositions.len(), 6);
    assert_eq!(compositions[5].target_category, None);
}

#[test]
fn allow_entry_exempts_only_its_pair() {
    let (rules, styles, compositions) = fixtures();
    let only_documents = &rules[..1];
    assert!(!is_excluded_pair("museum-catalog", "portrait", only_documents, &styles, &compositions));
    assert!(is_excluded_pair("manuscript-page", "portrait", only_documents, &styles, &compositions));
    assert!(is_excluded_pair("museum-catalog", "full-body", only_documents, &styles, &compositions));
}

#[test]
fn other_rules_still_apply_to_allowed_pairs() {
    let (mut rules, styles, compositions) = fixtures();
    rules.push(RandomExclusionRule {
        reason: "catalog portraits look like mugshots".to_string(),
        styles: vec!["museum-catalog".to_string()],
        compositions: vec!["portrait".to_string()],
        allow: None,
    });
    assert!(is_excluded_pair("museum-catalog", "portrait", &rules, &styles, &compositions));
}

#[test]
fn literal_and_category_entries_mix() {
    let (rules, styles, compositions) = fixtures();
    assert!(is_excluded_pair("field-journal", "emblem", &rules, &styles, &compositions));
    // Field journals are documents, so the first rule already bars portraits.
    assert!(is_excluded_pair("field-journal", "portrait", &rules, &styles, &compositions));
    assert!(is_excluded_pair("pixel-art", "bird's-eye", &rules, &styles, &compositions));
    assert!(!is_excluded_pair("pixel-art", "portrait", &rules, &styles, &compositions));
    assert!(!is_excluded_pair("oil-painting", "emblem", &rules, &styles, &compositions));
}

#[test]
fn uncategorized_composition_is_never_matched_by_pattern() {
    let (rules, styles, compositions) = fixtures();
    for style in &styles {
        assert!(!is_excluded_pair(&style.id, "freeform", &rules, &styles, &compositions));
    }
}

#[test]
fn filters_match_predicate() {
    let (rules, styles, compositions) = fixtures();

    let for_portrait: Vec<&str> =
        filter_styles_for_composition("portrait", &rules, &styles, &compositions)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
    assert_eq!(
        for_portrait,
        vec!["museum-catalog", "watercolor", "oil-painting", "pixel-art"]
    );

    let for_pixel_art: Vec<&str> =
        filter_compositions_for_style("pixel-art", &rules, &styles, &compositions)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
    assert_eq!(for_pixel_art, vec!["portrait", "full-body", "emblem", "freeform"]);
}

#[test]
fn index_matches_per_call_resolution_everywhere() {
    let (rules, styles, compositions) = fixtures();
    let index = ExclusionIndex::new(&rules, &styles, &compositions);
    for s in &styles {
        for c in &compositions {
            assert_eq!(
                index.is_excluded(&s.id, &c.id),
                is_excluded_pair(&s.id, &c.id, &rules, &styles, &compositions),
                "{} / {}",
                s.id,
                c.id
            );
        }
        let from_index: Vec<&str> = index
            .filter_compositions_for_style(&s.id, &compositions)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        let per_call: Vec<&str> =
            filter_compositions_for_style(&s.id, &rules, &styles, &compositions)
                .into_iter()
                .map(|c| c.id.as_str())
                .collect();
        assert_eq!(from_index, per_call);
    }
}

#[test]
fn random_selection_covers_allowed_pairs_only() {
    let (rules, styles, compositions) = fixtures();
    let index = ExclusionIndex::new(&rules, &styles, &compositions);
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = FxHashSet::default();
    for _ in 0..2000 {
        let (s, c) = pick_random_pair(&index, &styles, &compositions, &mut rng).unwrap();
        assert!(!index.is_excluded(&s.id, &c.id));
        seen.insert((s.id.as_str(), c.id.as_str()));
    }
    let allowed = styles
        .iter()
        .flat_map(|s| compositions.iter().map(move |c| (s, c)))
        .filter(|(s, c)| !index.is_excluded(&s.id, &c.id))
        .count();
    assert_eq!(seen.len(), allowed);
}

#[test]
fn fixture_rules_lint_clean() {
    let (rules, styles, compositions) = fixtures();
    assert!(lint_rules(&rules, &styles, &compositions).is_empty());
}
