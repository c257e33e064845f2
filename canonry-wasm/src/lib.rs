//! WASM bindings for canonry: used by the browser editors.
//!
//! Everything crosses the boundary as JSON strings in the editors' camelCase
//! shapes.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use canonry::core::exclusion::{self, ExclusionIndex};
use canonry::core::framework::{framework_baseline, parse_slice_json};
use canonry::core::merge::merge_framework_schema;
use canonry::core::prominence::{
    build_prominence_scale, parse_prominence_samples, prominence_label_from_scale,
    ProminenceScale, ProminenceValue, ScaleOptions,
};
use canonry::schema::style::{ArtisticStyle, CompositionStyle, RandomExclusionRule};

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------
fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid {what} JSON: {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PairInfo<'a> {
    style_id: &'a str,
    composition_id: &'a str,
}

// ---------------------------------------------------------------------------
// Schema merging
// ---------------------------------------------------------------------------

/// Return the framework baseline as JSON.
#[wasm_bindgen(js_name = frameworkBaseline)]
pub fn framework_baseline_json() -> Result<String, JsError> {
    let baseline =
        framework_baseline().map_err(|e| JsError::new(&format!("Baseline error: {e}")))?;
    to_json(baseline)
}

/// Merge a project slice (JSON) over the framework baseline.
#[wasm_bindgen(js_name = mergeFrameworkSchema)]
pub fn merge_framework_schema_json(project_json: &str) -> Result<String, JsError> {
    let project = parse_slice_json(project_json)
        .map_err(|e| JsError::new(&format!("Invalid project JSON: {e}")))?;
    let baseline =
        framework_baseline().map_err(|e| JsError::new(&format!("Baseline error: {e}")))?;
    to_json(&merge_framework_schema(baseline, &project))
}

/// Merge a project slice over an explicitly supplied baseline.
#[wasm_bindgen(js_name = mergeSchemaSlices)]
pub fn merge_schema_slices_json(baseline_json: &str, project_json: &str) -> Result<String, JsError> {
    let baseline = parse_slice_json(baseline_json)
        .map_err(|e| JsError::new(&format!("Invalid baseline JSON: {e}")))?;
    let project = parse_slice_json(project_json)
        .map_err(|e| JsError::new(&format!("Invalid project JSON: {e}")))?;
    to_json(&merge_framework_schema(&baseline, &project))
}

// ---------------------------------------------------------------------------
// Prominence
// ---------------------------------------------------------------------------

/// Build a scale from a JSON array of numbers and JSON options (`{}` for defaults).
/// `null` entries (JS `NaN`/`undefined`) are skipped.
#[wasm_bindgen(js_name = buildProminenceScale)]
pub fn build_prominence_scale_json(values_json: &str, options_json: &str) -> Result<String, JsError> {
    let values = parse_prominence_samples(values_json)
        .map_err(|e| JsError::new(&format!("Invalid values JSON: {e}")))?;
    let options: ScaleOptions = from_json("options", options_json)?;
    to_json(&build_prominence_scale(&values, &options))
}

/// Label for a prominence given as a JSON number, label string or `null`.
#[wasm_bindgen(js_name = prominenceLabelFromScale)]
pub fn prominence_label_json(value_json: &str, scale_json: &str) -> Result<String, JsError> {
    let value: ProminenceValue = from_json("prominence", value_json)?;
    let scale: ProminenceScale = from_json("scale", scale_json)?;
    Ok(prominence_label_from_scale(&value, &scale).to_string())
}

// ---------------------------------------------------------------------------
// Style exclusion
// ---------------------------------------------------------------------------

/// One-off pair check. Prefer `StyleSelector` for repeated checks.
#[wasm_bindgen(js_name = isExcludedPair)]
pub fn is_excluded_pair_json(
    style_id: &str,
    composition_id: &str,
    rules_json: &str,
    styles_json: &str,
    compositions_json: &str,
) -> Result<bool, JsError> {
    let rules: Vec<RandomExclusionRule> = from_json("rules", rules_json)?;
    let styles: Vec<ArtisticStyle> = from_json("artistic styles", styles_json)?;
    let compositions: Vec<CompositionStyle> = from_json("composition styles", compositions_json)?;
    Ok(exclusion::is_excluded_pair(
        style_id,
        composition_id,
        &rules,
        &styles,
        &compositions,
    ))
}

/// Seeded random style/composition picker over fixed catalogs and rules.
#[wasm_bindgen]
pub struct StyleSelector {
    index: ExclusionIndex,
    styles: Vec<ArtisticStyle>,
    compositions: Vec<CompositionStyle>,
    rng: StdRng,
}

#[wasm_bindgen]
impl StyleSelector {
    #[wasm_bindgen(constructor)]
    pub fn new(
        rules_json: &str,
        styles_json: &str,
        compositions_json: &str,
        seed: u64,
    ) -> Result<StyleSelector, JsError> {
        let rules: Vec<RandomExclusionRule> = from_json("rules", rules_json)?;
        let styles: Vec<ArtisticStyle> = from_json("artistic styles", styles_json)?;
        let compositions: Vec<CompositionStyle> =
            from_json("composition styles", compositions_json)?;
        Ok(StyleSelector {
            index: ExclusionIndex::new(&rules, &styles, &compositions),
            styles,
            compositions,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    #[wasm_bindgen(js_name = isExcluded)]
    pub fn is_excluded(&self, style_id: &str, composition_id: &str) -> bool {
        self.index.is_excluded(style_id, composition_id)
    }

    /// Random allowed pair as `{ styleId, compositionId }`, or `null`.
    #[wasm_bindgen(js_name = pickPair)]
    pub fn pick_pair(&mut self) -> Result<String, JsError> {
        let pair = exclusion::pick_random_pair(
            &self.index,
            &self.styles,
            &self.compositions,
            &mut self.rng,
        )
        .map(|(s, c)| PairInfo {
            style_id: &s.id,
            composition_id: &c.id,
        });
        to_json(&pair)
    }

    /// Random composition id for a hand-picked style, or empty string.
    #[wasm_bindgen(js_name = pickComposition)]
    pub fn pick_composition(&mut self, style_id: &str) -> String {
        exclusion::pick_random_composition(&self.index, style_id, &self.compositions, &mut self.rng)
            .map(|c| c.id.clone())
            .unwrap_or_default()
    }

    /// Random style id for a hand-picked composition, or empty string.
    #[wasm_bindgen(js_name = pickStyle)]
    pub fn pick_style(&mut self, composition_id: &str) -> String {
        exclusion::pick_random_style(&self.index, composition_id, &self.styles, &mut self.rng)
            .map(|s| s.id.clone())
            .unwrap_or_default()
    }

    /// JSON array of composition ids random selection may pair with `style_id`.
    #[wasm_bindgen(js_name = compositionsForStyle)]
    pub fn compositions_for_style(&self, style_id: &str) -> Result<String, JsError> {
        let ids: Vec<&str> = self
            .index
            .filter_compositions_for_style(style_id, &self.compositions)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        to_json(&ids)
    }

    /// JSON array of style ids random selection may pair with `composition_id`.
    #[wasm_bindgen(js_name = stylesForComposition)]
    pub fn styles_for_composition(&self, composition_id: &str) -> Result<String, JsError> {
        let ids: Vec<&str> = self
            .index
            .filter_styles_for_composition(composition_id, &self.styles)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        to_json(&ids)
    }
}
