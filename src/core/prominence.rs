/// Prominence scale: maps continuous prominence to ordered labels using
/// quantile thresholds drawn from observed values.
///
/// A curator describes the desired population shape as a weight per label
/// (e.g. a quarter of entities should be `recognized`). Thresholds are then
/// taken from the actual sample at the cumulative weights, so the scale
/// follows whatever range the simulation produces.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Labels from least to most prominent.
pub const DEFAULT_PROMINENCE_LABELS: [&str; 5] =
    ["forgotten", "marginal", "recognized", "renowned", "mythic"];

/// Share of the population expected under each default label.
pub const DEFAULT_PROMINENCE_DISTRIBUTION: [f64; 5] = [0.3, 0.3, 0.25, 0.1, 0.05];

pub const DEFAULT_PROMINENCE_MIN: f64 = 0.0;
pub const DEFAULT_PROMINENCE_MAX: f64 = 5.0;

#[derive(Debug, Error)]
pub enum ProminenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for [`build_prominence_scale`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ScaleOptions {
    /// Load scale options from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ScaleOptions, ProminenceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse scale options from a RON string.
    pub fn parse_ron(input: &str) -> Result<ScaleOptions, ProminenceError> {
        Ok(ron::from_str(input)?)
    }
}

/// A resolved scale. `thresholds[i]` is the exclusive upper bound of
/// `labels[i]`; the last label has no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProminenceScale {
    pub labels: Vec<String>,
    pub distribution: Vec<f64>,
    pub thresholds: Vec<f64>,
    pub min: f64,
    pub max: f64,
}

impl Default for ProminenceScale {
    /// The cold-start scale: default labels, even bins over `0..5`.
    fn default() -> Self {
        build_prominence_scale(&[], &ScaleOptions::default())
    }
}

impl ProminenceScale {
    /// Label for a numeric prominence value.
    pub fn label_for(&self, value: f64) -> &str {
        numeric_label(value, self)
    }

    /// Number of `values` falling under each label, in label order.
    pub fn histogram(&self, values: &[f64]) -> Vec<(String, usize)> {
        let mut counts = vec![0usize; self.labels.len()];
        for &value in values {
            let label = self.label_for(value);
            if let Some(i) = self.labels.iter().position(|l| l == label) {
                counts[i] += 1;
            }
        }
        self.labels.iter().cloned().zip(counts).collect()
    }
}

/// A prominence as stored by callers: either already a label or a raw number.
/// JSON `null` (what JS sends for `NaN` or `undefined`) is `Missing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProminenceValue {
    Numeric(f64),
    Label(String),
    Missing,
}

impl From<Option<f64>> for ProminenceValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Numeric)
    }
}

impl From<f64> for ProminenceValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ProminenceValue {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for ProminenceValue {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

/// Parse a JSON array of sample values. `null` entries are skipped.
pub fn parse_prominence_samples(json: &str) -> Result<Vec<f64>, ProminenceError> {
    let samples: Vec<Option<f64>> = serde_json::from_str(json)?;
    Ok(samples.into_iter().flatten().collect())
}

/// Build a scale from observed prominence values.
///
/// Never fails. A distribution of the wrong length or without a positive
/// weight becomes uniform; an empty (or all non-finite) sample yields
/// equal-width bins over `[min, max]`.
pub fn build_prominence_scale(values: &[f64], options: &ScaleOptions) -> ProminenceScale {
    let labels: Vec<String> = match &options.labels {
        Some(labels) if !labels.is_empty() => labels.clone(),
        _ => DEFAULT_PROMINENCE_LABELS
            .iter()
            .map(|l| l.to_string())
            .collect(),
    };
    let (min, max) = resolve_bounds(options.min, options.max);
    let distribution = resolve_distribution(options.distribution.as_deref(), labels.len());

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let thresholds = if sorted.is_empty() {
        even_thresholds(labels.len(), min, max)
    } else {
        quantile_thresholds(&sorted, &distribution, min, max)
    };

    tracing::trace!(
        target: "canonry::prominence",
        samples = sorted.len(),
        ?thresholds,
        "built prominence scale"
    );

    ProminenceScale {
        labels,
        distribution,
        thresholds,
        min,
        max,
    }
}

/// Resolve a stored prominence to a label of `scale`.
///
/// Labels of the scale pass through unchanged. Numbers land in the first
/// bin whose threshold exceeds them, or the top bin. Non-finite numbers,
/// missing values and unknown labels resolve to the lowest label. Returns `""` only for a scale
/// with no labels.
pub fn prominence_label_from_scale<'a>(value: &ProminenceValue, scale: &'a ProminenceScale) -> &'a str {
    match value {
        ProminenceValue::Numeric(v) => numeric_label(*v, scale),
        ProminenceValue::Label(label) => {
            if let Some(known) = scale.labels.iter().find(|l| *l == label) {
                return known;
            }
            match label.trim().parse::<f64>() {
                Ok(v) => numeric_label(v, scale),
                Err(_) => lowest_label(scale),
            }
        }
        ProminenceValue::Missing => lowest_label(scale),
    }
}

/// Lower numeric bound of `label`'s bin: `min` for the first label,
/// otherwise the previous label's threshold.
pub fn prominence_threshold_from_scale(label: &str, scale: &ProminenceScale) -> f64 {
    match prominence_index_from_scale(label, scale) {
        0 => scale.min,
        i => scale.thresholds.get(i - 1).copied().unwrap_or(scale.max),
    }
}

/// Position of `label` in the scale, lowest first. Unknown labels are 0.
pub fn prominence_index_from_scale(label: &str, scale: &ProminenceScale) -> usize {
    scale.labels.iter().position(|l| l == label).unwrap_or(0)
}

fn numeric_label(value: f64, scale: &ProminenceScale) -> &str {
    if !value.is_finite() {
        return lowest_label(scale);
    }
    for (label, threshold) in scale.labels.iter().zip(&scale.thresholds) {
        if value < *threshold {
            return label;
        }
    }
    scale.labels.last().map(String::as_str).unwrap_or("")
}

fn lowest_label(scale: &ProminenceScale) -> &str {
    scale.labels.first().map(String::as_str).unwrap_or("")
}

fn resolve_bounds(min: Option<f64>, max: Option<f64>) -> (f64, f64) {
    let min = min.filter(|v| v.is_finite()).unwrap_or(DEFAULT_PROMINENCE_MIN);
    let max = max.filter(|v| v.is_finite()).unwrap_or(DEFAULT_PROMINENCE_MAX);
    if min > max {
        (max, min)
    } else {
        (min, max)
    }
}

/// Normalized weights, one per label. Falls back to uniform.
fn resolve_distribution(requested: Option<&[f64]>, label_count: usize) -> Vec<f64> {
    let requested = requested.unwrap_or(&DEFAULT_PROMINENCE_DISTRIBUTION);
    if requested.len() == label_count {
        let weights: Vec<f64> = requested
            .iter()
            .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
            .collect();
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            return weights.into_iter().map(|w| w / total).collect();
        }
    }

    tracing::debug!(
        target: "canonry::prominence",
        requested = requested.len(),
        labels = label_count,
        "distribution unusable; using uniform weights"
    );
    vec![1.0 / label_count as f64; label_count]
}

fn even_thresholds(label_count: usize, min: f64, max: f64) -> Vec<f64> {
    let n = label_count as f64;
    (1..label_count)
        .map(|i| lerp(min, max, i as f64 / n).clamp(min, max))
        .collect()
}

fn quantile_thresholds(sorted: &[f64], distribution: &[f64], min: f64, max: f64) -> Vec<f64> {
    let mut cumulative = 0.0;
    let mut floor = min;
    let mut thresholds = Vec::with_capacity(distribution.len().saturating_sub(1));
    for weight in distribution.iter().take(distribution.len().saturating_sub(1)) {
        cumulative += weight;
        let q = quantile(sorted, cumulative.clamp(0.0, 1.0));
        floor = q.clamp(floor, max);
        thresholds.push(floor);
    }
    thresholds
}

/// Linear-interpolated quantile of an ascending, non-empty sample.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let index = p * (sorted.len() - 1) as f64;
    let lo = index.floor() as usize;
    let hi = index.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        lerp(sorted[lo], sorted[hi], index - lo as f64)
    }
}

/// `a + (b - a) * t`, without overflowing when `b - a` exceeds `f64::MAX`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let span = b - a;
    if span.is_finite() {
        a + span * t
    } else {
        a * (1.0 - t) + b * t
    }
}
