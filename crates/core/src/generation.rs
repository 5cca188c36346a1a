//! Decoding the external generator's reply and folding it into a priced build.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::{compute_metrics, BuildMetrics};
use crate::domain::build::{AssembledBuild, BuildEntry};
use crate::domain::constraints::{Resolution, UserConstraints};
use crate::engine::RecommendationPlan;
use crate::errors::GenerationError;
use crate::performance::FpsRange;

pub const UNKNOWN_PART_NAME: &str = "Unknown";
pub const FALLBACK_REASONING: &str =
    "Generated build recommendation based on current local prices.";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GeneratedComponent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub specs: Option<String>,
    #[serde(default)]
    pub wattage: Option<f64>,
}

impl GeneratedComponent {
    fn into_entry(self) -> BuildEntry {
        BuildEntry {
            name: self
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_PART_NAME.to_string()),
            price: self.price.unwrap_or_default(),
            specs: self.specs.unwrap_or_default(),
            // `as` saturates; NaN becomes 0.
            wattage: self.wattage.map_or(0, |wattage| wattage.round() as u32),
        }
    }
}

/// The generator's JSON reply. Keys of `components` are category names; unknown keys and
/// `null` slots are ignored at assembly.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecommendation {
    #[serde(default)]
    pub components: BTreeMap<String, Option<GeneratedComponent>>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

/// Extracts the outermost `{ ... }` span from free text and decodes it.
pub fn parse_generated(text: &str) -> Result<GeneratedRecommendation, GenerationError> {
    let start = text.find('{').ok_or(GenerationError::MissingJson)?;
    let end = text.rfind('}').filter(|end| *end > start).ok_or(GenerationError::MissingJson)?;

    Ok(serde_json::from_str(&text[start..=end])?)
}

/// Keeps the planned categories from the reply, then injects identified reused parts.
pub fn assemble_build(
    reply: GeneratedRecommendation,
    plan: &RecommendationPlan,
    constraints: &UserConstraints,
) -> AssembledBuild {
    let mut components = reply.components;
    let mut build: AssembledBuild = plan
        .categories
        .iter()
        .filter_map(|kind| {
            let generated = components.remove(kind.as_str()).flatten()?;
            Some((*kind, generated.into_entry()))
        })
        .collect();

    for (kind, part) in &constraints.identified_reused_parts {
        if constraints.is_reused(*kind) {
            build.insert(*kind, part.clone());
        }
    }

    build
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildRecommendation {
    pub build: AssembledBuild,
    pub reused_parts: Vec<String>,
    pub reasoning: String,
    pub notes: BTreeMap<String, String>,
    pub metrics: BuildMetrics,
    pub estimated_fps: FpsRange,
    pub target_resolution: Resolution,
}

/// Assembles the reply and computes metrics with reused categories treated as owned.
pub fn finalize(
    reply: GeneratedRecommendation,
    plan: &RecommendationPlan,
    constraints: &UserConstraints,
) -> BuildRecommendation {
    let reasoning = reply
        .reasoning
        .clone()
        .filter(|reasoning| !reasoning.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_REASONING.to_string());
    let notes = reply.notes.clone();

    let build = assemble_build(reply, plan, constraints);
    let metrics = compute_metrics(&build, &constraints.reused_parts);

    BuildRecommendation {
        build,
        reused_parts: constraints.reused_parts.iter().map(|kind| kind.to_string()).collect(),
        reasoning,
        notes,
        metrics,
        estimated_fps: plan.estimated_fps,
        target_resolution: plan.target_resolution,
    }
}
