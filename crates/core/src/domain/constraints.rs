use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::build::BuildEntry;
use crate::domain::component::{ComponentType, CpuBrand, GpuBrand};
use crate::errors::DomainError;

pub const MIN_BUDGET: Decimal = Decimal::from_parts(20_000, 0, 0, false, 0);
pub const MAX_BUDGET: Decimal = Decimal::from_parts(300_000, 0, 0, false, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryUse {
    Gaming,
    Productivity,
    ContentCreation,
    Mixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformancePriority {
    MaxPerformance,
    Balanced,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1080p")]
    Fhd,
    #[serde(rename = "1440p")]
    Qhd,
    #[serde(rename = "4k")]
    Uhd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshRateGoal {
    #[serde(rename = "60hz")]
    Hz60,
    #[serde(rename = "144hz")]
    Hz144,
    #[serde(rename = "240hz+")]
    Hz240Plus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuBrandPreference {
    #[default]
    Any,
    Intel,
    Amd,
}

impl CpuBrandPreference {
    pub fn accepts(self, brand: CpuBrand) -> bool {
        match self {
            Self::Any => true,
            Self::Intel => brand == CpuBrand::Intel,
            Self::Amd => brand == CpuBrand::Amd,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuBrandPreference {
    #[default]
    Any,
    Nvidia,
    Amd,
}

impl GpuBrandPreference {
    pub fn accepts(self, brand: GpuBrand) -> bool {
        match self {
            Self::Any => true,
            Self::Nvidia => brand == GpuBrand::Nvidia,
            Self::Amd => brand == GpuBrand::Amd,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPreferences {
    #[serde(default)]
    pub cpu: CpuBrandPreference,
    #[serde(default)]
    pub gpu: GpuBrandPreference,
}

/// Quiz answers as accepted by the engine.
///
/// `reused_parts` and `identified_reused_parts` are informational: a reused type is never filled
/// by the engine, and identified parts are only carried through to the assembled build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConstraints {
    #[serde(rename = "budget")]
    pub max_budget: Decimal,
    pub primary_use: PrimaryUse,
    pub performance_priority: PerformancePriority,
    pub target_resolution: Resolution,
    pub refresh_rate_goal: RefreshRateGoal,
    #[serde(default)]
    pub brand_preferences: BrandPreferences,
    #[serde(default)]
    pub require_integrated_graphics: bool,
    #[serde(default, rename = "existingParts")]
    pub reused_parts: BTreeSet<ComponentType>,
    #[serde(default)]
    pub identified_reused_parts: BTreeMap<ComponentType, BuildEntry>,
}

impl UserConstraints {
    pub fn needs_integrated_graphics(&self) -> bool {
        self.require_integrated_graphics || self.primary_use == PrimaryUse::Productivity
    }

    pub fn is_reused(&self, kind: ComponentType) -> bool {
        self.reused_parts.contains(&kind)
    }

    /// Request-boundary validation. The engine assumes it already ran.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_budget < MIN_BUDGET || self.max_budget > MAX_BUDGET {
            return Err(DomainError::InvalidConstraint(format!(
                "budget must be in range {MIN_BUDGET}..={MAX_BUDGET}, got {}",
                self.max_budget
            )));
        }

        for (kind, part) in &self.identified_reused_parts {
            if !self.is_reused(*kind) {
                return Err(DomainError::InvalidConstraint(format!(
                    "identified part given for `{kind}` which is not marked as reused"
                )));
            }
            if part.name.trim().is_empty() {
                return Err(DomainError::InvalidConstraint(format!(
                    "identified reused `{kind}` must have a name"
                )));
            }
            if part.price < Decimal::ZERO {
                return Err(DomainError::InvalidConstraint(format!(
                    "identified reused `{kind}` has a negative price"
                )));
            }
        }

        Ok(())
    }
}

/// Categories the engine has to fill: catalogue order minus reused types, and without a
/// discrete GPU for productivity builds.
pub fn categories_to_fill(constraints: &UserConstraints) -> Vec<ComponentType> {
    ComponentType::ALL
        .into_iter()
        .filter(|kind| !constraints.is_reused(*kind))
        .filter(|kind| {
            !(constraints.primary_use == PrimaryUse::Productivity && *kind == ComponentType::Gpu)
        })
        .collect()
}
