//! Frame-rate range from a GPU tier and a target resolution.
//!
//! All arithmetic is decimal and rounds half away from zero, so tier 5 at 1080p gives 77-104.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::constraints::Resolution;

const BASE_FPS: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const TIER_SLOPE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
const TIER_OFFSET: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
const LOW_FACTOR: Decimal = Decimal::from_parts(85, 0, 0, false, 2);
const HIGH_FACTOR: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

pub const MIN_TIER: u8 = 1;
pub const MAX_TIER: u8 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FpsRange {
    pub low: u32,
    pub high: u32,
}

impl FpsRange {
    pub const NOT_APPLICABLE: Self = Self { low: 0, high: 0 };

    /// A zero range means there is no GPU to estimate for and should not be displayed.
    pub fn is_applicable(&self) -> bool {
        self.high > 0
    }
}

fn resolution_multiplier(resolution: Resolution) -> Decimal {
    match resolution {
        Resolution::Fhd => Decimal::ONE,
        Resolution::Qhd => Decimal::from_parts(7, 0, 0, false, 1),
        Resolution::Uhd => Decimal::from_parts(4, 0, 0, false, 1),
    }
}

fn round_fps(value: Decimal) -> u32 {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero).to_u32().unwrap_or(0)
}

pub fn estimate_fps(tier: u8, resolution: Resolution) -> FpsRange {
    if !(MIN_TIER..=MAX_TIER).contains(&tier) {
        return FpsRange::NOT_APPLICABLE;
    }

    let tier_multiplier = TIER_SLOPE * Decimal::from(tier) + TIER_OFFSET;
    let estimated = BASE_FPS * tier_multiplier * resolution_multiplier(resolution);

    FpsRange { low: round_fps(estimated * LOW_FACTOR), high: round_fps(estimated * HIGH_FACTOR) }
}
