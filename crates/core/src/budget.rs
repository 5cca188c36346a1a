//! Target spend bands and post-assembly build metrics.
//!
//! Nothing here fails. A partial build is a normal state while parts are being swapped, so an
//! absent category simply contributes nothing to any sum.

use std::collections::BTreeSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::build::AssembledBuild;
use crate::domain::component::ComponentType;
use crate::domain::constraints::PerformancePriority;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Spend interval, in whole currency units, that a priority mode targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BudgetBand {
    pub min: Decimal,
    pub max: Decimal,
}

impl PerformancePriority {
    /// Band bounds as fractions of the total budget.
    pub fn band_fractions(self) -> (Decimal, Decimal) {
        match self {
            Self::MaxPerformance => (Decimal::from_parts(98, 0, 0, false, 2), Decimal::ONE),
            Self::Balanced => (Decimal::from_parts(95, 0, 0, false, 2), Decimal::ONE),
            Self::Value => {
                (Decimal::from_parts(50, 0, 0, false, 2), Decimal::from_parts(75, 0, 0, false, 2))
            }
        }
    }
}

fn whole_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero).normalize()
}

pub fn compute_budget_band(total_budget: Decimal, priority: PerformancePriority) -> BudgetBand {
    let (min, max) = priority.band_fractions();
    BudgetBand { min: whole_units(total_budget * min), max: whole_units(total_budget * max) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BuildMetrics {
    pub total_wattage_excluding_psu: u32,
    pub psu_wattage: u32,
    /// `None` when there is no PSU capacity to compare against; distinct from a real 0%.
    pub psu_headroom_percent: Option<i64>,
    pub total_price: Decimal,
}

impl BuildMetrics {
    pub fn headroom_label(&self) -> String {
        match self.psu_headroom_percent {
            Some(percent) => format!("{percent}%"),
            None => "unavailable".to_string(),
        }
    }
}

/// Sum of draws over every category except the PSU, whose wattage is capacity.
pub fn total_wattage_excluding_psu(build: &AssembledBuild) -> u32 {
    build
        .iter()
        .filter(|(kind, _)| *kind != ComponentType::Psu)
        .fold(0u32, |total, (_, entry)| total.saturating_add(entry.wattage))
}

pub fn compute_metrics(build: &AssembledBuild, owned: &BTreeSet<ComponentType>) -> BuildMetrics {
    let total_wattage = total_wattage_excluding_psu(build);
    let psu_wattage = build.get(ComponentType::Psu).map_or(0, |psu| psu.wattage);

    let psu_headroom_percent = (psu_wattage > 0).then(|| {
        let capacity = Decimal::from(psu_wattage);
        let headroom = (capacity - Decimal::from(total_wattage)) / capacity * HUNDRED;
        headroom
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or_default()
    });

    let total_price = build
        .iter()
        .filter(|(kind, _)| !owned.contains(kind))
        .map(|(_, entry)| entry.price)
        .sum::<Decimal>();

    BuildMetrics {
        total_wattage_excluding_psu: total_wattage,
        psu_wattage,
        psu_headroom_percent,
        total_price,
    }
}

/// Smallest PSU capacity that leaves 20% over the non-PSU draw.
pub fn required_psu_wattage(build: &AssembledBuild) -> u32 {
    let with_margin = u64::from(total_wattage_excluding_psu(build)) * 6;
    u32::try_from(with_margin.div_ceil(5)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;

    use super::{compute_budget_band, compute_metrics, required_psu_wattage, BudgetBand};
    use crate::domain::build::{AssembledBuild, BuildEntry};
    use crate::domain::component::ComponentType;
    use crate::domain::constraints::PerformancePriority;

    fn entry(name: &str, price: i64, wattage: u32) -> BuildEntry {
        BuildEntry {
            name: name.to_string(),
            price: Decimal::from(price),
            specs: String::new(),
            wattage,
        }
    }

    fn sample_build(psu_wattage: u32) -> AssembledBuild {
        [
            (ComponentType::Cpu, entry("AMD Ryzen 5 7600", 11_000, 65)),
            (ComponentType::Gpu, entry("GeForce RTX 3060", 17_000, 150)),
            (ComponentType::Psu, entry("Corsair CX650", 3_500, psu_wattage)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn budget_bands_follow_priority_mode() {
        let total = Decimal::from(100_000);
        assert_eq!(
            compute_budget_band(total, PerformancePriority::Value),
            BudgetBand { min: Decimal::from(50_000), max: Decimal::from(75_000) }
        );
        assert_eq!(
            compute_budget_band(total, PerformancePriority::MaxPerformance),
            BudgetBand { min: Decimal::from(98_000), max: Decimal::from(100_000) }
        );
        assert_eq!(
            compute_budget_band(total, PerformancePriority::Balanced),
            BudgetBand { min: Decimal::from(95_000), max: Decimal::from(100_000) }
        );
    }

    #[test]
    fn budget_band_rounds_to_whole_units() {
        // 33333 * 0.75 = 24999.75
        let band = compute_budget_band(Decimal::from(33_333), PerformancePriority::Value);
        assert_eq!(band.max, Decimal::from(25_000));
        // 33333 * 0.5 = 16666.5
        assert_eq!(band.min, Decimal::from(16_667));
    }

    #[test]
    fn psu_capacity_is_not_counted_as_draw() {
        let metrics = compute_metrics(&sample_build(650), &BTreeSet::new());

        assert_eq!(metrics.total_wattage_excluding_psu, 215);
        assert_eq!(metrics.psu_wattage, 650);
        assert_eq!(metrics.psu_headroom_percent, Some(67));
        assert_eq!(metrics.headroom_label(), "67%");
        assert_eq!(metrics.total_price, Decimal::from(31_500));
    }

    #[test]
    fn zero_capacity_headroom_is_unavailable_not_zero() {
        let without_psu = compute_metrics(&sample_build(0), &BTreeSet::new());
        assert_eq!(without_psu.psu_headroom_percent, None);
        assert_eq!(without_psu.headroom_label(), "unavailable");

        // 215 / 216 leaves 0.46%, a real zero
        let tight = compute_metrics(&sample_build(216), &BTreeSet::new());
        assert_eq!(tight.psu_headroom_percent, Some(0));
    }

    #[test]
    fn overloaded_psu_reports_negative_headroom() {
        let metrics = compute_metrics(&sample_build(200), &BTreeSet::new());
        // (200 - 215) / 200 = -7.5%
        assert_eq!(metrics.psu_headroom_percent, Some(-8));
    }

    #[test]
    fn owned_parts_draw_power_but_cost_nothing() {
        let owned = BTreeSet::from([ComponentType::Gpu]);
        let metrics = compute_metrics(&sample_build(650), &owned);

        assert_eq!(metrics.total_wattage_excluding_psu, 215);
        assert_eq!(metrics.total_price, Decimal::from(14_500));
    }

    #[test]
    fn empty_build_is_all_zero() {
        let metrics = compute_metrics(&AssembledBuild::new(), &BTreeSet::new());
        assert_eq!(metrics.total_wattage_excluding_psu, 0);
        assert_eq!(metrics.psu_headroom_percent, None);
        assert_eq!(metrics.total_price, Decimal::ZERO);
        assert_eq!(required_psu_wattage(&AssembledBuild::new()), 0);
    }

    #[test]
    fn required_psu_adds_twenty_percent_and_rounds_up() {
        // 215 * 1.2 = 258
        assert_eq!(required_psu_wattage(&sample_build(650)), 258);

        let mut build = sample_build(650);
        build.insert(ComponentType::Ram, entry("DDR5", 4_000, 5));
        // 220 * 1.2 = 264
        assert_eq!(required_psu_wattage(&build), 264);
        build.insert(ComponentType::Case, entry("Fan hub", 500, 1));
        // 221 * 1.2 = 265.2
        assert_eq!(required_psu_wattage(&build), 266);
    }
}
