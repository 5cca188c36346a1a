//! Budget, brand and capability narrowing for the CPU and GPU categories.
//!
//! Each category gets a fixed share of the total budget as its price ceiling. The shares do not
//! move with the performance priority or the use case: a productivity build that skips the GPU
//! does not hand the freed money to the CPU.

use rust_decimal::Decimal;

use crate::domain::component::{CatalogEntry, ProcessedCpu, ProcessedGpu};
use crate::domain::constraints::{CpuBrandPreference, GpuBrandPreference, UserConstraints};

pub const CPU_BUDGET_SHARE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
pub const GPU_BUDGET_SHARE: Decimal = Decimal::from_parts(45, 0, 0, false, 2);

pub fn budget_ceiling(max_budget: Decimal, share: Decimal) -> Decimal {
    max_budget * share
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuFilter {
    pub max_budget: Decimal,
    pub brand: CpuBrandPreference,
    pub require_integrated_graphics: bool,
    pub limit: usize,
}

impl CpuFilter {
    pub fn from_constraints(constraints: &UserConstraints, limit: usize) -> Self {
        Self {
            max_budget: constraints.max_budget,
            brand: constraints.brand_preferences.cpu,
            require_integrated_graphics: constraints.needs_integrated_graphics(),
            limit,
        }
    }

    pub fn ceiling(&self) -> Decimal {
        budget_ceiling(self.max_budget, CPU_BUDGET_SHARE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GpuFilter {
    pub max_budget: Decimal,
    pub brand: GpuBrandPreference,
    pub limit: usize,
}

impl GpuFilter {
    pub fn from_constraints(constraints: &UserConstraints, limit: usize) -> Self {
        Self { max_budget: constraints.max_budget, brand: constraints.brand_preferences.gpu, limit }
    }

    pub fn ceiling(&self) -> Decimal {
        budget_ceiling(self.max_budget, GPU_BUDGET_SHARE)
    }
}

/// Affordable CPUs, most expensive first. An empty result means nothing fits.
pub fn filter_cpus(cpus: &[ProcessedCpu], filter: &CpuFilter) -> Vec<ProcessedCpu> {
    let ceiling = filter.ceiling();
    let mut candidates: Vec<ProcessedCpu> = cpus
        .iter()
        .filter(|cpu| cpu.price() <= ceiling)
        .filter(|cpu| filter.brand.accepts(cpu.brand))
        .filter(|cpu| !filter.require_integrated_graphics || cpu.has_integrated_graphics)
        .cloned()
        .collect();

    candidates.sort_by(|left, right| right.price().cmp(&left.price()));
    candidates.truncate(filter.limit);
    candidates
}

/// Affordable GPUs ordered by tier, then price, both descending.
pub fn filter_gpus(gpus: &[ProcessedGpu], filter: &GpuFilter) -> Vec<ProcessedGpu> {
    let ceiling = filter.ceiling();
    let mut candidates: Vec<ProcessedGpu> = gpus
        .iter()
        .filter(|gpu| gpu.price() <= ceiling)
        .filter(|gpu| filter.brand.accepts(gpu.brand))
        .cloned()
        .collect();

    candidates.sort_by(|left, right| {
        right.tier.cmp(&left.tier).then_with(|| right.price().cmp(&left.price()))
    });
    candidates.truncate(filter.limit);
    candidates
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{filter_cpus, filter_gpus, CpuFilter, GpuFilter};
    use crate::catalog::tests::catalog_fixture;
    use crate::domain::component::{CatalogEntry, CpuBrand, GpuBrand};
    use crate::domain::constraints::tests::constraints_fixture;
    use crate::domain::constraints::{CpuBrandPreference, GpuBrandPreference, PrimaryUse};
    use crate::engine::DEFAULT_PROMPT_CANDIDATES;

    #[test]
    fn ceilings_are_fixed_shares_of_budget() {
        let constraints = constraints_fixture(50_000, PrimaryUse::Gaming);
        let cpu = CpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES);
        let gpu = GpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES);

        assert_eq!(cpu.ceiling(), Decimal::from(12_500));
        assert_eq!(gpu.ceiling(), Decimal::from(22_500));
    }

    #[test]
    fn cpus_stay_under_ceiling_most_expensive_first() {
        let catalog = catalog_fixture();
        let constraints = constraints_fixture(50_000, PrimaryUse::Gaming);
        let filter = CpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES);

        let cpus = filter_cpus(catalog.cpus(), &filter);
        let names: Vec<&str> = cpus.iter().map(|cpu| cpu.name()).collect();
        assert_eq!(
            names,
            vec![
                "AMD Ryzen 7 5700X3D",
                "AMD Ryzen 5 7600X",
                "AMD Ryzen 5 5600G",
                "Intel Core i5-12400F"
            ]
        );
        assert!(cpus.iter().all(|cpu| cpu.price() <= Decimal::from(12_500)));
    }

    #[test]
    fn productivity_requires_integrated_graphics() {
        let catalog = catalog_fixture();
        let constraints = constraints_fixture(50_000, PrimaryUse::Productivity);
        let filter = CpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES);
        assert!(filter.require_integrated_graphics);

        let cpus = filter_cpus(catalog.cpus(), &filter);
        assert_eq!(cpus.len(), 2);
        assert!(cpus.iter().all(|cpu| cpu.has_integrated_graphics));
    }

    #[test]
    fn cpu_brand_preference_drops_other_brand() {
        let catalog = catalog_fixture();
        let mut constraints = constraints_fixture(50_000, PrimaryUse::Gaming);
        constraints.brand_preferences.cpu = CpuBrandPreference::Intel;

        let cpus = filter_cpus(
            catalog.cpus(),
            &CpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES),
        );
        assert_eq!(cpus.len(), 1);
        assert_eq!(cpus[0].brand, CpuBrand::Intel);
    }

    #[test]
    fn gpus_sorted_by_tier_then_price_within_ceiling() {
        let catalog = catalog_fixture();
        let constraints = constraints_fixture(50_000, PrimaryUse::Gaming);
        let filter = GpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES);

        let gpus = filter_gpus(catalog.gpus(), &filter);
        let names: Vec<&str> = gpus.iter().map(|gpu| gpu.name()).collect();
        assert_eq!(
            names,
            vec![
                "ASUS Dual GeForce RTX 4060",
                "Sapphire Pulse Radeon RX 7600",
                "Intel Arc B580 Limited Edition",
                "MSI GeForce GTX 1650"
            ]
        );
        assert!(gpus.iter().all(|gpu| gpu.price() <= Decimal::from(22_500)));
        assert!(gpus
            .windows(2)
            .all(|pair| (pair[0].tier, pair[0].price()) >= (pair[1].tier, pair[1].price())));
    }

    #[test]
    fn gpu_brand_preference_and_limit_apply() {
        let catalog = catalog_fixture();
        let mut constraints = constraints_fixture(300_000, PrimaryUse::Gaming);
        constraints.brand_preferences.gpu = GpuBrandPreference::Nvidia;

        let gpus = filter_gpus(catalog.gpus(), &GpuFilter::from_constraints(&constraints, 2));
        assert_eq!(gpus.len(), 2);
        assert!(gpus.iter().all(|gpu| gpu.brand == GpuBrand::Nvidia));
        assert_eq!(gpus[0].tier, 10);
    }

    #[test]
    fn nothing_affordable_yields_empty_list() {
        let catalog = catalog_fixture();
        let constraints = constraints_fixture(20_000, PrimaryUse::Gaming);

        // 5000 ceiling is below every CPU in the fixture.
        let cpus = filter_cpus(
            catalog.cpus(),
            &CpuFilter::from_constraints(&constraints, DEFAULT_PROMPT_CANDIDATES),
        );
        assert!(cpus.is_empty());
    }
}
