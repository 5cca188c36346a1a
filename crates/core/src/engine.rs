//! Turns validated quiz answers into the structured handoff for the generation step.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::budget::{compute_budget_band, BudgetBand};
use crate::catalog::{Catalog, CatalogSource, ComponentQuery, PartPickerComponent, SearchLimits};
use crate::domain::component::{CatalogEntry, ComponentType, ProcessedCpu, ProcessedGpu};
use crate::domain::constraints::{categories_to_fill, Resolution, UserConstraints};
use crate::filter::{filter_cpus, filter_gpus, CpuFilter, GpuFilter};
use crate::performance::{estimate_fps, FpsRange};

/// Ranked list length handed to generation per category.
pub const DEFAULT_PROMPT_CANDIDATES: usize = 25;

/// `- <name> | Price: <price> | <specs>` with the price as a bare whole number.
pub fn prompt_line(entry: &impl CatalogEntry) -> String {
    let component = entry.component();
    format!("- {} | Price: {} | {}", component.name, component.price.normalize(), component.specs)
}

fn render_block<T: CatalogEntry>(heading: &str, candidates: &[T]) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }

    let mut block = format!("AVAILABLE {heading} (select ONE from this list):");
    for candidate in candidates {
        block.push('\n');
        block.push_str(&prompt_line(candidate));
    }
    Some(block)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecommendationPlan {
    pub max_budget: Decimal,
    pub target_resolution: Resolution,
    pub categories: Vec<ComponentType>,
    pub reused_parts: BTreeSet<ComponentType>,
    pub cpu_candidates: Vec<ProcessedCpu>,
    pub gpu_candidates: Vec<ProcessedGpu>,
    /// Highest tier among GPU candidates; 0 when no GPU is being filled or none is affordable.
    pub top_gpu_tier: u8,
    pub estimated_fps: FpsRange,
    pub budget_band: BudgetBand,
}

impl RecommendationPlan {
    /// Numbered list of categories to fill, with minimum-spec hints.
    pub fn component_checklist(&self) -> String {
        let mut checklist = String::new();
        for (index, kind) in self.categories.iter().enumerate() {
            if index > 0 {
                checklist.push('\n');
            }
            let _ = write!(checklist, "{}. {}", index + 1, kind.label());
            if let Some(min_spec) = kind.min_spec() {
                let _ = write!(checklist, " - {min_spec}");
            }
        }
        checklist
    }

    /// CPU and GPU candidate blocks for the generation prompt. Empty lists render nothing.
    pub fn candidate_blocks(&self) -> String {
        [render_block("CPUs", &self.cpu_candidates), render_block("GPUs", &self.gpu_candidates)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub struct RecommendationEngine<S> {
    catalog: Arc<Catalog<S>>,
    candidate_limit: usize,
    search_limits: SearchLimits,
}

impl<S: CatalogSource> RecommendationEngine<S> {
    pub fn new(catalog: Arc<Catalog<S>>) -> Self {
        Self {
            catalog,
            candidate_limit: DEFAULT_PROMPT_CANDIDATES,
            search_limits: SearchLimits::default(),
        }
    }

    pub fn with_candidate_limit(mut self, candidate_limit: usize) -> Self {
        self.candidate_limit = candidate_limit;
        self
    }

    pub fn with_search_limits(mut self, search_limits: SearchLimits) -> Self {
        self.search_limits = search_limits;
        self
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Assumes `constraints` already passed [`UserConstraints::validate`].
    pub fn prepare(&self, constraints: &UserConstraints) -> RecommendationPlan {
        let categories = categories_to_fill(constraints);

        let cpu_candidates = if categories.contains(&ComponentType::Cpu) {
            let filter = CpuFilter::from_constraints(constraints, self.candidate_limit);
            filter_cpus(self.catalog.cpus(), &filter)
        } else {
            Vec::new()
        };

        let gpu_candidates = if categories.contains(&ComponentType::Gpu) {
            let filter = GpuFilter::from_constraints(constraints, self.candidate_limit);
            filter_gpus(self.catalog.gpus(), &filter)
        } else {
            Vec::new()
        };

        let top_gpu_tier = gpu_candidates.iter().map(|gpu| gpu.tier).max().unwrap_or(0);
        let estimated_fps = estimate_fps(top_gpu_tier, constraints.target_resolution);
        let budget_band =
            compute_budget_band(constraints.max_budget, constraints.performance_priority);

        info!(
            event_name = "engine.plan.prepared",
            categories = categories.len(),
            cpu_candidates = cpu_candidates.len(),
            gpu_candidates = gpu_candidates.len(),
            top_gpu_tier,
            reused_parts = constraints.reused_parts.len(),
            "recommendation plan prepared"
        );

        RecommendationPlan {
            max_budget: constraints.max_budget,
            target_resolution: constraints.target_resolution,
            categories,
            reused_parts: constraints.reused_parts.clone(),
            cpu_candidates,
            gpu_candidates,
            top_gpu_tier,
            estimated_fps,
            budget_band,
        }
    }

    /// Part-picker lookup for swapping a single slot.
    pub fn components_by_type(
        &self,
        category: ComponentType,
        query: &ComponentQuery,
    ) -> Vec<PartPickerComponent> {
        self.catalog.query(category, query, self.search_limits)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::{prompt_line, RecommendationEngine, RecommendationPlan};
    use crate::catalog::tests::catalog_fixture;
    use crate::catalog::{Catalog, ComponentQuery, InMemorySource, SearchLimits};
    use crate::domain::component::ComponentType;
    use crate::domain::constraints::tests::constraints_fixture;
    use crate::domain::constraints::{PerformancePriority, PrimaryUse};
    use crate::performance::FpsRange;

    fn engine() -> RecommendationEngine<InMemorySource> {
        RecommendationEngine::new(Arc::new(catalog_fixture()))
    }

    #[test]
    fn gaming_plan_ranks_both_categories_and_estimates_fps() {
        let plan = engine().prepare(&constraints_fixture(50_000, PrimaryUse::Gaming));

        assert_eq!(plan.categories, ComponentType::ALL.to_vec());
        assert_eq!(plan.cpu_candidates.len(), 4);
        assert_eq!(plan.gpu_candidates.len(), 4);
        assert_eq!(plan.top_gpu_tier, 5);
        assert_eq!(plan.estimated_fps, FpsRange { low: 77, high: 104 });
        assert_eq!(plan.budget_band.min, Decimal::from(47_500));
        assert_eq!(plan.budget_band.max, Decimal::from(50_000));
    }

    #[test]
    fn productivity_plan_has_no_gpu_and_no_fps() {
        let plan = engine().prepare(&constraints_fixture(50_000, PrimaryUse::Productivity));

        assert!(!plan.categories.contains(&ComponentType::Gpu));
        assert!(plan.gpu_candidates.is_empty());
        assert_eq!(plan.top_gpu_tier, 0);
        assert!(!plan.estimated_fps.is_applicable());
        assert!(plan.cpu_candidates.iter().all(|cpu| cpu.has_integrated_graphics));
    }

    #[test]
    fn reused_categories_are_not_filled() {
        let mut constraints = constraints_fixture(80_000, PrimaryUse::Mixed);
        constraints.performance_priority = PerformancePriority::Value;
        constraints.reused_parts = BTreeSet::from([ComponentType::Cpu, ComponentType::Case]);

        let plan = engine().prepare(&constraints);
        assert_eq!(plan.categories.len(), 7);
        assert!(plan.cpu_candidates.is_empty());
        assert!(!plan.gpu_candidates.is_empty());
        assert_eq!(plan.reused_parts, constraints.reused_parts);
    }

    #[test]
    fn all_reused_gives_empty_plan() {
        let mut constraints = constraints_fixture(80_000, PrimaryUse::Gaming);
        constraints.reused_parts = ComponentType::ALL.into_iter().collect();

        let plan = engine().prepare(&constraints);
        assert!(plan.is_empty());
        assert_eq!(plan.candidate_blocks(), "");
    }

    #[test]
    fn empty_catalog_degrades_to_empty_candidates() {
        let engine = RecommendationEngine::new(Arc::new(Catalog::new(InMemorySource::new())));
        let plan = engine.prepare(&constraints_fixture(50_000, PrimaryUse::Gaming));

        assert!(plan.cpu_candidates.is_empty());
        assert!(plan.gpu_candidates.is_empty());
        assert_eq!(plan.estimated_fps, FpsRange::NOT_APPLICABLE);
    }

    #[test]
    fn prompt_lines_carry_bare_prices() {
        let plan = engine().prepare(&constraints_fixture(50_000, PrimaryUse::Gaming));

        assert_eq!(
            prompt_line(&plan.cpu_candidates[0]),
            "- AMD Ryzen 7 5700X3D | Price: 12122 | 8 cores, 3GHz (4.1GHz boost), 105W TDP"
        );

        let blocks = plan.candidate_blocks();
        assert!(blocks.starts_with("AVAILABLE CPUs (select ONE from this list):\n- AMD Ryzen 7"));
        assert!(blocks.contains("\n\nAVAILABLE GPUs (select ONE from this list):\n- ASUS Dual"));
        assert_eq!(blocks.lines().filter(|line| line.starts_with("- ")).count(), 8);
    }

    #[test]
    fn checklist_numbers_categories_with_hints() {
        let mut constraints = constraints_fixture(50_000, PrimaryUse::Productivity);
        constraints.reused_parts = BTreeSet::from([ComponentType::Monitor]);
        let plan: RecommendationPlan = engine().prepare(&constraints);

        let checklist = plan.component_checklist();
        let lines: Vec<&str> = checklist.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "1. CPU (Processor)");
        assert_eq!(lines[2], "3. RAM (Memory) - at least 16GB");
        assert_eq!(lines[6], "7. CPU Cooler");
    }

    #[test]
    fn components_by_type_uses_engine_search_limits() {
        let engine = engine().with_search_limits(SearchLimits { default_limit: 2, max_limit: 4 });

        let default = engine.components_by_type(ComponentType::Gpu, &ComponentQuery::default());
        assert_eq!(default.len(), 2);
        assert!(default[0].price <= default[1].price);

        let psus = engine.components_by_type(
            ComponentType::Psu,
            &ComponentQuery { search: Some("corsair".to_string()), limit: Some(50) },
        );
        assert_eq!(psus.len(), 1);
        assert_eq!(psus[0].wattage, 850);
    }
}
