//! Quiz-driven PC build recommendation core: catalog normalization, part classification,
//! budget-share filtering, FPS estimation and build metrics.

pub mod budget;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod generation;
pub mod performance;

pub use budget::{
    compute_budget_band, compute_metrics, required_psu_wattage, BudgetBand, BuildMetrics,
};
pub use catalog::{
    Catalog, CatalogSource, ComponentQuery, DirectorySource, InMemorySource, PartPickerComponent,
    SearchLimits,
};
pub use domain::build::{AssembledBuild, BuildEntry};
pub use domain::component::{ComponentType, NormalizedComponent, ProcessedCpu, ProcessedGpu};
pub use domain::constraints::{categories_to_fill, UserConstraints};
pub use engine::{RecommendationEngine, RecommendationPlan};
pub use errors::{ApplicationError, CatalogError, DomainError, GenerationError};
pub use filter::{filter_cpus, filter_gpus, CpuFilter, GpuFilter};
pub use generation::{assemble_build, finalize, parse_generated, BuildRecommendation};
pub use performance::{estimate_fps, FpsRange};
