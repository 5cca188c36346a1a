//! Static part catalog: loading, normalization and the process-lifetime cache.
//!
//! A [`Catalog`] owns its [`CatalogSource`] and decodes each category at most once. Concurrent
//! first callers block on the same initialization; nothing is mutated afterwards and there is no
//! invalidation, so a catalog lives exactly as long as the data it was built from.

pub mod normalize;
pub mod raw;
pub mod source;

use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::component::{
    CatalogEntry, ComponentType, NormalizedComponent, ProcessedCpu, ProcessedGpu,
};
use crate::errors::CatalogError;

pub use self::source::{CatalogSource, DirectorySource, InMemorySource};

pub const DEFAULT_EXCHANGE_RATE: Decimal = Decimal::from_parts(58, 0, 0, false, 0);
pub const DEFAULT_SEARCH_LIMIT: usize = 500;
pub const MAX_SEARCH_LIMIT: usize = 2000;

/// Part-picker query: case-insensitive name search plus a result cap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { default_limit: DEFAULT_SEARCH_LIMIT, max_limit: MAX_SEARCH_LIMIT }
    }
}

impl ComponentQuery {
    pub fn resolved_limit(&self, limits: SearchLimits) -> usize {
        self.limit.unwrap_or(limits.default_limit).clamp(1, limits.max_limit.max(1))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartPickerComponent {
    pub name: String,
    pub price: Decimal,
    pub specs: String,
    pub wattage: u32,
}

impl From<&NormalizedComponent> for PartPickerComponent {
    fn from(component: &NormalizedComponent) -> Self {
        Self {
            name: component.name.clone(),
            price: component.price,
            specs: component.specs.clone(),
            wattage: component.wattage,
        }
    }
}

pub struct Catalog<S> {
    source: S,
    exchange_rate: Decimal,
    cpus: OnceLock<Vec<ProcessedCpu>>,
    gpus: OnceLock<Vec<ProcessedGpu>>,
    components: [OnceLock<Vec<NormalizedComponent>>; ComponentType::COUNT],
}

impl<S: CatalogSource> Catalog<S> {
    pub fn new(source: S) -> Self {
        Self::with_exchange_rate(source, DEFAULT_EXCHANGE_RATE)
    }

    pub fn with_exchange_rate(source: S, exchange_rate: Decimal) -> Self {
        Self {
            source,
            exchange_rate,
            cpus: OnceLock::new(),
            gpus: OnceLock::new(),
            components: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Priced CPUs, ascending by local price.
    pub fn cpus(&self) -> &[ProcessedCpu] {
        self.cpus.get_or_init(|| self.decode(ComponentType::Cpu, normalize::cpu))
    }

    /// Priced GPUs, ascending by local price.
    pub fn gpus(&self) -> &[ProcessedGpu] {
        self.gpus.get_or_init(|| self.decode(ComponentType::Gpu, normalize::gpu))
    }

    /// Normalized records of one category, ascending by local price. An unreadable or
    /// malformed dataset yields an empty slice.
    pub fn load(&self, category: ComponentType) -> &[NormalizedComponent] {
        self.components[category as usize].get_or_init(|| match category {
            ComponentType::Cpu => self.cpus().iter().map(|cpu| cpu.component.clone()).collect(),
            ComponentType::Gpu => self.gpus().iter().map(|gpu| gpu.component.clone()).collect(),
            ComponentType::Motherboard => self.decode(category, normalize::motherboard),
            ComponentType::Ram => self.decode(category, normalize::ram),
            ComponentType::Storage => self.decode(category, normalize::storage),
            ComponentType::Psu => self.decode(category, normalize::psu),
            ComponentType::Case => self.decode(category, normalize::case),
            ComponentType::Cooler => self.decode(category, normalize::cooler),
            ComponentType::Monitor => self.decode(category, normalize::monitor),
        })
    }

    /// Loads every category up front.
    pub fn warm_up(&self) -> usize {
        ComponentType::ALL.into_iter().map(|category| self.load(category).len()).sum()
    }

    pub fn query(
        &self,
        category: ComponentType,
        query: &ComponentQuery,
        limits: SearchLimits,
    ) -> Vec<PartPickerComponent> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);

        self.load(category)
            .iter()
            .filter(|component| match &needle {
                Some(needle) => component.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .take(query.resolved_limit(limits))
            .map(PartPickerComponent::from)
            .collect()
    }

    fn decode<R, T>(
        &self,
        category: ComponentType,
        convert: fn(R, Decimal) -> Option<T>,
    ) -> Vec<T>
    where
        R: DeserializeOwned,
        T: CatalogEntry,
    {
        let parsed = self.source.read(category).and_then(|raw| {
            serde_json::from_str::<Vec<serde_json::Value>>(&raw)
                .map_err(|source| CatalogError::ParseDataset { category, source })
        });
        let records = match parsed {
            Ok(records) => records,
            Err(error) => {
                warn!(
                    event_name = "catalog.load.failed",
                    category = category.as_str(),
                    error = %error,
                    "catalog dataset unavailable; treating category as empty"
                );
                return Vec::new();
            }
        };

        let total = records.len();
        let mut malformed = 0usize;
        let mut entries: Vec<T> = records
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<R>(value) {
                Ok(record) => Some(record),
                Err(error) => {
                    malformed += 1;
                    debug!(
                        event_name = "catalog.record.skipped",
                        category = category.as_str(),
                        error = %error,
                        "skipping malformed catalog record"
                    );
                    None
                }
            })
            .filter_map(|record| convert(record, self.exchange_rate))
            .collect();
        entries.sort_by(|left, right| left.price().cmp(&right.price()));

        debug!(
            event_name = "catalog.load.completed",
            category = category.as_str(),
            total,
            malformed,
            unpriced = total - malformed - entries.len(),
            loaded = entries.len(),
            "catalog category loaded"
        );
        entries
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use rust_decimal::Decimal;

    use super::{Catalog, CatalogSource, ComponentQuery, InMemorySource, SearchLimits};
    use crate::domain::component::ComponentType;
    use crate::errors::CatalogError;

    pub(crate) const CPU_DATASET: &str = r#"[
        {"name":"Intel Core i9-14900K","price":549.99,"core_count":24,"core_clock":3.2,"boost_clock":6,"microarchitecture":"Raptor Lake Refresh","tdp":125,"graphics":"Intel UHD Graphics 770"},
        {"name":"AMD Ryzen 5 5600G","price":129.0,"core_count":6,"core_clock":3.9,"boost_clock":4.4,"microarchitecture":"Zen 3","tdp":65,"graphics":"Radeon Vega 7"},
        {"name":"AMD Ryzen 5 7600X","price":199.0,"core_count":6,"core_clock":4.7,"boost_clock":5.3,"microarchitecture":"Zen 4","tdp":105,"graphics":"Radeon"},
        {"name":"Intel Core i5-12400F","price":109.99,"core_count":6,"core_clock":2.5,"boost_clock":4.4,"microarchitecture":"Alder Lake","tdp":65,"graphics":null},
        {"name":"AMD Ryzen 7 5700X3D","price":209.0,"core_count":8,"core_clock":3.0,"boost_clock":4.1,"microarchitecture":"Zen 3","tdp":105,"graphics":null},
        {"name":"Discontinued Chip","price":null,"core_count":4,"core_clock":3.0,"boost_clock":null,"microarchitecture":"Unknown","tdp":65,"graphics":null},
        {"name":"Free Sample","price":0,"core_count":2,"core_clock":2.0,"boost_clock":null,"microarchitecture":"Unknown","tdp":35,"graphics":null}
    ]"#;

    pub(crate) const GPU_DATASET: &str = r#"[
        {"name":"ASUS Dual GeForce RTX 4060","price":299.99,"chipset":"GeForce RTX 4060","memory":8,"core_clock":1830,"boost_clock":2535,"color":"White","length":227},
        {"name":"Gigabyte GeForce RTX 4060 Ti","price":389.99,"chipset":"GeForce RTX 4060 Ti","memory":8,"core_clock":2310,"boost_clock":2565,"color":"Black","length":272},
        {"name":"Sapphire Pulse Radeon RX 7600","price":259.99,"chipset":"Radeon RX 7600","memory":8,"core_clock":1720,"boost_clock":2655,"color":"Black","length":240},
        {"name":"XFX Speedster Radeon RX 7800 XT","price":479.99,"chipset":"Radeon RX 7800 XT","memory":16,"core_clock":1295,"boost_clock":2430,"color":"Black","length":343},
        {"name":"MSI GeForce GTX 1650","price":149.99,"chipset":"GeForce GTX 1650","memory":4,"core_clock":1485,"boost_clock":1665,"color":"Black","length":177},
        {"name":"Intel Arc B580 Limited Edition","price":249.99,"chipset":"Arc B580","memory":12,"core_clock":2670,"boost_clock":null,"color":"Black","length":272},
        {"name":"MSI GeForce RTX 4090 Suprim","price":1999.99,"chipset":"GeForce RTX 4090","memory":24,"core_clock":2235,"boost_clock":2625,"color":"Black","length":336}
    ]"#;

    pub(crate) fn catalog_fixture() -> Catalog<InMemorySource> {
        Catalog::new(
            InMemorySource::new()
                .with_dataset(ComponentType::Cpu, CPU_DATASET)
                .with_dataset(ComponentType::Gpu, GPU_DATASET)
                .with_dataset(
                    ComponentType::Psu,
                    r#"[
                        {"name":"Corsair RM850e","price":124.99,"type":"ATX","efficiency":"gold","wattage":850,"modular":"Full","color":"Black"},
                        {"name":"Thermaltake Smart 500W","price":39.99,"type":"ATX","efficiency":"white","wattage":500,"modular":"No","color":"Black"}
                    ]"#,
                ),
        )
    }

    struct CountingSource {
        inner: InMemorySource,
        reads: Arc<AtomicUsize>,
    }

    impl CatalogSource for CountingSource {
        fn read(&self, category: ComponentType) -> Result<String, CatalogError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read(category)
        }
    }

    #[test]
    fn load_drops_unpriced_records_and_sorts_ascending() {
        let catalog = catalog_fixture();
        let cpus = catalog.load(ComponentType::Cpu);

        assert_eq!(cpus.len(), 5);
        assert!(cpus.iter().all(|cpu| cpu.price > Decimal::ZERO));
        assert!(cpus.windows(2).all(|pair| pair[0].price <= pair[1].price));
        assert_eq!(cpus[0].name, "Intel Core i5-12400F");
    }

    #[test]
    fn load_is_idempotent() {
        let catalog = catalog_fixture();
        let first = catalog.load(ComponentType::Gpu).to_vec();
        let second = catalog.load(ComponentType::Gpu).to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn unreadable_or_malformed_dataset_is_empty() {
        let catalog = Catalog::new(
            InMemorySource::new().with_dataset(ComponentType::Case, "{ not json"),
        );
        assert!(catalog.load(ComponentType::Case).is_empty());
        assert!(catalog.load(ComponentType::Monitor).is_empty());
        assert!(catalog.cpus().is_empty());
    }

    #[test]
    fn malformed_records_are_skipped_individually() {
        let catalog = Catalog::new(InMemorySource::new().with_dataset(
            ComponentType::Motherboard,
            r#"[
                {"name":"MSI B650 Tomahawk","price":189.99,"socket":"AM5","form_factor":"ATX","max_memory":256,"memory_slots":4},
                {"price":99.99},
                "not a record"
            ]"#,
        ));

        let boards = catalog.load(ComponentType::Motherboard);
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].specs, "AM5, ATX, 4 slots, max 256GB");
        assert_eq!(boards[0].wattage, 50);
    }

    #[test]
    fn overflowing_price_skips_only_that_record() {
        let catalog = Catalog::new(InMemorySource::new().with_dataset(
            ComponentType::Case,
            r#"[
                {"name":"NZXT H5 Flow","price":50.0,"type":"ATX Mid Tower","color":"White","side_panel":"Tempered Glass"},
                {"name":"Gold Plated Tower","price":1e28,"type":"ATX Full Tower","color":"Gold","side_panel":"Glass"}
            ]"#,
        ));

        let cases = catalog.load(ComponentType::Case);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "NZXT H5 Flow");
        assert_eq!(cases[0].price, Decimal::from(2_900));
    }

    #[test]
    fn extreme_exchange_rate_degrades_to_empty_catalog() {
        let catalog = Catalog::with_exchange_rate(
            InMemorySource::new().with_dataset(ComponentType::Gpu, GPU_DATASET),
            Decimal::MAX,
        );
        assert!(catalog.gpus().is_empty());
        assert!(catalog.load(ComponentType::Gpu).is_empty());
    }

    #[test]
    fn concurrent_first_callers_share_one_load() {
        let reads = Arc::new(AtomicUsize::new(0));
        let catalog = Arc::new(Catalog::new(CountingSource {
            inner: InMemorySource::new().with_dataset(ComponentType::Gpu, GPU_DATASET),
            reads: Arc::clone(&reads),
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || catalog.gpus().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("loader thread"), 7);
        }

        catalog.load(ComponentType::Gpu);
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn query_searches_case_insensitively_and_clamps_limit() {
        let catalog = catalog_fixture();

        let radeons = catalog.query(
            ComponentType::Gpu,
            &ComponentQuery { search: Some("RADEON".to_string()), limit: None },
            SearchLimits::default(),
        );
        assert_eq!(radeons.len(), 2);
        assert!(radeons.iter().all(|gpu| gpu.name.contains("Radeon")));

        let capped = catalog.query(
            ComponentType::Gpu,
            &ComponentQuery { search: None, limit: Some(0) },
            SearchLimits::default(),
        );
        assert_eq!(capped.len(), 1);

        let limits = SearchLimits { default_limit: 500, max_limit: 3 };
        let all = catalog.query(
            ComponentType::Gpu,
            &ComponentQuery { search: Some("  ".to_string()), limit: Some(5000) },
            limits,
        );
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn warm_up_loads_every_category() {
        let catalog = catalog_fixture();
        // 5 CPUs + 7 GPUs + 2 PSUs; the rest are unavailable and empty.
        assert_eq!(catalog.warm_up(), 14);
    }
}
