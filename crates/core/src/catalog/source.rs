use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::component::ComponentType;
use crate::errors::CatalogError;

/// Where raw per-category datasets come from.
pub trait CatalogSource: Send + Sync {
    fn read(&self, category: ComponentType) -> Result<String, CatalogError>;
}

/// One JSON file per category under a root directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, category: ComponentType) -> PathBuf {
        self.root.join(category.dataset_file())
    }
}

impl CatalogSource for DirectorySource {
    fn read(&self, category: ComponentType) -> Result<String, CatalogError> {
        let path = self.path_for(category);
        fs::read_to_string(&path)
            .map_err(|source| CatalogError::ReadDataset { category, path, source })
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    datasets: HashMap<ComponentType, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, category: ComponentType, json: impl Into<String>) -> Self {
        self.datasets.insert(category, json.into());
        self
    }
}

impl CatalogSource for InMemorySource {
    fn read(&self, category: ComponentType) -> Result<String, CatalogError> {
        self.datasets.get(&category).cloned().ok_or(CatalogError::Unavailable { category })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{CatalogSource, DirectorySource, InMemorySource};
    use crate::domain::component::ComponentType;
    use crate::errors::CatalogError;

    #[test]
    fn directory_source_reads_category_file() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("power-supply.json"), "[]").expect("write dataset");

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.read(ComponentType::Psu).expect("psu dataset"), "[]");
        assert!(matches!(
            source.read(ComponentType::Monitor),
            Err(CatalogError::ReadDataset { category: ComponentType::Monitor, .. })
        ));
    }

    #[test]
    fn in_memory_source_reports_unregistered_categories() {
        let source = InMemorySource::new().with_dataset(ComponentType::Cpu, "[]");
        assert!(source.read(ComponentType::Cpu).is_ok());
        assert!(matches!(
            source.read(ComponentType::Gpu),
            Err(CatalogError::Unavailable { category: ComponentType::Gpu })
        ));
    }
}
