use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Storage,
    Psu,
    Case,
    Cooler,
    Monitor,
}

impl ComponentType {
    pub const COUNT: usize = 9;

    /// Catalogue order, which is also the order categories are presented for generation.
    pub const ALL: [ComponentType; Self::COUNT] = [
        Self::Cpu,
        Self::Gpu,
        Self::Motherboard,
        Self::Ram,
        Self::Storage,
        Self::Psu,
        Self::Case,
        Self::Cooler,
        Self::Monitor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
            Self::Motherboard => "motherboard",
            Self::Ram => "ram",
            Self::Storage => "storage",
            Self::Psu => "psu",
            Self::Case => "case",
            Self::Cooler => "cooler",
            Self::Monitor => "monitor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU (Processor)",
            Self::Gpu => "GPU (Graphics Card)",
            Self::Motherboard => "Motherboard",
            Self::Ram => "RAM (Memory)",
            Self::Storage => "Storage (SSD)",
            Self::Psu => "PSU (Power Supply)",
            Self::Case => "Case",
            Self::Cooler => "CPU Cooler",
            Self::Monitor => "Monitor",
        }
    }

    pub fn min_spec(self) -> Option<&'static str> {
        match self {
            Self::Ram => Some("at least 16GB"),
            Self::Storage => Some("at least 500GB"),
            _ => None,
        }
    }

    pub fn dataset_file(self) -> &'static str {
        match self {
            Self::Cpu => "cpu.json",
            Self::Gpu => "video-card.json",
            Self::Motherboard => "motherboard.json",
            Self::Ram => "memory.json",
            Self::Storage => "internal-hard-drive.json",
            Self::Psu => "power-supply.json",
            Self::Case => "case.json",
            Self::Cooler => "cpu-cooler.json",
            Self::Monitor => "monitor.json",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == normalized).ok_or_else(|| {
            DomainError::InvalidConstraint(format!(
                "unknown component type `{value}` (expected cpu|gpu|motherboard|ram|storage|psu|case|cooler|monitor)"
            ))
        })
    }
}

/// A catalog record after price normalization, shared by every category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedComponent {
    pub name: String,
    /// Price in whole local currency units.
    pub price: Decimal,
    pub specs: String,
    pub wattage: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuBrand {
    Intel,
    Amd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuBrand {
    Nvidia,
    Amd,
    Intel,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedCpu {
    #[serde(flatten)]
    pub component: NormalizedComponent,
    pub core_count: u32,
    pub core_clock: f64,
    pub boost_clock: Option<f64>,
    pub microarchitecture: String,
    pub tdp: u32,
    pub has_integrated_graphics: bool,
    pub brand: CpuBrand,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedGpu {
    #[serde(flatten)]
    pub component: NormalizedComponent,
    pub chipset: String,
    pub memory: f64,
    pub core_clock: Option<f64>,
    pub boost_clock: Option<f64>,
    pub brand: GpuBrand,
    /// Relative performance in 1..=10; ranking and FPS estimation only.
    #[serde(skip_serializing)]
    pub tier: u8,
}

/// Anything that wraps a normalized catalog record.
pub trait CatalogEntry {
    fn component(&self) -> &NormalizedComponent;

    fn name(&self) -> &str {
        &self.component().name
    }

    fn price(&self) -> Decimal {
        self.component().price
    }
}

impl CatalogEntry for NormalizedComponent {
    fn component(&self) -> &NormalizedComponent {
        self
    }
}

impl CatalogEntry for ProcessedCpu {
    fn component(&self) -> &NormalizedComponent {
        &self.component
    }
}

impl CatalogEntry for ProcessedGpu {
    fn component(&self) -> &NormalizedComponent {
        &self.component
    }
}
