//! Brand, tier and power-draw inference for catalog records.
//!
//! Every heuristic here is a plain token or table match. Tables are scanned in declaration
//! order and the first match wins, so more specific chipsets are listed before their prefixes.

use crate::domain::component::{CpuBrand, GpuBrand};

/// Tier used when a chipset matches nothing in [`GPU_TIER_TABLE`].
pub const DEFAULT_GPU_TIER: u8 = 3;

/// Draw assumed for a chipset that matches nothing in [`GPU_WATTAGE_TABLE`].
pub const DEFAULT_GPU_WATTAGE: u32 = 150;

const AMD_CPU_TOKENS: &[&str] = &["amd", "ryzen", "threadripper"];
const NVIDIA_GPU_TOKENS: &[&str] = &["geforce", "rtx", "gtx"];
const AMD_GPU_TOKENS: &[&str] = &["radeon", "rx"];
const INTEL_GPU_TOKENS: &[&str] = &["arc"];

pub const GPU_TIER_TABLE: &[(&str, u8)] = &[
    // NVIDIA, current generation
    ("GeForce RTX 5090", 10),
    ("GeForce RTX 5080", 9),
    ("GeForce RTX 5070 Ti", 8),
    ("GeForce RTX 5070", 7),
    ("GeForce RTX 5060 Ti", 6),
    ("GeForce RTX 5060", 5),
    ("GeForce RTX 5050", 4),
    // NVIDIA, previous generations
    ("GeForce RTX 4090", 10),
    ("GeForce RTX 4080 SUPER", 9),
    ("GeForce RTX 4080", 9),
    ("GeForce RTX 4070 Ti SUPER", 8),
    ("GeForce RTX 4070 Ti", 8),
    ("GeForce RTX 4070 SUPER", 7),
    ("GeForce RTX 4070", 7),
    ("GeForce RTX 4060 Ti", 6),
    ("GeForce RTX 4060", 5),
    ("GeForce RTX 3090 Ti", 9),
    ("GeForce RTX 3090", 9),
    ("GeForce RTX 3080 Ti", 8),
    ("GeForce RTX 3080", 8),
    ("GeForce RTX 3070 Ti", 7),
    ("GeForce RTX 3070", 7),
    ("GeForce RTX 3060 Ti", 6),
    ("GeForce RTX 3060", 5),
    ("GeForce RTX 3050", 4),
    // AMD, current generation
    ("Radeon RX 9070 XT", 8),
    ("Radeon RX 9070", 7),
    ("Radeon RX 9060 XT", 6),
    // AMD, previous generations
    ("Radeon RX 7900 XTX", 9),
    ("Radeon RX 7900 XT", 8),
    ("Radeon RX 7900 GRE", 7),
    ("Radeon RX 7800 XT", 7),
    ("Radeon RX 7700 XT", 6),
    ("Radeon RX 7600 XT", 5),
    ("Radeon RX 7600", 5),
    ("Radeon RX 6950 XT", 8),
    ("Radeon RX 6900 XT", 8),
    ("Radeon RX 6800 XT", 7),
    ("Radeon RX 6800", 7),
    ("Radeon RX 6700 XT", 6),
    ("Radeon RX 6600 XT", 5),
    ("Radeon RX 6600", 4),
    // Intel
    ("Arc B580", 5),
    ("Arc B570", 4),
    ("Arc A770", 5),
    ("Arc A750", 4),
];

pub const GPU_WATTAGE_TABLE: &[(&str, u32)] = &[
    ("RTX 5090", 575),
    ("RTX 5080", 360),
    ("RTX 5070 Ti", 300),
    ("RTX 5070", 250),
    ("RTX 5060 Ti", 180),
    ("RTX 5060", 150),
    ("RTX 5050", 100),
    ("RTX 4090", 450),
    ("RTX 4080", 320),
    ("RTX 4070 Ti", 285),
    ("RTX 4070", 200),
    ("RTX 4060 Ti", 165),
    ("RTX 4060", 115),
    ("RTX 3090", 350),
    ("RTX 3080", 320),
    ("RTX 3070", 220),
    ("RTX 3060", 170),
    ("RX 9070 XT", 290),
    ("RX 9070", 220),
    ("RX 9060 XT", 180),
    ("RX 7900 XTX", 355),
    ("RX 7900 XT", 315),
    ("RX 7800 XT", 263),
    ("RX 7700 XT", 245),
    ("RX 7600", 165),
];

fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    let lowered = haystack.to_lowercase();
    tokens.iter().any(|token| lowered.contains(token))
}

/// AMD family tokens win; everything else is assumed to be Intel.
pub fn cpu_brand(name: &str) -> CpuBrand {
    if contains_any(name, AMD_CPU_TOKENS) {
        CpuBrand::Amd
    } else {
        CpuBrand::Intel
    }
}

pub fn gpu_brand(chipset: &str) -> GpuBrand {
    if contains_any(chipset, NVIDIA_GPU_TOKENS) {
        GpuBrand::Nvidia
    } else if contains_any(chipset, AMD_GPU_TOKENS) {
        GpuBrand::Amd
    } else if contains_any(chipset, INTEL_GPU_TOKENS) {
        GpuBrand::Intel
    } else {
        GpuBrand::Nvidia
    }
}

/// Exact table hit, then containment in either direction, then [`DEFAULT_GPU_TIER`].
pub fn gpu_tier(chipset: &str) -> u8 {
    let chipset = chipset.trim();
    // An empty chipset is contained in every key.
    if chipset.is_empty() {
        return DEFAULT_GPU_TIER;
    }

    if let Some((_, tier)) = GPU_TIER_TABLE.iter().find(|(key, _)| *key == chipset) {
        return *tier;
    }

    GPU_TIER_TABLE
        .iter()
        .find(|(key, _)| chipset.contains(key) || key.contains(chipset))
        .map(|(_, tier)| *tier)
        .unwrap_or(DEFAULT_GPU_TIER)
}

pub fn gpu_wattage(chipset: &str) -> u32 {
    let chipset = chipset.trim();
    if chipset.is_empty() {
        return DEFAULT_GPU_WATTAGE;
    }

    GPU_WATTAGE_TABLE
        .iter()
        .find(|(key, _)| *key == chipset)
        .or_else(|| GPU_WATTAGE_TABLE.iter().find(|(key, _)| chipset.contains(key)))
        .map(|(_, wattage)| *wattage)
        .unwrap_or(DEFAULT_GPU_WATTAGE)
}
