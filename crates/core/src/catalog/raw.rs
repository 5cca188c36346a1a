//! Per-category record shapes as delivered by the static dataset.
//!
//! Missing or null spec fields default instead of failing the record; only `price` gates
//! inclusion.

use std::fmt;

use serde::{Deserialize, Deserializer};

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A field some datasets spell as a string and others as a number (e.g. storage `type` is
/// `"SSD"` or a spindle speed).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A single reading or a `[low, high]` range.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Span {
    Single(f64),
    Range(Vec<f64>),
}

impl Span {
    pub fn render(&self, unit: &str) -> Option<String> {
        match self {
            Self::Single(value) => Some(format!("{value} {unit}")),
            Self::Range(values) => match values.as_slice() {
                [] => None,
                [value] => Some(format!("{value} {unit}")),
                [low, high, ..] => Some(format!("{low}-{high} {unit}")),
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCpu {
    pub name: String,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub core_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub core_clock: f64,
    pub boost_clock: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub microarchitecture: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tdp: u32,
    pub graphics: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawGpu {
    pub name: String,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chipset: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory: f64,
    pub core_clock: Option<f64>,
    pub boost_clock: Option<f64>,
    pub color: Option<String>,
    pub length: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawMotherboard {
    pub name: String,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub socket: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_factor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_memory: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub memory_slots: u32,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawRam {
    pub name: String,
    pub price: Option<f64>,
    pub speed: Option<Vec<u32>>,
    pub modules: Option<Vec<u32>>,
    pub price_per_gb: Option<f64>,
    pub color: Option<String>,
    pub first_word_latency: Option<f64>,
    pub cas_latency: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawStorage {
    pub name: String,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capacity: f64,
    pub price_per_gb: Option<f64>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: Scalar,
    pub cache: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_factor: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interface: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawPsu {
    pub name: String,
    pub price: Option<f64>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    pub efficiency: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wattage: u32,
    pub modular: Option<String>,
    pub color: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCase {
    pub name: String,
    pub price: Option<f64>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    pub color: Option<String>,
    pub side_panel: Option<String>,
    pub external_volume: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internal_35_bays: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCooler {
    pub name: String,
    pub price: Option<f64>,
    pub rpm: Option<Span>,
    pub noise_level: Option<Span>,
    pub color: Option<String>,
    pub size: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawMonitor {
    pub name: String,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen_size: f64,
    pub resolution: Option<Vec<u32>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub refresh_rate: u32,
    pub response_time: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub panel_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aspect_ratio: String,
}
