use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::raw::{
    RawCase, RawCooler, RawCpu, RawGpu, RawMonitor, RawMotherboard, RawPsu, RawRam, RawStorage,
    Scalar,
};
use crate::classify;
use crate::domain::component::{NormalizedComponent, ProcessedCpu, ProcessedGpu};

pub const MOTHERBOARD_WATTAGE: u32 = 50;
pub const RAM_WATTAGE: u32 = 5;
pub const SSD_WATTAGE: u32 = 5;
pub const HDD_WATTAGE: u32 = 10;
pub const CASE_WATTAGE: u32 = 0;
pub const COOLER_WATTAGE: u32 = 10;
pub const MONITOR_WATTAGE: u32 = 30;

/// Converts a listed price into whole local units. `None` for missing, non-finite or
/// non-positive prices, and for conversions that overflow; such records never enter the catalog.
pub fn local_price(price: Option<f64>, exchange_rate: Decimal) -> Option<Decimal> {
    let price = price.filter(|value| value.is_finite())?;
    // Shortest round-trip text keeps 189.99 as 189.99 rather than its binary expansion.
    let source = price.to_string().parse::<Decimal>().ok()?;
    if source <= Decimal::ZERO {
        return None;
    }

    let local = source
        .checked_mul(exchange_rate)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    Some(local)
}

fn component(
    name: String,
    price: Option<f64>,
    exchange_rate: Decimal,
    specs: String,
    wattage: u32,
) -> Option<NormalizedComponent> {
    let price = local_price(price, exchange_rate)?;
    Some(NormalizedComponent { name, price, specs, wattage })
}

pub fn cpu(raw: RawCpu, exchange_rate: Decimal) -> Option<ProcessedCpu> {
    let boost = raw.boost_clock.map(|clock| format!(" ({clock}GHz boost)")).unwrap_or_default();
    let specs =
        format!("{} cores, {}GHz{boost}, {}W TDP", raw.core_count, raw.core_clock, raw.tdp);
    let brand = classify::cpu_brand(&raw.name);
    let has_integrated_graphics = raw.graphics.is_some();

    let component = component(raw.name, raw.price, exchange_rate, specs, raw.tdp)?;
    Some(ProcessedCpu {
        component,
        core_count: raw.core_count,
        core_clock: raw.core_clock,
        boost_clock: raw.boost_clock,
        microarchitecture: raw.microarchitecture,
        tdp: raw.tdp,
        has_integrated_graphics,
        brand,
    })
}

pub fn gpu(raw: RawGpu, exchange_rate: Decimal) -> Option<ProcessedGpu> {
    let boost = raw.boost_clock.map(|clock| format!(", {clock}MHz boost")).unwrap_or_default();
    let specs = format!("{}, {}GB{boost}", raw.chipset, raw.memory);
    let wattage = classify::gpu_wattage(&raw.chipset);

    let component = component(raw.name, raw.price, exchange_rate, specs, wattage)?;
    Some(ProcessedGpu {
        component,
        brand: classify::gpu_brand(&raw.chipset),
        tier: classify::gpu_tier(&raw.chipset),
        chipset: raw.chipset,
        memory: raw.memory,
        core_clock: raw.core_clock,
        boost_clock: raw.boost_clock,
    })
}

pub fn motherboard(raw: RawMotherboard, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    let specs = format!(
        "{}, {}, {} slots, max {}GB",
        raw.socket, raw.form_factor, raw.memory_slots, raw.max_memory
    );
    component(raw.name, raw.price, exchange_rate, specs, MOTHERBOARD_WATTAGE)
}

/// Kits without both a speed and a module layout are dropped.
pub fn ram(raw: RawRam, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    // Listings carry `[ddr generation, MHz]`; the clock is the last element, not the first.
    let speed = raw.speed.as_deref().and_then(|speed| speed.last().copied())?;
    let (count, size) = match raw.modules.as_deref()? {
        [count, size, ..] => (*count, *size),
        _ => return None,
    };

    let cas = raw.cas_latency.map(|cas| format!(", CL{cas}")).unwrap_or_default();
    let specs = format!("{}GB ({count}x{size}GB), {speed}MHz{cas}", count * size);
    component(raw.name, raw.price, exchange_rate, specs, RAM_WATTAGE)
}

pub fn storage(raw: RawStorage, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    let capacity = if raw.capacity >= 1000.0 {
        format!("{:.1}TB", raw.capacity / 1000.0)
    } else {
        format!("{}GB", raw.capacity)
    };
    let wattage = match &raw.kind {
        Scalar::Text(kind) if kind == "SSD" => SSD_WATTAGE,
        _ => HDD_WATTAGE,
    };

    let specs = format!("{capacity}, {}, {}, {}", raw.kind, raw.form_factor, raw.interface);
    component(raw.name, raw.price, exchange_rate, specs, wattage)
}

/// The PSU's wattage is its capacity, not a draw.
pub fn psu(raw: RawPsu, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    let efficiency =
        raw.efficiency.as_deref().filter(|value| !value.is_empty()).unwrap_or("Standard");
    let modular =
        raw.modular.as_deref().filter(|value| !value.is_empty()).unwrap_or("Non-Modular");
    let specs = format!("{}W, {efficiency}, {modular}", raw.wattage);
    component(raw.name, raw.price, exchange_rate, specs, raw.wattage)
}

pub fn case(raw: RawCase, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    let mut specs = raw.kind;
    for extra in [raw.side_panel, raw.color].into_iter().flatten().filter(|value| !value.is_empty())
    {
        specs.push_str(", ");
        specs.push_str(&extra);
    }
    component(raw.name, raw.price, exchange_rate, specs, CASE_WATTAGE)
}

pub fn cooler(raw: RawCooler, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    let parts: Vec<String> = [
        raw.rpm.as_ref().and_then(|rpm| rpm.render("RPM")),
        raw.noise_level.as_ref().and_then(|noise| noise.render("dB")),
        raw.color.filter(|color| !color.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let specs = if parts.is_empty() { "CPU Cooler".to_string() } else { parts.join(", ") };
    component(raw.name, raw.price, exchange_rate, specs, COOLER_WATTAGE)
}

pub fn monitor(raw: RawMonitor, exchange_rate: Decimal) -> Option<NormalizedComponent> {
    let resolution = match raw.resolution.as_deref() {
        Some([width, height, ..]) => format!("{width}x{height}"),
        _ => String::new(),
    };
    let specs = format!(
        "{}\", {resolution}, {}Hz, {}",
        raw.screen_size, raw.refresh_rate, raw.panel_type
    );
    component(raw.name, raw.price, exchange_rate, specs, MONITOR_WATTAGE)
}
