use std::collections::BTreeSet;
use std::path::Path;

use rigwise_core::config::LoadOptions;
use rigwise_core::{
    compute_metrics, required_psu_wattage, ApplicationError, AssembledBuild, BuildMetrics,
    ComponentType,
};
use serde::Serialize;

use crate::commands::{input_failure, load_config, read_json, CommandResult};

const COMMAND: &str = "metrics";

#[derive(Debug, Serialize)]
struct MetricsReport {
    #[serde(flatten)]
    metrics: BuildMetrics,
    psu_headroom: String,
    required_psu_wattage: u32,
    owned: BTreeSet<ComponentType>,
}

pub fn run(options: LoadOptions, build_path: &Path, owned: &[String]) -> CommandResult {
    if let Err(failure) = load_config(COMMAND, options) {
        return failure;
    }

    let owned = match owned
        .iter()
        .map(|value| value.parse::<ComponentType>())
        .collect::<Result<BTreeSet<_>, _>>()
    {
        Ok(owned) => owned,
        Err(error) => {
            return CommandResult::from_application_error(COMMAND, &ApplicationError::from(error))
        }
    };

    let build: AssembledBuild = match read_json(build_path) {
        Ok(build) => build,
        Err(error) => return input_failure(COMMAND, error),
    };

    let metrics = compute_metrics(&build, &owned);
    let report = MetricsReport {
        psu_headroom: metrics.headroom_label(),
        required_psu_wattage: required_psu_wattage(&build),
        metrics,
        owned,
    };

    CommandResult::success_with(
        COMMAND,
        format!("computed metrics for {} components", build.len()),
        Some(report),
    )
}
