use rigwise_core::config::{AppConfig, LoadOptions};
use rigwise_core::{CatalogSource, ComponentType, DirectorySource, RecommendationEngine};
use serde::Serialize;

use crate::commands::{load_config, open_engine, CommandResult};

const COMMAND: &str = "doctor";
const EXIT_CHECKS_FAILED: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    records: usize,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    data_dir: String,
    total_records: usize,
    checks: Vec<DoctorCheck>,
}

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let report = build_report(&config);
    let failed: Vec<&str> = report
        .checks
        .iter()
        .filter(|check| check.status == CheckStatus::Fail)
        .map(|check| check.name.as_str())
        .collect();

    if failed.is_empty() {
        return CommandResult::success_with(
            COMMAND,
            "doctor: every catalog category has records",
            Some(&report),
        );
    }

    let message = format!("doctor: empty catalog categories: {}", failed.join(", "));
    let mut result = CommandResult::success_with(COMMAND, message, Some(&report));
    result.exit_code = EXIT_CHECKS_FAILED;
    result
}

fn build_report(config: &AppConfig) -> DoctorReport {
    let engine = open_engine(config);
    let checks: Vec<DoctorCheck> =
        ComponentType::ALL.into_iter().map(|category| check_category(&engine, category)).collect();

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    DoctorReport {
        overall_status: if all_pass { CheckStatus::Pass } else { CheckStatus::Fail },
        data_dir: engine.catalog().source().root().display().to_string(),
        total_records: checks.iter().map(|check| check.records).sum(),
        checks,
    }
}

fn check_category(
    engine: &RecommendationEngine<DirectorySource>,
    category: ComponentType,
) -> DoctorCheck {
    let catalog = engine.catalog();
    let records = catalog.load(category).len();
    let path = catalog.source().path_for(category);

    if records > 0 {
        return DoctorCheck {
            name: category.to_string(),
            status: CheckStatus::Pass,
            records,
            details: format!("{records} priced records from `{}`", path.display()),
        };
    }

    let details = match catalog.source().read(category) {
        Ok(_) => format!("`{}` has no usable priced records", path.display()),
        Err(error) => error.to_string(),
    };
    DoctorCheck { name: category.to_string(), status: CheckStatus::Fail, records, details }
}
