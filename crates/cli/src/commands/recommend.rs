use std::path::Path;

use rigwise_core::config::LoadOptions;
use rigwise_core::{
    finalize, parse_generated, ApplicationError, BuildRecommendation, RecommendationPlan,
    UserConstraints,
};
use serde::Serialize;
use tracing::info;

use crate::commands::{
    input_failure, load_config, open_engine, read_json, read_text, CommandResult,
};

const COMMAND: &str = "recommend";

#[derive(Debug, Serialize)]
struct RecommendReport {
    plan: RecommendationPlan,
    checklist: String,
    prompt_candidates: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<BuildRecommendation>,
}

pub fn run(options: LoadOptions, answers_path: &Path, reply_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let answers: UserConstraints = match read_json(answers_path) {
        Ok(answers) => answers,
        Err(error) => return input_failure(COMMAND, error),
    };
    if let Err(error) = answers.validate() {
        return CommandResult::from_application_error(COMMAND, &ApplicationError::from(error));
    }

    let engine = open_engine(&config);
    let plan = engine.prepare(&answers);

    let recommendation = match reply_path {
        Some(path) => {
            let text = match read_text(path) {
                Ok(text) => text,
                Err(error) => return input_failure(COMMAND, error),
            };
            let reply = match parse_generated(&text) {
                Ok(reply) => reply,
                Err(error) => {
                    return CommandResult::from_application_error(
                        COMMAND,
                        &ApplicationError::from(error),
                    )
                }
            };
            let recommendation = finalize(reply, &plan, &answers);
            info!(
                event_name = "cli.recommend.assembled",
                components = recommendation.build.len(),
                total_price = %recommendation.metrics.total_price,
                "generated reply assembled into build"
            );
            Some(recommendation)
        }
        None => None,
    };

    let message = if plan.is_empty() {
        "all components are being reused; nothing to recommend".to_string()
    } else {
        format!(
            "planned {} categories with {} CPU and {} GPU candidates",
            plan.categories.len(),
            plan.cpu_candidates.len(),
            plan.gpu_candidates.len()
        )
    };

    let report = RecommendReport {
        checklist: plan.component_checklist(),
        prompt_candidates: plan.candidate_blocks(),
        plan,
        recommendation,
    };
    CommandResult::success_with(COMMAND, message, Some(report))
}
