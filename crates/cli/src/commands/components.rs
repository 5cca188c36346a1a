use rigwise_core::config::LoadOptions;
use rigwise_core::{ApplicationError, ComponentQuery, ComponentType};

use crate::commands::{load_config, open_engine, CommandResult};

const COMMAND: &str = "components";

pub fn run(
    options: LoadOptions,
    component_type: &str,
    search: Option<String>,
    limit: Option<usize>,
) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let category = match component_type.parse::<ComponentType>() {
        Ok(category) => category,
        Err(error) => {
            return CommandResult::from_application_error(COMMAND, &ApplicationError::from(error))
        }
    };

    let engine = open_engine(&config);
    let components = engine.components_by_type(category, &ComponentQuery { search, limit });

    CommandResult::success_with(
        COMMAND,
        format!("{} {category} components", components.len()),
        Some(components),
    )
}
