pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rigwise_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "rigwise",
    about = "Rigwise PC build recommendation CLI",
    long_about = "Plan PC builds against the local parts catalog, inspect components, and compute build metrics.",
    after_help = "Examples:\n  rigwise recommend --answers answers.json\n  rigwise components --type cpu --search ryzen\n  rigwise metrics --build build.json --owned monitor\n  rigwise doctor"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a rigwise.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the catalog dataset directory")]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "Override the log format (compact|pretty|json)")]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Prepare a recommendation plan and optionally assemble a generated reply")]
    Recommend {
        #[arg(long, help = "JSON file with the questionnaire answers")]
        answers: PathBuf,
        #[arg(long, help = "File holding the generator's reply text")]
        reply: Option<PathBuf>,
    },
    #[command(about = "List catalog components of one category")]
    Components {
        #[arg(long = "type", help = "Component category, e.g. cpu, gpu, ram")]
        component_type: String,
        #[arg(long, help = "Case-insensitive substring filter on the part name")]
        search: Option<String>,
        #[arg(long, help = "Maximum number of results")]
        limit: Option<usize>,
    },
    #[command(about = "Compute wattage, PSU headroom, and total price for an assembled build")]
    Metrics {
        #[arg(long, help = "JSON file with the assembled build")]
        build: PathBuf,
        #[arg(long, value_delimiter = ',', help = "Categories the user already owns")]
        owned: Vec<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Check that every catalog category loads priced records")]
    Doctor,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                data_dir: self.data_dir.clone(),
                log_level: self.log_level.clone(),
                log_format: self.log_format,
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    if let Ok(config) = AppConfig::load(options.clone()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend { answers, reply } => {
            commands::recommend::run(options, &answers, reply.as_deref())
        }
        Command::Components { component_type, search, limit } => {
            commands::components::run(options, &component_type, search, limit)
        }
        Command::Metrics { build, owned } => commands::metrics::run(options, &build, &owned),
        Command::Config => commands::config::run(options),
        Command::Doctor => commands::doctor::run(options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a single JSON document.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
