use std::process::ExitCode;

fn main() -> ExitCode {
    rigwise_cli::run()
}
