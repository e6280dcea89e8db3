use std::fs::File;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use daxval::core::config::{self, DaxvalConfig};
use daxval::{headless, tui};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(
    name = "daxval",
    about = "Terminal front-end for a DAX validation service",
    args_conflicts_with_subcommands = true
)]
struct Args {
    /// Validation endpoint (overrides the config file and DAXVAL_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one expression and print the server's JSON response
    Validate {
        /// Validation endpoint (overrides the config file and DAXVAL_ENDPOINT)
        #[arg(short, long)]
        endpoint: Option<String>,
        /// DAX expression to submit
        expr: String,
    },
    /// Run only the offline quick check (no network)
    Check {
        /// DAX expression to check
        expr: String,
    },
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the TUI owns stdout, so logs go to daxval.log
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("daxval.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        DaxvalConfig::default()
    });

    let cli_endpoint = match &args.command {
        Some(Command::Validate { endpoint, .. }) => endpoint.as_deref(),
        _ => args.endpoint.as_deref(),
    };
    let resolved = config::resolve(&file_config, cli_endpoint);
    log::info!("daxval starting up with endpoint: {}", resolved.endpoint);

    match args.command {
        None => {
            tui::run(resolved)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Validate { expr, .. }) => {
            Ok(headless::validate(&resolved, expr).await.emit())
        }
        Some(Command::Check { expr }) => Ok(headless::check(&resolved, &expr).emit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_endpoint_flag_scoping() {
        let tui = Args::try_parse_from(["daxval", "--endpoint", "http://x/validate"]).unwrap();
        assert_eq!(tui.endpoint.as_deref(), Some("http://x/validate"));
        assert!(tui.command.is_none());

        let validate =
            Args::try_parse_from(["daxval", "validate", "-e", "http://x/validate", "SUM(x)"])
                .unwrap();
        assert!(matches!(
            validate.command,
            Some(Command::Validate { endpoint: Some(ref e), ref expr }) if e == "http://x/validate" && expr == "SUM(x)"
        ));

        // check never talks to an endpoint, so the flag is rejected
        assert!(Args::try_parse_from(["daxval", "check", "--endpoint", "x", "SUM(x)"]).is_err());
        assert!(Args::try_parse_from(["daxval", "--endpoint", "x", "check", "SUM(x)"]).is_err());
    }
}
