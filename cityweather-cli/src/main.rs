//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Logging setup and process exit status

use clap::Parser;
use cityweather_core::{WeatherError, error::EXIT_FAILURE};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.debug);

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Usage errors keep their dedicated status; anything else is a general failure.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<WeatherError>()
        .map_or(EXIT_FAILURE, WeatherError::exit_code)
}

/// Initialize the global tracing subscriber on stderr.
///
/// `--debug` turns on debug output for our crates; otherwise `RUST_LOG`
/// is honoured and the default is `warn`.
fn init_tracing(debug: bool) {
    let env_filter = if debug {
        EnvFilter::new("cityweather_cli=debug,cityweather_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn usage_error_maps_to_usage_status() {
        let err = anyhow::Error::from(WeatherError::usage("incomplete location name"));
        assert_eq!(exit_status(&err), cityweather_core::error::EXIT_USAGE);
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn request_error_maps_to_general_status() {
        let err = anyhow::Error::from(WeatherError::Request { status: "404 Not Found".into() });
        assert_eq!(exit_status(&err), 1);
    }

    #[test]
    fn settings_errors_map_to_general_status() {
        let err = anyhow!("Failed to parse settings file: settings.toml");
        assert_eq!(exit_status(&err), EXIT_FAILURE);
    }
}
