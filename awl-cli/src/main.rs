//! Command line client for the AWL Neuss waste collection calendar.
//!
//! Reads the address from `awl.conf` and prints the next pickup date, the
//! collection schedule, or matching streets of the street directory.

mod cli;
mod report;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use awl_core::{Address, AwlService, ScheduleSpan, ServiceError, config};
use awl_provider_neuss as neuss;
use chrono::Local;
use clap::Parser;
use reqwest::Client;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

const USAGE_ERROR: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the report
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let client = Client::builder().user_agent("awl-neuss/0.1").build()?;
    let service = AwlService::new(neuss::plugin_with_base_url(client, &cli.api_url));
    let meta = service.provider();
    tracing::debug!(provider = %meta.id, name = %meta.name, url = %meta.base_url, "service ready");

    let today = Local::now().date_naive();
    let mut stdout = io::stdout();

    match cli.command.unwrap_or_default() {
        Command::Streets { pattern } => {
            let streets = service
                .search_streets(pattern.as_deref())
                .await
                .context("Error getting town streets")?;
            report::streets(&mut stdout, &streets)?;
        }

        Command::Next { bin } => {
            let Some(address) = configured_address(&service, cli.config.as_deref()).await? else {
                report::config_help(&mut stdout)?;
                return Ok(ExitCode::SUCCESS);
            };

            match service.next_pickup(&address, bin.as_deref(), today).await {
                Ok(pickup) => report::next_pickup(&mut stdout, pickup.as_ref())?,
                Err(ServiceError::InvalidBinType(raw)) => {
                    report::invalid_bin(&mut io::stderr(), &raw)?;
                    return Ok(ExitCode::from(USAGE_ERROR));
                }
                Err(err) => return Err(err).context("Error trying to get schedule data"),
            }
        }

        Command::Schedule { month, bin, year } => {
            let Some(address) = configured_address(&service, cli.config.as_deref()).await? else {
                report::config_help(&mut stdout)?;
                return Ok(ExitCode::SUCCESS);
            };

            let span = if year {
                ScheduleSpan::FullYear
            } else {
                ScheduleSpan::ThreeMonths
            };
            let schedule = service
                .schedule(&address, month.as_deref(), bin.as_deref(), span, today)
                .await
                .context("Error trying to get schedule data")?;
            report::schedule(&mut stdout, schedule.as_ref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Load the configuration and resolve it to an address.
///
/// `Ok(None)` means the file is readable but incomplete.
async fn configured_address(service: &AwlService, path: Option<&Path>) -> Result<Option<Address>> {
    let Some(config) = config::load(path)? else {
        return Ok(None);
    };
    let address = service
        .resolve_address(&config)
        .await
        .context("Error resolving the configured street")?;
    tracing::info!(%address, "using address");
    Ok(Some(address))
}
