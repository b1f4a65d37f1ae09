//! Pool Finder entry point
//!
//! Authenticates as an UltraDNS reseller, impersonates each sub-account and
//! reports every pool record as Sub-Account × Zone × Pool.
//!
//! Logs and progress go to stderr; stdout carries only the report.

mod cli;
mod config;
mod progress;

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pool_finder_core::{CoreError, PoolInventoryService, render};
use pool_finder_provider::{ProviderError, UltraDnsClient};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Args;
use config::RunConfig;
use progress::TracingProgress;

/// Exit status when the credential is not a reseller account.
const EXIT_NOT_RESELLER: u8 = 3;
const EXIT_FAILURE: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_expected(&e) {
                tracing::warn!("Error: {e:#}");
            } else {
                tracing::error!("Error: {e:#}");
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Credential and permission problems; logged at warn instead of error.
fn is_expected(err: &anyhow::Error) -> bool {
    if let Some(core) = err.downcast_ref::<CoreError>() {
        return core.is_expected();
    }
    err.downcast_ref::<ProviderError>()
        .is_some_and(ProviderError::is_expected)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let denied = err
        .downcast_ref::<CoreError>()
        .is_some_and(CoreError::is_permission_denied)
        || matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::ResellerPermissionDenied { .. })
        );
    if denied { EXIT_NOT_RESELLER } else { EXIT_FAILURE }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time()
                .with_target(verbose > 0),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = RunConfig::from_args(args)?;
    tracing::debug!("Using API at {}", config.client.base_url);

    let client = Arc::new(
        UltraDnsClient::new(config.client.clone()).context("Failed to initialise HTTP client")?,
    );
    let reseller = client
        .login(&config.credential)
        .await
        .context("Failed to obtain reseller token")?;

    let rows = PoolInventoryService::new(Arc::clone(&client))
        .collect(&reseller, &TracingProgress)
        .await?;

    render(&rows, &config.report).context("Failed to write report")?;
    Ok(())
}
