mod cli;
mod commands;
mod config;
mod error;
mod forms;
mod listing;
mod notice;
mod services;
mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state = match build_state(cli.base_url.as_deref()) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return ExitCode::from(e.exit_code());
        }
    };
    let _sync = state.start_sync();

    let had_session = state.store.is_authenticated();
    let fallback = cli.command.fallback();
    match commands::run(&state, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                AppError::Api(api) => {
                    tracing::debug!(code = api.error_code(), retryable = api.retryable(), error = %e, "command failed");
                }
                _ => tracing::debug!(error = %e, "command failed"),
            }
            let session_lost = had_session && !state.store.is_authenticated();
            println!("{}", services::failure_notice(&e, fallback, session_lost));
            ExitCode::from(e.exit_code())
        }
    }
}

fn build_state(base_url: Option<&str>) -> Result<AppState, AppError> {
    let config = AppConfig::from_env()?.with_base_url(base_url);
    tracing::debug!(api = %config.api_base_url, store = ?config.session_store, "client configured");
    AppState::new(&config)
}
