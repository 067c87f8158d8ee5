// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config (once) --> Command Dispatch
//!   Publish | Config | Generate | Version
//! ```

use anyhow::Context;
use std::path::PathBuf;
use std::process::ExitCode;

use rimpub::cli::global::GlobalOptions;
use rimpub::cli::{self, Command};
use rimpub::cmd::config::run_config_command;
use rimpub::cmd::generate::run_generate_command;
use rimpub::cmd::publish::run_publish_command;
use rimpub::config::AppConfig;
use rimpub::config::paths::platform_resolver;
use rimpub::config::store;
use rimpub::logging::init_logging;
use rimpub::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Publish(args)) => match load_config(&cli.global) {
            Ok((config, _)) => run_publish_command(args, &config, cli.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Config(args)) => load_config(&cli.global)
            .and_then(|(config, path)| run_config_command(args, &config, &path)),
        Some(Command::Generate(args)) => run_generate_command(args),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn config_path(global: &GlobalOptions) -> rimpub::error::Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => Ok(store::default_config_path()?),
    }
}

fn load_config(global: &GlobalOptions) -> rimpub::error::Result<(AppConfig, PathBuf)> {
    let path = config_path(global)?;
    store::ensure_exists(&path, platform_resolver().as_ref())?;
    let overrides = global.to_config_overrides()?;
    let config = store::load(&path, &overrides)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    Ok((config, path))
}
