// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command implementation for rimpub.

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::cli::publish::PublishArgs;
use crate::cmd::confirm;
use crate::config::AppConfig;
use crate::config::project::ProjectConfig;
use crate::error::{ConfigError, Result, bail_out};
use crate::publish::{BuildHook, PublishOptions, PublishReport, publish};

/// Main handler for the publish command.
///
/// # Errors
///
/// Returns an error if the project cannot be resolved, the publish cannot
/// start, the user declines to clean the target, or the report contains
/// failures.
pub async fn run_publish_command(args: &PublishArgs, app: &AppConfig, dry_run: bool) -> Result<()> {
    let source = match &args.source_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    let project = ProjectConfig::load(&source)
        .with_context(|| format!("failed to load project config in {}", source.display()))?;
    let target = resolve_target(args, app, &project, &source)?;
    let rules = Arc::new(project.rules(&source)?);
    tracing::debug!(rules = rules.len(), "compiled ignore rules");

    let clean = args.clean && !dry_run && target.exists();
    if clean && !(args.yes || app.no_ask) {
        let prompt = format!(
            "Target directory '{}' already exists. Do you want to delete it and continue?",
            target.display()
        );
        if !confirm(&prompt).context("failed to read the answer")? {
            return Err(bail_out("publish cancelled").into());
        }
    }

    let hook = if args.no_build {
        None
    } else if args.json {
        project.build_hook(app).map(BuildHook::with_logged_output)
    } else {
        project.build_hook(app)
    };

    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting build hook...");
            ctrl_c_token.cancel();
        }
    });

    let options = PublishOptions::builder()
        .maybe_with_hook(hook)
        .with_dry_run(dry_run)
        .with_clean(clean)
        .with_cancel(cancel_token)
        .build();

    let report = publish(&source, &target, rules, &options).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        for line in format_summary(&report) {
            println!("{line}");
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(bail_out(format!(
            "publish to {} finished with errors",
            report.target().display()
        ))
        .into())
    }
}

/// `<--target-dir | mods dir>/<project name>`.
///
/// # Errors
///
/// Returns `ConfigError::MissingKey` if no mods directory is configured.
pub fn resolve_target(
    args: &PublishArgs,
    app: &AppConfig,
    project: &ProjectConfig,
    source: &Path,
) -> Result<PathBuf> {
    let mods_dir = args
        .target_dir
        .clone()
        .or_else(|| app.mods_dir())
        .ok_or_else(|| ConfigError::MissingKey {
            key: "path_mods".to_string(),
        })?;
    let name = project.resolve_name(source)?;
    Ok(mods_dir.join(name))
}

/// Human-readable report lines.
#[must_use]
pub fn format_summary(report: &PublishReport) -> Vec<String> {
    let verb = if report.is_dry_run() {
        "Would publish"
    } else {
        "Published"
    };
    let mut lines = vec![format!(
        "{verb} to {}: {} files ({} bytes), {} directories, {} skipped",
        report.target().display(),
        report.files_copied(),
        report.bytes_copied(),
        report.directories(),
        report.skipped(),
    )];

    for failure in report.failures() {
        lines.push(format!(
            "  failed: {}: {}",
            failure.path().display(),
            failure.message()
        ));
    }

    if let Some(hook) = report.hook() {
        let status = match (hook.exit_code(), hook.error()) {
            (_, Some(error)) => format!("failed: {error}"),
            _ if hook.is_interrupted() => "interrupted".to_string(),
            (Some(code), None) => format!("exit code {code}"),
            (None, None) => "no exit code".to_string(),
        };
        lines.push(format!("Build hook '{}': {status}", hook.command()));
    }
    lines
}
