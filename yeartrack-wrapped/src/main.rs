//! yeartrack-wrapped - Issue Tracker Year in Review CLI
//!
//! Generate Spotify Wrapped-style summaries of your issue-tracker activity.

mod render;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use yeartrack_core::config::TrackerConfig;
use yeartrack_core::{
    Aggregator, Collector, Config, Credential, Error, StatisticsReport, TrackerApi,
    TrackerClient,
};

#[derive(Parser, Debug)]
#[command(name = "yeartrack-wrapped")]
#[command(about = "Issue Tracker Wrapped - Your Year in Review")]
#[command(version)]
struct Args {
    /// Year to generate wrapped for (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Project short name to collect articles from (repeatable)
    #[arg(long = "project", value_name = "SHORT_NAME")]
    projects: Vec<String>,

    /// Tracker base URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Permanent API token (overrides config)
    #[arg(long, env = "YEARTRACK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Remember endpoint, token and projects in the config file
    #[arg(long)]
    save: bool,

    /// List projects visible to the token and exit
    #[arg(long)]
    list_projects: bool,

    /// Disable fun mode (no fun facts, no achievements, no emoji)
    #[arg(long)]
    serious: bool,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Bucket activity by UTC time instead of local time
    #[arg(long)]
    utc: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load().context("failed to load configuration")?;
    let _log_guard = yeartrack_core::logging::init(&config.logging).ok();

    let tracker = merge_tracker_settings(&config.tracker, &args);
    let credential = tracker
        .credential()
        .map_err(|e| explain(e, None))
        .context("no tracker connection configured; pass --endpoint and --token")?;

    let client = TrackerClient::new(&credential).map_err(|e| explain(e, Some(&credential)))?;

    if args.list_projects {
        list_projects(&client, &credential).await?;
        if args.save {
            remember(&mut config, &tracker)?;
        }
        return Ok(());
    }

    if let Some(format) = args.export.as_deref() {
        if !matches!(format, "md" | "json") {
            anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", format);
        }
    }

    let year = args.year.unwrap_or_else(|| Local::now().year());
    tracing::info!(year, endpoint = %credential.base_endpoint(), "yeartrack-wrapped starting");

    let spinner = progress_spinner();
    let observer = |message: &str| spinner.set_message(message.to_string());

    let collected = Collector::new(&client)
        .collect_year_data(year, &tracker.article_projects, &observer)
        .await;
    spinner.finish_and_clear();

    let dataset = collected.map_err(|e| explain(e, Some(&credential)))?;
    if args.save {
        remember(&mut config, &tracker)?;
    }

    let report = if args.utc {
        Aggregator::new(Utc).calculate_all(&dataset)
    } else {
        Aggregator::new(Local).calculate_all(&dataset)
    };

    output(&report, args.export.as_deref(), !args.serious)
}

/// Command-line flags take precedence over stored settings.
fn merge_tracker_settings(stored: &TrackerConfig, args: &Args) -> TrackerConfig {
    let mut tracker = stored.clone();
    if let Some(endpoint) = &args.endpoint {
        tracker.endpoint = Some(endpoint.clone());
    }
    if let Some(token) = &args.token {
        tracker.token = Some(token.clone());
    }
    if !args.projects.is_empty() {
        tracker.article_projects = args.projects.clone();
    }
    tracker
}

/// Persist connection settings once the tracker has accepted them.
fn remember(config: &mut Config, tracker: &TrackerConfig) -> Result<()> {
    config.tracker = tracker.clone();
    config.save().context("failed to save configuration")?;
    eprintln!("Saved connection settings to {}", Config::config_path().display());
    Ok(())
}

fn progress_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Attach user-facing guidance to a core error.
fn explain(error: Error, credential: Option<&Credential>) -> anyhow::Error {
    let endpoint = credential.map_or("the tracker", |c| c.base_endpoint());
    let hint = if error.is_transport() {
        format!(
            "could not reach {}; check the URL and your network connection",
            endpoint
        )
    } else if error.is_auth() {
        format!(
            "{} rejected the token; check that it is valid and allowed to read issues",
            endpoint
        )
    } else {
        return anyhow::Error::new(error);
    };
    anyhow::Error::new(error).context(hint)
}

async fn list_projects(client: &TrackerClient, credential: &Credential) -> Result<()> {
    let projects = client
        .get_projects()
        .await
        .map_err(|e| explain(e, Some(credential)))?;

    if projects.is_empty() {
        println!("No projects visible to this token.");
        return Ok(());
    }

    for project in projects {
        println!("{:<12} {}", project.short_name, project.name);
    }
    Ok(())
}

fn output(report: &StatisticsReport, export: Option<&str>, fun_mode: bool) -> Result<()> {
    match export {
        Some("json") => println!("{}", render::json(report)?),
        Some("md") => print!("{}", render::markdown(report, fun_mode)?),
        _ => print!("{}", render::terminal(report, fun_mode)?),
    }
    Ok(())
}
