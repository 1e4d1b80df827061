//! datahub-search: find Fabric and Power BI items across all workspaces.
//!
//! Progress, warnings and logs go to stderr; stdout carries only the
//! rendered result so it can be piped.

mod args;

use std::fmt::Write as _;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datahub_core::{defaults, format_items, item_types, process};
use datahub_search::{
    regions, AzureCliTokenProvider, SearchClient, SearchConfig, SearchRequest,
    StaticTokenProvider, TokenProvider,
};

use crate::args::Cli;

const DEFAULT_LOG_FILTER: &str = "datahub_search=info,datahub_core=info";

/// Initialize tracing.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "datahub_search=info,datahub_core=info")
fn init_logging() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("datahub-search.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    }
}

fn list_types() -> String {
    let mut out = String::from("Available item types:\n\n");
    out.push_str(
        "IMPORTANT: Use 'Model' for semantic models, 'DataFlow' for dataflows, \
         'SynapseNotebook' for notebooks\n\n",
    );
    for (category, members) in item_types::by_category() {
        let _ = writeln!(out, "  {}:", category);
        for descriptor in members {
            let _ = writeln!(out, "    {:<30} {}", descriptor.label, descriptor.description);
        }
        out.push('\n');
    }
    out
}

fn list_regions() -> String {
    let mut out = String::from("Available regions:\n\n");
    for region in regions::sorted() {
        let default = if region.is_default() { " (default)" } else { "" };
        let _ = writeln!(out, "  {:<20} {}{}", region.key, region.host, default);
    }
    out
}

/// Merge command-line overrides into the environment configuration.
fn resolve_config(cli: &Cli, mut config: SearchConfig, page_size_from_env: bool) -> SearchConfig {
    if let Some(region) = &cli.region {
        config.region = region.clone();
    }
    config.page_size = match cli.page_size {
        Some(size) => size,
        None if page_size_from_env => config.page_size,
        None => defaults::CLI_PAGE_SIZE,
    };
    config
}

async fn run(cli: Cli) -> Result<()> {
    if cli.list_types {
        print!("{}", list_types());
        return Ok(());
    }
    if cli.list_regions {
        print!("{}", list_regions());
        return Ok(());
    }

    let Some(item_type) = cli.item_type.clone() else {
        bail!("--type is required for search (or use --list-types)");
    };

    if !item_types::is_known(&item_type) {
        eprintln!("Warning: '{}' not in known types. Trying anyway...", item_type);
        eprintln!("Hint: Use --list-types to see available types");
    }

    // Parse everything the pipeline needs before touching the network.
    let options = cli.pipeline_options()?;
    let output_format = cli.output_format()?;

    let page_size_from_env =
        SearchConfig::page_size_from_lookup(|key| std::env::var(key).ok()).is_some();
    let config = resolve_config(&cli, SearchConfig::from_env(), page_size_from_env);
    config.validate()?;
    debug!(?config, "Configuration loaded");

    eprintln!("Getting access token...");
    let provider: Box<dyn TokenProvider> = match &config.token {
        Some(token) => Box::new(StaticTokenProvider::new(token.clone())),
        None => Box::new(AzureCliTokenProvider::new()),
    };
    let token = provider.access_token().await?;

    eprintln!("Searching for {} in {}...", item_type, config.region);
    let client = SearchClient::from_config(&config)?;
    let mut request = SearchRequest::new([item_type])
        .region(config.region.clone())
        .page_size(config.page_size)
        .page_number(cli.page);
    if let Some(id) = &cli.workspace_id {
        request = request.workspace_id(id.clone());
    }
    let results = client.search(&token, &request).await?;
    eprintln!("API returned {} items", results.count);

    let processed = process(&results.items, &options);
    for warning in &processed.warnings {
        eprintln!("Warning: {}", warning.message);
    }

    info!(
        result_count = results.count,
        filtered_count = processed.matched,
        active_filters = options.filter.active_count(),
        "Results processed"
    );

    let rendered =
        format_items(&processed.items, output_format).context("Failed to render results")?;
    eprintln!("\nFound {} items after filtering:\n", processed.items.len());
    println!("{}", rendered);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
