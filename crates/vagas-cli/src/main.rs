//! Vagas command-line entry point.
//!
//! Scrapes the job board, then archives the listings into the spreadsheet.
//! Core logic lives in the `vagas-*` crates.

mod cli;

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use vagas_browser::BrowserEngine;
use vagas_scanner::{ScrapeOrchestrator, ScrapeReport};
use vagas_store::{Archive, PersistOutcome};

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vagas=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

fn summarize(report: &ScrapeReport) {
    for record in &report.records {
        println!(
            "{:>8}  p{:<3} {:<24} {:<12} {}",
            record.id,
            record.page,
            record.work_model.label(),
            record.seniority.label(),
            record.title
        );
    }
    println!(
        "{} listings from {} pages",
        report.records.len(),
        report.pages_read
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = cli::Args::parse();
    let config = args.load_config().context("failed to load configuration")?;

    info!("Starting Vagas v{}", env!("CARGO_PKG_VERSION"));

    let engine = Arc::new(
        BrowserEngine::launch(&config.browser)
            .await
            .context("failed to launch the browser")?,
    );

    let report = ScrapeOrchestrator::new(engine.clone(), config.scraper.clone())
        .run()
        .await;

    info!("Closing browser");
    match Arc::try_unwrap(engine) {
        Ok(engine) => {
            if let Err(e) = engine.close().await {
                warn!("Browser did not close cleanly: {}", e);
            }
        }
        Err(_) => warn!("Browser still in use; leaving it to exit with the process"),
    }

    if args.dry_run {
        summarize(&report);
        return Ok(());
    }

    let archive = Archive::new(&config.output.path, &config.output.sheet_name);
    let outcome = tokio::task::spawn_blocking(move || archive.persist(report.records))
        .await
        .context("archive task panicked")?
        .with_context(|| format!("failed to save {}", config.output.path.display()))?;

    match outcome {
        PersistOutcome::NothingCollected => println!("No listings collected."),
        PersistOutcome::Created { written } => {
            println!("Spreadsheet created with {written} listings.");
        }
        PersistOutcome::UpToDate { read } => {
            println!("{read} read, 0 new. Spreadsheet already up to date.");
        }
        PersistOutcome::Appended { read, new } => println!("{read} read, {new} new saved."),
        PersistOutcome::Replaced { written } => {
            println!("Existing spreadsheet was unreadable; rewritten with {written} listings.");
        }
    }

    Ok(())
}
