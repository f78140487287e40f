// src/main.rs

use std::process::ExitCode;
use std::time::Duration;

use reqwest::Client;

use gamejobs_crawler::config::Config;
use gamejobs_crawler::domain::models::SyncReport;
use gamejobs_crawler::error::AppError;
use gamejobs_crawler::extractor::DateNormalizer;
use gamejobs_crawler::repository::HttpJobStore;
use gamejobs_crawler::service::http::{create_client, ClientType};
use gamejobs_crawler::service::{
    default_sources, validate_endpoint, AggregationPipeline, SourceContext, SourceSummary,
    SyncEngine,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let config = Config::load();

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_config() => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<(), AppError> {
    // Nothing is crawled for a run that could never sync
    validate_endpoint(&config.store_url)?;

    let (source_client, store_client) = match create_clients(config.timeout()) {
        Ok(clients) => clients,
        Err(e) => {
            tracing::error!("[HTTP] Could not build HTTP clients, nothing crawled: {:#}", e);
            print_sync(&SyncReport::default(), config.dry_run);
            return Ok(());
        }
    };

    let ctx = SourceContext::new(source_client, DateNormalizer::current())
        .with_max_pages(config.max_pages);
    let pipeline =
        AggregationPipeline::new(default_sources(&ctx)).with_industry_filter(config.exclude_non_game);

    let run = pipeline.run().await;
    print_sources(&run.summaries);
    let jobs = run.into_jobs();

    let remote = HttpJobStore::new(store_client, config.store_url.clone());
    let engine = SyncEngine::new();

    let report = if config.dry_run {
        let (report, would_create) = engine.preview(&jobs, &remote).await?;
        for job in &would_create {
            println!(
                "  would create: [{}] {} | {} | {}",
                job.category.as_str(),
                job.company,
                job.position,
                job.link
            );
        }
        report
    } else {
        engine.sync(&jobs, &remote).await?
    };

    print_sync(&report, config.dry_run);
    Ok(())
}

fn create_clients(timeout: Duration) -> anyhow::Result<(Client, Client)> {
    Ok((
        create_client(ClientType::Browser, timeout)?,
        create_client(ClientType::Standard, timeout)?,
    ))
}

fn print_sources(summaries: &[SourceSummary]) {
    println!(
        "{:<10} {:>8} {:>9} {:>11} {:>11} {:>9}",
        "source", "fetched", "accepted", "ineligible", "duplicates", "failures"
    );
    for s in summaries {
        println!(
            "{:<10} {:>8} {:>9} {:>11} {:>11} {:>9}",
            s.source,
            s.fetched,
            s.accepted,
            s.ineligible + s.off_industry,
            s.duplicates,
            s.request_failures + s.item_failures
        );
    }
}

fn print_sync(report: &SyncReport, dry_run: bool) {
    let verb = if dry_run { "Would sync" } else { "Successfully synced" };
    println!(
        "Done! {} {} jobs, Skipped {} duplicates, {} failed.",
        verb, report.created, report.skipped, report.failed
    );
    if report.existing_read_failed {
        println!("Warning: existing jobs could not be read; duplicates were not checked.");
    }
}
