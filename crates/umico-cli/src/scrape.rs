//! `scrape` command: fetch every page, then write the CSV and Excel files.
//!
//! A fetch failure ends pagination early but is not an error here; whatever
//! was collected is still saved. Failing to write an output file is.

use anyhow::Context;
use umico_core::AppConfig;
use umico_export::SaveOutcome;
use umico_scraper::{scrape_all, PaginationConfig, UmicoClient};

pub(crate) async fn run_scrape(config: &AppConfig) -> anyhow::Result<()> {
    let client = UmicoClient::new(&config.api)
        .map_err(|e| anyhow::anyhow!("failed to build Umico client: {e}"))?;
    let pagination = PaginationConfig::from_app_config(config);

    tracing::info!(
        base_url = %config.api.base_url,
        per_page = pagination.per_page,
        max_pages = pagination.max_pages,
        "starting Umico store scrape"
    );

    let outcome = scrape_all(&client, &pagination).await;

    if outcome.stop.is_failure() {
        tracing::warn!(
            stores = outcome.records.len(),
            pages = outcome.pages_fetched,
            stop = %outcome.stop,
            "scrape ended early; saving partial results"
        );
    } else {
        tracing::info!(
            stores = outcome.records.len(),
            pages = outcome.pages_fetched,
            stop = %outcome.stop,
            "scrape finished"
        );
    }

    let csv = umico_export::write_csv(&config.output.csv_path, &outcome.records)
        .with_context(|| format!("failed to write {}", config.output.csv_path.display()))?;
    let xlsx = umico_export::write_xlsx(&config.output.xlsx_path, &outcome.records)
        .with_context(|| format!("failed to write {}", config.output.xlsx_path.display()))?;

    println!("total stores scraped: {}", outcome.records.len());
    for saved in [csv, xlsx] {
        if let SaveOutcome::Written { path, rows } = saved {
            println!("saved {rows} rows to {}", path.display());
        }
    }
    if outcome.stop.is_failure() {
        eprintln!("warning: {}", outcome.stop);
    }

    Ok(())
}
