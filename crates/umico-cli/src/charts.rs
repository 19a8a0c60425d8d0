//! `charts` command: render the analysis charts from a previous scrape.

use anyhow::Context;
use umico_core::AppConfig;

pub(crate) fn run_charts(config: &AppConfig) -> anyhow::Result<()> {
    let csv_path = &config.output.csv_path;
    let records = umico_export::read_csv(csv_path).with_context(|| {
        format!(
            "failed to read {}; run `umico-cli scrape` first",
            csv_path.display()
        )
    })?;

    tracing::info!(path = %csv_path.display(), stores = records.len(), "loaded stores for charting");

    let written = umico_charts::render_all(
        &records,
        &config.output.charts_dir,
        config.output.chart_font.as_deref(),
    )
    .context("chart generation failed")?;

    println!(
        "generated {} charts in {} from {} stores",
        written.len(),
        config.output.charts_dir.display(),
        records.len()
    );
    Ok(())
}
