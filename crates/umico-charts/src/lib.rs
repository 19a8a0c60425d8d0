//! Store-analysis charts.
//!
//! [`catalog::build_catalog`] turns records into twelve [`chart::Chart`]
//! values without touching the filesystem; [`render_all`] draws them as PNG
//! files.

pub mod aggregate;
pub mod catalog;
pub mod chart;
pub mod error;
pub mod font;
pub mod render;

pub use catalog::build_catalog;
pub use chart::{Bar, BarPanel, BarSeries, Chart, Orientation, Rgb};
pub use error::ChartError;
pub use font::register_chart_font;
pub use render::render_chart;

use std::path::{Path, PathBuf};

use umico_core::StoreRecord;

/// Renders every chart for `records` into `dir`, creating it if needed.
///
/// `font` overrides the system font search. Returns the written paths in
/// catalog order; an empty record set writes nothing and returns an empty
/// list.
///
/// # Errors
///
/// - [`ChartError::Io`] if `dir` cannot be created.
/// - [`ChartError::FontNotFound`] or [`ChartError::InvalidFont`] if no chart
///   font can be loaded.
/// - [`ChartError::Render`] if drawing a chart fails.
pub fn render_all(
    records: &[StoreRecord],
    dir: &Path,
    font: Option<&Path>,
) -> Result<Vec<PathBuf>, ChartError> {
    let charts = build_catalog(records);
    if charts.is_empty() {
        tracing::warn!("no records to chart; skipping chart generation");
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(dir)?;
    register_chart_font(font)?;

    let mut written = Vec::with_capacity(charts.len());
    for chart in &charts {
        let path = render_chart(chart, dir)?;
        tracing::info!(path = %path.display(), "chart saved");
        written.push(path);
    }

    tracing::info!(
        count = written.len(),
        dir = %dir.display(),
        stores = records.len(),
        "chart generation complete"
    );
    Ok(written)
}
