use std::error::Error as StdError;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no usable chart font found (searched: {})", format_paths(.searched))]
    FontNotFound { searched: Vec<PathBuf> },

    #[error("font file {} could not be loaded", .path.display())]
    InvalidFont { path: PathBuf },

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: StdError + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
