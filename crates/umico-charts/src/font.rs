//! Run-time font loading for chart text.

use std::path::{Path, PathBuf};

use plotters::style::{register_font, FontStyle};

use crate::error::ChartError;

/// Family name every chart element is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

/// Fonts tried in order when no explicit font is configured. All of them
/// cover the Azerbaijani Latin alphabet.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Paths searched for the chart font: only `explicit` when given.
#[must_use]
pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => SYSTEM_FONTS.iter().map(PathBuf::from).collect(),
    }
}

/// Loads the first readable candidate font and registers it as
/// [`FONT_FAMILY`]. Returns the path that was used.
///
/// The font bytes live for the rest of the process.
///
/// # Errors
///
/// - [`ChartError::FontNotFound`] if no candidate file can be read.
/// - [`ChartError::InvalidFont`] if the file is not a usable TrueType font.
pub fn register_chart_font(explicit: Option<&Path>) -> Result<PathBuf, ChartError> {
    let searched = candidate_paths(explicit);
    let Some((path, bytes)) = searched
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (path.clone(), bytes)))
    else {
        return Err(ChartError::FontNotFound { searched });
    };

    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| ChartError::InvalidFont { path: path.clone() })?;

    tracing::debug!(path = %path.display(), "registered chart font");
    Ok(path)
}
