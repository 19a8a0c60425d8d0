//! PNG rendering of [`Chart`] data with `plotters`.
//!
//! Categories occupy integer slots on a continuous axis; grouped series split
//! each slot. Horizontal panels put the first category at the top.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::{BarPanel, Chart, Orientation, Rgb};
use crate::error::ChartError;
use crate::font::FONT_FAMILY;

/// Share of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Draws `chart` to `dir/<file_name>` and returns the written path.
///
/// The chart font must already be registered.
///
/// # Errors
///
/// Returns [`ChartError::Render`] if drawing or PNG encoding fails.
pub fn render_chart(chart: &Chart, dir: &Path) -> Result<PathBuf, ChartError> {
    let path = dir.join(chart.file_name);
    {
        let root = BitMapBackend::new(&path, chart.size).into_drawing_area();
        root.fill(&WHITE)?;
        let areas = root.split_evenly((1, chart.panels.len().max(1)));
        for (area, panel) in areas.iter().zip(&chart.panels) {
            draw_panel(area, panel)?;
        }
        root.present()?;
    }
    Ok(path)
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(n: usize) -> f64 {
    n as f64
}

/// Axis span covering `n` category slots centred on `0..n`.
fn slot_range(n: usize) -> Range<f64> {
    -0.5..as_f64(n.max(1)) - 0.5
}

/// Category index for an axis tick, or `None` between slots.
fn slot_index(position: f64, n: usize) -> Option<usize> {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = rounded as usize;
    (idx < n).then_some(idx)
}

/// Axis position of category `idx`. Horizontal panels count down from the top.
fn slot_position(idx: usize, n: usize, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Vertical => as_f64(idx),
        Orientation::Horizontal => as_f64(n.saturating_sub(idx + 1)),
    }
}

fn slot_label(categories: &[String], position: f64, orientation: Orientation) -> String {
    let n = categories.len();
    slot_index(position, n)
        .map(|slot| match orientation {
            Orientation::Vertical => slot,
            Orientation::Horizontal => n - 1 - slot,
        })
        .and_then(|idx| categories.get(idx).cloned())
        .unwrap_or_default()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &BarPanel,
) -> Result<(), ChartError> {
    let n = panel.categories.len();
    let (min, max) = panel.axis_range();
    let base = min.max(0.0);
    let orientation = panel.orientation;

    let mut builder = ChartBuilder::on(area);
    builder
        .caption(&panel.title, (FONT_FAMILY, 26))
        .margin(20);

    let label_of = |v: &f64| slot_label(&panel.categories, *v, orientation);

    let mut chart = match orientation {
        Orientation::Vertical => builder
            .x_label_area_size(70)
            .y_label_area_size(80)
            .build_cartesian_2d(slot_range(n), min..max)?,
        Orientation::Horizontal => builder
            .x_label_area_size(60)
            .y_label_area_size(280)
            .build_cartesian_2d(min..max, slot_range(n))?,
    };

    {
        let mut mesh = chart.configure_mesh();
        mesh.label_style((FONT_FAMILY, 15))
            .axis_desc_style((FONT_FAMILY, 17));
        match orientation {
            Orientation::Vertical => {
                mesh.disable_x_mesh()
                    .x_labels(n.max(1))
                    .x_label_formatter(&label_of)
                    .y_desc(panel.value_label.as_str());
                if let Some(desc) = &panel.category_label {
                    mesh.x_desc(desc.as_str());
                }
            }
            Orientation::Horizontal => {
                mesh.disable_y_mesh()
                    .y_labels(n.max(1))
                    .y_label_formatter(&label_of)
                    .x_desc(panel.value_label.as_str());
                if let Some(desc) = &panel.category_label {
                    mesh.y_desc(desc.as_str());
                }
            }
        }
        mesh.draw()?;
    }

    let groups = panel.series.len().max(1);
    let width = GROUP_WIDTH / as_f64(groups);
    let nudge = (max - min) * 0.01;
    let note_style = TextStyle::from((FONT_FAMILY, 14).into_font());
    let mut has_legend = false;

    for (s_idx, series) in panel.series.iter().enumerate() {
        let offset = -GROUP_WIDTH / 2.0 + width * as_f64(s_idx);

        let rects = series.bars.iter().enumerate().map(|(i, bar)| {
            let start = slot_position(i, n, orientation) + offset;
            let corners = match orientation {
                Orientation::Vertical => [(start, base), (start + width, bar.value)],
                Orientation::Horizontal => [(base, start), (bar.value, start + width)],
            };
            Rectangle::new(corners, RGBColor::from(bar.color).filled())
        });
        let drawn = chart.draw_series(rects)?;

        if let Some(name) = &series.name {
            let color = series
                .bars
                .first()
                .map_or(BLACK, |bar| RGBColor::from(bar.color));
            drawn
                .label(name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
            has_legend = true;
        }

        let notes = series.bars.iter().enumerate().filter_map(|(i, bar)| {
            let text = bar.annotation.clone()?;
            let centre = slot_position(i, n, orientation) + offset + width / 2.0;
            let note = match orientation {
                Orientation::Vertical => Text::new(
                    text,
                    (centre, bar.value + nudge),
                    note_style.pos(Pos::new(HPos::Center, VPos::Bottom)),
                ),
                Orientation::Horizontal => Text::new(
                    text,
                    (bar.value + nudge, centre),
                    note_style.pos(Pos::new(HPos::Left, VPos::Center)),
                ),
            };
            Some(note)
        });
        chart.draw_series(notes)?;
    }

    if has_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, 15))
            .draw()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        vec!["first".to_owned(), "second".to_owned(), "third".to_owned()]
    }

    #[test]
    fn slot_range_centres_categories() {
        assert_eq!(slot_range(3), -0.5..2.5);
        assert_eq!(slot_range(0), -0.5..0.5);
    }

    #[test]
    fn slot_index_ignores_positions_between_slots() {
        assert_eq!(slot_index(1.0, 3), Some(1));
        assert_eq!(slot_index(1.5, 3), None);
        assert_eq!(slot_index(-1.0, 3), None);
        assert_eq!(slot_index(3.0, 3), None);
    }

    #[test]
    fn vertical_labels_run_left_to_right() {
        let cats = categories();
        assert_eq!(slot_label(&cats, 0.0, Orientation::Vertical), "first");
        assert_eq!(slot_label(&cats, 2.0, Orientation::Vertical), "third");
        assert_eq!(slot_label(&cats, 0.5, Orientation::Vertical), "");
    }

    #[test]
    fn horizontal_labels_run_top_to_bottom() {
        let cats = categories();
        // The highest axis position is the top row.
        assert_eq!(slot_label(&cats, 2.0, Orientation::Horizontal), "first");
        assert_eq!(slot_label(&cats, 0.0, Orientation::Horizontal), "third");
        assert_eq!(slot_position(0, 3, Orientation::Horizontal), 2.0);
        assert_eq!(slot_position(2, 3, Orientation::Horizontal), 0.0);
    }

    #[test]
    fn colours_convert_channel_for_channel() {
        let c = RGBColor::from(Rgb(1, 2, 3));
        assert_eq!((c.0, c.1, c.2), (1, 2, 3));
    }
}
