//! Plain-data description of a bar chart, independent of any drawing backend.

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLUE: Rgb = Rgb(0x1f, 0x77, 0xb4);
pub const ORANGE: Rgb = Rgb(0xff, 0x7f, 0x0e);
pub const GREEN: Rgb = Rgb(0x2c, 0xa0, 0x2c);
pub const RED: Rgb = Rgb(0xd6, 0x27, 0x28);

/// Axis the bars grow along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories left to right, values upward.
    Vertical,
    /// Categories top to bottom, values rightward.
    Horizontal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub value: f64,
    pub color: Rgb,
    /// Text drawn at the end of the bar.
    pub annotation: Option<String>,
}

impl Bar {
    #[must_use]
    pub fn new(value: f64, color: Rgb) -> Self {
        Self {
            value,
            color,
            annotation: None,
        }
    }

    #[must_use]
    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }
}

/// One bar per category. Panels with several series draw them as grouped bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Legend entry; unnamed series get no legend.
    pub name: Option<String>,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    pub title: String,
    pub orientation: Orientation,
    /// Category labels in display order: left to right for vertical panels,
    /// top to bottom for horizontal ones.
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub value_label: String,
    pub category_label: Option<String>,
    /// Fixed value-axis range. When `None` the axis spans zero to a little
    /// past the largest bar.
    pub value_range: Option<(f64, f64)>,
}

impl BarPanel {
    /// Panel with a single unnamed series.
    #[must_use]
    pub fn single(
        title: impl Into<String>,
        orientation: Orientation,
        categories: Vec<String>,
        bars: Vec<Bar>,
        value_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            orientation,
            categories,
            series: vec![BarSeries { name: None, bars }],
            value_label: value_label.into(),
            category_label: None,
            value_range: None,
        }
    }

    #[must_use]
    pub fn with_category_label(mut self, label: impl Into<String>) -> Self {
        self.category_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_value_range(mut self, min: f64, max: f64) -> Self {
        self.value_range = Some((min, max));
        self
    }

    /// Largest bar value across all series, or `0.0` for an empty panel.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.bars.iter())
            .map(|b| b.value)
            .fold(0.0, f64::max)
    }

    /// Value-axis range used when drawing.
    #[must_use]
    pub fn axis_range(&self) -> (f64, f64) {
        if let Some(range) = self.value_range {
            return range;
        }
        let max = self.max_value();
        if max > 0.0 {
            // Annotations sit past the bar end, so horizontal panels need more room.
            let headroom = match self.orientation {
                Orientation::Vertical => 1.15,
                Orientation::Horizontal => 1.3,
            };
            (0.0, max * headroom)
        } else {
            (0.0, 1.0)
        }
    }
}

/// One PNG file: one or more panels side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub file_name: &'static str,
    /// Pixel width and height.
    pub size: (u32, u32),
    pub panels: Vec<BarPanel>,
}

/// `n` evenly spaced hues at fixed saturation and lightness.
#[must_use]
pub fn hue_palette(n: usize) -> Vec<Rgb> {
    #[allow(clippy::cast_precision_loss)]
    let step = 360.0 / n.max(1) as f64;
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let hue = 15.0 + step * i as f64;
            hsl_to_rgb(hue % 360.0, 0.65, 0.55)
        })
        .collect()
}

/// `n` colours interpolated from `from` to `to`.
#[must_use]
pub fn gradient(from: Rgb, to: Rgb, n: usize) -> Vec<Rgb> {
    if n <= 1 {
        return vec![from; n];
    }
    #[allow(clippy::cast_precision_loss)]
    let last = (n - 1) as f64;
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / last;
            Rgb(
                lerp(from.0, to.0, t),
                lerp(from.1, to.1, t),
                lerp(from.2, to.2, t),
            )
        })
        .collect()
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    channel(f64::from(a) + (f64::from(b) - f64::from(a)) * t)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h {
        h if h < 1.0 => (c, x, 0.0),
        h if h < 2.0 => (x, c, 0.0),
        h if h < 3.0 => (0.0, c, x),
        h if h < 4.0 => (0.0, x, c),
        h if h < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    Rgb(
        channel((r + m) * 255.0),
        channel((g + m) * 255.0),
        channel((b + m) * 255.0),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
