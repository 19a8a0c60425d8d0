//! The twelve store-analysis charts, built as plain data.

use umico_core::StoreRecord;

use crate::aggregate::{
    bucket_counts, category_counts, in_category, mean, mean_by_category, percentage,
    presence_shares, round_to, top_by_locations, top_categories, truncate_label, Bucket,
    PresenceShares, CASHBACK_BUCKETS, CASHBACK_RANGES, RATING_BUCKETS, SCALE_BUCKETS,
};
use crate::chart::{
    gradient, hue_palette, Bar, BarPanel, BarSeries, Chart, Orientation, Rgb, BLUE, GREEN,
    ORANGE, RED,
};

const STANDARD: (u32, u32) = (1800, 1050);
const WIDE: (u32, u32) = (2100, 900);
const LARGE: (u32, u32) = (2100, 1200);

const STORES: &str = "Number of Stores";

const CASHBACK_COLORS: [Rgb; 6] = [
    RED,
    ORANGE,
    GREEN,
    BLUE,
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
];
const RATING_COLORS: [Rgb; 5] = [
    RED,
    ORANGE,
    Rgb(0xff, 0xdd, 0x57),
    Rgb(0xa0, 0xd9, 0x11),
    GREEN,
];
const STRATEGY_COLORS: [Rgb; 6] = [
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
    GREEN,
];
const PASTELS: [Rgb; 12] = [
    Rgb(0x8d, 0xd3, 0xc7),
    Rgb(0xff, 0xff, 0xb3),
    Rgb(0xbe, 0xba, 0xda),
    Rgb(0xfb, 0x80, 0x72),
    Rgb(0x80, 0xb1, 0xd3),
    Rgb(0xfd, 0xb4, 0x62),
    Rgb(0xb3, 0xde, 0x69),
    Rgb(0xfc, 0xcd, 0xe5),
    Rgb(0xd9, 0xd9, 0xd9),
    Rgb(0xbc, 0x80, 0xbd),
    Rgb(0xcc, 0xeb, 0xc5),
    Rgb(0xff, 0xed, 0x6f),
];
const VIRIDIS_LOW: Rgb = Rgb(0x44, 0x01, 0x54);
const VIRIDIS_HIGH: Rgb = Rgb(0xfd, 0xe7, 0x25);

/// Builds every chart in file-name order. No records, no charts.
#[must_use]
pub fn build_catalog(records: &[StoreRecord]) -> Vec<Chart> {
    if records.is_empty() {
        return Vec::new();
    }
    vec![
        category_distribution(records),
        cashback_distribution(records),
        cashback_by_category(records),
        digital_presence_by_category(records),
        rating_engagement(records),
        rating_engagement_by_category(records),
        customer_satisfaction(records),
        store_expansion(records),
        cashback_strategy(records),
        market_share(records),
        digital_strategy_by_scale(records),
        rating_performance(records),
    ]
}

#[allow(clippy::cast_precision_loss)]
fn as_value(n: usize) -> f64 {
    n as f64
}

fn count_note(n: usize, total: usize) -> String {
    format!("{n} ({:.1}%)", percentage(n, total))
}

fn stores_note(n: usize, total: usize) -> String {
    format!("{n} stores ({:.1}%)", percentage(n, total))
}

fn labels(buckets: &[Bucket]) -> Vec<String> {
    buckets.iter().map(|b| b.label.to_owned()).collect()
}

fn cashback_values(records: &[StoreRecord]) -> impl Iterator<Item = f64> + '_ {
    records.iter().filter_map(|r| r.cashback_percentage)
}

/// Counted bars for `buckets`, annotated relative to `total`.
fn bucket_bars(counts: &[usize], colors: &[Rgb], total: usize) -> Vec<Bar> {
    counts
        .iter()
        .zip(colors)
        .map(|(&n, &color)| Bar::new(as_value(n), color).annotated(count_note(n, total)))
        .collect()
}

/// Phone, Instagram and Facebook shares as three grouped series.
fn presence_series(shares: &[PresenceShares]) -> Vec<BarSeries> {
    let channel = |name: &str, color: Rgb, pick: fn(&PresenceShares) -> f64| BarSeries {
        name: Some(name.to_owned()),
        bars: shares
            .iter()
            .map(|s| {
                let value = pick(s);
                let bar = Bar::new(value, color);
                if value > 5.0 {
                    bar.annotated(format!("{}%", value.trunc()))
                } else {
                    bar
                }
            })
            .collect(),
    };
    vec![
        channel("Phone", BLUE, |s| s.phone),
        channel("Instagram", ORANGE, |s| s.instagram),
        channel("Facebook", GREEN, |s| s.facebook),
    ]
}

fn category_distribution(records: &[StoreRecord]) -> Chart {
    let counts: Vec<(&str, usize)> = category_counts(records).into_iter().take(12).collect();
    let bars = counts
        .iter()
        .zip(hue_palette(counts.len()))
        .map(|(&(_, n), color)| Bar::new(as_value(n), color).annotated(stores_note(n, records.len())))
        .collect();

    Chart {
        file_name: "01_category_distribution.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            "Store Distribution by Category - Market Concentration Analysis",
            Orientation::Horizontal,
            counts.iter().map(|(c, _)| (*c).to_owned()).collect(),
            bars,
            STORES,
        )],
    }
}

fn cashback_distribution(records: &[StoreRecord]) -> Chart {
    let counts = bucket_counts(cashback_values(records), &CASHBACK_BUCKETS);
    Chart {
        file_name: "02_cashback_distribution.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            "Cashback Offering Distribution - Incentive Strategy Analysis",
            Orientation::Vertical,
            labels(&CASHBACK_BUCKETS),
            bucket_bars(&counts, &CASHBACK_COLORS, records.len()),
            STORES,
        )
        .with_category_label("Cashback Percentage Range")],
    }
}

fn cashback_by_category(records: &[StoreRecord]) -> Chart {
    let mut means = mean_by_category(records, |r| r.cashback_percentage);
    means.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    means.truncate(12);

    // Highest average on top in green, fading to red.
    let colors = gradient(GREEN, RED, means.len());
    let bars = means
        .iter()
        .zip(colors)
        .map(|(m, color)| Bar::new(m.mean, color).annotated(format!("{:.2}%", m.mean)))
        .collect();

    Chart {
        file_name: "03_cashback_by_category.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            "Average Cashback by Category - Competitive Incentive Analysis",
            Orientation::Horizontal,
            means.iter().map(|m| m.category.to_owned()).collect(),
            bars,
            "Average Cashback Percentage (%)",
        )],
    }
}

fn digital_presence_by_category(records: &[StoreRecord]) -> Chart {
    let categories = top_categories(records, 10);
    let shares: Vec<PresenceShares> = categories
        .iter()
        .map(|c| presence_shares(&in_category(records, c)))
        .collect();

    Chart {
        file_name: "04_digital_presence_by_category.png",
        size: STANDARD,
        panels: vec![BarPanel {
            title: "Digital Presence by Category - Communication Channel Gap Analysis".to_owned(),
            orientation: Orientation::Vertical,
            categories: categories.iter().map(|c| truncate_label(c, 20)).collect(),
            series: presence_series(&shares),
            value_label: "Percentage of Stores (%)".to_owned(),
            category_label: Some("Category".to_owned()),
            value_range: Some((0.0, 110.0)),
        }],
    }
}

fn rating_engagement(records: &[StoreRecord]) -> Chart {
    let rated = records.iter().filter(|r| r.has_rating()).count();
    let unrated = records.len() - rated;

    Chart {
        file_name: "05_rating_engagement.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            "Customer Rating Engagement - Platform Participation Gap",
            Orientation::Vertical,
            vec![
                "Stores with Customer Ratings".to_owned(),
                "Stores without Customer Ratings".to_owned(),
            ],
            vec![
                Bar::new(as_value(rated), GREEN).annotated(stores_note(rated, records.len())),
                Bar::new(as_value(unrated), RED).annotated(stores_note(unrated, records.len())),
            ],
            STORES,
        )],
    }
}

fn engagement_color(rate: f64) -> Rgb {
    if rate < 20.0 {
        RED
    } else if rate < 30.0 {
        ORANGE
    } else {
        GREEN
    }
}

fn rating_engagement_by_category(records: &[StoreRecord]) -> Chart {
    let mut rows: Vec<(&str, usize, usize)> = top_categories(records, 10)
        .into_iter()
        .map(|c| {
            let group = in_category(records, c);
            let rated = group.iter().filter(|r| r.has_rating()).count();
            (c, rated, group.len())
        })
        .collect();
    rows.sort_by(|a, b| percentage(b.1, b.2).total_cmp(&percentage(a.1, a.2)));

    let bars = rows
        .iter()
        .map(|&(_, rated, total)| {
            let rate = percentage(rated, total);
            Bar::new(rate, engagement_color(rate))
                .annotated(format!("{rate:.1}% ({rated}/{total})"))
        })
        .collect();

    Chart {
        file_name: "06_rating_engagement_by_category.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            "Rating Engagement by Category - Customer Feedback Participation",
            Orientation::Horizontal,
            rows.iter().map(|(c, _, _)| truncate_label(c, 25)).collect(),
            bars,
            "Percentage of Stores with Ratings (%)",
        )],
    }
}

fn customer_satisfaction(records: &[StoreRecord]) -> Chart {
    let ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    let counts = bucket_counts(ratings.iter().copied(), &RATING_BUCKETS);
    let average = mean(ratings.iter().copied())
        .map_or_else(|| "n/a".to_owned(), |avg| format!("{avg:.2}"));

    Chart {
        file_name: "07_customer_satisfaction.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            format!("Customer Satisfaction Distribution - Average Rating: {average}/5.0"),
            Orientation::Vertical,
            labels(&RATING_BUCKETS),
            bucket_bars(&counts, &RATING_COLORS, ratings.len()),
            STORES,
        )
        .with_category_label("Rating Range")],
    }
}

fn store_expansion(records: &[StoreRecord]) -> Chart {
    let multi = records.iter().filter(|r| r.total_locations > 1).count();
    let single = records.iter().filter(|r| r.total_locations == 1).count();
    let model = BarPanel::single(
        "Store Expansion Model Distribution",
        Orientation::Vertical,
        vec![
            "Multi-Location Chains".to_owned(),
            "Single-Location Stores".to_owned(),
        ],
        vec![
            Bar::new(as_value(multi), BLUE).annotated(stores_note(multi, records.len())),
            Bar::new(as_value(single), ORANGE).annotated(stores_note(single, records.len())),
        ],
        STORES,
    );

    let top = top_by_locations(records, 10);
    let colors = gradient(VIRIDIS_HIGH, VIRIDIS_LOW, top.len());
    let leaders = BarPanel::single(
        "Top 10 Stores by Location Count",
        Orientation::Horizontal,
        top.iter().map(|r| truncate_label(&r.store_name, 20)).collect(),
        top.iter()
            .zip(colors)
            .map(|(r, color)| {
                Bar::new(f64::from(r.total_locations), color)
                    .annotated(r.total_locations.to_string())
            })
            .collect(),
        "Number of Locations",
    );

    Chart {
        file_name: "08_store_expansion_analysis.png",
        size: WIDE,
        panels: vec![model, leaders],
    }
}

fn cashback_strategy(records: &[StoreRecord]) -> Chart {
    let counts = bucket_counts(cashback_values(records), &CASHBACK_RANGES);
    Chart {
        file_name: "09_cashback_strategy.png",
        size: STANDARD,
        panels: vec![BarPanel::single(
            "Cashback Strategy Distribution - Competitive Positioning",
            Orientation::Vertical,
            labels(&CASHBACK_RANGES),
            bucket_bars(&counts, &STRATEGY_COLORS, records.len()),
            STORES,
        )
        .with_category_label("Cashback Percentage Range")],
    }
}

fn market_share(records: &[StoreRecord]) -> Chart {
    let counts: Vec<(&str, usize)> = category_counts(records).into_iter().take(12).collect();
    let bars = counts
        .iter()
        .zip(PASTELS)
        .map(|(&(_, n), color)| Bar::new(as_value(n), color).annotated(count_note(n, records.len())))
        .collect();

    Chart {
        file_name: "10_market_share.png",
        size: LARGE,
        panels: vec![BarPanel::single(
            "Market Share by Category - Strategic Opportunity Analysis",
            Orientation::Vertical,
            counts.iter().map(|(c, _)| truncate_label(c, 15)).collect(),
            bars,
            STORES,
        )
        .with_category_label("Category")],
    }
}

fn digital_strategy_by_scale(records: &[StoreRecord]) -> Chart {
    let mut categories = Vec::new();
    let mut shares = Vec::new();
    for bucket in &SCALE_BUCKETS {
        let group: Vec<&StoreRecord> = records
            .iter()
            .filter(|r| bucket.contains(f64::from(r.total_locations)))
            .collect();
        if group.is_empty() {
            continue;
        }
        categories.push(format!("{} ({} stores)", bucket.label, group.len()));
        shares.push(presence_shares(&group));
    }

    Chart {
        file_name: "11_digital_strategy_by_scale.png",
        size: STANDARD,
        panels: vec![BarPanel {
            title: "Digital Presence by Store Scale - Channel Strategy Analysis".to_owned(),
            orientation: Orientation::Vertical,
            categories,
            series: presence_series(&shares),
            value_label: "Percentage (%)".to_owned(),
            category_label: Some("Store Scale".to_owned()),
            value_range: Some((0.0, 110.0)),
        }],
    }
}

fn satisfaction_color(rating: f64) -> Rgb {
    if rating < 4.5 {
        RED
    } else if rating < 4.75 {
        ORANGE
    } else {
        GREEN
    }
}

fn rating_performance(records: &[StoreRecord]) -> Chart {
    let mut by_category: Vec<(&str, f64, usize)> = mean_by_category(records, |r| r.rating)
        .into_iter()
        .filter(|m| m.count >= 3)
        .map(|m| (m.category, round_to(m.mean, 2), m.count))
        .collect();
    by_category.sort_by(|a, b| b.1.total_cmp(&a.1));
    by_category.truncate(10);

    let averages = BarPanel::single(
        "Average Customer Rating by Category",
        Orientation::Horizontal,
        by_category.iter().map(|(c, _, _)| truncate_label(c, 20)).collect(),
        by_category
            .iter()
            .map(|&(_, avg, count)| {
                Bar::new(avg, satisfaction_color(avg)).annotated(format!("{avg:.2} ({count} reviews)"))
            })
            .collect(),
        "Average Rating",
    )
    .with_value_range(4.0, 5.1);

    let mut gaps: Vec<(&str, usize, usize)> = top_categories(records, 10)
        .into_iter()
        .map(|c| {
            let group = in_category(records, c);
            let unrated = group.iter().filter(|r| !r.has_rating()).count();
            (c, unrated, group.len())
        })
        .collect();
    gaps.sort_by(|a, b| b.1.cmp(&a.1));

    let gap_panel = BarPanel::single(
        "Rating Engagement Gap by Category",
        Orientation::Horizontal,
        gaps.iter().map(|(c, _, _)| truncate_label(c, 20)).collect(),
        gaps.iter()
            .map(|&(_, unrated, total)| {
                Bar::new(as_value(unrated), RED)
                    .annotated(format!("{unrated} ({:.0}%)", percentage(unrated, total)))
            })
            .collect(),
        "Number of Stores Without Ratings",
    );

    Chart {
        file_name: "12_rating_performance.png",
        size: WIDE,
        panels: vec![averages, gap_panel],
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
