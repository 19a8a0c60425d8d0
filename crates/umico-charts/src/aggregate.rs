//! Pure aggregates over store records.
//!
//! Category-based functions ignore stores with an empty `main_category`.
//! "Present" means a non-empty string.

use std::collections::HashMap;

use umico_core::StoreRecord;

/// A numeric range `(lower, upper]`, or `[lower, upper]` when
/// `closed_lower` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub label: &'static str,
    pub lower: f64,
    pub upper: f64,
    pub closed_lower: bool,
}

impl Bucket {
    const fn open(label: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            label,
            lower,
            upper,
            closed_lower: false,
        }
    }

    const fn closed(label: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            label,
            lower,
            upper,
            closed_lower: true,
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let above = if self.closed_lower {
            value >= self.lower
        } else {
            value > self.lower
        };
        above && value <= self.upper
    }
}

/// Cashback ranges with zero counted in the first bucket.
pub const CASHBACK_BUCKETS: [Bucket; 6] = [
    Bucket::closed("0-1%", 0.0, 1.0),
    Bucket::open("1-2%", 1.0, 2.0),
    Bucket::open("2-3%", 2.0, 3.0),
    Bucket::open("3-5%", 3.0, 5.0),
    Bucket::open("5-10%", 5.0, 10.0),
    Bucket::open("10%+", 10.0, 50.0),
];

/// Cashback ranges that leave zero-cashback stores out.
pub const CASHBACK_RANGES: [Bucket; 6] = [
    Bucket::open("0-1%", 0.0, 1.0),
    Bucket::open("1-2%", 1.0, 2.0),
    Bucket::open("2-3%", 2.0, 3.0),
    Bucket::open("3-5%", 3.0, 5.0),
    Bucket::open("5-10%", 5.0, 10.0),
    Bucket::open("10%+", 10.0, 50.0),
];

pub const RATING_BUCKETS: [Bucket; 5] = [
    Bucket::closed("Below 4.0", 0.0, 4.0),
    Bucket::open("4.0-4.5", 4.0, 4.5),
    Bucket::open("4.5-4.7", 4.5, 4.7),
    Bucket::open("4.7-4.9", 4.7, 4.9),
    Bucket::open("5.0", 4.9, 5.0),
];

/// Store scale by number of locations.
pub const SCALE_BUCKETS: [Bucket; 4] = [
    Bucket::open("Single (1)", 0.0, 1.0),
    Bucket::open("Small Chain (2-5)", 1.0, 5.0),
    Bucket::open("Medium Chain (6-20)", 5.0, 20.0),
    Bucket::open("Large Chain (20+)", 20.0, 200.0),
];

/// Counts how many `values` fall into each bucket. A value lands in the
/// first bucket that contains it; values outside every bucket are dropped.
pub fn bucket_counts(values: impl IntoIterator<Item = f64>, buckets: &[Bucket]) -> Vec<usize> {
    let mut counts = vec![0; buckets.len()];
    for value in values {
        if let Some(idx) = buckets.iter().position(|b| b.contains(value)) {
            counts[idx] += 1;
        }
    }
    counts
}

/// Occurrences of each distinct value, most frequent first. Ties keep
/// first-seen order.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Store count per main category, largest first.
#[must_use]
pub fn category_counts(records: &[StoreRecord]) -> Vec<(&str, usize)> {
    value_counts(records.iter().filter_map(StoreRecord::category))
}

/// The `n` largest categories by store count.
#[must_use]
pub fn top_categories(records: &[StoreRecord], n: usize) -> Vec<&str> {
    category_counts(records)
        .into_iter()
        .take(n)
        .map(|(category, _)| category)
        .collect()
}

#[must_use]
pub fn in_category<'a>(records: &'a [StoreRecord], category: &str) -> Vec<&'a StoreRecord> {
    records
        .iter()
        .filter(|r| r.category() == Some(category))
        .collect()
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Share of a group with each contact channel, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceShares {
    pub phone: f64,
    pub instagram: f64,
    pub facebook: f64,
}

#[must_use]
pub fn presence_shares(group: &[&StoreRecord]) -> PresenceShares {
    let count = |present: fn(&StoreRecord) -> bool| group.iter().filter(|r| present(r)).count();
    PresenceShares {
        phone: percentage(count(StoreRecord::has_phone), group.len()),
        instagram: percentage(count(StoreRecord::has_instagram), group.len()),
        facebook: percentage(count(StoreRecord::has_facebook), group.len()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMean<'a> {
    pub category: &'a str,
    pub mean: f64,
    /// Stores that contributed a value.
    pub count: usize,
}

/// Mean of `value` per category over the stores where it is present, in
/// first-seen category order. Categories with no values are left out.
pub fn mean_by_category<'a>(
    records: &'a [StoreRecord],
    value: impl Fn(&StoreRecord) -> Option<f64>,
) -> Vec<CategoryMean<'a>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for record in records {
        let (Some(category), Some(v)) = (record.category(), value(record)) else {
            continue;
        };
        match index.get(category) {
            Some(&i) => {
                sums[i].1 += v;
                sums[i].2 += 1;
            }
            None => {
                index.insert(category, sums.len());
                sums.push((category, v, 1));
            }
        }
    }
    sums.into_iter()
        .map(|(category, sum, count)| {
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / count as f64;
            CategoryMean {
                category,
                mean,
                count,
            }
        })
        .collect()
}

/// The `n` stores with the most locations, most first. Ties keep input order.
#[must_use]
pub fn top_by_locations(records: &[StoreRecord], n: usize) -> Vec<&StoreRecord> {
    let mut sorted: Vec<&StoreRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.total_locations.cmp(&a.total_locations));
    sorted.truncate(n);
    sorted
}

/// Cuts `label` to `max` characters and appends `...` when it is longer.
#[must_use]
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() > max {
        let mut cut: String = label.chars().take(max).collect();
        cut.push_str("...");
        cut
    } else {
        label.to_owned()
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
