use serde::{Deserialize, Serialize};

/// Output column names, in the order they are written to every file.
///
/// Matches the field declaration order of [`StoreRecord`], which is what
/// serde-driven writers follow.
pub const COLUMNS: [&str; 20] = [
    "store_name",
    "phone_numbers",
    "website",
    "cashback_percentage",
    "rating",
    "rating_count",
    "categories",
    "main_category",
    "active",
    "instagram",
    "facebook",
    "notes",
    "city",
    "district",
    "street",
    "house",
    "address_notes",
    "coordinates",
    "operating_hours",
    "total_locations",
];

/// One store flattened into a single row.
///
/// Address columns describe the store's first point of sale only;
/// `total_locations` counts all of them. A store without any point of sale
/// has empty address strings and `total_locations == 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub store_name: String,
    /// Work contact numbers joined with `", "`.
    pub phone_numbers: String,
    pub website: String,
    pub cashback_percentage: Option<f64>,
    /// `None` when the store has no ratings yet; never `Some(0.0)` from extraction.
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    /// Category display names joined with `" | "`.
    pub categories: String,
    pub main_category: String,
    pub active: bool,
    pub instagram: String,
    pub facebook: String,
    pub notes: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub house: String,
    pub address_notes: String,
    /// Raw `location` of the first point of sale, usually `"lat,lon"`.
    pub coordinates: String,
    /// `"day: from-to"` entries for working days, joined with `"; "`.
    pub operating_hours: String,
    pub total_locations: u32,
}

impl StoreRecord {
    /// Returns the record as display strings in [`COLUMNS`] order.
    ///
    /// Absent optional values render as empty strings.
    #[must_use]
    pub fn cells(&self) -> [String; 20] {
        fn opt<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        [
            self.store_name.clone(),
            self.phone_numbers.clone(),
            self.website.clone(),
            opt(self.cashback_percentage),
            opt(self.rating),
            opt(self.rating_count),
            self.categories.clone(),
            self.main_category.clone(),
            self.active.to_string(),
            self.instagram.clone(),
            self.facebook.clone(),
            self.notes.clone(),
            self.city.clone(),
            self.district.clone(),
            self.street.clone(),
            self.house.clone(),
            self.address_notes.clone(),
            self.coordinates.clone(),
            self.operating_hours.clone(),
            self.total_locations.to_string(),
        ]
    }

    #[must_use]
    pub fn has_rating(&self) -> bool {
        self.rating.is_some()
    }

    #[must_use]
    pub fn has_phone(&self) -> bool {
        !self.phone_numbers.is_empty()
    }

    #[must_use]
    pub fn has_instagram(&self) -> bool {
        !self.instagram.is_empty()
    }

    #[must_use]
    pub fn has_facebook(&self) -> bool {
        !self.facebook.is_empty()
    }

    /// Main category, or `None` for stores the API left uncategorized.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        Some(self.main_category.as_str()).filter(|c| !c.is_empty())
    }
}
