//! Response types for the Umico `v2/marketing_names` search endpoint.
//!
//! ## Observed shape
//!
//! The endpoint returns `{"data": [ ... ]}` with one object per marketing
//! name (store). On the page after the last one, `data` is an empty array;
//! some deployments omit it or send `null`, so both are treated as empty.
//!
//! ### Nullability and wrong types
//! Any field may be absent, `null`, or of an unexpected JSON type. Every field
//! goes through one of the `lenient_*` deserializers below: a value of the
//! wrong shape becomes `None` or an empty `Vec`, and a list element that is
//! not an object is dropped. Nothing in here should ever make a page fail to
//! parse because of one store.
//!
//! Strings accept numbers and booleans in their JSON text form (phone numbers
//! have been sent as integers). Booleans accept `0`/`1` and `"true"`/`"false"`.
//!
//! ### Loosely typed scalars
//! - `cashback_percentage` arrives as a number on most stores and as a
//!   numeric string on some.
//! - `ratings.marketing_name_rating_value` is a number, a numeric string, or
//!   `null` for stores nobody has rated.
//! - `point_of_sales[].location` is usually a `"lat,lon"` string but has been
//!   seen as an object.
//! - `house` and `day_of_week` are strings or numbers.
//!
//! These are kept as [`serde_json::Value`] and interpreted in
//! [`crate::extract`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response from `GET /v2/marketing_names`.
#[derive(Debug, Default, Deserialize)]
pub struct MarketingNamesPage {
    #[serde(default, deserialize_with = "lenient_list")]
    pub data: Vec<RawStoreItem>,
}

/// A single store ("marketing name") as returned by the API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStoreItem {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub website: Option<String>,
    pub cashback_percentage: Value,
    #[serde(deserialize_with = "lenient_bool")]
    pub active: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    pub notes_az: Option<String>,

    #[serde(deserialize_with = "lenient_list")]
    pub partner_contacts: Vec<RawContact>,

    #[serde(deserialize_with = "lenient_list")]
    pub partner_social_accounts: Vec<RawSocialAccount>,

    #[serde(deserialize_with = "lenient_list")]
    pub categories: Vec<RawNamed>,

    #[serde(deserialize_with = "lenient_object")]
    pub main_category: Option<RawNamed>,

    /// Physical locations. Only the first one ends up in the flat record.
    #[serde(deserialize_with = "lenient_list")]
    pub point_of_sales: Vec<RawPointOfSale>,

    #[serde(deserialize_with = "lenient_object")]
    pub ratings: Option<RawRatings>,
}

/// A phone or other contact entry. Only `contact_type == "work"` is exported.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawContact {
    #[serde(deserialize_with = "lenient_string")]
    pub contact_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub contact_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSocialAccount {
    /// Lower-case network key, e.g. `"instagram"`, `"facebook"`, `"tiktok"`.
    #[serde(deserialize_with = "lenient_string")]
    pub social_network: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub link: Option<String>,
}

/// Any nested object that only matters for its Azerbaijani display name
/// (categories, cities, districts).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawNamed {
    #[serde(deserialize_with = "lenient_string")]
    pub name_az: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawPointOfSale {
    #[serde(deserialize_with = "lenient_object")]
    pub city: Option<RawNamed>,
    #[serde(deserialize_with = "lenient_object")]
    pub district: Option<RawNamed>,
    #[serde(deserialize_with = "lenient_string")]
    pub street_az: Option<String>,
    pub house: Value,
    #[serde(deserialize_with = "lenient_string")]
    pub address_notes_az: Option<String>,
    pub location: Value,

    #[serde(deserialize_with = "lenient_list")]
    pub pos_operating_hours: Vec<RawOperatingHours>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawOperatingHours {
    pub day_of_week: Value,
    pub from: Value,
    pub to: Value,
    #[serde(deserialize_with = "lenient_bool")]
    pub non_working_day: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRatings {
    pub marketing_name_rating_value: Value,
    pub marketing_name_session_count: Value,
}

/// A list of `T`. `null` or a non-array value becomes empty; elements that do
/// not parse as `T` are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A nested object, or `None` when the value is not one.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|v| v.abs() > f64::EPSILON),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_with_missing_data_is_empty() {
        let page: MarketingNamesPage = serde_json::from_value(json!({"meta": {}})).unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn page_with_null_data_is_empty() {
        let page: MarketingNamesPage = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn empty_item_parses_with_defaults() {
        let item: RawStoreItem = serde_json::from_value(json!({})).unwrap();
        assert!(item.name.is_none());
        assert!(item.partner_contacts.is_empty());
        assert!(item.point_of_sales.is_empty());
        assert!(item.ratings.is_none());
        assert!(item.cashback_percentage.is_null());
    }

    #[test]
    fn null_lists_parse_as_empty() {
        let item: RawStoreItem = serde_json::from_value(json!({
            "name": "Test",
            "partner_contacts": null,
            "partner_social_accounts": null,
            "categories": null,
            "point_of_sales": [{"pos_operating_hours": null}]
        }))
        .unwrap();
        assert!(item.partner_contacts.is_empty());
        assert!(item.partner_social_accounts.is_empty());
        assert!(item.categories.is_empty());
        assert_eq!(item.point_of_sales.len(), 1);
        assert!(item.point_of_sales[0].pos_operating_hours.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let item: RawStoreItem = serde_json::from_value(json!({
            "id": 42,
            "name": "Test",
            "slug": "test",
            "logo": {"url": "https://cdn.example/logo.png"}
        }))
        .unwrap();
        assert_eq!(item.name.as_deref(), Some("Test"));
    }

    #[test]
    fn mistyped_scalars_fall_back_per_field() {
        let item: RawStoreItem = serde_json::from_value(json!({
            "name": 123,
            "website": ["not", "a", "url"],
            "active": 1,
            "partner_contacts": [{"contact_type": "work", "contact_value": 994_501_234_567_u64}],
            "main_category": "Geyim",
            "point_of_sales": [{"pos_operating_hours": [{"day_of_week": 1, "non_working_day": 0}]}]
        }))
        .unwrap();
        assert_eq!(item.name.as_deref(), Some("123"));
        assert!(item.website.is_none());
        assert_eq!(item.active, Some(true));
        assert_eq!(
            item.partner_contacts[0].contact_value.as_deref(),
            Some("994501234567")
        );
        assert!(item.main_category.is_none());
        assert_eq!(
            item.point_of_sales[0].pos_operating_hours[0].non_working_day,
            Some(false)
        );
    }

    #[test]
    fn string_booleans_parse() {
        let hours: RawOperatingHours =
            serde_json::from_value(json!({"non_working_day": "True"})).unwrap();
        assert_eq!(hours.non_working_day, Some(true));
        let hours: RawOperatingHours =
            serde_json::from_value(json!({"non_working_day": "sometimes"})).unwrap();
        assert_eq!(hours.non_working_day, None);
    }

    #[test]
    fn mistyped_item_does_not_reject_its_page() {
        for bad in [
            json!({"name": "Bad", "active": 1}),
            json!({"name": "Bad", "partner_contacts": [{"contact_type": "work", "contact_value": 994_501_234_567_u64}]}),
            json!({"name": "Bad", "point_of_sales": [{"pos_operating_hours": [{"non_working_day": 0}]}]}),
            json!({"name": "Bad", "categories": "Geyim", "ratings": [4.5]}),
        ] {
            let page: MarketingNamesPage = serde_json::from_value(json!({
                "data": [{"name": "Good1"}, bad, {"name": "Good2"}]
            }))
            .unwrap();
            let names: Vec<_> = page.data.iter().map(|i| i.name.as_deref()).collect();
            assert_eq!(names, vec![Some("Good1"), Some("Bad"), Some("Good2")]);
        }
    }

    #[test]
    fn non_object_list_elements_are_skipped() {
        let page: MarketingNamesPage =
            serde_json::from_value(json!({"data": [{"name": "A"}, 7, "x", {"name": "B"}]})).unwrap();
        assert_eq!(page.data.len(), 2);

        let page: MarketingNamesPage = serde_json::from_value(json!({"data": "oops"})).unwrap();
        assert!(page.data.is_empty());
    }
}
