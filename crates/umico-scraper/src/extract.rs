//! Flattening of raw API store items into [`umico_core::StoreRecord`] rows.
//!
//! Everything here is pure and infallible: a missing or `null` field at any
//! depth becomes an empty string, `None`, or zero.

use std::collections::HashMap;

use serde_json::Value;
use umico_core::StoreRecord;

use crate::types::{
    RawContact, RawNamed, RawOperatingHours, RawPointOfSale, RawRatings, RawSocialAccount,
    RawStoreItem,
};

const WORK_CONTACT_TYPE: &str = "work";
const PHONE_SEPARATOR: &str = ", ";
const CATEGORY_SEPARATOR: &str = " | ";
const HOURS_SEPARATOR: &str = "; ";

/// Address columns of one point of sale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreAddress {
    pub city: String,
    pub district: String,
    pub street: String,
    pub house: String,
    pub notes: String,
    pub coordinates: String,
    /// `"day: from-to"` for every working day, joined with `"; "`.
    pub operating_hours: String,
}

/// Flattens one raw store item into a [`StoreRecord`].
///
/// Only the first point of sale populates the address columns; the number of
/// points of sale becomes `total_locations`.
#[must_use]
pub fn extract_store(item: &RawStoreItem) -> StoreRecord {
    let social = social_links(&item.partner_social_accounts);
    let addresses = extract_addresses(item);
    let total_locations = u32::try_from(addresses.len()).unwrap_or(u32::MAX);
    let first = addresses.into_iter().next().unwrap_or_default();

    StoreRecord {
        store_name: item.name.clone().unwrap_or_default(),
        phone_numbers: work_phone_numbers(&item.partner_contacts),
        website: item.website.clone().unwrap_or_default(),
        cashback_percentage: value_as_f64(&item.cashback_percentage),
        rating: rating_value(item.ratings.as_ref()),
        rating_count: item
            .ratings
            .as_ref()
            .and_then(|r| value_as_u64(&r.marketing_name_session_count)),
        categories: join_names(&item.categories),
        main_category: display_name(item.main_category.as_ref()),
        active: item.active.unwrap_or(false),
        instagram: social.get("instagram").map(|s| (*s).to_owned()).unwrap_or_default(),
        facebook: social.get("facebook").map(|s| (*s).to_owned()).unwrap_or_default(),
        notes: item.notes_az.clone().unwrap_or_default(),
        city: first.city,
        district: first.district,
        street: first.street,
        house: first.house,
        address_notes: first.notes,
        coordinates: first.coordinates,
        operating_hours: first.operating_hours,
        total_locations,
    }
}

/// Extracts the address columns of every point of sale, in API order.
#[must_use]
pub fn extract_addresses(item: &RawStoreItem) -> Vec<StoreAddress> {
    item.point_of_sales.iter().map(summarize_address).collect()
}

fn summarize_address(pos: &RawPointOfSale) -> StoreAddress {
    StoreAddress {
        city: display_name(pos.city.as_ref()),
        district: display_name(pos.district.as_ref()),
        street: pos.street_az.clone().unwrap_or_default(),
        house: value_as_string(&pos.house),
        notes: pos.address_notes_az.clone().unwrap_or_default(),
        coordinates: location_as_string(&pos.location),
        operating_hours: operating_hours_summary(&pos.pos_operating_hours),
    }
}

fn work_phone_numbers(contacts: &[RawContact]) -> String {
    contacts
        .iter()
        .filter(|c| c.contact_type.as_deref() == Some(WORK_CONTACT_TYPE))
        .filter_map(|c| c.contact_value.as_deref())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(PHONE_SEPARATOR)
}

/// Network name to link. A later account for the same network replaces an
/// earlier one.
fn social_links(accounts: &[RawSocialAccount]) -> HashMap<&str, &str> {
    accounts
        .iter()
        .filter_map(|a| Some((a.social_network.as_deref()?, a.link.as_deref()?)))
        .collect()
}

fn join_names(named: &[RawNamed]) -> String {
    named
        .iter()
        .map(|n| n.name_az.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(CATEGORY_SEPARATOR)
}

fn display_name(named: Option<&RawNamed>) -> String {
    named
        .and_then(|n| n.name_az.clone())
        .unwrap_or_default()
}

fn operating_hours_summary(hours: &[RawOperatingHours]) -> String {
    hours
        .iter()
        .filter(|h| !h.non_working_day.unwrap_or(false))
        .map(|h| {
            format!(
                "{}: {}-{}",
                value_as_string(&h.day_of_week),
                value_as_string(&h.from),
                value_as_string(&h.to)
            )
        })
        .collect::<Vec<_>>()
        .join(HOURS_SEPARATOR)
}

/// Rating value, if the store has one. `null`, `""` and `0` all mean the
/// store has not been rated.
fn rating_value(ratings: Option<&RawRatings>) -> Option<f64> {
    ratings
        .and_then(|r| value_as_f64(&r.marketing_name_rating_value))
        .filter(|v| v.abs() > f64::EPSILON)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|raw| raw.trim().parse::<f64>().ok()))
}

/// Whole, non-negative numbers only. `12`, `12.0` and `"12.0"` all give 12.
fn value_as_u64(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let v = value_as_f64(value)?;
    if v < 0.0 || v.fract().abs() > f64::EPSILON {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = v as u64;
    Some(n)
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders a point-of-sale location as `"lat,lon"`.
///
/// Strings pass through untouched. Objects with `lat` and `lon`/`lng` keys
/// and two-element arrays are joined with a comma.
fn location_as_string(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let lat = map.get("lat").or_else(|| map.get("latitude"));
            let lon = map
                .get("lon")
                .or_else(|| map.get("lng"))
                .or_else(|| map.get("longitude"));
            match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    format!("{},{}", value_as_string(lat), value_as_string(lon))
                }
                _ => value.to_string(),
            }
        }
        Value::Array(items) if items.len() == 2 => {
            format!("{},{}", value_as_string(&items[0]), value_as_string(&items[1]))
        }
        other => value_as_string(other),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
