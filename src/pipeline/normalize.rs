//! Field normalization: raw export strings into typed listing fields
//!
//! Every parser works on a single value and returns `None` when the value
//! cannot be read. A bad cell never aborts the run; it is counted in
//! [`ParseFailures`] and logged at debug level.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::pipeline::{Listing, RawListing, ResponseTime, RoomType, Zipcode};

/// Literal the export uses for a bathroom without shower or tub
pub const HALF_BATH: &str = "Half-bath";

/// Truthy marker of single-character boolean columns
pub const TRUE_MARKER: &str = "t";

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("Invalid regex: numeric token"));

/// Parse a date with the first format that accepts it.
pub fn parse_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Real-valued number of years from `from` to `to`.
///
/// Not rounded. Negative when `from` is after `to`.
pub fn years_between(from: NaiveDate, to: NaiveDate, days_per_year: f64) -> f64 {
    (to - from).num_days() as f64 / days_per_year
}

/// `"87%"` -> 87.0. Values outside [0, 100] are rejected.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: f64 = number.parse().ok()?;
    if (0.0..=100.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// True iff the raw value is exactly the truthy marker.
pub fn parse_flag(raw: &str) -> bool {
    raw == TRUE_MARKER
}

/// `"$1,200.00"` -> 1200.0. One leading `$` is stripped and `,` thousands
/// separators are tolerated.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned: String = amount.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Bathroom count from the free-text description.
///
/// `Half-bath` is substituted with `0.5` before the first numeric token is
/// extracted, so `"1.5 shared baths"` -> 1.5 and `"Half-bath"` -> 0.5.
pub fn parse_bathrooms(raw: &str) -> Option<f64> {
    let substituted = raw.replace(HALF_BATH, "0.5");
    NUMERIC_TOKEN
        .find(&substituted)
        .and_then(|m| m.as_str().parse().ok())
        .filter(|v: &f64| v.is_finite())
}

/// Integer counts. Accepts `"2"` and integral floats such as `"2.0"`.
///
/// Floats outside the `i64` range are rejected rather than saturated.
pub fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value: f64 = trimmed.parse().ok()?;
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .then_some(value as i64)
}

pub fn parse_real(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Per-column count of present cells that could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseFailures {
    counts: BTreeMap<&'static str, usize>,
}

impl ParseFailures {
    /// Pass a parsed value through, counting it when a present cell failed.
    fn track<T>(&mut self, column: &'static str, raw: &Option<String>, parsed: Option<T>) -> Option<T> {
        if let (Some(value), None) = (raw, &parsed) {
            debug!(column, value = value.as_str(), "unparseable value set to null");
            *self.counts.entry(column).or_insert(0) += 1;
        }
        parsed
    }

    pub fn get(&self, column: &str) -> usize {
        self.counts.get(column).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

/// Normalized rows plus the per-column failure tally.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub listings: Vec<Listing>,
    pub failures: ParseFailures,
}

/// Parse every raw row into a [`Listing`].
///
/// Years-hosting is derived after both dates are parsed.
pub fn normalize(raws: &[RawListing], config: &PipelineConfig) -> Normalized {
    let mut failures = ParseFailures::default();
    let listings = raws
        .iter()
        .map(|raw| normalize_row(raw, config, &mut failures))
        .collect();
    Normalized { listings, failures }
}

fn normalize_row(raw: &RawListing, config: &PipelineConfig, failures: &mut ParseFailures) -> Listing {
    let formats = &config.date_formats;

    let last_scraped = failures.track(
        "last_scraped",
        &raw.last_scraped,
        raw.last_scraped.as_deref().and_then(|v| parse_date(v, formats)),
    );
    let host_since = failures.track(
        "host_since",
        &raw.host_since,
        raw.host_since.as_deref().and_then(|v| parse_date(v, formats)),
    );
    let years_hosting = match (host_since, last_scraped) {
        (Some(from), Some(to)) => Some(years_between(from, to, config.days_per_year)),
        _ => None,
    };

    let host_response_time = raw.host_response_time.as_deref().and_then(|v| {
        let level = ResponseTime::parse(v);
        if level.is_none() {
            warn!(column = "host_response_time", value = v, "unseen level set to null");
        }
        level
    });
    let host_response_time =
        failures.track("host_response_time", &raw.host_response_time, host_response_time);

    let room_type = raw.room_type.as_deref().and_then(|v| {
        let level = RoomType::parse(v);
        if level.is_none() {
            warn!(column = "room_type", value = v, "unseen level set to null");
        }
        level
    });
    let room_type = failures.track("room_type", &raw.room_type, room_type);

    Listing {
        id: raw.id.clone().unwrap_or_default(),
        last_scraped,
        host_since,
        years_hosting,
        host_response_time,
        host_response_rate: failures.track(
            "host_response_rate",
            &raw.host_response_rate,
            raw.host_response_rate.as_deref().and_then(parse_percent),
        ),
        host_is_superhost: raw.host_is_superhost.as_deref().map(parse_flag),
        host_listings_count: failures.track(
            "host_listings_count",
            &raw.host_listings_count,
            raw.host_listings_count.as_deref().and_then(parse_count),
        ),
        zipcode: raw.zipcode.as_deref().and_then(Zipcode::parse),
        property_type: raw.property_type.clone(),
        room_type,
        accommodates: failures.track(
            "accommodates",
            &raw.accommodates,
            raw.accommodates.as_deref().and_then(parse_count),
        ),
        bathrooms_text: raw.bathrooms_text.clone(),
        bathrooms: failures.track(
            "bathrooms",
            &raw.bathrooms_text,
            raw.bathrooms_text.as_deref().and_then(parse_bathrooms),
        ),
        bedrooms: failures.track(
            "bedrooms",
            &raw.bedrooms,
            raw.bedrooms.as_deref().and_then(parse_count),
        ),
        beds: failures.track("beds", &raw.beds, raw.beds.as_deref().and_then(parse_count)),
        amenities: raw.amenities.clone(),
        price: failures.track(
            "price",
            &raw.price,
            raw.price.as_deref().and_then(parse_currency),
        ),
        minimum_nights: failures.track(
            "minimum_nights",
            &raw.minimum_nights,
            raw.minimum_nights.as_deref().and_then(parse_count),
        ),
        maximum_nights: failures.track(
            "maximum_nights",
            &raw.maximum_nights,
            raw.maximum_nights.as_deref().and_then(parse_count),
        ),
        review_scores_rating: failures.track(
            "review_scores_rating",
            &raw.review_scores_rating,
            raw.review_scores_rating.as_deref().and_then(parse_real),
        ),
    }
}
