//! Typed listing records and column identifiers
//!
//! Each pipeline stage produces a new record set:
//! `RawListing` (selected strings) -> `Listing` (parsed fields)
//! -> `EnrichedListing` (derived fields added).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the projected export, cells still in their raw string form.
///
/// Missing markers (empty, `NA`, `N/A`) are already mapped to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub id: Option<String>,
    pub last_scraped: Option<String>,
    pub host_since: Option<String>,
    pub host_response_time: Option<String>,
    pub host_response_rate: Option<String>,
    pub host_is_superhost: Option<String>,
    pub host_listings_count: Option<String>,
    pub zipcode: Option<String>,
    pub property_type: Option<String>,
    pub room_type: Option<String>,
    pub accommodates: Option<String>,
    pub bathrooms_text: Option<String>,
    pub bedrooms: Option<String>,
    pub beds: Option<String>,
    pub amenities: Option<String>,
    pub price: Option<String>,
    pub minimum_nights: Option<String>,
    pub maximum_nights: Option<String>,
    pub review_scores_rating: Option<String>,
}

/// Host response-time bucket. Closed set of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResponseTime {
    WithinAnHour,
    WithinAFewHours,
    WithinADay,
    AFewDaysOrMore,
}

impl ResponseTime {
    pub const ALL: [ResponseTime; 4] = [
        ResponseTime::WithinAnHour,
        ResponseTime::WithinAFewHours,
        ResponseTime::WithinADay,
        ResponseTime::AFewDaysOrMore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseTime::WithinAnHour => "within an hour",
            ResponseTime::WithinAFewHours => "within a few hours",
            ResponseTime::WithinADay => "within a day",
            ResponseTime::AFewDaysOrMore => "a few days or more",
        }
    }

    /// Match a raw level exactly. Unseen levels return `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw.trim())
    }
}

/// Listing room type. Closed set of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomType {
    EntireHomeApt,
    PrivateRoom,
    SharedRoom,
    HotelRoom,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::EntireHomeApt,
        RoomType::PrivateRoom,
        RoomType::SharedRoom,
        RoomType::HotelRoom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::EntireHomeApt => "Entire home/apt",
            RoomType::PrivateRoom => "Private room",
            RoomType::SharedRoom => "Shared room",
            RoomType::HotelRoom => "Hotel room",
        }
    }

    /// Match a raw level exactly. Unseen levels return `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == raw.trim())
    }
}

/// Zipcode label. Open set: levels are whatever the export contains.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zipcode(String);

impl Zipcode {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Zipcode(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Zipcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three-way review classification. A listing may also be left unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReviewCategory {
    Good,
    Bad,
    Missing,
}

impl ReviewCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewCategory::Good => "good",
            ReviewCategory::Bad => "bad",
            ReviewCategory::Missing => "missing",
        }
    }
}

/// A listing with every source field parsed into its typed form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub id: String,
    pub last_scraped: Option<NaiveDate>,
    pub host_since: Option<NaiveDate>,
    /// `last_scraped - host_since` in years. Negative when the dates are inverted.
    pub years_hosting: Option<f64>,
    pub host_response_time: Option<ResponseTime>,
    pub host_response_rate: Option<f64>,
    pub host_is_superhost: Option<bool>,
    pub host_listings_count: Option<i64>,
    pub zipcode: Option<Zipcode>,
    pub property_type: Option<String>,
    pub room_type: Option<RoomType>,
    pub accommodates: Option<i64>,
    pub bathrooms_text: Option<String>,
    pub bathrooms: Option<f64>,
    pub bedrooms: Option<i64>,
    pub beds: Option<i64>,
    pub amenities: Option<String>,
    pub price: Option<f64>,
    pub minimum_nights: Option<i64>,
    pub maximum_nights: Option<i64>,
    pub review_scores_rating: Option<f64>,
}

/// A listing plus the fields synthesized from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedListing {
    pub listing: Listing,
    pub amenities_count: Option<i64>,
    /// Central business district flag
    pub is_central: Option<bool>,
    /// `None` means the rating fell in the unclassified gap.
    pub review_scores_factor: Option<ReviewCategory>,
}

/// Numeric columns available to statistics, correlation and plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    YearsHosting,
    HostResponseRate,
    HostListingsCount,
    Accommodates,
    Bathrooms,
    Bedrooms,
    Beds,
    AmenitiesCount,
    Price,
    MinimumNights,
    MaximumNights,
    ReviewScoresRating,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 12] = [
        NumericColumn::YearsHosting,
        NumericColumn::HostResponseRate,
        NumericColumn::HostListingsCount,
        NumericColumn::Accommodates,
        NumericColumn::Bathrooms,
        NumericColumn::Bedrooms,
        NumericColumn::Beds,
        NumericColumn::AmenitiesCount,
        NumericColumn::Price,
        NumericColumn::MinimumNights,
        NumericColumn::MaximumNights,
        NumericColumn::ReviewScoresRating,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::YearsHosting => "years_hosting",
            NumericColumn::HostResponseRate => "host_response_rate",
            NumericColumn::HostListingsCount => "host_listings_count",
            NumericColumn::Accommodates => "accommodates",
            NumericColumn::Bathrooms => "bathrooms",
            NumericColumn::Bedrooms => "bedrooms",
            NumericColumn::Beds => "beds",
            NumericColumn::AmenitiesCount => "amenities_count",
            NumericColumn::Price => "price",
            NumericColumn::MinimumNights => "minimum_nights",
            NumericColumn::MaximumNights => "maximum_nights",
            NumericColumn::ReviewScoresRating => "review_scores_rating",
        }
    }

    pub fn value(&self, row: &EnrichedListing) -> Option<f64> {
        let l = &row.listing;
        match self {
            NumericColumn::YearsHosting => l.years_hosting,
            NumericColumn::HostResponseRate => l.host_response_rate,
            NumericColumn::HostListingsCount => l.host_listings_count.map(|v| v as f64),
            NumericColumn::Accommodates => l.accommodates.map(|v| v as f64),
            NumericColumn::Bathrooms => l.bathrooms,
            NumericColumn::Bedrooms => l.bedrooms.map(|v| v as f64),
            NumericColumn::Beds => l.beds.map(|v| v as f64),
            NumericColumn::AmenitiesCount => row.amenities_count.map(|v| v as f64),
            NumericColumn::Price => l.price,
            NumericColumn::MinimumNights => l.minimum_nights.map(|v| v as f64),
            NumericColumn::MaximumNights => l.maximum_nights.map(|v| v as f64),
            NumericColumn::ReviewScoresRating => l.review_scores_rating,
        }
    }

    /// Extract this column across all rows, preserving nulls.
    pub fn values(&self, rows: &[EnrichedListing]) -> Vec<Option<f64>> {
        rows.iter().map(|row| self.value(row)).collect()
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("'{}' is not a numeric column", s))
    }
}

/// Columns summarized by level counts rather than moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    HostResponseTime,
    HostIsSuperhost,
    Zipcode,
    IsCentral,
    PropertyType,
    RoomType,
    ReviewScoresFactor,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 7] = [
        CategoricalColumn::HostResponseTime,
        CategoricalColumn::HostIsSuperhost,
        CategoricalColumn::Zipcode,
        CategoricalColumn::IsCentral,
        CategoricalColumn::PropertyType,
        CategoricalColumn::RoomType,
        CategoricalColumn::ReviewScoresFactor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalColumn::HostResponseTime => "host_response_time",
            CategoricalColumn::HostIsSuperhost => "host_is_superhost",
            CategoricalColumn::Zipcode => "zipcode",
            CategoricalColumn::IsCentral => "is_central",
            CategoricalColumn::PropertyType => "property_type",
            CategoricalColumn::RoomType => "room_type",
            CategoricalColumn::ReviewScoresFactor => "review_scores_factor",
        }
    }

    /// What a null in this column means. A null review category is a rating
    /// that fell between the bad cutoff and the good threshold, since listings
    /// without a rating carry the explicit `missing` level.
    pub fn null_label(&self) -> &'static str {
        match self {
            CategoricalColumn::ReviewScoresFactor => "unclassified",
            _ => "missing",
        }
    }

    pub fn value(&self, row: &EnrichedListing) -> Option<String> {
        let l = &row.listing;
        match self {
            CategoricalColumn::HostResponseTime => {
                l.host_response_time.map(|v| v.as_str().to_string())
            }
            CategoricalColumn::HostIsSuperhost => l.host_is_superhost.map(|v| v.to_string()),
            CategoricalColumn::Zipcode => l.zipcode.as_ref().map(|z| z.to_string()),
            CategoricalColumn::IsCentral => row.is_central.map(|v| v.to_string()),
            CategoricalColumn::PropertyType => l.property_type.clone(),
            CategoricalColumn::RoomType => l.room_type.map(|v| v.as_str().to_string()),
            CategoricalColumn::ReviewScoresFactor => {
                row.review_scores_factor.map(|v| v.as_str().to_string())
            }
        }
    }
}

/// Date columns, summarized by range and missingness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateColumn {
    HostSince,
    LastScraped,
}

impl DateColumn {
    pub const ALL: [DateColumn; 2] = [DateColumn::HostSince, DateColumn::LastScraped];

    pub fn name(&self) -> &'static str {
        match self {
            DateColumn::HostSince => "host_since",
            DateColumn::LastScraped => "last_scraped",
        }
    }

    pub fn value(&self, row: &EnrichedListing) -> Option<NaiveDate> {
        match self {
            DateColumn::HostSince => row.listing.host_since,
            DateColumn::LastScraped => row.listing.last_scraped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_levels_reject_unseen_values() {
        assert_eq!(ResponseTime::parse("within a day"), Some(ResponseTime::WithinADay));
        assert_eq!(ResponseTime::parse("never"), None);
        assert_eq!(RoomType::parse("Hotel room"), Some(RoomType::HotelRoom));
        assert_eq!(RoomType::parse("Castle"), None);
    }

    #[test]
    fn test_zipcode_is_open() {
        assert_eq!(Zipcode::parse(" 28806 ").unwrap().as_str(), "28806");
        assert!(Zipcode::parse("  ").is_none());
    }

    #[test]
    fn test_numeric_column_names_round_trip() {
        for column in NumericColumn::ALL {
            assert_eq!(column.name().parse::<NumericColumn>().unwrap(), column);
        }
        assert!("bathrooms_text".parse::<NumericColumn>().is_err());
    }

    #[test]
    fn test_numeric_column_serde_names_match_display_names() {
        let json = serde_json::to_string(&NumericColumn::AmenitiesCount).unwrap();
        assert_eq!(json, "\"amenities_count\"");
    }
}
