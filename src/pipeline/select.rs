//! Column selection and typed row extraction

use polars::prelude::*;

use crate::error::{PipelineError, Result};
use crate::pipeline::RawListing;

/// Source column renamed to `zipcode` during selection
pub const NEIGHBOURHOOD_COLUMN: &str = "neighbourhood_cleansed";

/// Name the neighbourhood column carries after selection
pub const ZIPCODE_COLUMN: &str = "zipcode";

/// Columns the pipeline reads from the export, in projection order.
pub const SOURCE_COLUMNS: [&str; 19] = [
    "id",
    "last_scraped",
    "host_since",
    "host_response_time",
    "host_response_rate",
    "host_is_superhost",
    "host_listings_count",
    NEIGHBOURHOOD_COLUMN,
    "property_type",
    "room_type",
    "accommodates",
    "bathrooms_text",
    "bedrooms",
    "beds",
    "amenities",
    "price",
    "minimum_nights",
    "maximum_nights",
    "review_scores_rating",
];

/// Cell values treated as missing in addition to a null cell
pub const MISSING_MARKERS: [&str; 3] = ["", "NA", "N/A"];

/// Check a header against [`SOURCE_COLUMNS`].
///
/// Every absent column is reported at once so a changed export format is
/// diagnosed in a single run.
pub fn check_columns(available: &[String]) -> Result<()> {
    let missing: Vec<String> = SOURCE_COLUMNS
        .iter()
        .filter(|name| !available.iter().any(|a| a == *name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns { missing });
    }
    Ok(())
}

/// Project the export onto [`SOURCE_COLUMNS`] and rename the neighbourhood column.
pub fn select_columns(df: &DataFrame) -> Result<DataFrame> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    check_columns(&available)?;

    let mut projected = df.select(SOURCE_COLUMNS)?;
    projected.rename(NEIGHBOURHOOD_COLUMN, ZIPCODE_COLUMN.into())?;
    Ok(projected)
}

/// Convert a projected table into owned raw rows.
///
/// Columns are cast to `String` first, so a table read with schema
/// inference enabled is accepted as well.
pub fn to_raw_listings(projected: &DataFrame) -> Result<Vec<RawListing>> {
    let column = |name: &str| -> Result<Vec<Option<String>>> {
        let col = projected.column(name)?.cast(&DataType::String)?;
        let values = col
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(clean_cell)
            .collect();
        Ok(values)
    };

    let mut ids = column("id")?.into_iter();
    let mut last_scraped = column("last_scraped")?.into_iter();
    let mut host_since = column("host_since")?.into_iter();
    let mut host_response_time = column("host_response_time")?.into_iter();
    let mut host_response_rate = column("host_response_rate")?.into_iter();
    let mut host_is_superhost = column("host_is_superhost")?.into_iter();
    let mut host_listings_count = column("host_listings_count")?.into_iter();
    let mut zipcode = column(ZIPCODE_COLUMN)?.into_iter();
    let mut property_type = column("property_type")?.into_iter();
    let mut room_type = column("room_type")?.into_iter();
    let mut accommodates = column("accommodates")?.into_iter();
    let mut bathrooms_text = column("bathrooms_text")?.into_iter();
    let mut bedrooms = column("bedrooms")?.into_iter();
    let mut beds = column("beds")?.into_iter();
    let mut amenities = column("amenities")?.into_iter();
    let mut price = column("price")?.into_iter();
    let mut minimum_nights = column("minimum_nights")?.into_iter();
    let mut maximum_nights = column("maximum_nights")?.into_iter();
    let mut review_scores_rating = column("review_scores_rating")?.into_iter();

    let rows = (0..projected.height())
        .map(|_| RawListing {
            id: ids.next().flatten(),
            last_scraped: last_scraped.next().flatten(),
            host_since: host_since.next().flatten(),
            host_response_time: host_response_time.next().flatten(),
            host_response_rate: host_response_rate.next().flatten(),
            host_is_superhost: host_is_superhost.next().flatten(),
            host_listings_count: host_listings_count.next().flatten(),
            zipcode: zipcode.next().flatten(),
            property_type: property_type.next().flatten(),
            room_type: room_type.next().flatten(),
            accommodates: accommodates.next().flatten(),
            bathrooms_text: bathrooms_text.next().flatten(),
            bedrooms: bedrooms.next().flatten(),
            beds: beds.next().flatten(),
            amenities: amenities.next().flatten(),
            price: price.next().flatten(),
            minimum_nights: minimum_nights.next().flatten(),
            maximum_nights: maximum_nights.next().flatten(),
            review_scores_rating: review_scores_rating.next().flatten(),
        })
        .collect();

    Ok(rows)
}

fn clean_cell(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
