//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Header of the fixture export. `description` is an extra column the
/// pipeline must ignore.
pub const HEADER: [&str; 20] = [
    "id",
    "description",
    "last_scraped",
    "host_since",
    "host_response_time",
    "host_response_rate",
    "host_is_superhost",
    "host_listings_count",
    "neighbourhood_cleansed",
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

/// One export row, cells in raw string form
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub id: &'static str,
    pub description: &'static str,
    pub last_scraped: &'static str,
    pub host_since: &'static str,
    pub host_response_time: &'static str,
    pub host_response_rate: &'static str,
    pub host_is_superhost: &'static str,
    pub host_listings_count: &'static str,
    pub neighbourhood_cleansed: &'static str,
    pub property_type: &'static str,
    pub room_type: &'static str,
    pub accommodates: &'static str,
    pub bathrooms_text: &'static str,
    pub bedrooms: &'static str,
    pub beds: &'static str,
    pub amenities: &'static str,
    pub price: &'static str,
    pub minimum_nights: &'static str,
    pub maximum_nights: &'static str,
    pub review_scores_rating: &'static str,
}

impl Default for ListingRow {
    fn default() -> Self {
        Self {
            id: "1",
            description: "Cozy bungalow, close to downtown",
            last_scraped: "2021-10-23",
            host_since: "2016-05-01",
            host_response_time: "within an hour",
            host_response_rate: "100%",
            host_is_superhost: "t",
            host_listings_count: "1",
            neighbourhood_cleansed: "28804",
            property_type: "Entire home",
            room_type: "Entire home/apt",
            accommodates: "4",
            bathrooms_text: "1 bath",
            bedrooms: "2",
            beds: "2",
            amenities: r#"["Wifi", "Kitchen", "Heating", "Coffee maker"]"#,
            price: "$120.00",
            minimum_nights: "2",
            maximum_nights: "30",
            review_scores_rating: "4.85",
        }
    }
}

impl ListingRow {
    pub fn cells(&self) -> [&'static str; 20] {
        [
            self.id,
            self.description,
            self.last_scraped,
            self.host_since,
            self.host_response_time,
            self.host_response_rate,
            self.host_is_superhost,
            self.host_listings_count,
            self.neighbourhood_cleansed,
            self.property_type,
            self.room_type,
            self.accommodates,
            self.bathrooms_text,
            self.bedrooms,
            self.beds,
            self.amenities,
            self.price,
            self.minimum_nights,
            self.maximum_nights,
            self.review_scores_rating,
        ]
    }
}

/// Quote every field, doubling embedded quotes.
pub fn csv_line(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|c| format!("\"{}\"", c.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write a header and rows to a CSV file inside a fresh temporary directory.
pub fn write_csv(header: &[&str], rows: &[Vec<&str>]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("listings.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "{}", csv_line(header)).unwrap();
    for row in rows {
        writeln!(file, "{}", csv_line(row)).unwrap();
    }
    drop(file);

    (temp_dir, csv_path)
}

pub fn write_listings_csv(rows: &[ListingRow]) -> (TempDir, PathBuf) {
    let cells: Vec<Vec<&str>> = rows.iter().map(|r| r.cells().to_vec()).collect();
    write_csv(&HEADER, &cells)
}

/// Six listings covering every edge case of the derived fields.
///
/// Ratings present: 4.9, 4.5, 4.7, 4.6, 4.8 -> median 4.7.
pub fn asheville_fixture() -> Vec<ListingRow> {
    vec![
        ListingRow {
            id: "1",
            neighbourhood_cleansed: "28801",
            price: "$150.00",
            bathrooms_text: "Half-bath",
            amenities: "Wifi,Kitchen,Heating",
            review_scores_rating: "NA",
            ..Default::default()
        },
        ListingRow {
            id: "2",
            host_since: "2022-01-01",
            last_scraped: "2021-10-23",
            host_response_rate: "87%",
            host_is_superhost: "f",
            neighbourhood_cleansed: "28806",
            price: "$1,200.00",
            bathrooms_text: "1.5 shared baths",
            review_scores_rating: "4.9",
            ..Default::default()
        },
        ListingRow {
            id: "3",
            host_response_time: "N/A",
            host_response_rate: "N/A",
            room_type: "Private room",
            accommodates: "2",
            bedrooms: "",
            beds: "1",
            price: "$65.00",
            review_scores_rating: "4.5",
            ..Default::default()
        },
        ListingRow {
            id: "4",
            host_response_rate: "0%",
            host_listings_count: "42",
            accommodates: "8",
            bathrooms_text: "3 baths",
            bedrooms: "4",
            beds: "5",
            price: "$420.00",
            review_scores_rating: "4.7",
            ..Default::default()
        },
        ListingRow {
            id: "5",
            neighbourhood_cleansed: "28801",
            price: "$95.00",
            amenities: "Wifi",
            review_scores_rating: "4.6",
            ..Default::default()
        },
        ListingRow {
            id: "6",
            host_is_superhost: "",
            price: "call for rates",
            review_scores_rating: "4.8",
            ..Default::default()
        },
    ]
}
