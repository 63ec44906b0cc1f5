//! Derived-field synthesis: amenities count, central-district flag, review category

use tracing::info;

use crate::config::PipelineConfig;
use crate::pipeline::stats::{five_number_summary, sorted_present};
use crate::pipeline::{EnrichedListing, Listing, ReviewCategory, Zipcode};

/// Index into the five-number summary used as the "bad" review cutoff.
///
/// Position 2 is the median. The accompanying analysis describes this
/// cutoff as the first quartile (position 1); the median is kept so results
/// match the published figures.
pub const REVIEW_CUTOFF_POSITION: usize = 2;

/// Number of comma separators plus one.
///
/// Amenity names are not deduplicated. Counting quotes instead is not
/// reliable because measurements such as `55" TV` embed stray quotes.
pub fn count_amenities(raw: &str) -> i64 {
    raw.matches(',').count() as i64 + 1
}

/// Central business district flag: exact zipcode equality.
pub fn is_central(zipcode: &Zipcode, central: &str) -> bool {
    zipcode.as_str() == central
}

/// Cutoff at or below which a rating is classified as bad.
///
/// Returns `None` when no listing has a rating.
pub fn review_threshold(listings: &[Listing]) -> Option<f64> {
    let ratings: Vec<Option<f64>> = listings.iter().map(|l| l.review_scores_rating).collect();
    let sorted = sorted_present(&ratings);
    five_number_summary(&sorted).map(|summary| summary[REVIEW_CUTOFF_POSITION])
}

/// Classify a rating. Checks run in a fixed order because the predicates overlap:
/// missing, then strictly above `good_above`, then at or below `bad_cutoff`.
///
/// Ratings strictly between the cutoff and `good_above` stay unclassified.
pub fn classify_review(
    rating: Option<f64>,
    bad_cutoff: Option<f64>,
    good_above: f64,
) -> Option<ReviewCategory> {
    let rating = match rating {
        None => return Some(ReviewCategory::Missing),
        Some(r) => r,
    };
    if rating > good_above {
        return Some(ReviewCategory::Good);
    }
    match bad_cutoff {
        Some(cutoff) if rating <= cutoff => Some(ReviewCategory::Bad),
        _ => None,
    }
}

/// Listings with derived fields, plus the review cutoff that produced them.
#[derive(Debug, Clone, Default)]
pub struct Synthesized {
    pub listings: Vec<EnrichedListing>,
    pub review_cutoff: Option<f64>,
}

pub fn synthesize(listings: Vec<Listing>, config: &PipelineConfig) -> Synthesized {
    let review_cutoff = review_threshold(&listings);
    info!(?review_cutoff, "review cutoff from five-number summary");

    let listings = listings
        .into_iter()
        .map(|listing| EnrichedListing {
            amenities_count: listing.amenities.as_deref().map(count_amenities),
            is_central: listing
                .zipcode
                .as_ref()
                .map(|z| is_central(z, &config.central_zipcode)),
            review_scores_factor: classify_review(
                listing.review_scores_rating,
                review_cutoff,
                config.good_review_threshold,
            ),
            listing,
        })
        .collect();

    Synthesized {
        listings,
        review_cutoff,
    }
}
