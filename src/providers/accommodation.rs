//! Accommodation adapter: nearby hotels, hostels and guest houses
//!
//! Overpass has no prices and only sometimes a `stars` tag, so price and rating
//! are synthesized from the budget tier and the star count.

use async_trait::async_trait;
use rand::RngExt;
use tracing::{info, instrument, warn};

use super::overpass::{OverpassClient, OverpassElement, OverpassQuery, named_elements};
use super::{AccommodationSource, ProviderOutcome, one_decimal};
use crate::config::RegionConfig;
use crate::models::{AccommodationOption, Budget, GeoPoint};

/// Lowest nightly price ever quoted
pub const PRICE_FLOOR: u32 = 800;
/// Half-width of the uniform price jitter
pub const PRICE_JITTER: f64 = 250.0;

const CATEGORY_FILTERS: [&str; 3] = [
    r#"["tourism"="hotel"]"#,
    r#"["tourism"="hostel"]"#,
    r#"["tourism"="guest_house"]"#,
];

/// Search radius in meters for a budget tier
#[must_use]
pub fn search_radius(budget: Budget) -> u32 {
    match budget {
        Budget::Cheap => 5_000,
        Budget::Moderate => 10_000,
        Budget::Luxury => 15_000,
    }
}

/// Nightly base price before star scaling
#[must_use]
pub fn tier_base_price(budget: Budget) -> f64 {
    match budget {
        Budget::Cheap => 1500.0,
        Budget::Moderate => 3000.0,
        Budget::Luxury => 6000.0,
    }
}

/// Leading integer of a `stars` tag ("4", "3S", "5 stars")
#[must_use]
pub fn parse_stars(tag: &str) -> Option<u32> {
    let digits: String = tag
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Leading decimal number of a `stars` tag ("4.5", "3S"); keeps half stars
#[must_use]
pub fn parse_star_rating(tag: &str) -> Option<f64> {
    let trimmed = tag.trim();
    let mut seen_dot = false;
    let end = trimmed
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !c.is_ascii_digit()
            }
        })
        .map_or(trimmed.len(), |(index, _)| index);
    trimmed[..end].trim_end_matches('.').parse().ok()
}

/// `max(800, floor(base × stars/2 + jitter))`
#[must_use]
pub fn synthesize_price(budget: Budget, stars: Option<u32>, jitter: f64) -> u32 {
    let multiplier = stars.map_or(1.0, |s| f64::from(s) / 2.0);
    let price = (tier_base_price(budget) * multiplier + jitter).floor();
    if price <= f64::from(PRICE_FLOOR) {
        PRICE_FLOOR
    } else {
        // Saturating float-to-int cast; prices never approach u32::MAX
        price as u32
    }
}

/// Stars pass through unchanged; otherwise the random draw rounded to one decimal.
///
/// The upstream tag is assumed to be on a 0-5 scale already. Values above 5 are
/// reported but kept so a scale mismatch stays visible.
#[must_use]
pub fn synthesize_rating(stars: Option<f64>, draw: f64) -> f64 {
    match stars {
        Some(stars) => {
            if stars > 5.0 {
                warn!("Star rating {} is outside the 0-5 scale", stars);
            }
            stars
        }
        None => one_decimal(draw),
    }
}

/// Generic label for a venue's `tourism` tag
#[must_use]
pub fn category_label(tourism: Option<&str>) -> &'static str {
    match tourism {
        Some("hotel") => "Hotel",
        Some("hostel") => "Hostel",
        Some("guest_house") => "Guest House",
        _ => "Accommodation",
    }
}

/// Adapter producing accommodation options from Overpass nodes
pub struct OverpassAccommodations {
    overpass: OverpassClient,
    region: RegionConfig,
    max_results: usize,
}

impl OverpassAccommodations {
    pub fn new(overpass: OverpassClient, region: RegionConfig, max_results: usize) -> Self {
        Self {
            overpass,
            region,
            max_results,
        }
    }

    #[must_use]
    pub fn query(&self, point: GeoPoint, budget: Budget) -> OverpassQuery {
        OverpassQuery {
            filters: CATEGORY_FILTERS.to_vec(),
            center: point,
            radius_m: search_radius(budget),
            limit: self.max_results,
        }
    }

    /// Convert one named element; `jitter` and `draw` are the random inputs
    #[must_use]
    pub fn to_option(
        &self,
        element: &OverpassElement,
        index: usize,
        budget: Budget,
        destination: &str,
        jitter: f64,
        draw: f64,
    ) -> AccommodationOption {
        let stars_tag = element.tag("stars");
        let stars = stars_tag.and_then(parse_stars);
        let star_rating = stars_tag.and_then(parse_star_rating);
        let name = element.name().map_or_else(
            || format!("{destination} {}", category_label(element.tag("tourism"))),
            str::to_string,
        );
        let image_ref = format!(
            "https://source.unsplash.com/featured/?{},hotel,{}&sig={index}",
            self.region.country_name.to_lowercase(),
            urlencoding::encode(&name)
        );

        AccommodationOption {
            rating: synthesize_rating(star_rating, draw),
            price: synthesize_price(budget, stars, jitter),
            currency: self.region.currency.clone(),
            image_ref,
            name,
            is_synthetic: false,
        }
    }

    fn to_options(
        &self,
        elements: Vec<OverpassElement>,
        budget: Budget,
        destination: &str,
    ) -> Vec<AccommodationOption> {
        let mut rng = rand::rng();
        named_elements(elements, self.max_results)
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let jitter = rng.random_range(-PRICE_JITTER..=PRICE_JITTER);
                let draw = rng.random_range(3.5..=5.0);
                self.to_option(element, index, budget, destination, jitter, draw)
            })
            .collect()
    }
}

#[async_trait]
impl AccommodationSource for OverpassAccommodations {
    #[instrument(skip(self, point), fields(point = %point.format_coordinates()))]
    async fn accommodations(
        &self,
        point: GeoPoint,
        budget: Budget,
        destination: &str,
    ) -> ProviderOutcome<Vec<AccommodationOption>> {
        let elements = match self.overpass.search(&self.query(point, budget)).await {
            Ok(elements) => elements,
            Err(e) => {
                warn!("Accommodation search failed: {}", e);
                return ProviderOutcome::failed(e);
            }
        };

        let options = self.to_options(elements, budget, destination);
        info!("Found {} named accommodations near {}", options.len(), destination);
        ProviderOutcome::from_list(options)
    }
}
