//! Attraction adapter: sights, museums, parks and places of worship nearby

use async_trait::async_trait;
use rand::RngExt;
use tracing::{info, instrument, warn};

use super::overpass::{OverpassClient, OverpassElement, OverpassQuery, named_elements};
use super::{AttractionSource, ProviderOutcome, one_decimal};
use crate::config::RegionConfig;
use crate::models::{AttractionInfo, GeoPoint};

const ATTRACTION_FILTERS: [&str; 6] = [
    r#"["tourism"="attraction"]"#,
    r#"["historic"]"#,
    r#"["tourism"="museum"]"#,
    r#"["leisure"="park"]"#,
    r#"["tourism"="viewpoint"]"#,
    r#"["amenity"="place_of_worship"]"#,
];

/// Adapter producing attractions from Overpass nodes
pub struct OverpassAttractions {
    overpass: OverpassClient,
    region: RegionConfig,
    radius_m: u32,
    max_results: usize,
}

impl OverpassAttractions {
    pub fn new(
        overpass: OverpassClient,
        region: RegionConfig,
        radius_m: u32,
        max_results: usize,
    ) -> Self {
        Self {
            overpass,
            region,
            radius_m,
            max_results,
        }
    }

    #[must_use]
    pub fn query(&self, point: GeoPoint) -> OverpassQuery {
        OverpassQuery {
            filters: ATTRACTION_FILTERS.to_vec(),
            center: point,
            radius_m: self.radius_m,
            limit: self.max_results,
        }
    }

    /// Provider description if present, else a sentence for the element's category
    #[must_use]
    pub fn describe(&self, element: &OverpassElement, destination: &str) -> String {
        let country = &self.region.country_name;
        let demonym = &self.region.demonym;

        if let Some(description) = element.tag("description") {
            return description.to_string();
        }
        if let Some(historic) = element.tag("historic") {
            return format!("Historic {historic} in {destination}, showcasing {country}'s rich heritage.");
        }
        if element.tag("tourism") == Some("museum") {
            return format!(
                "A fascinating museum in {destination} displaying important {demonym} cultural artifacts."
            );
        }
        if element.tag("leisure") == Some("park") {
            return format!("A beautiful park in {destination}, perfect for experiencing {demonym} nature.");
        }
        if element.tag("amenity") == Some("place_of_worship") {
            let religion = element.tag("religion").unwrap_or("religious");
            return format!(
                "A sacred {religion} site in {destination}, important to {demonym} spiritual traditions."
            );
        }
        format!("A popular attraction in {destination}, visited by many tourists exploring {country}'s wonders.")
    }

    /// Convert one named element; `draw` is the uniform rating sample in [4.0, 5.0]
    #[must_use]
    pub fn to_info(&self, element: &OverpassElement, destination: &str, draw: f64) -> AttractionInfo {
        AttractionInfo {
            name: element
                .name()
                .map_or_else(|| format!("{destination} Attraction"), str::to_string),
            description: self.describe(element, destination),
            rating: one_decimal(draw),
            is_synthetic: false,
        }
    }

    fn to_infos(&self, elements: Vec<OverpassElement>, destination: &str) -> Vec<AttractionInfo> {
        let mut rng = rand::rng();
        named_elements(elements, self.max_results)
            .iter()
            .map(|element| self.to_info(element, destination, rng.random_range(4.0..=5.0)))
            .collect()
    }
}

#[async_trait]
impl AttractionSource for OverpassAttractions {
    #[instrument(skip(self, point), fields(point = %point.format_coordinates()))]
    async fn attractions(
        &self,
        point: GeoPoint,
        destination: &str,
    ) -> ProviderOutcome<Vec<AttractionInfo>> {
        let elements = match self.overpass.search(&self.query(point)).await {
            Ok(elements) => elements,
            Err(e) => {
                warn!("Attraction search failed: {}", e);
                return ProviderOutcome::failed(e);
            }
        };

        let attractions = self.to_infos(elements, destination);
        info!("Found {} named attractions near {}", attractions.len(), destination);
        ProviderOutcome::from_list(attractions)
    }
}
