//! Overpass API proximity search shared by the accommodation and attraction adapters

use std::collections::BTreeMap;
use std::fmt::Write;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::ensure_success;
use crate::Result;
use crate::config::ProvidersConfig;
use crate::models::GeoPoint;

/// Thin client for the Overpass interpreter endpoint
#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

/// Node search around a point
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    /// Tag filters such as `["tourism"="hotel"]` or `["historic"]`
    pub filters: Vec<&'static str>,
    pub center: GeoPoint,
    pub radius_m: u32,
    /// Value passed to `out body`
    pub limit: usize,
}

impl OverpassQuery {
    /// Render as Overpass QL
    #[must_use]
    pub fn render(&self) -> String {
        let mut query = String::from("[out:json];\n(\n");
        for filter in &self.filters {
            // Writing to a String cannot fail
            let _ = writeln!(
                query,
                "  node{}(around:{},{},{});",
                filter, self.radius_m, self.center.latitude, self.center.longitude
            );
        }
        let _ = write!(query, ");\nout body {};", self.limit);
        query
    }
}

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

/// One OSM node from an Overpass response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverpassElement {
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassElement {
    /// Tag value, treating blank values as absent
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Whether the element carries a `name` tag at all
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.tags.contains_key("name")
    }

    /// Non-blank name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tag("name").map(str::trim)
    }
}

/// Keep the first `limit` elements that carry a name tag, in order
#[must_use]
pub fn named_elements(elements: Vec<OverpassElement>, limit: usize) -> Vec<OverpassElement> {
    elements
        .into_iter()
        .filter(OverpassElement::has_name)
        .take(limit)
        .collect()
}

impl OverpassClient {
    pub fn new(client: Client, providers: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: providers.overpass_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run a query and return the raw elements
    pub async fn search(&self, query: &OverpassQuery) -> Result<Vec<OverpassElement>> {
        let url = format!("{}/interpreter", self.base_url);
        let rendered = query.render();
        debug!("Overpass query:\n{}", rendered);

        let response = self
            .client
            .post(url)
            .form(&[("data", rendered.as_str())])
            .send()
            .await?;
        let response = ensure_success("Overpass", response).await?;
        let body: OverpassResponse = response.json().await?;

        debug!("Overpass returned {} elements", body.elements.len());
        Ok(body.elements)
    }
}
