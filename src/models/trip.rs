//! Trip request submitted by the traveller

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, YatraError};

/// Discrete spend category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Budget {
    Cheap,
    #[default]
    Moderate,
    Luxury,
}

impl Budget {
    /// Parse a tier name; anything unrecognised falls back to `Moderate`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cheap" => Budget::Cheap,
            "luxury" => Budget::Luxury,
            _ => Budget::Moderate,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Cheap => "cheap",
            Budget::Moderate => "moderate",
            Budget::Luxury => "luxury",
        }
    }
}

impl From<String> for Budget {
    fn from(value: String) -> Self {
        Budget::parse_lenient(&value)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Travelers {
    Solo,
    Couple,
    Family,
    Friends,
}

impl std::str::FromStr for Travelers {
    type Err = YatraError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "solo" => Ok(Travelers::Solo),
            "couple" => Ok(Travelers::Couple),
            "family" => Ok(Travelers::Family),
            "friends" => Ok(Travelers::Friends),
            other => Err(YatraError::validation(format!(
                "unknown travel party '{other}', expected solo, couple, family or friends"
            ))),
        }
    }
}

impl fmt::Display for Travelers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Travelers::Solo => "solo",
            Travelers::Couple => "couple",
            Travelers::Family => "family",
            Travelers::Friends => "friends",
        };
        f.write_str(name)
    }
}

/// Input to the itinerary pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Free-text destination, e.g. "Jaipur" or "Jaipur, India"
    pub destination: String,
    /// Trip length in days
    pub days: u32,
    pub budget: Budget,
    pub travelers: Travelers,
}

impl TripRequest {
    #[must_use]
    pub fn new(destination: impl Into<String>, days: u32, budget: Budget, travelers: Travelers) -> Self {
        Self {
            destination: destination.into(),
            days,
            budget,
            travelers,
        }
    }

    /// Check the request at an outer boundary (HTTP, CLI).
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(YatraError::validation("Destination cannot be empty"));
        }
        if self.days == 0 {
            return Err(YatraError::validation("Trip must last at least 1 day"));
        }
        Ok(())
    }

    /// Copy of this request with the destination qualified by `country_name`.
    #[must_use]
    pub fn normalized(&self, country_name: &str) -> Self {
        Self {
            destination: normalize_destination(&self.destination, country_name),
            ..self.clone()
        }
    }
}

/// Append `", {country_name}"` unless the destination already names the country.
#[must_use]
pub fn normalize_destination(destination: &str, country_name: &str) -> String {
    let trimmed = destination.trim();
    if trimmed
        .to_lowercase()
        .contains(&country_name.to_lowercase())
    {
        trimmed.to_string()
    } else {
        format!("{trimmed}, {country_name}")
    }
}

/// Destination with a trailing `", {country_name}"` removed.
#[must_use]
pub fn city_name(destination: &str, country_name: &str) -> String {
    let suffix = format!(", {country_name}");
    if let Some(split) = destination.len().checked_sub(suffix.len()) {
        if destination.is_char_boundary(split) && destination[split..].eq_ignore_ascii_case(&suffix) {
            return destination[..split].to_string();
        }
    }
    destination.to_string()
}
