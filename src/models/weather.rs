//! Current weather at the destination and WMO code mapping

use serde::{Deserialize, Serialize};

/// Current conditions shown with an itinerary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInfo {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// Icon URL for the condition bucket
    pub icon_ref: String,
    /// True when generated locally instead of fetched
    pub is_synthetic: bool,
}

impl WeatherInfo {
    /// Build live weather info from a WMO weather code
    #[must_use]
    pub fn from_code(temperature_celsius: f64, code: u16) -> Self {
        Self {
            temperature_celsius,
            condition: weather_code_to_condition(code).to_string(),
            icon_ref: WeatherIcon::from_code(code).url().to_string(),
            is_synthetic: false,
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_celsius)
    }
}

/// Icon bucket for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Thunder,
    Generic,
}

impl WeatherIcon {
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => WeatherIcon::Clear,
            1..=3 => WeatherIcon::PartlyCloudy,
            45..=48 => WeatherIcon::Fog,
            51..=67 | 80..=82 => WeatherIcon::Rain,
            71..=77 | 85..=86 => WeatherIcon::Snow,
            95.. => WeatherIcon::Thunder,
            _ => WeatherIcon::Generic,
        }
    }

    #[must_use]
    pub fn url(&self) -> &'static str {
        match self {
            WeatherIcon::Clear | WeatherIcon::Generic => {
                "https://cdn-icons-png.flaticon.com/512/6974/6974833.png"
            }
            WeatherIcon::PartlyCloudy => "https://cdn-icons-png.flaticon.com/512/414/414927.png",
            WeatherIcon::Fog | WeatherIcon::Thunder => {
                "https://cdn-icons-png.flaticon.com/512/1197/1197102.png"
            }
            WeatherIcon::Rain => "https://cdn-icons-png.flaticon.com/512/3351/3351979.png",
            WeatherIcon::Snow => "https://cdn-icons-png.flaticon.com/512/642/642102.png",
        }
    }
}

/// Convert a WMO weather code to a human-readable condition
#[must_use]
pub fn weather_code_to_condition(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}
