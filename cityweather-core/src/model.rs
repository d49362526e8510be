use serde::Deserialize;

// Every field defaults so a sparse reply still deserializes; absent values
// read as zero or empty.

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Overview {
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    #[serde(rename = "temp_min")]
    pub min: f64,
    #[serde(rename = "temp_max")]
    pub max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    #[serde(rename = "deg")]
    pub direction_degrees: f64,
}

/// Current conditions as returned by the weather-by-city endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherRecord {
    #[serde(rename = "coord")]
    pub coordinates: Coordinates,
    #[serde(rename = "weather")]
    pub conditions: Vec<Condition>,
    #[serde(rename = "main")]
    pub overview: Overview,
    pub wind: Wind,
    pub name: String,
}
