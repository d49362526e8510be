//! Turns a [`WeatherRecord`] into the ordered rows shown to the user.

use serde::Serialize;
use std::fmt;

use crate::{
    error::Result,
    location::Location,
    model::WeatherRecord,
    provider::WeatherProvider,
    table::Table,
};

/// Sixteen compass points; the trailing "N" covers bearings that round up to 360°.
pub const COMPASS_POINTS: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

pub const REPORT_HEADINGS: [&str; 2] = ["Item", "Value"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RowValue {
    Text(String),
    Float(f64),
    Integer(i64),
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Text(s) => f.write_str(s),
            RowValue::Float(v) => write!(f, "{v}"),
            RowValue::Integer(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for RowValue {
    fn from(value: &str) -> Self {
        RowValue::Text(value.to_string())
    }
}

impl From<String> for RowValue {
    fn from(value: String) -> Self {
        RowValue::Text(value)
    }
}

impl From<f64> for RowValue {
    fn from(value: f64) -> Self {
        RowValue::Float(value)
    }
}

impl From<i64> for RowValue {
    fn from(value: i64) -> Self {
        RowValue::Integer(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub value: RowValue,
}

impl ReportRow {
    pub fn new(label: &str, value: impl Into<RowValue>) -> Self {
        Self { label: label.to_string(), value: value.into() }
    }
}

/// Compass point for a wind bearing in degrees.
///
/// Zero, negative and NaN bearings yield `None`: calm air reports 0°, so
/// true north cannot be told apart from no data. Halfway bearings round
/// away from zero (11.25° is NNE).
pub fn compass_point(degrees: f64) -> Option<&'static str> {
    if degrees.is_nan() || degrees <= 0.0 {
        return None;
    }
    let index = ((degrees / 22.5).round() as usize).min(COMPASS_POINTS.len() - 1);
    Some(COMPASS_POINTS[index])
}

pub fn report_rows(record: &WeatherRecord) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(10);

    if !record.name.is_empty() {
        rows.push(ReportRow::new("Name", record.name.as_str()));
    }
    if let Some(condition) = record.conditions.first() {
        rows.push(ReportRow::new("Summary", condition.description.as_str()));
    }

    let main = &record.overview;
    rows.push(ReportRow::new("Temperature", main.temperature));
    rows.push(ReportRow::new("  Feels Like", main.feels_like));
    rows.push(ReportRow::new("  Minimum", main.min));
    rows.push(ReportRow::new("  Maximum", main.max));
    rows.push(ReportRow::new("Wind Speed", record.wind.speed));

    if let Some(direction) = compass_point(record.wind.direction_degrees) {
        rows.push(ReportRow::new("Wind Direction", direction));
    }

    rows.push(ReportRow::new("Pressure", main.pressure));
    rows.push(ReportRow::new("Humidity", main.humidity));
    rows
}

pub fn report_table(record: &WeatherRecord) -> Table {
    let mut table = Table::new(&REPORT_HEADINGS);
    for row in report_rows(record) {
        table.add_row(vec![RowValue::Text(row.label), row.value]);
    }
    table
}

/// Fetch current conditions and build the report table.
pub async fn fetch_report(provider: &dyn WeatherProvider, location: &Location) -> Result<Table> {
    let record = provider.current(location).await?;
    tracing::info!(name = %record.name, "weather received");
    Ok(report_table(&record))
}
