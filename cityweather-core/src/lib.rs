//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Persistent key/value settings
//! - Location resolution (city plus optional state)
//! - The OpenWeather current-conditions client
//! - Report rows and table rendering
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod report;
pub mod settings;
pub mod table;

pub use error::WeatherError;
pub use location::{Location, resolve_location};
pub use model::WeatherRecord;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_settings};
pub use report::{ReportRow, RowValue, compass_point, fetch_report, report_rows};
pub use settings::{FileSettings, MemorySettings, SettingsStore};
pub use table::{OutputFormat, Table};
