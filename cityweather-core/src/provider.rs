use crate::{
    error::{Result, WeatherError},
    location::Location,
    model::WeatherRecord,
    provider::openweather::OpenWeatherProvider,
    settings::{SettingsStore, WEATHER_API_KEY},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a resolved location.
    async fn current(&self, location: &Location) -> Result<WeatherRecord>;
}

/// Construct the OpenWeather provider from the stored API key.
///
/// There is no fallback key: a missing key is an error.
pub fn provider_from_settings<S>(store: &S) -> Result<Box<dyn WeatherProvider>>
where
    S: SettingsStore + ?Sized,
{
    let api_key = store.get(WEATHER_API_KEY).ok_or(WeatherError::MissingApiKey)?;
    Ok(Box::new(OpenWeatherProvider::new(api_key)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;

    #[test]
    fn provider_from_settings_errors_when_missing_api_key() {
        let store = MemorySettings::new();
        let err = provider_from_settings(&store).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn provider_from_settings_rejects_empty_key() {
        let store = MemorySettings::new().with(WEATHER_API_KEY, "");
        assert!(provider_from_settings(&store).is_err());
    }

    #[test]
    fn provider_from_settings_works_when_configured() {
        let store = MemorySettings::new().with(WEATHER_API_KEY, "KEY");
        assert!(provider_from_settings(&store).is_ok());
    }
}
