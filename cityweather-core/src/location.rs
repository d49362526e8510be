use crate::{
    error::{Result, WeatherError},
    settings::{SettingsStore, WEATHER_CITY, WEATHER_STATE},
};

/// Two-letter state and territory codes and the names the weather service
/// is queried with. Kansas has no entry.
pub const STATE_NAMES: &[(&str, &str)] = &[
    ("me", "maine"),
    ("nh", "new hampshire"),
    ("vt", "vermont"),
    ("ri", "rhode island"),
    ("ma", "massacheusetts"),
    ("cn", "connecticut"),
    ("ny", "new york"),
    ("pa", "pennsylvania"),
    ("nj", "new jersey"),
    ("md", "maryland"),
    ("de", "delaware"),
    ("va", "virginia"),
    ("nc", "north carolina"),
    ("sc", "south carolina"),
    ("ga", "georgia"),
    ("fl", "florida"),
    ("al", "alabama"),
    ("ms", "mississippi"),
    ("la", "louisiana"),
    ("ar", "arkansas"),
    ("mo", "missouri"),
    ("ia", "iowa"),
    ("ky", "kentucky"),
    ("tn", "tennessee"),
    ("wv", "west virginia"),
    ("oh", "ohio"),
    ("in", "indiana"),
    ("il", "illinois"),
    ("mi", "michigan"),
    ("wi", "wisconsin"),
    ("mn", "minnisota"),
    ("nd", "north dakota"),
    ("sd", "south dakota"),
    ("ne", "nebraska"),
    ("tx", "texas"),
    ("ok", "oklahoma"),
    ("wy", "wyoming"),
    ("co", "colorado"),
    ("mt", "montana"),
    ("ut", "utah"),
    ("nv", "nevada"),
    ("az", "arizona"),
    ("nm", "new mexico"),
    ("ca", "california"),
    ("or", "oregon"),
    ("wa", "washington"),
    ("id", "idaho"),
    ("hi", "hawaii"),
    ("ak", "alaska"),
    ("dc", "district of columbia"),
];

const INCOMPLETE_LOCATION: &str = "incomplete location name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    /// Empty when only a city was given.
    pub state: String,
}

impl Location {
    /// Value of the `q` query parameter: `city,state`.
    pub fn query(&self) -> String {
        format!("{},{}", self.city, self.state)
    }
}

/// Expand a lower-case two-letter code to its full name.
pub fn expand_state(token: &str) -> Option<&'static str> {
    STATE_NAMES
        .iter()
        .find(|(code, _)| *code == token)
        .map(|(_, name)| *name)
}

/// Resolve the location to query.
///
/// With no tokens the previously stored city/state are used. Explicit tokens
/// (city, optional state) are normalised and written back to the store.
pub fn resolve_location<S>(tokens: Option<&[String]>, store: &mut S) -> Result<Location>
where
    S: SettingsStore + ?Sized,
{
    let Some(tokens) = tokens else {
        let city = store.get(WEATHER_CITY).unwrap_or_default();
        let state = store.get(WEATHER_STATE).unwrap_or_default();
        if city.is_empty() {
            return Err(WeatherError::usage(INCOMPLETE_LOCATION));
        }
        tracing::debug!(%city, %state, "using stored location");
        return Ok(Location { city, state });
    };

    if tokens.is_empty() || tokens.len() > 2 {
        return Err(WeatherError::usage(INCOMPLETE_LOCATION));
    }

    let city = tokens[0].trim().to_lowercase();
    if city.is_empty() {
        return Err(WeatherError::usage(INCOMPLETE_LOCATION));
    }

    let mut state = tokens
        .get(1)
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    if let Some(name) = expand_state(&state) {
        state = name.to_string();
    }

    store.set(WEATHER_CITY, &city);
    store.set(WEATHER_STATE, &state);
    tracing::debug!(%city, %state, "stored new location");

    Ok(Location { city, state })
}
