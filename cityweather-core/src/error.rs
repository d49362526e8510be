use thiserror::Error;

/// Exit status for malformed or incomplete command-line input.
pub const EXIT_USAGE: u8 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Incomplete or malformed user input.
    #[error("{0}")]
    Usage(String),

    #[error(
        "no API key configured.\n\
         Hint: run `weather configure` and enter your OpenWeather API key."
    )]
    MissingApiKey,

    #[error("unable to reach weather service")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-200 status.
    #[error("invalid request, {status}")]
    Request { status: String },

    #[error("unable to parse weather response")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    pub fn usage(message: impl Into<String>) -> Self {
        WeatherError::Usage(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherError::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_carry_usage_exit_code() {
        let err = WeatherError::usage("incomplete location name");
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert_eq!(err.to_string(), "incomplete location name");
    }

    #[test]
    fn request_error_mentions_status_text() {
        let err = WeatherError::Request { status: "404 Not Found".into() };
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert_eq!(err.to_string(), "invalid request, 404 Not Found");
    }

    #[test]
    fn missing_key_points_at_configure() {
        let msg = WeatherError::MissingApiKey.to_string();
        assert!(msg.contains("Hint: run `weather configure`"));
        assert_eq!(WeatherError::MissingApiKey.exit_code(), EXIT_FAILURE);
    }
}
