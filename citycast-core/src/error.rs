use reqwest::StatusCode;
use thiserror::Error;

/// The two outcomes a screen distinguishes when a lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CityNotFound,
    LoadFailed,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: '{0}'")]
    CityNotFound(String),

    #[error("Network error while calling {endpoint}: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Malformed {endpoint} response: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {endpoint} response: {reason}")]
    Invalid {
        endpoint: &'static str,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CityNotFound(_) => ErrorKind::CityNotFound,
            _ => ErrorKind::LoadFailed,
        }
    }

    /// Text shown inline by a screen.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::CityNotFound => "City not found.",
            ErrorKind::LoadFailed => "Failed to load weather data.",
        }
    }
}
