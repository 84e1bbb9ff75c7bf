//! Error handling for forecast extraction.
//!
//! Keeps the taxonomy deliberately small: a city name that cannot be
//! resolved is the only user-correctable failure; everything else
//! (network, unexpected markup shape, malformed embedded dates) is an
//! infrastructure problem and is wrapped uniformly.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GismeteoError {
    /// The search endpoint returned no candidate for the given name.
    #[error("unable to find uri for city '{city}'")]
    CityNotFound { city: String },

    /// The HTTP request itself failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The fetched document did not have the expected shape.
    #[error("unexpected page content: {message}")]
    Parse { message: String },
}

impl GismeteoError {
    pub fn city_not_found(city: impl Into<String>) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// True for the user-correctable kind, false for transport/parse failures.
    pub fn is_city_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound { .. })
    }
}

impl From<serde_json::Error> for GismeteoError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse {
            message: format!("payload decoding failed: {error}"),
        }
    }
}

impl From<chrono::ParseError> for GismeteoError {
    fn from(error: chrono::ParseError) -> Self {
        Self::Parse {
            message: format!("date parsing failed: {error}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GismeteoError>;
