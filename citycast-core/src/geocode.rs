//! Schema of the Open-Meteo geocoding endpoint.

use serde::Deserialize;

use crate::{error::WeatherError, model::Coordinates};

pub(crate) const ENDPOINT: &str = "geocoding";

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    // The provider omits `results` entirely when nothing matches.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodeResponse {
    /// Coordinates of the first match. No disambiguation among several.
    pub fn first_coordinates(&self, city: &str) -> Result<Coordinates, WeatherError> {
        let first = self
            .results
            .first()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        first.coordinates()
    }
}

impl GeocodeResult {
    fn coordinates(&self) -> Result<Coordinates, WeatherError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(WeatherError::Invalid {
                endpoint: ENDPOINT,
                reason: format!("latitude {} out of range", self.latitude),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(WeatherError::Invalid {
                endpoint: ENDPOINT,
                reason: format!("longitude {} out of range", self.longitude),
            });
        }

        Ok(Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}
