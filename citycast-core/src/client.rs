use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::ApiConfig,
    error::WeatherError,
    forecast::{self, CURRENT_FIELDS, HOURLY_FIELDS, RawForecast},
    geocode::{self, GeocodeResponse},
    model::{Coordinates, UnitPreference, WeatherQuery, WeatherView},
};

const USER_AGENT: &str = concat!("citycast/", env!("CARGO_PKG_VERSION"));

/// Turns a city name into a [`WeatherView`] with two sequential calls:
/// geocoding, then forecast.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherClient {
    pub fn new(api: &ApiConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self {
            http,
            geocoding_url: api.geocoding_url.clone(),
            forecast_url: api.forecast_url.clone(),
        })
    }

    /// Full lookup for one query. Terminal on the first failure; no retry.
    #[instrument(skip_all, fields(city = %query.city, unit = %query.unit))]
    pub async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherView, WeatherError> {
        let coords = self.resolve_city(&query.city).await?;
        let raw = self.fetch_forecast(coords, query.unit).await?;
        Ok(forecast::normalize(&raw, query.city.trim(), query.unit))
    }

    /// Coordinates of the first geocoding match for `name`.
    #[instrument(skip(self))]
    pub async fn resolve_city(&self, name: &str) -> Result<Coordinates, WeatherError> {
        let name = name.trim();
        let query = [("name", name), ("count", "1")];

        let parsed: GeocodeResponse = self
            .get_json(geocode::ENDPOINT, &self.geocoding_url, &query)
            .await?;

        let coords = parsed.first_coordinates(name)?;
        if let Some(first) = parsed.results.first() {
            debug!(
                matched = first.name.as_deref().unwrap_or("?"),
                country = first.country.as_deref().unwrap_or("?"),
                latitude = coords.latitude,
                longitude = coords.longitude,
                "geocoded city"
            );
        }

        Ok(coords)
    }

    /// Current conditions plus the hourly temperature series, in the
    /// location's local timezone.
    #[instrument(skip(self))]
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
        unit: UnitPreference,
    ) -> Result<RawForecast, WeatherError> {
        let latitude = coords.latitude.to_string();
        let longitude = coords.longitude.to_string();

        let mut query = vec![
            ("latitude", latitude.as_str()),
            ("longitude", longitude.as_str()),
            ("current", CURRENT_FIELDS),
            ("hourly", HOURLY_FIELDS),
            ("timezone", "auto"),
        ];
        if unit == UnitPreference::Imperial {
            query.push(("temperature_unit", "fahrenheit"));
            query.push(("wind_speed_unit", "mph"));
        }

        self.get_json(forecast::ENDPOINT, &self.forecast_url, &query)
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        debug!(endpoint, url, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Malformed { endpoint, source })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
