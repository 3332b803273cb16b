//! Schema of the Open-Meteo forecast endpoint and normalization into a
//! [`WeatherView`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, de};

use crate::{
    condition::Condition,
    model::{HourlyPoint, UnitPreference, WeatherView, round_temperature},
};

pub(crate) const ENDPOINT: &str = "forecast";

/// Comma-separated `current` variables requested from the provider.
pub const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
pub const HOURLY_FIELDS: &str = "temperature_2m";

// `timezone=auto` yields local timestamps without offset; seconds are optional.
const LOCAL_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const LABEL_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub current: RawCurrent,
    #[serde(default)]
    pub hourly: Option<RawHourly>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    #[serde(default, deserialize_with = "local_time_opt")]
    pub time: Option<NaiveDateTime>,
    pub temperature_2m: f64,
    pub weather_code: i64,
    pub wind_speed_10m: f64,
}

/// Absent and `null` arrays both deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHourly {
    #[serde(default, deserialize_with = "local_times")]
    pub time: Vec<NaiveDateTime>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub temperature_2m: Vec<f64>,
}

fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    LOCAL_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

fn invalid_timestamp<E: de::Error>(s: &str) -> E {
    E::custom(format!("invalid timestamp '{s}'"))
}

fn local_time_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_local_time(&s).ok_or_else(|| invalid_timestamp(&s)))
        .transpose()
}

fn local_times<'de, D>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer)?
        .unwrap_or_default()
        .iter()
        .map(|s| parse_local_time(s).ok_or_else(|| invalid_timestamp(s)))
        .collect()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shape a raw forecast into the display model.
///
/// The hourly series pairs `time[i]` with `temperature_2m[i]` and is as
/// long as the shorter of the two arrays.
pub fn normalize(raw: &RawForecast, city: &str, unit: UnitPreference) -> WeatherView {
    let hourly = raw
        .hourly
        .as_ref()
        .map(|h| {
            h.time
                .iter()
                .zip(h.temperature_2m.iter())
                .map(|(at, temp)| HourlyPoint {
                    at: *at,
                    time: at.format(LABEL_FORMAT).to_string(),
                    temperature: round_temperature(*temp),
                })
                .collect()
        })
        .unwrap_or_default();

    WeatherView {
        city: city.to_string(),
        unit,
        temperature: round_temperature(raw.current.temperature_2m),
        condition: Condition::from_code(raw.current.weather_code),
        wind_speed: raw.current.wind_speed_10m,
        observed_at: raw.current.time,
        hourly,
    }
}
