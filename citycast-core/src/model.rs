use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::condition::Condition;

/// Metric or imperial display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "metric",
            UnitPreference::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "°C",
            UnitPreference::Imperial => "°F",
        }
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "km/h",
            UnitPreference::Imperial => "mph",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitPreference::Metric => "Metric (°C)",
            UnitPreference::Imperial => "Imperial (°F)",
        }
    }
}

impl fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitPreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitPreference::Metric),
            "imperial" => Ok(UnitPreference::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit preference '{value}'. Supported values: metric, imperial."
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub unit: UnitPreference,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, unit: UnitPreference) -> Self {
        Self { city: city.into(), unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub at: NaiveDateTime,
    /// `HH:MM` label.
    pub time: String,
    pub temperature: i64,
}

/// Display-ready result of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub city: String,
    pub unit: UnitPreference,
    pub temperature: i64,
    pub condition: Condition,
    pub wind_speed: f64,
    /// Local time at the location, when the provider reports it.
    pub observed_at: Option<NaiveDateTime>,
    pub hourly: Vec<HourlyPoint>,
}

impl WeatherView {
    /// Up to `count` hourly points starting at the hour of `observed_at`.
    pub fn upcoming(&self, count: usize) -> &[HourlyPoint] {
        let start = match self.observed_at {
            Some(now) => {
                let hour = now
                    .with_minute(0)
                    .and_then(|t| t.with_second(0))
                    .unwrap_or(now);
                self.hourly
                    .iter()
                    .position(|p| p.at >= hour)
                    .unwrap_or(self.hourly.len())
            }
            None => 0,
        };

        let end = start.saturating_add(count).min(self.hourly.len());
        &self.hourly[start..end]
    }
}

/// Round half away from zero (15.5 -> 16, -0.5 -> -1).
pub fn round_temperature(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 25)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid timestamp")
    }

    fn view(observed_at: Option<NaiveDateTime>) -> WeatherView {
        WeatherView {
            city: "Dublin".into(),
            unit: UnitPreference::Metric,
            temperature: 15,
            condition: Condition::from_code(3),
            wind_speed: 15.0,
            observed_at,
            hourly: (0..24)
                .map(|h| HourlyPoint {
                    at: at(h, 0),
                    time: format!("{h:02}:00"),
                    temperature: h as i64,
                })
                .collect(),
        }
    }

    #[test]
    fn unit_preference_as_str_roundtrip() {
        for unit in [UnitPreference::Metric, UnitPreference::Imperial] {
            let parsed = UnitPreference::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(unit, parsed);
        }
        assert_eq!(UnitPreference::try_from(" Imperial ").unwrap(), UnitPreference::Imperial);
    }

    #[test]
    fn unknown_unit_preference_error() {
        let err = UnitPreference::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit preference"));
    }

    #[test]
    fn unit_display_helpers() {
        assert_eq!(UnitPreference::default(), UnitPreference::Metric);
        assert_eq!(UnitPreference::Metric.temperature_symbol(), "°C");
        assert_eq!(UnitPreference::Imperial.wind_speed_unit(), "mph");
        assert_eq!(UnitPreference::Imperial.label(), "Imperial (°F)");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_temperature(15.5), 16);
        assert_eq!(round_temperature(14.7), 15);
        assert_eq!(round_temperature(14.49), 14);
        assert_eq!(round_temperature(-2.5), -3);
        assert_eq!(round_temperature(0.0), 0);
    }

    #[test]
    fn upcoming_starts_at_the_observed_hour() {
        let v = view(Some(at(17, 15)));
        let strip = v.upcoming(5);
        let labels: Vec<_> = strip.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(labels, ["17:00", "18:00", "19:00", "20:00", "21:00"]);
    }

    #[test]
    fn upcoming_is_clamped_at_the_end_of_the_series() {
        let v = view(Some(at(22, 0)));
        assert_eq!(v.upcoming(5).len(), 2);

        let mut past = view(None);
        past.observed_at = NaiveDate::from_ymd_opt(2025, 5, 26).and_then(|d| d.and_hms_opt(1, 0, 0));
        assert!(past.upcoming(5).is_empty());
    }

    #[test]
    fn upcoming_without_observed_time_starts_at_first_point() {
        let v = view(None);
        assert_eq!(v.upcoming(3)[0].time, "00:00");
        assert_eq!(v.upcoming(usize::MAX).len(), 24);
    }
}
