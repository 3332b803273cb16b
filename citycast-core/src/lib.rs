//! Core library for the `citycast` weather client.
//!
//! This crate defines:
//! - Configuration and the persisted unit preference
//! - The weather client (geocoding + forecast) and its error classification
//! - Normalization into a display-ready `WeatherView`
//! - Per-screen lookup state that ignores superseded responses
//!
//! It is used by `citycast-cli`, but can also be reused by other front-ends.

pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod lookup;
pub mod model;
pub mod settings;

pub use client::WeatherClient;
pub use condition::{Condition, ConditionGroup};
pub use config::{ApiConfig, Config};
pub use error::{ErrorKind, WeatherError};
pub use forecast::{RawForecast, normalize};
pub use lookup::{Lookup, LookupFailure, LookupState, Ticket};
pub use model::{Coordinates, HourlyPoint, UnitPreference, WeatherQuery, WeatherView};
pub use settings::SettingsStore;
