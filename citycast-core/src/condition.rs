use serde::Serialize;

/// Coarse weather bucket derived from a WMO weather code.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionGroup {
    Clear,
    Cloudy,
    Fog,
    Drizzle,
    Snow,
    RainShower,
    Thunderstorm,
}

impl ConditionGroup {
    /// Total over all codes; anything outside the known ranges is `Clear`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0..=2 => Self::Clear,
            3 => Self::Cloudy,
            45..=48 => Self::Fog,
            51..=67 => Self::Drizzle,
            71..=77 => Self::Snow,
            80..=82 => Self::RainShower,
            95..=99 => Self::Thunderstorm,
            _ => Self::Clear,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Snow => "Snow",
            Self::RainShower => "Rain showers",
            Self::Thunderstorm => "Thunderstorm",
        }
    }

    /// OpenWeather-style icon code.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Clear => "01d",
            Self::Cloudy => "03d",
            Self::Fog => "50d",
            Self::Drizzle | Self::RainShower => "09d",
            Self::Snow => "13d",
            Self::Thunderstorm => "11d",
        }
    }
}

const DEFAULT_EMOJI: &str = "⛅";

// Checked in order; first keyword contained in the description wins.
const EMOJI_KEYWORDS: &[(&str, &str)] = &[
    ("cloud", "☁️"),
    ("rain", "🌧️"),
    ("sun", "☀️"),
    ("snow", "❄️"),
    ("storm", "⛈️"),
];

/// Pick a display emoji from free-text condition description.
pub fn emoji_for(description: &str) -> &'static str {
    let lower = description.to_lowercase();

    EMOJI_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

/// Condition descriptor carried by a `WeatherView`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub code: i64,
    pub group: ConditionGroup,
    pub description: String,
    pub icon: &'static str,
    pub emoji: &'static str,
}

impl Condition {
    pub fn from_code(code: i64) -> Self {
        let group = ConditionGroup::from_code(code);
        let description = group.description();

        Self {
            code,
            group,
            description: description.to_string(),
            icon: group.icon(),
            emoji: emoji_for(description),
        }
    }
}
