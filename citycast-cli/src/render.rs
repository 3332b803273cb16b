use chrono::NaiveDateTime;
use citycast_core::{LookupState, WeatherView};

const TIME_FORMAT: &str = "%b %-d, %H:%M";

/// Text for one screen state. `now` is used when the provider did not
/// report a local observation time.
pub fn render_state(state: &LookupState, strip_len: usize, now: NaiveDateTime) -> String {
    match state {
        LookupState::Idle => "Enter a city name to see the weather".to_string(),
        LookupState::Loading => "Loading...".to_string(),
        LookupState::Loaded(view) => render_view(view, strip_len, now),
        LookupState::Failed(failure) => failure.message.to_string(),
    }
}

pub fn render_view(view: &WeatherView, strip_len: usize, now: NaiveDateTime) -> String {
    let unit = view.unit;
    let observed = view.observed_at.unwrap_or(now);

    let mut out = format!(
        "📍 {}\n{}  {}{}  {}\n{}\nWind speed: {} {}\n",
        view.city,
        view.condition.emoji,
        view.temperature,
        unit.temperature_symbol(),
        view.condition.description,
        observed.format(TIME_FORMAT),
        view.wind_speed,
        unit.wind_speed_unit(),
    );

    let strip = view.upcoming(strip_len);
    if !strip.is_empty() {
        let cells: Vec<String> = strip
            .iter()
            .map(|p| format!("{} {}°", p.time, p.temperature))
            .collect();
        out.push_str("\nForecast\n");
        out.push_str(&cells.join("  |  "));
        out.push('\n');
    }

    out
}
