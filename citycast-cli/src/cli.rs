use anyhow::Context;
use chrono::Local;
use citycast_core::{
    Config, Lookup, LookupState, SettingsStore, UnitPreference, WeatherClient, WeatherQuery,
};
use clap::{ArgGroup, Parser, Subcommand};
use inquire::{Confirm, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for the configured default city.
    Home {
        /// Print the weather view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up a city. Prompts repeatedly when no city is given.
    Search {
        /// City name.
        city: Option<String>,

        /// Print the weather view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or change the unit preference.
    #[command(group(ArgGroup::new("unit").args(["metric", "imperial"])))]
    Settings {
        /// Use metric units (°C, km/h).
        #[arg(long)]
        metric: bool,

        /// Use imperial units (°F, mph).
        #[arg(long)]
        imperial: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Home { json } => {
                let settings = SettingsStore::open()?;
                let screen = Screen::new(&config, &settings)?;
                screen.show(&config.default_city, json).await?;
            }
            Command::Search { city: Some(city), json } => {
                let settings = SettingsStore::open()?;
                let screen = Screen::new(&config, &settings)?;
                screen.show(&city, json).await?;
            }
            Command::Search { city: None, json } => {
                let settings = SettingsStore::open()?;
                let screen = Screen::new(&config, &settings)?;
                screen.interactive(json).await?;
            }
            Command::Settings { metric, imperial } => {
                let mut settings = SettingsStore::open()?;
                let requested = if metric {
                    Some(UnitPreference::Metric)
                } else if imperial {
                    Some(UnitPreference::Imperial)
                } else {
                    None
                };
                settings_screen(&mut settings, requested)?;
            }
        }

        Ok(())
    }
}

/// A weather-showing screen. The unit preference is read once when the
/// screen is built.
struct Screen {
    client: WeatherClient,
    unit: UnitPreference,
    strip_len: usize,
}

impl Screen {
    fn new(config: &Config, settings: &SettingsStore) -> anyhow::Result<Self> {
        let client = WeatherClient::new(&config.api).context("Failed to create weather client")?;

        Ok(Self {
            client,
            unit: settings.unit(),
            strip_len: config.forecast_hours,
        })
    }

    async fn show(&self, city: &str, json: bool) -> anyhow::Result<()> {
        let mut lookup = Lookup::new();
        self.search(&mut lookup, city).await;
        self.print(&lookup, json)
    }

    async fn interactive(&self, json: bool) -> anyhow::Result<()> {
        let mut lookup = Lookup::new();
        println!("{}", render::render_state(lookup.state(), self.strip_len, now()));

        loop {
            let city = Text::new("City:")
                .with_placeholder("Enter city name")
                .with_help_message("Leave empty to quit")
                .prompt()
                .context("Failed to read city name")?;

            if city.trim().is_empty() {
                return Ok(());
            }

            self.search(&mut lookup, &city).await;
            self.print(&lookup, json)?;
            println!();
        }
    }

    async fn search(&self, lookup: &mut Lookup, city: &str) {
        let ticket = lookup.begin();
        let result = self.client.lookup(&WeatherQuery::new(city, self.unit)).await;
        lookup.finish(ticket, result);
    }

    fn print(&self, lookup: &Lookup, json: bool) -> anyhow::Result<()> {
        match lookup.state() {
            LookupState::Loaded(view) if json => {
                let text = serde_json::to_string_pretty(view)
                    .context("Failed to serialize weather view to JSON")?;
                println!("{text}");
            }
            LookupState::Failed(failure) => {
                tracing::debug!(detail = %failure.detail, "lookup failed");
                eprintln!("{}", failure.message);
            }
            state => println!(
                "{}",
                render::render_state(state, self.strip_len, now()).trim_end()
            ),
        }
        Ok(())
    }
}

fn settings_screen(
    settings: &mut SettingsStore,
    requested: Option<UnitPreference>,
) -> anyhow::Result<()> {
    let current = settings.unit();

    let unit = match requested {
        Some(unit) => unit,
        None => {
            let metric = Confirm::new("Use metric units (°C)?")
                .with_default(current == UnitPreference::Metric)
                .prompt()
                .context("Failed to read unit preference")?;
            if metric {
                UnitPreference::Metric
            } else {
                UnitPreference::Imperial
            }
        }
    };

    if unit == current {
        println!("Units: {} (unchanged)", unit.label());
        return Ok(());
    }

    settings.set_unit(unit)?;
    tracing::debug!(path = %settings.path().display(), "settings written");
    println!("Units changed: now using {}", unit.label());
    Ok(())
}

fn now() -> chrono::NaiveDateTime {
    Local::now().naive_local()
}
