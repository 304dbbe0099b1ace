use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ViewState, WeatherApiClient, WeatherFetcher, config::API_KEY_ENV};
use inquire::{Password, PasswordDisplayMode, Text};

use crate::{app, logging, report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and an optional default city.
    Configure,

    /// Print current weather and the forecast once.
    Show {
        /// City to look up; defaults to the configured city.
        city: Option<String>,

        /// Print the fetched report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive weather screen.
    Tui {
        /// City to load first; defaults to the configured city.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => {
                logging::init_stderr();
                configure()
            }
            Command::Show { city, json } => {
                logging::init_stderr();
                show(city, json).await
            }
            Command::Tui { city } => {
                logging::init_file(&Config::log_file_path()?)?;
                let config = Config::load()?;
                let client = WeatherApiClient::new(config.client_config()?);
                let city = city.unwrap_or_else(|| config.default_city().to_string());
                app::run(client, ViewState::new(city))
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(&format!("Stored in the config file; {API_KEY_ENV} overrides it"))
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    config.default_city = Some(default_city.trim().to_string());

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = WeatherApiClient::new(config.client_config()?);
    let city = city.unwrap_or_else(|| config.default_city().to_string());

    let report = client
        .fetch(&city)
        .await
        .with_context(|| format!("Failed to fetch weather for '{city}'"))?;

    if json {
        let out =
            serde_json::to_string_pretty(&report).context("Failed to serialize weather report")?;
        println!("{out}");
    } else {
        print!("{}", report::format_report(&report));
    }

    Ok(())
}
