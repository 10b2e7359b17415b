use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use std::process::ExitCode;
use tracing::debug;

use cityweather_core::{Config, open_meteo_controller};

use crate::render::TerminalSurface;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city, by name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for one city and exit.
    Show {
        /// City name, e.g. "Tokyo" or "São Paulo".
        city: String,

        /// Language for place names and the timestamp layout; overrides the config file.
        #[arg(long)]
        language: Option<String>,
    },

    /// Keep prompting for cities. Esc clears the form, Ctrl-C quits.
    Interactive,

    /// Edit the service endpoints and language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Command::Show { city, language } => {
                let mut config = Config::load()?;
                if let Some(language) = language {
                    config = config.with_language(language);
                }
                show(&config, &city).await
            }
            Command::Interactive => interactive(&Config::load()?).await,
            Command::Configure => configure(),
        }
    }
}

async fn show(config: &Config, city: &str) -> Result<ExitCode> {
    let controller = open_meteo_controller(config, TerminalSurface::default())
        .context("Failed to set up the weather client")?;

    controller.submit_search(city).await;

    if controller.view().status.is_error {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn interactive(config: &Config) -> Result<ExitCode> {
    let controller = open_meteo_controller(config, TerminalSurface::default())
        .context("Failed to set up the weather client")?;

    loop {
        let current = controller.view().input;
        let answer = Text::new("City:")
            .with_initial_value(&current)
            .with_help_message("Enter to search, Esc to reset, Ctrl-C to quit")
            .prompt();

        match answer {
            Ok(text) => {
                if text != current {
                    controller.on_input_changed(&text);
                }
                controller.submit_search(&text).await;
            }
            Err(InquireError::OperationCanceled) => {
                debug!("form reset");
                controller.reset_search();
            }
            Err(InquireError::OperationInterrupted) => return Ok(ExitCode::SUCCESS),
            Err(err) => return Err(err).context("Failed to read city name"),
        }
    }
}

fn configure() -> Result<ExitCode> {
    let current = Config::load()?;

    let geocode_url = Text::new("Geocoding endpoint:")
        .with_default(&current.geocode_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    let weather_url = Text::new("Weather endpoint:")
        .with_default(&current.weather_url)
        .prompt()
        .context("Failed to read weather endpoint")?;

    let language = Text::new("Language:")
        .with_default(&current.language)
        .with_help_message("e.g. en, zh, de")
        .prompt()
        .context("Failed to read language")?;

    let config = Config { geocode_url, weather_url, language };
    config.validate()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(ExitCode::SUCCESS)
}
