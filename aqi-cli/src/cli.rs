use anyhow::{Context, anyhow, bail};
use aqi_core::{
    AlertRequest, Config, Fast2SmsClient, OpenMeteoClient, ProviderId, StationReading, WaqiClient,
};
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "aqi", version, about = "Live AQI readings and SMS alerts")]
pub struct Cli {
    /// Log request details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "waqi" or "fast2sms".
        provider: String,
    },

    /// Show live AQI readings for the configured region.
    Stations {
        /// Print readings as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show current weather at the configured point.
    Weather,

    /// Send an SMS with the AQI at the station nearest the reference point.
    Alert {
        /// Location label included in the message, e.g. "Connaught Place".
        #[arg(long)]
        location: String,

        /// Mobile number, "+91XXXXXXXXXX" or ten digits.
        #[arg(long)]
        phone: String,
    },
}

impl Cli {
    pub fn init_logging(&self) {
        let level = if self.verbose { Level::DEBUG } else { Level::INFO };
        tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Stations { json } => {
                let config = Config::load()?;
                let readings = fetch_readings(&config).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&readings)?);
                } else {
                    println!("Fetched at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                    print!("{}", render::station_table(&readings));
                    println!();
                    print!("{}", render::summary_and_histogram(&readings));
                }
                Ok(())
            }
            Command::Weather => {
                let config = Config::load()?;
                let report = OpenMeteoClient::new(&config).current_weather().await;
                println!("{report}");
                if let Some(observed_at) = report.snapshot().and_then(|s| s.observed_at) {
                    println!("Observed at {observed_at} (UTC)");
                }
                Ok(())
            }
            Command::Alert { location, phone } => {
                if location.trim().is_empty() || phone.trim().is_empty() {
                    bail!("Please enter both location and phone number.");
                }

                let config = Config::load()?;
                let readings = fetch_readings(&config).await?;

                let alert =
                    AlertRequest::prepare(&location, &phone, &readings, config.reference_point)
                        .ok_or_else(|| anyhow!("No stations with a valid AQI in the region"))?;
                let message = alert.message();

                let delivery = Fast2SmsClient::new(&config)
                    .send(&alert.phone_number, &message)
                    .await
                    .context("SMS alert was not sent")?;

                println!("{}", delivery.status);
                println!("Message Sent:\n{message}");
                Ok(())
            }
        }
    }
}

/// Primary fetch; any error stops the command before rendering.
async fn fetch_readings(config: &Config) -> anyhow::Result<Vec<StationReading>> {
    let readings = WaqiClient::new(config)
        .fetch_stations(&config.bounds)
        .await
        .context("Error fetching AQI data")?;

    let mut unnamed = 0;
    for reading in &readings {
        if let Some(cause) = reading.station_name.cause() {
            unnamed += 1;
            tracing::debug!(station = %reading.id, %cause, "using placeholder station name");
        }
    }
    if unnamed > 0 {
        tracing::warn!(unnamed, "some station names could not be resolved");
    }

    Ok(readings)
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    print!("{}", render::provider_status(&config));

    let key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(id, key.to_string());
    let path = config.save()?;
    println!("Saved {id} credentials to {}", path.display());
    Ok(())
}
