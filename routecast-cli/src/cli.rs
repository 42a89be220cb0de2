use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use routecast_core::{Config, Coordinate, ProviderId, RoutePipeline};
use std::{fs, path::Path, path::PathBuf};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "routecast", version, about = "Cities and weather along a route")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "google" or "openweather".
        provider: String,
    },

    /// List the cities a route passes through.
    Cities {
        /// JSON file with the decoded route: an array of {"lat": .., "lng": ..} points.
        route: PathBuf,

        /// Sample every N-th route point; defaults to the configured step.
        #[arg(long)]
        step: Option<usize>,
    },

    /// Show the weather in each city along a route.
    Weather {
        /// JSON file with the decoded route: an array of {"lat": .., "lng": ..} points.
        route: PathBuf,

        /// Sample every N-th route point; defaults to the configured step.
        #[arg(long)]
        step: Option<usize>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Cities { route, step } => {
                let config = Config::load_with_env()?;
                let points = load_route(&route)?;
                let pipeline = RoutePipeline::from_config(&config)?;
                let step = step.unwrap_or(pipeline.step());
                let cities = pipeline
                    .cities_along_route(&points, google_key(&config), step)
                    .await?;

                output::print_cities(&cities);
                Ok(())
            }
            Command::Weather { route, step, json } => {
                let config = Config::load_with_env()?;
                let points = load_route(&route)?;
                let pipeline = RoutePipeline::from_config(&config)?;
                let step = step.unwrap_or(pipeline.step());
                let intelligence = pipeline
                    .build_route_intelligence(&points, google_key(&config), step)
                    .await?;

                if json {
                    let text = serde_json::to_string_pretty(&intelligence)
                        .context("Failed to serialize route weather to JSON")?;
                    println!("{text}");
                } else {
                    output::print_route_weather(&intelligence);
                }
                Ok(())
            }
        }
    }
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        bail!("API key for '{id}' must not be empty");
    }

    config.upsert_provider_api_key(id, api_key);
    config.save()?;

    println!(
        "Saved {id} API key to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

fn google_key(config: &Config) -> &str {
    config.provider_api_key(ProviderId::Google).unwrap_or_default()
}

fn load_route(path: &Path) -> Result<Vec<Coordinate>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read route file: {}", path.display()))?;

    let points = parse_route(&contents)
        .with_context(|| format!("Failed to parse route file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), points = points.len(), "loaded route");
    Ok(points)
}

fn parse_route(contents: &str) -> Result<Vec<Coordinate>> {
    let points: Vec<Coordinate> = serde_json::from_str(contents)?;
    if points.is_empty() {
        bail!("route contains no points");
    }
    Ok(points)
}
