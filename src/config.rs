//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

/// Bounds for the sampler period in milliseconds
const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 1000;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "brewlab")]
#[command(about = "A drift-resistant brew timer service for step-by-step coffee recipes")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Recipe JSON file (array of exported recipes)
    #[arg(short, long, default_value = "recipes.json")]
    pub recipes: PathBuf,

    /// Tick sampler period in milliseconds
    #[arg(long, default_value = "200")]
    pub tick_ms: u64,

    /// Shell command run for every step entry and finish signal
    #[arg(long)]
    pub notify_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Sampler period, clamped to a sane range
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["brewlab"]).expect("parse");
        assert_eq!(config.address(), "0.0.0.0:20560");
        assert_eq!(config.tick_period(), Duration::from_millis(200));
        assert_eq!(config.recipes, PathBuf::from("recipes.json"));
        assert!(config.notify_command.is_none());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn tick_period_is_clamped() {
        let config = Config::try_parse_from(["brewlab", "--tick-ms", "1", "-v"]).expect("parse");
        assert_eq!(config.tick_period(), Duration::from_millis(MIN_TICK_MS));
        assert_eq!(config.log_level(), "debug");

        let config = Config::try_parse_from(["brewlab", "--tick-ms", "60000"]).expect("parse");
        assert_eq!(config.tick_period(), Duration::from_millis(MAX_TICK_MS));
    }
}
