//! CLI argument definitions for the Solace terminal client.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::{Path, PathBuf};

use clap::Parser;

use solace_core::config::{InjectedFailure, SolaceConfig};
use solace_core::types::ViewportMode;

/// Solace: a supportive conversation client for the terminal.
#[derive(Parser, Debug)]
#[command(name = "solace", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Simulated reply latency in milliseconds.
    #[arg(long = "latency-ms")]
    pub latency_ms: Option<u64>,

    /// Make the simulated backend fail.
    #[arg(long = "inject-failure", value_enum, ignore_case = true)]
    pub inject_failure: Option<InjectedFailure>,

    /// Start in the narrow layout, with the navigation drawer.
    #[arg(long = "narrow")]
    pub narrow: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long = "write-config")]
    pub write_config: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SOLACE_CONFIG env var > ~/.solace/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SOLACE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config: &SolaceConfig) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config.general.log_level.clone())
    }

    /// Configuration at `path` (defaults if unreadable) with flag
    /// overrides applied.
    pub fn effective_config(&self, path: &Path) -> SolaceConfig {
        let mut config = SolaceConfig::load_or_default(path);
        self.apply_overrides(&mut config);
        config
    }

    /// Write flag overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut SolaceConfig) {
        if let Some(latency) = self.latency_ms {
            config.chat.backend.latency_ms = latency;
        }
        if let Some(failure) = self.inject_failure {
            config.chat.backend.inject_failure = failure;
        }
        if self.narrow {
            config.navigation.viewport = ViewportMode::Narrow;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".solace").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".solace").join("config.toml");
    }
    PathBuf::from("config.toml")
}
