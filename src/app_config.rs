use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Content API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Editions merged into the playable item list
    #[serde(default)]
    pub editions: EditionsConfig,

    /// Sequencing and player settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Terminal view settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Content API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    // @field: Base URL of the content API
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_api_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The three parallel editions fetched at startup
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditionsConfig {
    /// Recitation edition; carries the native text and the audio locators
    #[serde(default = "default_recitation_edition")]
    pub recitation: String,

    /// Romanized rendering
    #[serde(default = "default_transliteration_edition")]
    pub transliteration: String,

    /// Translated rendering
    #[serde(default = "default_translation_edition")]
    pub translation: String,
}

impl Default for EditionsConfig {
    fn default() -> Self {
        Self {
            recitation: default_recitation_edition(),
            transliteration: default_transliteration_edition(),
            translation: default_translation_edition(),
        }
    }
}

/// Playback sequencing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Pause before playing the next item of the same section, in milliseconds
    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,

    /// Pause before entering the next section, in milliseconds
    #[serde(default = "default_section_delay_ms")]
    pub section_delay_ms: u64,

    /// External command used to play an audio locator
    #[serde(default = "default_player_command")]
    pub player_command: String,

    /// Arguments passed to the player before the locator
    #[serde(default = "default_player_args")]
    pub player_args: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            item_delay_ms: default_item_delay_ms(),
            section_delay_ms: default_section_delay_ms(),
            player_command: default_player_command(),
            player_args: default_player_args(),
        }
    }
}

impl PlaybackConfig {
    /// Settling delay between two items of one section
    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    /// Settling delay at a section boundary
    pub fn section_delay(&self) -> Duration {
        Duration::from_millis(self.section_delay_ms)
    }
}

/// Terminal display configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Start with reduced motion (instant scrolling)
    #[serde(default)]
    pub reduced_motion: bool,

    /// Height of the scrolling item list, in terminal rows
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            viewport_rows: default_viewport_rows(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_api_endpoint() -> String {
    "https://api.alquran.cloud/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_recitation_edition() -> String {
    "ar.alafasy".to_string()
}

fn default_transliteration_edition() -> String {
    "en.transliteration".to_string()
}

fn default_translation_edition() -> String {
    "en.sahih".to_string()
}

fn default_item_delay_ms() -> u64 {
    1000
}

fn default_section_delay_ms() -> u64 {
    2000
}

fn default_player_command() -> String {
    "mpv".to_string()
}

fn default_player_args() -> Vec<String> {
    vec!["--no-video".to_string(), "--really-quiet".to_string()]
}

fn default_viewport_rows() -> usize {
    20
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the configuration, writing a default one when the file is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.api.endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.api.endpoint, e))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!("API endpoint must use http or https: {}", self.api.endpoint));
        }

        if self.api.timeout_secs == 0 {
            return Err(anyhow!("API timeout must be greater than zero"));
        }

        for (role, edition) in [
            ("recitation", &self.editions.recitation),
            ("transliteration", &self.editions.transliteration),
            ("translation", &self.editions.translation),
        ] {
            if edition.trim().is_empty() {
                return Err(anyhow!("The {} edition must not be empty", role));
            }
        }

        if self.playback.player_command.trim().is_empty() {
            return Err(anyhow!("A player command is required"));
        }

        if self.display.viewport_rows == 0 {
            return Err(anyhow!("Viewport must be at least one row high"));
        }

        Ok(())
    }
}
