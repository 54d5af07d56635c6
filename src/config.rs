use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub relay: RelaySettings,
    #[serde(default)]
    pub extractor: ExtractorSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8787 }

#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// No timeout unless set; a hung upstream is bounded by the server only.
    pub timeout_secs: Option<u64>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

fn default_user_agent() -> String { "Mozilla/5.0 RefStatLite/1.0".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorSettings {
    /// Minimum trimmed widget text length before the widget counts as rendered
    #[serde(default = "default_min_text_len")]
    pub min_text_len: usize,
    /// Delay of the one-shot extraction after the watcher starts
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default)]
    pub selectors: SelectorSettings,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            min_text_len: default_min_text_len(),
            initial_delay_ms: default_initial_delay_ms(),
            selectors: SelectorSettings::default(),
        }
    }
}

fn default_min_text_len() -> usize { 10 }
fn default_initial_delay_ms() -> u64 { 2000 }

/// CSS selectors used to locate the widget and its fields.
///
/// Field selectors are evaluated relative to the widget element.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorSettings {
    #[serde(default = "default_widget_selector")]
    pub widget: String,
    #[serde(default = "default_home_selector")]
    pub home: String,
    #[serde(default = "default_away_selector")]
    pub away: String,
    #[serde(default = "default_score_selector")]
    pub score: String,
    #[serde(default = "default_datetime_selector")]
    pub datetime: String,
    #[serde(default = "default_arena_selector")]
    pub arena: String,
    #[serde(default = "default_official_selector")]
    pub official: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            widget: default_widget_selector(),
            home: default_home_selector(),
            away: default_away_selector(),
            score: default_score_selector(),
            datetime: default_datetime_selector(),
            arena: default_arena_selector(),
            official: default_official_selector(),
        }
    }
}

fn default_widget_selector() -> String { "#matchWidget".to_string() }
fn default_home_selector() -> String { ".team-home".to_string() }
fn default_away_selector() -> String { ".team-away".to_string() }
fn default_score_selector() -> String { ".results".to_string() }
fn default_datetime_selector() -> String { ".match-date".to_string() }
fn default_arena_selector() -> String { ".arena-name".to_string() }
fn default_official_selector() -> String { ".officials .official".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with REFSTAT_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., REFSTAT__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("REFSTAT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
