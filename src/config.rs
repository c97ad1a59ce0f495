//! Configuration for the habit tracker client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/habitui/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the habit-tracker backend
    pub api_url: String,

    /// Theme name: "Dark", "Light", "Nord"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8080".to_string(),
            theme: "Dark".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration ([logging] section)
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter applied to habitui's own targets
    pub level: String,
    /// Whether to also write logs to rotating files
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file name prefix
    pub file_prefix: String,
    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "habitui.log".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    /// Parse a config value; unknown values fall back to Daily.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => LogRotation::Hourly,
            "never" => LogRotation::Never,
            _ => LogRotation::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    theme: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

/// [logging] section of the config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
    file_rotation: Option<String>,
}

impl LoggingConfig {
    fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();
        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.map(PathBuf::from).unwrap_or(defaults.file_dir),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
            file_rotation: file
                .file_rotation
                .as_deref()
                .map(LogRotation::parse)
                .unwrap_or(defaults.file_rotation),
        }
    }
}

impl Config {
    /// Get the config file path: ~/.config/habitui/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("habitui").join("config.toml"))
    }

    /// Create the config file with defaults if it doesn't exist.
    /// Called during startup to help users discover configuration options.
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load the file config if it exists.
    ///
    /// A config file that exists but cannot be parsed is a fatal error:
    /// failing fast beats silently running with defaults while the user
    /// debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to parse config file {}", path.display());
                    eprintln!("  {e}");
                    eprintln!("  To reset, delete the file and restart habitui.");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("Cannot read config file {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let defaults = Self::default();

        let api_url = std::env::var("HABITUI_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        let theme = std::env::var("HABITUI_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            theme,
            logging,
        }
    }

    /// Render the config as a commented TOML template. Single source of
    /// truth for `ensure_config_exists` and `config --reset`.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# habitui configuration
# Values here are overridden by HABITUI_API_URL / HABITUI_THEME env vars.

# Base URL of the habit-tracker backend
api_url = "{api_url}"

# Theme: "Dark", "Light", "Nord"
theme = "{theme}"

[logging]
# Level for habitui's own log targets (RUST_LOG overrides everything)
level = "{level}"
# Also write logs to rotating files
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
# Rotation: "hourly", "daily", "never"
file_rotation = "{file_rotation}"
"#,
            api_url = self.api_url,
            theme = self.theme,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
            file_rotation = self.logging.file_rotation.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_parses_partial_toml() {
        let file: FileConfig = toml::from_str(
            r#"
            api_url = "http://habits.example:9000"

            [logging]
            level = "debug"
            file_enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(file.api_url.as_deref(), Some("http://habits.example:9000"));
        assert!(file.theme.is_none());

        let logging = LoggingConfig::from_file(file.logging);
        assert_eq!(logging.level, "debug");
        assert!(logging.file_enabled);
        // Unspecified values keep their defaults
        assert_eq!(logging.file_prefix, "habitui.log");
        assert_eq!(logging.file_rotation, LogRotation::Daily);
    }

    #[test]
    fn rotation_parse_falls_back_to_daily() {
        assert_eq!(LogRotation::parse("hourly"), LogRotation::Hourly);
        assert_eq!(LogRotation::parse("NEVER"), LogRotation::Never);
        assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    }

    #[test]
    fn template_round_trips_through_toml() {
        let config = Config::default();
        let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(file.api_url.as_deref(), Some(config.api_url.as_str()));
        assert_eq!(file.theme.as_deref(), Some(config.theme.as_str()));
        let logging = LoggingConfig::from_file(file.logging);
        assert_eq!(logging.level, config.logging.level);
        assert_eq!(logging.file_rotation, config.logging.file_rotation);
    }
}
