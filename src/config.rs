//! Command-line configuration

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_ORIGIN};
use crate::network::SettingsSource;

/// Terminal explorer for self-describing HTTP APIs
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "apidocs", version, about, long_about = None)]
pub struct Config {
    /// Origin the settings document and endpoint paths are resolved against
    #[arg(long, env = "APIDOCS_ORIGIN", default_value = DEFAULT_ORIGIN, value_name = "URL")]
    pub origin: String,

    /// Read settings from a local JSON file instead of `{origin}/settings`
    #[arg(long, env = "APIDOCS_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log file; the terminal itself is owned by the UI
    #[arg(long, default_value = DEFAULT_LOG_FILE, value_name = "PATH")]
    pub log_file: PathBuf,
}

impl Config {
    /// Origin without a trailing slash
    pub fn origin(&self) -> &str {
        self.origin.trim_end_matches('/')
    }

    pub fn settings_source(&self) -> SettingsSource {
        match &self.settings {
            Some(path) => SettingsSource::File(path.clone()),
            None => SettingsSource::Remote {
                origin: self.origin().to_string(),
            },
        }
    }

    /// Directory and file name for the log appender
    pub fn log_location(&self) -> (&Path, &std::ffi::OsStr) {
        let dir = self
            .log_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file = self
            .log_file
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));
        (dir, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["apidocs"]).unwrap();
        assert_eq!(config.origin(), DEFAULT_ORIGIN);
        assert_eq!(
            config.settings_source(),
            SettingsSource::Remote {
                origin: DEFAULT_ORIGIN.to_string()
            }
        );
        let (dir, file) = config.log_location();
        assert_eq!(dir, Path::new("."));
        assert_eq!(file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_settings_file_and_origin() {
        let config = Config::try_parse_from([
            "apidocs",
            "--origin",
            "https://api.example.com/",
            "--settings",
            "fixtures/settings.json",
            "--log-file",
            "/tmp/logs/explorer.log",
        ])
        .unwrap();
        assert_eq!(config.origin(), "https://api.example.com");
        assert_eq!(
            config.settings_source(),
            SettingsSource::File(PathBuf::from("fixtures/settings.json"))
        );
        let (dir, file) = config.log_location();
        assert_eq!(dir, Path::new("/tmp/logs"));
        assert_eq!(file, "explorer.log");
    }
}
