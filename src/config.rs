use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to locate home directory")]
    NoHome,
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value '{value}' for '{key}' on line {line} of the rc file: expected {expected}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Settings read from `~/.powertier/rc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rows shown right after a file loads
    pub preview_rows: usize,
    /// Rows in the hierarchy table
    pub hierarchy_rows: usize,
    /// Rows in the textual hierarchy
    pub summary_rows: usize,
    pub simulation_enabled: bool,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            hierarchy_rows: 20,
            summary_rows: 5,
            simulation_enabled: true,
            color: ColorMode::Auto,
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(".powertier").join("rc"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse `key=value` lines. Blank lines and `#` comments are skipped;
    /// unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                log::warn!("Ignoring malformed rc line {}: {}", idx + 1, line);
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let invalid = |expected: &'static str| ConfigError::InvalidValue {
                line: idx + 1,
                key: key.to_string(),
                value: value.to_string(),
                expected,
            };

            match key {
                "preview.rows" => {
                    config.preview_rows = parse_row_limit(value).ok_or_else(|| invalid("a positive number"))?
                }
                "hierarchy.rows" => {
                    config.hierarchy_rows = parse_row_limit(value).ok_or_else(|| invalid("a positive number"))?
                }
                "summary.rows" => {
                    config.summary_rows = parse_row_limit(value).ok_or_else(|| invalid("a positive number"))?
                }
                "simulation.enabled" => {
                    config.simulation_enabled = parse_bool(value).ok_or_else(|| invalid("true or false"))?
                }
                "color" => {
                    config.color = ColorMode::from_str(value).ok_or_else(|| invalid("auto, always or never"))?
                }
                _ => log::debug!("Ignoring unknown rc key '{}'", key),
            }
        }

        Ok(config)
    }
}

fn parse_row_limit(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| *n > 0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.hierarchy_rows, 20);
        assert_eq!(config.summary_rows, 5);
        assert!(config.simulation_enabled);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::parse(
            "# display\npreview.rows = 3\nhierarchy.rows=10\nsummary.rows=2\n\nsimulation.enabled=no\ncolor=never\nunknown.key=1\n",
        )
        .unwrap();
        assert_eq!(config.preview_rows, 3);
        assert_eq!(config.hierarchy_rows, 10);
        assert_eq!(config.summary_rows, 2);
        assert!(!config.simulation_enabled);
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::parse("summary.rows=0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { line: 1, .. }));

        let err = Config::parse("\ncolor=purple\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        assert!(Config::parse("simulation.enabled=maybe").is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("rc")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rc");
        fs::write(&path, "hierarchy.rows=7\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().hierarchy_rows, 7);
    }
}
