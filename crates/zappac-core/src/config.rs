//! Input line configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the TOML mapping, and
//! `#[serde(default)]` fills any missing field from `Default::default()`, so
//! a config file only needs the keys a user actually wants to change.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zappac_syntax::{NumeralLocale, SyntaxError};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What the input line shows
    pub display: DisplayConfig,

    /// How numerals are grouped
    pub numerals: NumeralConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("zappac").join("config.toml"))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolves the numeral locale preset and applies any overrides.
    pub fn numeral_locale(&self) -> Result<NumeralLocale, ConfigError> {
        let numerals = &self.numerals;
        let mut locale = NumeralLocale::from_tag(&numerals.locale)?;

        if let Some(separator) = numerals.grouping_separator {
            locale.grouping_separator = separator;
        }
        if let Some(separator) = numerals.decimal_separator {
            locale.decimal_separator = separator;
        }
        if let Some(digits) = numerals.min_grouping_digits {
            locale.min_grouping_digits = digits;
        }

        if locale.grouping_separator.is_ascii_digit()
            || locale.grouping_separator == locale.decimal_separator
        {
            return Err(ConfigError::Separator(locale.grouping_separator));
        }

        Ok(locale)
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Group digits of numerals (`1234567` shown as `1,234,567`)
    pub format_numbers: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format_numbers: true,
        }
    }
}

/// Numeral grouping configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumeralConfig {
    /// Locale tag, e.g. `en-US` or `de-DE`
    pub locale: String,

    /// Overrides the locale's grouping separator
    pub grouping_separator: Option<char>,

    /// Overrides the locale's decimal separator
    pub decimal_separator: Option<char>,

    /// Overrides how many leading digits are needed before grouping applies
    pub min_grouping_digits: Option<usize>,
}

impl Default for NumeralConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            grouping_separator: None,
            decimal_separator: None,
            min_grouping_digits: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Locale error: {0}")]
    Locale(#[from] SyntaxError),

    #[error("Invalid grouping separator: {0:?}")]
    Separator(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.display.format_numbers);
        assert_eq!(config.numerals.locale, "en-US");
        assert_eq!(config.numeral_locale().unwrap(), NumeralLocale::EN_US);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[numerals]\nlocale = \"de-DE\"\n").unwrap();
        assert!(config.display.format_numbers);
        assert_eq!(config.numeral_locale().unwrap(), NumeralLocale::DE_DE);
    }

    #[test]
    fn test_locale_overrides() {
        let config: Config = toml::from_str(
            "[numerals]\nlocale = \"en-US\"\ngrouping_separator = \"'\"\nmin_grouping_digits = 2\n",
        )
        .unwrap();
        let locale = config.numeral_locale().unwrap();
        assert_eq!(locale.grouping_separator, '\'');
        assert_eq!(locale.decimal_separator, '.');
        assert_eq!(locale.min_grouping_digits, 2);
    }

    #[test]
    fn test_invalid_locale_settings() {
        let mut config = Config::default();
        config.numerals.locale = "xx".to_string();
        assert!(matches!(config.numeral_locale(), Err(ConfigError::Locale(_))));

        let mut config = Config::default();
        config.numerals.grouping_separator = Some('.');
        assert!(matches!(config.numeral_locale(), Err(ConfigError::Separator('.'))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.format_numbers = false;
        config.numerals.locale = "fr-FR".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
