//! bdaycal configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_TITLE_SUFFIX};
use crate::error::{BdayCalError, BdayCalResult};

fn default_title_suffix() -> String {
    DEFAULT_TITLE_SUFFIX.to_string()
}

/// Optional configuration at ~/.config/bdaycal/config.toml
///
/// Command line flags take precedence over anything set here.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Text appended to each contact name in the event title
    #[serde(default = "default_title_suffix")]
    pub title_suffix: String,

    /// Written as the calendar's display name
    pub calendar_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title_suffix: default_title_suffix(),
            calendar_name: None,
        }
    }
}

impl Config {
    /// ~/.config/bdaycal/config.toml, or `None` when the platform has no
    /// config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load the config from its default location, falling back to defaults
    /// when there is no config directory or the file does not exist.
    pub fn load() -> BdayCalResult<Self> {
        Self::load_optional(Self::config_path().as_deref())
    }

    fn load_optional(path: Option<&Path>) -> BdayCalResult<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from(path),
            _ => Ok(Config::default()),
        }
    }

    /// Load the config from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> BdayCalResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BdayCalError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        Self::parse(&content)
            .map_err(|e| BdayCalError::Config(format!("Invalid {}: {e}", path.display())))
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().title_suffix, "Geburtstag");
    }

    #[test]
    fn test_parse_all_fields() {
        let config = Config::parse(
            "title_suffix = \"Birthday\"\ncalendar_name = \"Contacts' birthdays\"\n",
        )
        .unwrap();

        assert_eq!(config.title_suffix, "Birthday");
        assert_eq!(config.calendar_name.as_deref(), Some("Contacts' birthdays"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::parse("title = \"Birthday\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title_suffix = \"Birthday\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.title_suffix, "Birthday");
        assert_eq!(config.calendar_name, None);
    }

    #[test]
    fn test_load_without_config_dir_uses_defaults() {
        assert_eq!(Config::load_optional(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_missing_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert_eq!(Config::load_optional(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_load_existing_default_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "calendar_name = \"Birthdays\"").unwrap();

        let config = Config::load_optional(Some(file.path())).unwrap();

        assert_eq!(config.calendar_name.as_deref(), Some("Birthdays"));
        assert_eq!(config.title_suffix, "Geburtstag");
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();

        assert!(matches!(err, BdayCalError::Config(_)), "{err:?}");
    }

    #[test]
    fn test_load_from_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title_suffix = ").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();

        assert!(matches!(err, BdayCalError::Config(_)), "{err:?}");
    }
}
