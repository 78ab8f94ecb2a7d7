//! Configuration management for Reconboard

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::client::DEFAULT_API_URL;
use crate::error::{ConfigError, Result};

/// Timeout bounds (minutes) accepted by the new-scan form
pub const MIN_TIMEOUT_MINUTES: u32 = 5;
pub const MAX_TIMEOUT_MINUTES: u32 = 120;

/// Check a timeout against the form bounds; the error is shown inline by prompts
pub fn validate_timeout(minutes: &u32) -> std::result::Result<(), String> {
    if (MIN_TIMEOUT_MINUTES..=MAX_TIMEOUT_MINUTES).contains(minutes) {
        Ok(())
    } else {
        Err(format!(
            "Timeout must be between {} and {} minutes",
            MIN_TIMEOUT_MINUTES, MAX_TIMEOUT_MINUTES
        ))
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scan service base URL (e.g. `http://127.0.0.1:8080/api`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default scan timeout in minutes
    #[serde(default = "default_timeout")]
    pub default_timeout: u32,

    /// Whether new scans are passive unless told otherwise
    #[serde(default = "default_passive")]
    pub passive: bool,
}

fn default_timeout() -> u32 {
    60
}

fn default_passive() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            default_timeout: default_timeout(),
            passive: default_passive(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".reconboard").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from the override or default path; a missing file yields defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_from(Self::resolve_path(path)?) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save configuration to the override or default path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https:// (got '{}')",
                url
            ))
            .into());
        }

        let timeout = self.preferences.default_timeout;
        validate_timeout(&timeout).map_err(|msg| {
            ConfigError::Invalid(format!("default_timeout: {} (got {})", msg, timeout))
        })?;

        Ok(())
    }

    /// Resolve the API URL: explicit override, then config file, then default
    pub fn api_url(&self, override_url: Option<&str>) -> String {
        override_url
            .or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.preferences.default_timeout, 60);
        assert!(config.preferences.passive);
    }

    #[test]
    fn test_api_url_precedence() {
        let mut config = Config::default();
        assert_eq!(config.api_url(None), DEFAULT_API_URL);

        config.api_url = Some("http://scanner:9000/api".to_string());
        assert_eq!(config.api_url(None), "http://scanner:9000/api");
        assert_eq!(
            config.api_url(Some("http://override/api")),
            "http://override/api"
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let config = Config {
            api_url: Some("http://10.0.0.5:8080/api".to_string()),
            preferences: Preferences {
                format: Some("json".to_string()),
                default_timeout: 30,
                passive: false,
            },
        };
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_preferences_use_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "api_url: http://localhost:8080/api\n").unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.preferences, Preferences::default());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = tempdir().unwrap();
        let err = Config::load_from(temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::NotFound)
        ));
    }

    #[test]
    fn test_load_or_default_tolerates_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.yaml");
        let config = Config::load_or_default(path.to_str()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = Config {
            api_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        let mut config = Config::default();
        config.preferences.default_timeout = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        assert!(validate_timeout(&MIN_TIMEOUT_MINUTES).is_ok());
        assert!(validate_timeout(&MAX_TIMEOUT_MINUTES).is_ok());
        assert!(validate_timeout(&(MIN_TIMEOUT_MINUTES - 1)).is_err());

        let err = validate_timeout(&(MAX_TIMEOUT_MINUTES + 1)).unwrap_err();
        assert_eq!(err, "Timeout must be between 5 and 120 minutes");
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        Config::default().save_to(path.clone()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
