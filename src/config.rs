use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    /// The server's VAPID public key, base64url. Required only for creating
    /// subscriptions.
    pub vapid_public_key: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Optional TOML config file; flags and environment take precedence over it.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub api_base: Option<String>,
    pub vapid_public_key: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            vapid_public_key: None,
        }
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn config_file__should_parse_full_file() {
        let raw = "\
api_base = \"https://app.example\"
vapid_public_key = \"BEl62iUY\"
";

        let file: ConfigFile = toml::from_str(raw).expect("parse");
        assert_eq!(file.api_base.as_deref(), Some("https://app.example"));
        assert_eq!(file.vapid_public_key.as_deref(), Some("BEl62iUY"));
    }

    #[test]
    fn config_file__should_allow_missing_fields() {
        let file: ConfigFile = toml::from_str("").expect("parse");
        assert!(file.api_base.is_none());
        assert!(file.vapid_public_key.is_none());
    }
}
