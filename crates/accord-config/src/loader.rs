//! Layered configuration loading.
//!
//! Layers apply in order, later ones overriding earlier ones:
//! 1. Default values
//! 2. A TOML or JSON file (or string)
//! 3. Environment variables `PREFIX__SECTION__KEY`

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::{AccordConfig, ConfigError};

/// Configuration loader with layered approach.
///
/// # Example
///
/// ```no_run
/// use accord_config::ConfigLoader;
///
/// # fn main() -> Result<(), accord_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("accord.toml")?
///     .with_dotenv()?
///     .with_env_prefix("ACCORD")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: AccordConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AccordConfig::default(),
            env_prefix: None,
        }
    }

    /// Start from the development preset.
    ///
    /// ```
    /// use accord_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = AccordConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = AccordConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format follows the extension: `.toml` or `.json`. The file
    /// replaces the current configuration; keys it leaves out take their
    /// default values.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::missing_file(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        self.config = parse(&content, format)?;

        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in `format` (`"toml"` or `"json"`).
    ///
    /// ```
    /// use accord_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [server]
    ///     http_addr = "127.0.0.1:3000"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.server.http_addr, "127.0.0.1:3000");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, format)?;
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// With prefix `ACCORD`:
    /// - `ACCORD__SERVER__HTTP_ADDR=0.0.0.0:9000`
    /// - `ACCORD__CLIENT__BASE_URL=http://users.internal/`
    /// - `ACCORD__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load `.env` from the working directory into the process environment,
    /// if there is one.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Load a specific `.env` file into the process environment.
    ///
    /// Variables already set are not overwritten.
    pub fn with_dotenv_path<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Ok(self)
    }

    /// Apply environment overrides, validate, and return the configuration.
    pub fn load(mut self) -> Result<AccordConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Return the configuration without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> AccordConfig {
        self.config
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> =
            env::vars().filter(|(k, _)| k.starts_with(&marker)).collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let rest = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_var(key, "invalid key format"))?;

        let parts: Vec<&str> = rest.split("__").collect();
        let server = &mut self.config.server;
        let client = &mut self.config.client;
        let logging = &mut self.config.logging;

        match parts.as_slice() {
            ["SERVER", "HTTP_ADDR"] => server.http_addr = value.to_string(),
            ["SERVER", "MAX_BODY_BYTES"] => server.max_body_bytes = parse_number(key, value)?,
            ["SERVER", "REQUEST_TIMEOUT_SECS"] => {
                server.request_timeout_secs = parse_number(key, value)?;
            }
            ["SERVER", "SHUTDOWN_TIMEOUT_SECS"] => {
                server.shutdown_timeout_secs = parse_number(key, value)?;
            }

            ["CLIENT", "BASE_URL"] => client.base_url = value.to_string(),
            ["CLIENT", "TIMEOUT_SECS"] => client.timeout_secs = parse_number(key, value)?,
            ["CLIENT", "USER_AGENT"] => client.user_agent = value.to_string(),

            ["LOGGING", "ENABLED"] => logging.enabled = parse_flag(key, value)?,
            ["LOGGING", "LEVEL"] => logging.level = value.to_string(),
            ["LOGGING", "JSON_FORMAT"] => logging.json_format = parse_flag(key, value)?,
            ["LOGGING", "INCLUDE_TARGET"] => logging.include_target = parse_flag(key, value)?,
            ["LOGGING", "SPAN_EVENTS"] => logging.span_events = parse_flag(key, value)?,
            ["LOGGING", "FILE_LINE_INFO"] => logging.file_line_info = parse_flag(key, value)?,

            _ => return Err(ConfigError::env_var(key, "unknown configuration key")),
        }

        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<AccordConfig, ConfigError> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        _ => Err(ConfigError::UnsupportedFormat(format.to_string())),
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env_var(key, "expected a non-negative integer"))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).ok_or_else(|| ConfigError::env_var(key, "expected boolean"))
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, AccordConfig::default());
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"client": {"base_url": "http://users.internal/api"}}"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.client.base_url, "http://users.internal/api");
        assert_eq!(config.server, accord_server::ServerConfig::default());
    }

    #[test]
    fn test_loader_rejects_unknown_fields() {
        let toml = r#"
            [server]
            port = 8080
        "#;
        let err = ConfigLoader::new().with_string(toml, "toml").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));

        let err = ConfigLoader::new()
            .with_string(r#"{"metrics": {}}"#, "json")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_loader_unsupported_format() {
        let err = ConfigLoader::new().with_string("a: b", "yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref f) if f == "yaml"));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/accord.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/accord.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, AccordConfig::default());
    }

    #[test]
    fn test_load_validates() {
        let toml = r#"
            [server]
            max_body_bytes = 0
        "#;
        let err = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_load_unvalidated() {
        let toml = r#"
            [server]
            max_body_bytes = 0
        "#;
        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load_unvalidated();
        assert_eq!(config.server.max_body_bytes, 0);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_apply_env_var_sections() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__SERVER__HTTP_ADDR", "0.0.0.0:9000", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__SERVER__MAX_BODY_BYTES", "4096", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__CLIENT__BASE_URL", "http://users.internal/", "TEST")
            .unwrap();
        loader
            .apply_env_var("TEST__LOGGING__JSON_FORMAT", "off", "TEST")
            .unwrap();

        let config = loader.load_unvalidated();
        assert_eq!(config.server.http_addr, "0.0.0.0:9000");
        assert_eq!(config.server.max_body_bytes, 4096);
        assert_eq!(config.client.base_url, "http://users.internal/");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_apply_env_var_errors() {
        let mut loader = ConfigLoader::new();
        let err = loader
            .apply_env_var("TEST__SERVER__MAX_BODY_BYTES", "lots", "TEST")
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref var, .. } if var == "TEST__SERVER__MAX_BODY_BYTES"));

        assert!(loader
            .apply_env_var("TEST__LOGGING__ENABLED", "maybe", "TEST")
            .is_err());
        assert!(loader
            .apply_env_var("TEST__SERVER__PORT", "8080", "TEST")
            .is_err());
    }
}
