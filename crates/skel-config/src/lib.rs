//! Configuration management for skel.
//!
//! Parses `skel.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `generator.api_url`
//! - `generator.api_key`
//!
//! An empty `generator.api_key` after loading falls back to the
//! `OPENAI_API_KEY` environment variable.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override generator model.
    pub model: Option<String>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "skel.toml";

/// Environment variable read when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Upper bound for the synthetic counts in `[engine]`.
const MAX_SYNTHETIC_COUNT: usize = 50;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Synthetic shape counts.
    pub engine: EngineConfig,
    /// Remote generator configuration.
    pub generator: GeneratorConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Counts used by structure-replacing shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub table_columns: usize,
    pub table_rows: usize,
    pub list_items: usize,
    pub row_cells: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table_columns: 8,
            table_rows: 5,
            list_items: 5,
            row_cells: 8,
        }
    }
}

/// Remote code-generation service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub api_url: String,
    /// Bearer token. Empty means no key is configured; [`Config::load`]
    /// then tries [`API_KEY_ENV`].
    pub api_key: String,
    /// Chat model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token limit.
    pub max_tokens: u32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Longest accepted component, in characters.
    pub max_input_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_owned(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_owned(),
            temperature: 0.1,
            max_tokens: 2000,
            top_p: 0.95,
            timeout_secs: 30,
            max_input_chars: 15_000,
        }
    }
}

impl GeneratorConfig {
    /// API key, if one is configured.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        Some(self.api_key.as_str()).filter(|key| !key.is_empty())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`generator.api_key`").
        field: String,
        /// Error message (e.g., "${`OPENAI_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_count(value: usize, field: &str) -> Result<(), ConfigError> {
    if !(1..=MAX_SYNTHETIC_COUNT).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between 1 and {MAX_SYNTHETIC_COUNT}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `skel.toml` in current directory and parents,
    /// and falls back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.fallback_api_key(|var| std::env::var(var).ok());

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(model) = &settings.model {
            self.generator.model.clone_from(model);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    #[must_use]
    pub fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_engine()?;
        self.validate_generator()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_engine(&self) -> Result<(), ConfigError> {
        require_count(self.engine.table_columns, "engine.table_columns")?;
        require_count(self.engine.table_rows, "engine.table_rows")?;
        require_count(self.engine.list_items, "engine.list_items")?;
        require_count(self.engine.row_cells, "engine.row_cells")?;
        Ok(())
    }

    fn validate_generator(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;
        require_non_empty(&generator.api_url, "generator.api_url")?;
        require_http_url(&generator.api_url, "generator.api_url")?;
        require_non_empty(&generator.model, "generator.model")?;

        if !(0.0..=2.0).contains(&generator.temperature) {
            return Err(ConfigError::Validation(
                "generator.temperature must be between 0 and 2".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&generator.top_p) {
            return Err(ConfigError::Validation(
                "generator.top_p must be between 0 and 1".to_owned(),
            ));
        }
        if generator.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "generator.max_tokens must be greater than 0".to_owned(),
            ));
        }
        if generator.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "generator.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if generator.max_input_chars == 0 {
            return Err(ConfigError::Validation(
                "generator.max_input_chars must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Use the key from [`API_KEY_ENV`] when none is configured.
    fn fallback_api_key(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.generator.api_key.is_empty() {
            self.generator.api_key = lookup(API_KEY_ENV).unwrap_or_default();
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.generator.api_url = expand::expand_env(&self.generator.api_url, "generator.api_url")?;
        self.generator.api_key = expand::expand_env(&self.generator.api_key, "generator.api_key")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.generator.model, "gpt-3.5-turbo");
        assert_eq!(config.generator.max_input_chars, 15_000);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.port, 7878);
        assert_eq!(config.engine.table_rows, 5);
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml = r#"
[server]
port = 9000

[engine]
table_columns = 4

[generator]
model = "gpt-4o-mini"
temperature = 0.3
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.engine.table_columns, 4);
        assert_eq!(config.engine.table_rows, 5);
        assert_eq!(config.generator.model, "gpt-4o-mini");
        assert!((config.generator.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.generator.max_tokens, 2000);
    }

    #[test]
    fn test_api_key_accessor() {
        let mut generator = GeneratorConfig {
            api_key: String::new(),
            ..GeneratorConfig::default()
        };
        assert_eq!(generator.api_key(), None);

        generator.api_key = "sk-test".to_owned();
        assert_eq!(generator.api_key(), Some("sk-test"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(3000),
            model: Some("gpt-4o".to_owned()),
        });

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.generator.model, "gpt-4o");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.port, 7878);
        assert_eq!(config.generator.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[generator]\napi_key = \"literal-key\"\n[engine]\nlist_items = 3\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.generator.api_key(), Some("literal-key"));
        assert_eq!(config.engine.list_items, 3);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_default_has_no_api_key() {
        assert_eq!(GeneratorConfig::default().api_key(), None);
        assert_eq!(Config::default().generator.api_key(), None);
    }

    #[test]
    fn test_fallback_api_key_when_empty() {
        let mut config = Config::default();
        config.fallback_api_key(|var| (var == API_KEY_ENV).then(|| "sk-env".to_owned()));

        assert_eq!(config.generator.api_key(), Some("sk-env"));
    }

    #[test]
    fn test_fallback_api_key_keeps_configured_key() {
        let mut config = Config::default();
        config.generator.api_key = "sk-file".to_owned();
        config.fallback_api_key(|_| Some("sk-env".to_owned()));

        assert_eq!(config.generator.api_key(), Some("sk-file"));
    }

    #[test]
    fn test_fallback_api_key_unset() {
        let mut config = Config::default();
        config.fallback_api_key(|_| None);

        assert_eq!(config.generator.api_key(), None);
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let port = CliSettings {
            port: Some(0),
            ..CliSettings::default()
        };
        let err = Config::load(Some(&path), Some(&port)).unwrap_err();
        assert!(err.to_string().contains("server.port"));

        let host = CliSettings {
            host: Some(String::new()),
            ..CliSettings::default()
        };
        let err = Config::load(Some(&path), Some(&host)).unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[engine]\ntable_rows = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(err.to_string().contains("engine.table_rows"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("components");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config_from(&nested).unwrap();

        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_expand_env_vars_generator() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SKEL_TEST_CONFIG_KEY", "sk-from-env");
            std::env::set_var("SKEL_TEST_CONFIG_HOST", "llm.example.com");
        }
        let toml = r#"
[generator]
api_url = "https://${SKEL_TEST_CONFIG_HOST}/v1"
api_key = "${SKEL_TEST_CONFIG_KEY}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.generator.api_url, "https://llm.example.com/v1");
        assert_eq!(config.generator.api_key(), Some("sk-from-env"));

        unsafe {
            std::env::remove_var("SKEL_TEST_CONFIG_KEY");
            std::env::remove_var("SKEL_TEST_CONFIG_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SKEL_TEST_CONFIG_MISSING");
        }
        let toml = r#"
[generator]
api_key = "${SKEL_TEST_CONFIG_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("generator.api_key"));
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_server() {
        let mut config = Config::default();
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);

        let mut config = Config::default();
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_engine_bounds() {
        let mut config = Config::default();
        config.engine.list_items = 51;
        assert_validation_error(&config, &["engine.list_items", "50"]);

        let mut config = Config::default();
        config.engine.row_cells = 0;
        assert_validation_error(&config, &["engine.row_cells"]);
    }

    #[test]
    fn test_validate_generator() {
        let mut config = Config::default();
        config.generator.api_url = "ftp://models.example.com".to_owned();
        assert_validation_error(&config, &["generator.api_url", "http"]);

        let mut config = Config::default();
        config.generator.temperature = 2.5;
        assert_validation_error(&config, &["generator.temperature"]);

        let mut config = Config::default();
        config.generator.max_input_chars = 0;
        assert_validation_error(&config, &["generator.max_input_chars"]);

        let mut config = Config::default();
        config.generator.model = String::new();
        assert_validation_error(&config, &["generator.model", "empty"]);
    }
}
