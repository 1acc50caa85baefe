use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::game::Difficulty;

/// Deepest search accepted from configuration.
pub const MAX_SEARCH_DEPTH: usize = 12;

/// Game service settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind: String,
    /// Append-only journal of played moves. Journaling is off when unset.
    pub move_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:8000".to_string(),
            move_log: Some(PathBuf::from("moves.log")),
        }
    }
}

/// Terminal client settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Collection endpoint of the game service.
    pub base_url: String,
    /// Pause before each automated move in computer-vs-computer games.
    pub computer_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Where the client writes its log while the terminal UI is active.
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://127.0.0.1:8000/api/algorithms/".to_string(),
            computer_delay_ms: 1000,
            request_timeout_secs: 60,
            log_file: PathBuf::from("connect-four.log"),
        }
    }
}

impl ClientConfig {
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Search depth per difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub easy_depth: usize,
    pub medium_depth: usize,
    pub expert_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            easy_depth: 1,
            medium_depth: 4,
            expert_depth: 7,
        }
    }
}

impl SearchConfig {
    pub fn depth(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy_depth,
            Difficulty::Medium => self.medium_depth,
            Difficulty::Expert => self.expert_depth,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.bind must not be empty".into(),
            ));
        }
        if self.client.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "client.base_url must not be empty".into(),
            ));
        }
        if !self.client.base_url.starts_with("http://")
            && !self.client.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "client.base_url must be an http(s) URL".into(),
            ));
        }
        if self.client.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "client.request_timeout_secs must be > 0".into(),
            ));
        }

        for difficulty in Difficulty::ALL {
            let depth = self.search.depth(difficulty);
            if depth == 0 || depth > MAX_SEARCH_DEPTH {
                return Err(ConfigError::Validation(format!(
                    "search.{difficulty}_depth must be in [1, {MAX_SEARCH_DEPTH}]"
                )));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_default_depths() {
        let search = SearchConfig::default();
        assert_eq!(search.depth(Difficulty::Easy), 1);
        assert_eq!(search.depth(Difficulty::Medium), 4);
        assert_eq!(search.depth(Difficulty::Expert), 7);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
expert_depth = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.expert_depth, 9);
        // Other fields should be defaults
        assert_eq!(config.search.medium_depth, 4);
        assert_eq!(config.client.computer_delay_ms, 1000);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.easy_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_depth() {
        let mut config = AppConfig::default();
        config.search.expert_depth = MAX_SEARCH_DEPTH + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("search.expert_depth"));
    }

    #[test]
    fn test_validation_rejects_non_http_base_url() {
        let mut config = AppConfig::default();
        config.client.base_url = "ftp://example.com/".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.client.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[client]
computer_delay_ms = 250

[server]
move_log = "journal.txt"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.client.computer_delay(), Duration::from_millis(250));
        assert_eq!(config.server.move_log, Some(PathBuf::from("journal.txt")));
        // Others are defaults
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\nmedium_depth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
