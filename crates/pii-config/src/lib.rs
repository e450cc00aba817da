use anyhow::Context;
use pii_core::{OverlapPolicy, RedactionLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the redaction service and CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub recognizer: RecognizerConfig,

    #[serde(default)]
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on one redaction request, recognizer call included
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Which entity source backs the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerKind {
    /// Built-in regex and gazetteer recognizer
    #[default]
    Rules,
    /// External NER service over HTTP
    Http,
    /// No entity source; identifier patterns only
    None,
}

/// Unit of the offsets an external recognizer reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    #[default]
    Chars,
    Bytes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    #[serde(default)]
    pub kind: RecognizerKind,

    /// Endpoint for the http recognizer
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_recognizer_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub offsets: OffsetUnit,

    #[serde(default)]
    pub gazetteer: GazetteerConfig,
}

/// Known names for the rules recognizer
///
/// The rules recognizer finds persons, locations and organizations only by
/// these lists. The default is empty, so names go undetected until entries
/// are added or an NER service is configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerConfig {
    #[serde(default)]
    pub persons: Vec<String>,

    #[serde(default)]
    pub locations: Vec<String>,

    #[serde(default)]
    pub organizations: Vec<String>,
}

impl GazetteerConfig {
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.locations.is_empty() && self.organizations.is_empty()
    }
}

impl RecognizerConfig {
    /// Whether person, location and organization names can be found at all
    pub fn detects_names(&self) -> bool {
        match self.kind {
            RecognizerKind::Rules => !self.gazetteer.is_empty(),
            RecognizerKind::Http => true,
            RecognizerKind::None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_level")]
    pub default_level: u8,

    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            kind: RecognizerKind::default(),
            url: None,
            timeout_ms: default_recognizer_timeout_ms(),
            offsets: OffsetUnit::default(),
            gazetteer: GazetteerConfig::default(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_recognizer_timeout_ms() -> u64 {
    10_000
}

fn default_level() -> u8 {
    RedactionLevel::default().as_u8()
}

impl RedactionConfig {
    /// Configured default level, validated
    pub fn level(&self) -> pii_core::Result<RedactionLevel> {
        RedactionLevel::try_from(i64::from(self.default_level))
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load config from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would only fail later, at request time
    pub fn validate(&self) -> anyhow::Result<()> {
        self.redaction.level()?;
        if self.recognizer.kind == RecognizerKind::Http && self.recognizer.url.is_none() {
            anyhow::bail!("recognizer.url is required when recognizer.kind = \"http\"");
        }
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "pii-redact", "pii-redact") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.pii-redact/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.recognizer.kind, RecognizerKind::Rules);
        assert_eq!(config.redaction.level().unwrap(), RedactionLevel::Strict);
        assert_eq!(config.redaction.overlap_policy, OverlapPolicy::EarliestStart);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.redaction.default_level, 3);
    }

    #[test]
    fn test_partial_file() {
        let parsed: Config = toml::from_str(
            r#"
            [recognizer]
            kind = "http"
            url = "http://localhost:9000/ner"
            offsets = "bytes"

            [redaction]
            overlap_policy = "prefer_patterns"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.recognizer.kind, RecognizerKind::Http);
        assert_eq!(parsed.recognizer.offsets, OffsetUnit::Bytes);
        assert_eq!(parsed.recognizer.timeout_ms, 10_000);
        assert_eq!(parsed.redaction.overlap_policy, OverlapPolicy::PreferPatterns);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_level() {
        let mut config = Config::default();
        config.redaction.default_level = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_http_url() {
        let mut config = Config::default();
        config.recognizer.kind = RecognizerKind::Http;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.recognizer.gazetteer.persons = vec!["Rahul".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.recognizer.gazetteer.persons, vec!["Rahul".to_string()]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_default_recognizer_does_not_detect_names() {
        let mut config = RecognizerConfig::default();
        assert!(config.gazetteer.is_empty());
        assert!(!config.detects_names());

        config.gazetteer.persons.push("Rahul".to_string());
        assert!(config.detects_names());

        config.kind = RecognizerKind::None;
        assert!(!config.detects_names());
    }
}
