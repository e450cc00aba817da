pub mod http;
pub mod rules;
pub mod source;

pub use http::HttpEntitySource;
pub use rules::RuleEntitySource;
pub use source::{EntitySource, NoEntitySource, StaticEntitySource};

use anyhow::Context;
use pii_config::{RecognizerConfig, RecognizerKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Create the entity source described by the config
pub fn build_source(config: &RecognizerConfig) -> anyhow::Result<Arc<dyn EntitySource>> {
    if !config.detects_names() {
        warn!(
            recognizer = ?config.kind,
            "No name source configured: persons, locations and organizations will not be redacted"
        );
    }

    match config.kind {
        RecognizerKind::Rules => Ok(Arc::new(RuleEntitySource::new(&config.gazetteer)?)),
        RecognizerKind::Http => {
            let url = config
                .url
                .as_deref()
                .context("recognizer.url is required for the http recognizer")?;
            Ok(Arc::new(HttpEntitySource::new(
                url,
                Duration::from_millis(config.timeout_ms),
                config.offsets,
            )?))
        }
        RecognizerKind::None => Ok(Arc::new(NoEntitySource)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_source() {
        let source = build_source(&RecognizerConfig::default()).unwrap();
        assert_eq!(source.name(), "rules");
    }

    #[test]
    fn test_build_http_requires_url() {
        let config = RecognizerConfig {
            kind: RecognizerKind::Http,
            ..Default::default()
        };
        assert!(build_source(&config).is_err());

        let config = RecognizerConfig {
            kind: RecognizerKind::Http,
            url: Some("http://localhost:9000/ner".to_string()),
            ..Default::default()
        };
        assert_eq!(build_source(&config).unwrap().name(), "http");
    }

    #[test]
    fn test_build_none() {
        let config = RecognizerConfig {
            kind: RecognizerKind::None,
            ..Default::default()
        };
        assert_eq!(build_source(&config).unwrap().name(), "none");
    }
}
