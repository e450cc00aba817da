//! Entity source trait

use async_trait::async_trait;
use pii_core::EntitySpan;

/// Capability that finds general-purpose entities (names, places, dates, ...)
///
/// Spans are `[start, end)` byte offsets into `text` and must not overlap
/// each other. Implementations that talk in character offsets convert before
/// returning.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Find entity spans in `text`
    async fn recognize(&self, text: &str) -> anyhow::Result<Vec<EntitySpan>>;

    /// Short name for logs and service info
    fn name(&self) -> &str;
}

/// Returns a fixed list of spans regardless of input
///
/// Useful when spans were computed elsewhere, and for tests.
pub struct StaticEntitySource {
    spans: Vec<EntitySpan>,
}

impl StaticEntitySource {
    pub fn new(spans: Vec<EntitySpan>) -> Self {
        Self { spans }
    }
}

#[async_trait]
impl EntitySource for StaticEntitySource {
    async fn recognize(&self, _text: &str) -> anyhow::Result<Vec<EntitySpan>> {
        Ok(self.spans.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Finds nothing; only identifier patterns will redact
pub struct NoEntitySource;

#[async_trait]
impl EntitySource for NoEntitySource {
    async fn recognize(&self, _text: &str) -> anyhow::Result<Vec<EntitySpan>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "none"
    }
}
