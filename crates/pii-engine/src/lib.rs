pub mod collect;

pub use collect::collect;

use pii_core::{
    Error, OverlapPolicy, PlaceholderOverrides, RedactionLevel, Result, Span, is_reconciled,
    reconcile, rewrite,
};
use pii_patterns::PatternMatcher;
use pii_sources::EntitySource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one redaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactOutcome {
    pub redacted_text: String,
    pub redactions: Vec<RedactionSummary>,
}

/// How many spans of one label were replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummary {
    pub label: String,
    pub count: usize,
}

/// Redaction pipeline: recognizer -> collect -> reconcile -> rewrite
///
/// Holds no per-request state; one instance serves any number of concurrent
/// requests.
pub struct Redactor {
    source: Arc<dyn EntitySource>,
    matcher: &'static PatternMatcher,
    policy: OverlapPolicy,
}

impl Redactor {
    pub fn new(source: Arc<dyn EntitySource>) -> Self {
        Self {
            source,
            matcher: PatternMatcher::shared(),
            policy: OverlapPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Final, ordered, non-overlapping spans for `text`
    pub async fn plan(
        &self,
        text: &str,
        level: RedactionLevel,
        overrides: &PlaceholderOverrides,
    ) -> Result<Vec<Span>> {
        let entity_spans = self
            .source
            .recognize(text)
            .await
            .map_err(|e| Error::MissingEntitySource(format!("{}: {:#}", self.source.name(), e)))?;
        debug!(count = entity_spans.len(), "Entity spans received");

        let candidates = collect(text, entity_spans, level, overrides, self.matcher)?;
        let candidate_count = candidates.len();

        let spans = reconcile(candidates, self.policy);
        debug_assert!(is_reconciled(&spans));
        debug!(
            candidates = candidate_count,
            kept = spans.len(),
            "Spans reconciled"
        );

        Ok(spans)
    }

    /// Redact `text` at `level`
    ///
    /// All-or-nothing: any failure returns an error and no text.
    pub async fn redact(
        &self,
        text: &str,
        level: RedactionLevel,
        overrides: &PlaceholderOverrides,
    ) -> Result<RedactOutcome> {
        let fingerprint = fingerprint(text);
        let spans = self.plan(text, level, overrides).await?;
        let redacted_text = rewrite(text, &spans);

        info!(
            text = %fingerprint,
            level = level.as_u8(),
            spans = spans.len(),
            overrides = overrides.len(),
            "Redacted text"
        );

        Ok(RedactOutcome {
            redacted_text,
            redactions: summarize(&spans),
        })
    }
}

/// Short content hash so logs can correlate requests without holding PII
fn fingerprint(text: &str) -> String {
    let hash = blake3::hash(text.as_bytes()).to_hex();
    hash.as_str()[..16].to_string()
}

fn summarize(spans: &[Span]) -> Vec<RedactionSummary> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for span in spans {
        *counts.entry(span.label.to_string()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| RedactionSummary { label, count })
        .collect()
}
