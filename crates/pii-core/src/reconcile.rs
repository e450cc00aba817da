//! Span reconciliation
//!
//! Candidate spans come from two independent sources and may overlap. The
//! rewriter needs them ordered by start with no shared offsets, so conflicts
//! are settled here and never inside the rewriter.

use crate::span::{Span, SpanSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which span survives when two candidates overlap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// The earlier-starting span is kept; the later one is dropped whole
    #[default]
    EarliestStart,
    /// A pattern span displaces an overlapping entity span; between spans of
    /// the same source the earlier start wins
    PreferPatterns,
}

/// Order candidates by start and drop conflicting spans
///
/// Ties on `start` keep discovery order (the sort is stable), so callers
/// must pass entity spans before pattern spans.
pub fn reconcile(mut spans: Vec<Span>, policy: OverlapPolicy) -> Vec<Span> {
    spans.sort_by_key(|span| span.start);

    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if span.is_empty() {
            continue;
        }

        if let Some(prev) = kept.last()
            && span.overlaps(prev)
        {
            let displaces = policy == OverlapPolicy::PreferPatterns
                && span.source == SpanSource::Pattern
                && prev.source == SpanSource::Entity;

            if !displaces {
                debug!(
                    kept = %prev.label,
                    dropped = %span.label,
                    start = span.start,
                    "Dropping overlapping span"
                );
                continue;
            }

            debug!(
                kept = %span.label,
                dropped = %prev.label,
                start = prev.start,
                "Pattern span displaces overlapping entity span"
            );
            kept.pop();
            // Everything still kept ends at or before the displaced span's
            // start, which is <= span.start, so no further check is needed.
        }

        kept.push(span);
    }

    kept
}

/// Whether spans are strictly increasing and pairwise disjoint
pub fn is_reconciled(spans: &[Span]) -> bool {
    spans.iter().all(|span| !span.is_empty())
        && spans.windows(2).all(|pair| pair[0].end <= pair[1].start)
}
