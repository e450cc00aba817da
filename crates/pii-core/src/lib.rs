//! Core domain models and logic for PII redaction
//!
//! This crate contains:
//! - Domain models (Span, EntityLabel, ReplacementRule, RedactionLevel)
//! - Placeholder resolution (built-in table plus caller overrides)
//! - Span reconciliation and the single-pass text rewriter

pub mod error;
pub mod label;
pub mod level;
pub mod offsets;
pub mod placeholder;
pub mod reconcile;
pub mod rewrite;
pub mod rule;
pub mod span;

pub use error::{Error, Result};
pub use label::{EntityKind, EntityLabel, IdentifierKind};
pub use level::RedactionLevel;
pub use offsets::CharOffsets;
pub use placeholder::{GENERIC_PLACEHOLDER, PlaceholderOverrides, builtin_rule, resolve};
pub use reconcile::{OverlapPolicy, is_reconciled, reconcile};
pub use rewrite::rewrite;
pub use rule::{Derivation, ReplacementRule};
pub use span::{EntitySpan, Span, SpanSource};
