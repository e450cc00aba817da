//! Replacement rules: constant placeholders or placeholders derived from the match

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How a redacted span is replaced
///
/// Deserializes from JSON as either a plain string (constant) or a
/// derivation object such as `{"keep_range": {"start": 5, "end": 9}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplacementRule {
    Constant(String),
    Derived(Derivation),
}

/// Placeholder computed from the matched substring
///
/// Positions count characters of the matched text, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Keep characters in `start..end`, mask everything else
    KeepRange {
        start: usize,
        end: usize,
        #[serde(default = "default_mask")]
        mask: char,
    },
    /// Keep the trailing `count` characters, mask everything else
    KeepLast {
        count: usize,
        #[serde(default = "default_mask")]
        mask: char,
    },
}

fn default_mask() -> char {
    'x'
}

impl ReplacementRule {
    pub fn constant(value: impl Into<String>) -> Self {
        ReplacementRule::Constant(value.into())
    }

    /// Replacement text for `matched`, or `None` when a derivation cannot apply
    pub fn render<'a>(&'a self, matched: &str) -> Option<Cow<'a, str>> {
        match self {
            ReplacementRule::Constant(value) => Some(Cow::Borrowed(value.as_str())),
            ReplacementRule::Derived(derivation) => derivation.apply(matched).map(Cow::Owned),
        }
    }

    /// Reject rules that can never produce a usable placeholder
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            ReplacementRule::Constant(value) if value.is_empty() => {
                Err("constant placeholder is empty".to_string())
            }
            ReplacementRule::Constant(_) => Ok(()),
            ReplacementRule::Derived(derivation) => derivation.validate(),
        }
    }
}

impl Derivation {
    pub fn validate(&self) -> std::result::Result<(), String> {
        match *self {
            Derivation::KeepRange { start, end, .. } if start >= end => {
                Err(format!("keep_range start {} must be below end {}", start, end))
            }
            Derivation::KeepLast { count: 0, .. } => {
                Err("keep_last count must be positive".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Apply to the matched text
    ///
    /// Returns `None` when the kept segment does not fit inside the match, or
    /// when nothing would be masked (the original value would leak whole).
    pub fn apply(&self, matched: &str) -> Option<String> {
        let len = matched.chars().count();
        match *self {
            Derivation::KeepRange { start, end, mask } => {
                if start >= end || end > len || end - start >= len {
                    return None;
                }
                Some(
                    matched
                        .chars()
                        .enumerate()
                        .map(|(i, c)| if (start..end).contains(&i) { c } else { mask })
                        .collect(),
                )
            }
            Derivation::KeepLast { count, mask } => {
                if count == 0 || count >= len {
                    return None;
                }
                let keep_from = len - count;
                Some(
                    matched
                        .chars()
                        .enumerate()
                        .map(|(i, c)| if i >= keep_from { c } else { mask })
                        .collect(),
                )
            }
        }
    }
}
