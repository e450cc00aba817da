//! Spans: half-open byte ranges tagged with a label and a replacement

use crate::label::EntityLabel;
use crate::rule::ReplacementRule;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which collaborator discovered a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanSource {
    Entity,
    Pattern,
}

/// A span as reported by an entity source, before placeholders are attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, label: impl Into<EntityLabel>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Check `start < end <= text.len()` with both ends on char boundaries
    pub fn validate(&self, text: &str) -> Result<()> {
        let well_formed = self.start < self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end);

        if well_formed {
            Ok(())
        } else {
            Err(Error::MalformedEntitySpan {
                start: self.start,
                end: self.end,
                len: text.len(),
            })
        }
    }
}

/// A candidate redaction: `[start, end)` in UTF-8 bytes of the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub replacement: ReplacementRule,
    pub source: SpanSource,
}

impl Span {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::EntityKind;

    fn span(start: usize, end: usize) -> Span {
        Span {
            start,
            end,
            label: EntityLabel::Entity(EntityKind::Person),
            replacement: ReplacementRule::constant("[X]"),
            source: SpanSource::Entity,
        }
    }

    #[test]
    fn test_validate_entity_span() {
        let text = "Hello Rahul";
        assert!(EntitySpan::new(6, 11, EntityKind::Person).validate(text).is_ok());
        assert!(EntitySpan::new(6, 6, EntityKind::Person).validate(text).is_err());
        assert!(EntitySpan::new(8, 6, EntityKind::Person).validate(text).is_err());
        assert!(EntitySpan::new(6, 12, EntityKind::Person).validate(text).is_err());
    }

    #[test]
    fn test_validate_rejects_split_characters() {
        let text = "naïve";
        // 'ï' occupies bytes 2..4
        assert!(EntitySpan::new(0, 3, EntityKind::Person).validate(text).is_err());
        assert!(EntitySpan::new(0, 4, EntityKind::Person).validate(text).is_ok());
    }

    #[test]
    fn test_overlaps_is_half_open() {
        assert!(span(0, 5).overlaps(&span(4, 8)));
        assert!(!span(0, 5).overlaps(&span(5, 8)));
        assert!(span(2, 3).overlaps(&span(0, 10)));
    }
}
