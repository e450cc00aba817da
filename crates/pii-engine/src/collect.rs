//! Span collection: entity spans filtered by level, plus identifier matches

use pii_core::{
    EntityLabel, EntitySpan, PlaceholderOverrides, RedactionLevel, ReplacementRule, Result, Span,
    SpanSource, builtin_rule, resolve,
};
use pii_patterns::PatternMatcher;

/// Build the unreconciled candidate list for one request
///
/// Entity spans come first, in the order the source reported them, then
/// pattern spans in matcher order. Reconciliation relies on that order to
/// break ties. Overrides only reach pattern spans.
pub fn collect(
    text: &str,
    entity_spans: Vec<EntitySpan>,
    level: RedactionLevel,
    overrides: &PlaceholderOverrides,
    matcher: &PatternMatcher,
) -> Result<Vec<Span>> {
    for span in &entity_spans {
        span.validate(text)?;
    }

    let mut spans: Vec<Span> = entity_spans
        .into_iter()
        .filter(|span| matches!(span.label, EntityLabel::Entity(kind) if level.admits(kind)))
        .map(|span| Span {
            replacement: builtin_rule(&span.label),
            start: span.start,
            end: span.end,
            label: span.label,
            source: SpanSource::Entity,
        })
        .collect();

    if level.matches_identifiers() {
        spans.extend(matcher.find_all(text).into_iter().map(|m| {
            let label = EntityLabel::Identifier(m.kind);
            let replacement = resolve(&label, &text[m.start..m.end], overrides);
            Span {
                start: m.start,
                end: m.end,
                label,
                replacement: ReplacementRule::Constant(replacement),
                source: SpanSource::Pattern,
            }
        }));
    }

    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pii_core::{EntityKind, Error, IdentifierKind};

    const TEXT: &str = "Contact Rahul at rahul@example.com, Aadhaar 1234 5678 9012";

    fn entity_spans() -> Vec<EntitySpan> {
        vec![
            EntitySpan::new(8, 13, EntityKind::Person),
            EntitySpan::new(17, 34, EntityKind::Email),
        ]
    }

    fn labels(spans: &[Span]) -> Vec<EntityLabel> {
        spans.iter().map(|s| s.label.clone()).collect()
    }

    #[test]
    fn test_level_one_keeps_only_level_one_categories() {
        let spans = collect(
            TEXT,
            entity_spans(),
            RedactionLevel::Basic,
            &PlaceholderOverrides::new(),
            PatternMatcher::shared(),
        )
        .unwrap();
        assert_eq!(labels(&spans), vec![EntityKind::Person.into()]);
    }

    #[test]
    fn test_level_two_adds_email_but_no_patterns() {
        let spans = collect(
            TEXT,
            entity_spans(),
            RedactionLevel::Standard,
            &PlaceholderOverrides::new(),
            PatternMatcher::shared(),
        )
        .unwrap();
        assert_eq!(
            labels(&spans),
            vec![EntityKind::Person.into(), EntityKind::Email.into()]
        );
    }

    #[test]
    fn test_level_three_appends_pattern_spans() {
        let spans = collect(
            TEXT,
            entity_spans(),
            RedactionLevel::Strict,
            &PlaceholderOverrides::new(),
            PatternMatcher::shared(),
        )
        .unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].label, IdentifierKind::Aadhaar.into());
        assert_eq!(spans[2].source, SpanSource::Pattern);
        assert_eq!(spans[2].replacement, ReplacementRule::constant("xxx-xxx-xxx"));
    }

    #[test]
    fn test_overrides_apply_to_pattern_spans() {
        let overrides = PlaceholderOverrides::from_constants([("aadhaar", "[UID]")]);
        let spans = collect(
            TEXT,
            entity_spans(),
            RedactionLevel::Strict,
            &overrides,
            PatternMatcher::shared(),
        )
        .unwrap();
        assert_eq!(spans[2].replacement, ReplacementRule::constant("[UID]"));
        assert_eq!(spans[0].replacement, ReplacementRule::constant("[REDACTED NAME]"));
    }

    #[test]
    fn test_unknown_labels_are_never_collected() {
        let spans = collect(
            TEXT,
            vec![EntitySpan::new(0, 7, EntityLabel::Unknown("MISC".to_string()))],
            RedactionLevel::Strict,
            &PlaceholderOverrides::new(),
            PatternMatcher::shared(),
        )
        .unwrap();
        assert!(spans.iter().all(|s| s.source == SpanSource::Pattern));
    }

    #[test]
    fn test_malformed_entity_span_fails() {
        let result = collect(
            TEXT,
            vec![EntitySpan::new(50, 90, EntityKind::Person)],
            RedactionLevel::Basic,
            &PlaceholderOverrides::new(),
            PatternMatcher::shared(),
        );
        assert!(matches!(result, Err(Error::MalformedEntitySpan { .. })));
    }

    #[test]
    fn test_malformed_span_fails_even_when_filtered_out() {
        let result = collect(
            TEXT,
            vec![EntitySpan::new(30, 20, EntityKind::Money)],
            RedactionLevel::Basic,
            &PlaceholderOverrides::new(),
            PatternMatcher::shared(),
        );
        assert!(result.is_err());
    }
}
