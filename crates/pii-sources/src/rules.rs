//! Built-in rule recognizer
//!
//! A model-free baseline: regexes for entities with a recognizable surface
//! form (emails, phones, dates, amounts, ...) plus gazetteer lookups for
//! names, places and organizations listed in the config.

use async_trait::async_trait;
use lazy_static::lazy_static;
use pii_config::GazetteerConfig;
use pii_core::{EntityKind, EntitySpan};
use regex::Regex;

use crate::source::EntitySource;

const MONTH: &str = concat!(
    r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?",
    r"|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?",
);

lazy_static! {
    static ref BUILTIN_RULES: Vec<(EntityKind, Regex)> = vec![
        (
            EntityKind::Email,
            Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap(),
        ),
        (
            EntityKind::Phone,
            Regex::new(r"(?:\+91[ -]?|\b)[6-9][0-9]{4}[ -]?[0-9]{5}\b").unwrap(),
        ),
        (
            EntityKind::Date,
            Regex::new(r"\b[0-3]?[0-9][/.-][01]?[0-9][/.-](?:19|20)?[0-9]{2}\b").unwrap(),
        ),
        (
            EntityKind::Date,
            Regex::new(&format!(
                r"(?i)\b[0-3]?[0-9](?:st|nd|rd|th)?\s+{MONTH},?\s+(?:19|20)[0-9]{{2}}\b"
            ))
            .unwrap(),
        ),
        (
            EntityKind::Date,
            Regex::new(&format!(
                r"(?i)\b{MONTH}\s+[0-3]?[0-9](?:st|nd|rd|th)?,?\s+(?:19|20)[0-9]{{2}}\b"
            ))
            .unwrap(),
        ),
        (
            EntityKind::Money,
            Regex::new(concat!(
                r"(?i)(?:₹|\brs\.?|\binr)\s?[0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?",
                r"(?:\s?(?:lakhs?|crores?)\b)?",
            ))
            .unwrap(),
        ),
        (
            EntityKind::Percent,
            Regex::new(r"(?i)\b[0-9]+(?:\.[0-9]+)?(?:\s?%|\s?percent\b)").unwrap(),
        ),
        (
            EntityKind::Age,
            Regex::new(
                r"(?i)\b(?:[0-9]{1,3}[ -]?(?:years?|yrs?)[ -]old|aged?\s*:?\s*[0-9]{1,3})\b"
            )
            .unwrap(),
        ),
        (
            EntityKind::Title,
            Regex::new(r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof|Shri|Smt|Sri|Kumari)\b\.?").unwrap(),
        ),
        (
            EntityKind::Gender,
            Regex::new(r"(?i)\b(?:male|female|transgender|non-binary)\b").unwrap(),
        ),
    ];
}

/// Regex and gazetteer based entity source
pub struct RuleEntitySource {
    gazetteer: Vec<(EntityKind, Regex)>,
}

impl RuleEntitySource {
    pub fn new(gazetteer: &GazetteerConfig) -> anyhow::Result<Self> {
        let mut compiled = Vec::new();
        for (kind, names) in [
            (EntityKind::Person, &gazetteer.persons),
            (EntityKind::Location, &gazetteer.locations),
            (EntityKind::Organization, &gazetteer.organizations),
        ] {
            if let Some(regex) = gazetteer_regex(names)? {
                compiled.push((kind, regex));
            }
        }

        Ok(Self {
            gazetteer: compiled,
        })
    }

    /// Candidates from every rule, overlaps included
    fn candidates(&self, text: &str) -> Vec<EntitySpan> {
        BUILTIN_RULES
            .iter()
            .chain(self.gazetteer.iter())
            .flat_map(|(kind, regex)| {
                regex
                    .find_iter(text)
                    .map(move |m| EntitySpan::new(m.start(), m.end(), *kind))
            })
            .collect()
    }
}

impl Default for RuleEntitySource {
    fn default() -> Self {
        Self {
            gazetteer: Vec::new(),
        }
    }
}

/// One alternation per category, longest names first so that
/// "New Delhi" wins over "Delhi"
fn gazetteer_regex(names: &[String]) -> anyhow::Result<Option<Regex>> {
    let mut names: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        return Ok(None);
    }
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));

    let alternation = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?))
}

/// Keep the earliest, then longest, span; drop anything overlapping a kept span
fn resolve_overlaps(mut spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if kept.last().is_some_and(|prev| span.start < prev.end) {
            continue;
        }
        kept.push(span);
    }
    kept
}

#[async_trait]
impl EntitySource for RuleEntitySource {
    async fn recognize(&self, text: &str) -> anyhow::Result<Vec<EntitySpan>> {
        Ok(resolve_overlaps(self.candidates(text)))
    }

    fn name(&self) -> &str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pii_core::EntityLabel;

    fn source_with_names() -> RuleEntitySource {
        RuleEntitySource::new(&GazetteerConfig {
            persons: vec!["Rahul".to_string(), "Priya Sharma".to_string()],
            locations: vec!["Delhi".to_string(), "New Delhi".to_string()],
            organizations: vec!["Infosys".to_string()],
        })
        .unwrap()
    }

    fn found(spans: &[EntitySpan], text: &str) -> Vec<(String, EntityLabel)> {
        spans
            .iter()
            .map(|s| (text[s.start..s.end].to_string(), s.label.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_contact_sentence() {
        let text = "Contact Rahul at rahul@example.com, Aadhaar 1234 5678 9012";
        let spans = source_with_names().recognize(text).await.unwrap();

        assert_eq!(
            found(&spans, text),
            vec![
                ("Rahul".to_string(), EntityKind::Person.into()),
                ("rahul@example.com".to_string(), EntityKind::Email.into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_surface_forms() {
        let text = "Mr. Kumar, 42 years old, male, paid Rs. 5,000 (12%) on 12/03/2024, call +91 98765 43210.";
        let spans = RuleEntitySource::default().recognize(text).await.unwrap();
        let labels: Vec<_> = found(&spans, text);

        assert!(labels.contains(&("Mr.".to_string(), EntityKind::Title.into())));
        assert!(labels.contains(&("42 years old".to_string(), EntityKind::Age.into())));
        assert!(labels.contains(&("male".to_string(), EntityKind::Gender.into())));
        assert!(labels.contains(&("Rs. 5,000".to_string(), EntityKind::Money.into())));
        assert!(labels.contains(&("12%".to_string(), EntityKind::Percent.into())));
        assert!(labels.contains(&("12/03/2024".to_string(), EntityKind::Date.into())));
        assert!(labels.contains(&("+91 98765 43210".to_string(), EntityKind::Phone.into())));
    }

    #[tokio::test]
    async fn test_money_excludes_trailing_punctuation() {
        let text = "He paid Rs. 500, then left";
        let spans = RuleEntitySource::default().recognize(text).await.unwrap();
        assert_eq!(
            found(&spans, text),
            vec![("Rs. 500".to_string(), EntityKind::Money.into())]
        );

        let text = "Budget: ₹12,50,000.50, approved";
        let spans = RuleEntitySource::default().recognize(text).await.unwrap();
        assert_eq!(
            found(&spans, text),
            vec![("₹12,50,000.50".to_string(), EntityKind::Money.into())]
        );
    }

    #[tokio::test]
    async fn test_phone_with_country_code() {
        for (text, expected) in [
            ("call +919876543210 now", "+919876543210"),
            ("call +91-98765-43210 now", "+91-98765-43210"),
            ("call 98765 43210 now", "98765 43210"),
        ] {
            let spans = RuleEntitySource::default().recognize(text).await.unwrap();
            assert_eq!(
                found(&spans, text),
                vec![(expected.to_string(), EntityKind::Phone.into())],
                "{}",
                text
            );
        }
    }

    #[tokio::test]
    async fn test_words_starting_like_months_are_not_dates() {
        for text in ["approx 12 2020", "3 marketing 2023", "Decent 5, 2019"] {
            let spans = RuleEntitySource::default().recognize(text).await.unwrap();
            assert!(spans.is_empty(), "{}", text);
        }
        let text = "due Sept 3, 2024 or 1 December 2024";
        let spans = RuleEntitySource::default().recognize(text).await.unwrap();
        let texts: Vec<_> = found(&spans, text).into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["Sept 3, 2024", "1 December 2024"]);
    }

    #[tokio::test]
    async fn test_month_name_dates() {
        let text = "Born 5th March, 1990 and joined on Jan 12, 2015.";
        let spans = RuleEntitySource::default().recognize(text).await.unwrap();
        let texts: Vec<_> = found(&spans, text).into_iter().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["5th March, 1990", "Jan 12, 2015"]);
    }

    #[tokio::test]
    async fn test_longest_gazetteer_entry_wins() {
        let text = "Flights from New Delhi to Pune";
        let spans = source_with_names().recognize(text).await.unwrap();
        assert_eq!(
            found(&spans, text),
            vec![("New Delhi".to_string(), EntityKind::Location.into())]
        );
    }

    #[tokio::test]
    async fn test_output_is_non_overlapping() {
        let text = "Priya Sharma <priya.sharma@infosys.com> Infosys Delhi 9876543210";
        let spans = source_with_names().recognize(text).await.unwrap();
        assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
        assert!(spans.iter().all(|s| s.validate(text).is_ok()));
    }

    #[tokio::test]
    async fn test_plain_text_has_no_entities() {
        let spans = RuleEntitySource::default()
            .recognize("the quick brown fox jumps over the lazy dog")
            .await
            .unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_empty_gazetteer_compiles_nothing() {
        let source = RuleEntitySource::new(&GazetteerConfig::default()).unwrap();
        assert!(source.gazetteer.is_empty());
    }
}
