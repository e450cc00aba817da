//! Placeholder resolution
//!
//! The built-in label -> placeholder table is static. Caller overrides only
//! ever apply to identifier categories, so entity-sourced spans always keep
//! their built-in placeholder.

use crate::label::{EntityKind, EntityLabel, IdentifierKind};
use crate::rule::{Derivation, ReplacementRule};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::warn;

/// Placeholder for labels with no entry in the table
pub const GENERIC_PLACEHOLDER: &str = "[REDACTED]";

fn entity_placeholder(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "[REDACTED NAME]",
        EntityKind::Title => "[REDACTED TITLE]",
        EntityKind::Gender => "[REDACTED GENDER]",
        EntityKind::Age => "[REDACTED AGE]",
        EntityKind::Location => "[REDACTED LOCATION]",
        EntityKind::Address => "[REDACTED ADDRESS]",
        EntityKind::Organization => "[REDACTED ORGANIZATION]",
        EntityKind::Nationality => "[REDACTED NATIONALITY]",
        EntityKind::Facility => "[REDACTED FACILITY]",
        EntityKind::Date => "[REDACTED DATE]",
        EntityKind::Time => "[REDACTED TIME]",
        EntityKind::Email => "[REDACTED EMAIL]",
        EntityKind::Phone => "[REDACTED PHONE]",
        EntityKind::Money => "[REDACTED AMOUNT]",
        EntityKind::Quantity => "[REDACTED QUANTITY]",
        EntityKind::Percent => "[REDACTED PERCENT]",
        EntityKind::Event => "[REDACTED EVENT]",
    }
}

fn identifier_rule(kind: IdentifierKind) -> ReplacementRule {
    match kind {
        IdentifierKind::Card => ReplacementRule::constant("xxxx-xxxx-xxxx-xxxx"),
        IdentifierKind::Aadhaar => ReplacementRule::constant("xxx-xxx-xxx"),
        // ABCDE1234F -> xxxxx1234x
        IdentifierKind::Pan => ReplacementRule::Derived(Derivation::KeepRange {
            start: 5,
            end: 9,
            mask: 'x',
        }),
        IdentifierKind::DrivingLicense => ReplacementRule::constant("[REDACTED LICENSE]"),
        IdentifierKind::VoterId => ReplacementRule::constant("[REDACTED VOTER ID]"),
        IdentifierKind::Passport => ReplacementRule::constant("[REDACTED PASSPORT]"),
    }
}

/// Built-in replacement rule for a label
pub fn builtin_rule(label: &EntityLabel) -> ReplacementRule {
    match label {
        EntityLabel::Entity(kind) => ReplacementRule::constant(entity_placeholder(*kind)),
        EntityLabel::Identifier(kind) => identifier_rule(*kind),
        EntityLabel::Unknown(_) => ReplacementRule::constant(GENERIC_PLACEHOLDER),
    }
}

/// Resolve the final replacement string for a matched span
///
/// An override for an identifier category wins when it can render the
/// matched text; otherwise the built-in rule is used.
pub fn resolve(label: &EntityLabel, matched: &str, overrides: &PlaceholderOverrides) -> String {
    if let EntityLabel::Identifier(kind) = label
        && let Some(rule) = overrides.get(*kind)
    {
        match rule.render(matched) {
            Some(value) => return value.into_owned(),
            None => warn!(
                category = kind.as_str(),
                "Placeholder override does not fit the matched text, using built-in"
            ),
        }
    }

    builtin_rule(label)
        .render(matched)
        .map(|value| value.into_owned())
        .unwrap_or_else(|| GENERIC_PLACEHOLDER.to_string())
}

/// Caller-supplied replacements keyed by identifier category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderOverrides {
    rules: HashMap<IdentifierKind, ReplacementRule>,
}

impl PlaceholderOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: IdentifierKind, rule: ReplacementRule) -> Result<()> {
        rule.validate().map_err(|reason| Error::MalformedOverride {
            category: kind.as_str().to_string(),
            reason,
        })?;
        self.rules.insert(kind, rule);
        Ok(())
    }

    pub fn get(&self, kind: IdentifierKind) -> Option<&ReplacementRule> {
        self.rules.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse one `category -> value` entry as received over the wire
    pub fn parse_entry(
        category: &str,
        value: serde_json::Value,
    ) -> Result<(IdentifierKind, ReplacementRule)> {
        let malformed = |reason: String| Error::MalformedOverride {
            category: category.to_string(),
            reason,
        };

        let kind = category.parse::<IdentifierKind>().map_err(malformed)?;
        let rule: ReplacementRule =
            serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        rule.validate().map_err(malformed)?;

        Ok((kind, rule))
    }

    /// Build from caller-supplied JSON entries
    ///
    /// Malformed entries are logged and skipped; the request carries on with
    /// the built-in placeholder for that category.
    pub fn from_json<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: AsRef<str>,
    {
        let mut overrides = Self::new();
        for (category, value) in entries {
            let added = Self::parse_entry(category.as_ref(), value)
                .and_then(|(kind, rule)| overrides.insert(kind, rule));
            if let Err(e) = added {
                warn!("Ignoring placeholder override: {}", e);
            }
        }
        overrides
    }

    /// Build from `category -> constant` pairs (e.g. CLI flags)
    pub fn from_constants<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_json(
            entries
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v.into()))),
        )
    }
}
