//! Fixed-format identifier matcher
//!
//! Detects Indian identifier numbers (payment card, Aadhaar, PAN, driving
//! license, voter ID, passport) with precompiled patterns. Pure function of
//! the input text.

use lazy_static::lazy_static;
use pii_core::IdentifierKind;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One identifier found in the text, `[start, end)` in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub start: usize,
    pub end: usize,
    pub kind: IdentifierKind,
}

/// A compiled matcher for one identifier category
pub struct IdentifierPattern {
    pub kind: IdentifierKind,
    regex: Regex,
}

impl IdentifierPattern {
    fn new(kind: IdentifierKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

lazy_static! {
    static ref SHARED: PatternMatcher = PatternMatcher::new();
}

/// Identifier matcher over the built-in pattern table
pub struct PatternMatcher {
    patterns: Vec<IdentifierPattern>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        // Order matters: it is the discovery order used to break ties on equal
        // start offsets. Card goes before Aadhaar so that a 16-digit number is
        // not reduced to its 12-digit prefix.
        let patterns = vec![
            // 1234 5678 9012 3456
            IdentifierPattern::new(
                IdentifierKind::Card,
                r"\b[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}\b",
            ),
            // 1234 5678 9012
            IdentifierPattern::new(
                IdentifierKind::Aadhaar,
                r"\b[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}\b",
            ),
            // ABCDE1234F
            IdentifierPattern::new(IdentifierKind::Pan, r"\b[A-Z]{5}[0-9]{4}[A-Z]\b"),
            // MH-14 2011 0062821
            IdentifierPattern::new(
                IdentifierKind::DrivingLicense,
                r"\b[A-Z]{2}[ -]?[0-9]{2}[ -]?(?:19|20)[0-9]{2}[ -]?[0-9]{7}\b",
            ),
            // ABC1234567
            IdentifierPattern::new(IdentifierKind::VoterId, r"\b[A-Z]{3}[0-9]{7}\b"),
            // J8369854
            IdentifierPattern::new(IdentifierKind::Passport, r"\b[A-Z][1-9][0-9]{6}\b"),
        ];

        Self { patterns }
    }

    /// Process-wide matcher, compiled on first use
    pub fn shared() -> &'static PatternMatcher {
        &SHARED
    }

    pub fn patterns(&self) -> impl Iterator<Item = &IdentifierPattern> {
        self.patterns.iter()
    }

    /// All matches, pattern by pattern in table order
    ///
    /// Matches of one pattern never overlap each other; matches of different
    /// patterns may, and are left for span reconciliation.
    pub fn find_all(&self, text: &str) -> Vec<PatternMatch> {
        let mut matches = Vec::new();

        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                matches.push(PatternMatch {
                    start: m.start(),
                    end: m.end(),
                    kind: pattern.kind,
                });
            }
        }

        matches
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}
