//! Redaction levels and the level-to-category table

use crate::label::EntityKind;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sensitivity setting for one redaction request
///
/// Levels are cumulative: level N redacts every category introduced at
/// levels 1 through N. Level 3 also enables the identifier pattern matcher.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub enum RedactionLevel {
    Basic = 1,
    Standard = 2,
    #[default]
    Strict = 3,
}

/// Categories introduced at each level
const LEVEL_CATEGORIES: [(RedactionLevel, &[EntityKind]); 3] = [
    (
        RedactionLevel::Basic,
        &[
            EntityKind::Person,
            EntityKind::Title,
            EntityKind::Gender,
            EntityKind::Age,
        ],
    ),
    (
        RedactionLevel::Standard,
        &[
            EntityKind::Location,
            EntityKind::Address,
            EntityKind::Organization,
            EntityKind::Nationality,
            EntityKind::Facility,
            EntityKind::Date,
            EntityKind::Time,
            EntityKind::Email,
            EntityKind::Phone,
        ],
    ),
    (
        RedactionLevel::Strict,
        &[
            EntityKind::Money,
            EntityKind::Quantity,
            EntityKind::Percent,
            EntityKind::Event,
        ],
    ),
];

impl RedactionLevel {
    pub const ALL: [RedactionLevel; 3] = [
        RedactionLevel::Basic,
        RedactionLevel::Standard,
        RedactionLevel::Strict,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Every category redacted at this level (levels 1..=self)
    pub fn categories(self) -> impl Iterator<Item = EntityKind> {
        LEVEL_CATEGORIES
            .iter()
            .filter(move |(level, _)| *level <= self)
            .flat_map(|(_, kinds)| kinds.iter().copied())
    }

    pub fn admits(self, kind: EntityKind) -> bool {
        self.categories().any(|k| k == kind)
    }

    /// Whether fixed-format identifier matching runs at this level
    pub fn matches_identifiers(self) -> bool {
        self >= RedactionLevel::Strict
    }
}

impl TryFrom<i64> for RedactionLevel {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(RedactionLevel::Basic),
            2 => Ok(RedactionLevel::Standard),
            3 => Ok(RedactionLevel::Strict),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl From<RedactionLevel> for u8 {
    fn from(level: RedactionLevel) -> Self {
        level.as_u8()
    }
}
