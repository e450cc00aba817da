//! Labels attached to redaction spans

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// General entity categories reported by an entity source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Title,
    Gender,
    Age,
    Location,
    Address,
    Organization,
    Nationality,
    Facility,
    Date,
    Time,
    Email,
    Phone,
    Money,
    Quantity,
    Percent,
    Event,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Title => "title",
            EntityKind::Gender => "gender",
            EntityKind::Age => "age",
            EntityKind::Location => "location",
            EntityKind::Address => "address",
            EntityKind::Organization => "organization",
            EntityKind::Nationality => "nationality",
            EntityKind::Facility => "facility",
            EntityKind::Date => "date",
            EntityKind::Time => "time",
            EntityKind::Email => "email",
            EntityKind::Phone => "phone",
            EntityKind::Money => "money",
            EntityKind::Quantity => "quantity",
            EntityKind::Percent => "percent",
            EntityKind::Event => "event",
        }
    }

    /// Map a recognizer label onto a kind
    ///
    /// Matching is case-insensitive and accepts the aliases common NER
    /// models emit (`PER`, `GPE`, `ORG`, `NORP`, `FAC`, ...).
    pub fn from_recognizer_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        let kind = match normalized.as_str() {
            "PERSON" | "PER" | "NAME" => EntityKind::Person,
            "TITLE" => EntityKind::Title,
            "GENDER" => EntityKind::Gender,
            "AGE" => EntityKind::Age,
            "LOCATION" | "LOC" | "GPE" => EntityKind::Location,
            "ADDRESS" | "ADDR" => EntityKind::Address,
            "ORGANIZATION" | "ORGANISATION" | "ORG" => EntityKind::Organization,
            "NATIONALITY" | "NORP" => EntityKind::Nationality,
            "FACILITY" | "FAC" => EntityKind::Facility,
            "DATE" => EntityKind::Date,
            "TIME" => EntityKind::Time,
            "EMAIL" | "E_MAIL" | "EMAIL_ADDRESS" => EntityKind::Email,
            "PHONE" | "PHONE_NUMBER" | "TELEPHONE" => EntityKind::Phone,
            "MONEY" | "AMOUNT" => EntityKind::Money,
            "QUANTITY" => EntityKind::Quantity,
            "PERCENT" | "PERCENTAGE" => EntityKind::Percent,
            "EVENT" => EntityKind::Event,
            _ => return None,
        };
        Some(kind)
    }
}

/// Fixed-format Indian identifier categories found by the pattern matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Payment card number
    Card,
    /// National ID (Aadhaar)
    Aadhaar,
    /// National tax identifier (PAN)
    Pan,
    DrivingLicense,
    /// Electoral photo ID (EPIC)
    VoterId,
    Passport,
}

impl IdentifierKind {
    pub const ALL: [IdentifierKind; 6] = [
        IdentifierKind::Card,
        IdentifierKind::Aadhaar,
        IdentifierKind::Pan,
        IdentifierKind::DrivingLicense,
        IdentifierKind::VoterId,
        IdentifierKind::Passport,
    ];

    /// Category key used in caller-supplied overrides
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Card => "card",
            IdentifierKind::Aadhaar => "aadhaar",
            IdentifierKind::Pan => "pan",
            IdentifierKind::DrivingLicense => "driving_license",
            IdentifierKind::VoterId => "voter_id",
            IdentifierKind::Passport => "passport",
        }
    }
}

impl FromStr for IdentifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "card" | "credit_card" | "payment_card" => Ok(IdentifierKind::Card),
            "aadhaar" | "aadhar" => Ok(IdentifierKind::Aadhaar),
            "pan" => Ok(IdentifierKind::Pan),
            "driving_license" | "driving_licence" | "license" | "dl" => {
                Ok(IdentifierKind::DrivingLicense)
            }
            "voter_id" | "epic" => Ok(IdentifierKind::VoterId),
            "passport" => Ok(IdentifierKind::Passport),
            _ => Err(format!("unknown identifier category '{}'", s)),
        }
    }
}

/// What a span matched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Entity(EntityKind),
    Identifier(IdentifierKind),
    /// A recognizer label with no known category
    Unknown(String),
}

impl EntityLabel {
    pub fn from_recognizer(label: &str) -> Self {
        match EntityKind::from_recognizer_label(label) {
            Some(kind) => EntityLabel::Entity(kind),
            None => EntityLabel::Unknown(label.to_string()),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Entity(kind) => f.write_str(kind.as_str()),
            EntityLabel::Identifier(kind) => f.write_str(kind.as_str()),
            EntityLabel::Unknown(raw) => write!(f, "unknown:{}", raw),
        }
    }
}

impl From<EntityKind> for EntityLabel {
    fn from(kind: EntityKind) -> Self {
        EntityLabel::Entity(kind)
    }
}

impl From<IdentifierKind> for EntityLabel {
    fn from(kind: IdentifierKind) -> Self {
        EntityLabel::Identifier(kind)
    }
}
