use std::{fmt, str::FromStr};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ADDITIONAL_PHONE_PREFIX: &str = "additionalPhones_";

/// Single-valued contact fields that can receive a dropped token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    FirstName,
    LastName,
    Nickname,
    Position,
    Phone,
    Email,
    Company,
    Website,
    Notes,
}

impl ContactField {
    pub const ALL: [ContactField; 9] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Nickname,
        ContactField::Position,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Company,
        ContactField::Website,
        ContactField::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::Nickname => "nickname",
            ContactField::Position => "position",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Company => "company",
            ContactField::Website => "website",
            ContactField::Notes => "notes",
        }
    }
}

/// Identifier of a drop zone: a named field or one additional phone slot.
///
/// The string form (`"email"`, `"additionalPhones_2"`) is what the layout
/// layer uses when it reports bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropTarget {
    Field(ContactField),
    AdditionalPhone(usize),
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Field(field) => f.write_str(field.as_str()),
            DropTarget::AdditionalPhone(index) => {
                write!(f, "{ADDITIONAL_PHONE_PREFIX}{index}")
            }
        }
    }
}

impl FromStr for DropTarget {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(index) = value.strip_prefix(ADDITIONAL_PHONE_PREFIX) {
            let index = index
                .parse::<usize>()
                .with_context(|| format!("invalid additional phone index in '{value}'"))?;
            return Ok(DropTarget::AdditionalPhone(index));
        }

        ContactField::ALL
            .iter()
            .find(|field| field.as_str() == value)
            .map(|field| DropTarget::Field(*field))
            .ok_or_else(|| anyhow!("unknown field id '{value}'"))
    }
}

impl From<ContactField> for DropTarget {
    fn from(field: ContactField) -> Self {
        DropTarget::Field(field)
    }
}

impl Serialize for DropTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DropTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
