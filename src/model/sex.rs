use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Phenopacket `Sex` enumeration. Protobuf JSON may carry either the value
/// name or its number, so both are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    #[default]
    UnknownSex,
    Female,
    Male,
    OtherSex,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::UnknownSex => "UNKNOWN_SEX",
            Sex::Female => "FEMALE",
            Sex::Male => "MALE",
            Sex::OtherSex => "OTHER_SEX",
        }
    }

    pub fn from_number(value: u64) -> Option<Self> {
        match value {
            0 => Some(Sex::UnknownSex),
            1 => Some(Sex::Female),
            2 => Some(Sex::Male),
            3 => Some(Sex::OtherSex),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNKNOWN_SEX" => Some(Sex::UnknownSex),
            "FEMALE" => Some(Sex::Female),
            "MALE" => Some(Sex::Male),
            "OTHER_SEX" => Some(Sex::OtherSex),
            _ => None,
        }
    }

    /// Upper-case token sent to the service; `None` for `UNKNOWN_SEX`.
    pub fn token(&self) -> Option<String> {
        match self {
            Sex::UnknownSex => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

struct SexVisitor;

impl<'de> Visitor<'de> for SexVisitor {
    type Value = Sex;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sex name (UNKNOWN_SEX, FEMALE, MALE, OTHER_SEX) or number 0-3")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Sex, E> {
        Sex::from_name(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Sex, E> {
        Sex::from_number(v).ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Sex, E> {
        u64::try_from(v)
            .ok()
            .and_then(Sex::from_number)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SexVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/sex.rs"]
mod tests;
