//! Human record as served by the listing endpoint.

use crate::core::error::DomainError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A person that can be matched with a pet (Entity)
///
/// Field names follow the wire format (`firstName`, `dateOfBirth`, ...).
/// Some backends omit `id`; it then defaults to `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Human {
    #[serde(default)]
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    /// ISO date string, kept verbatim for display.
    pub date_of_birth: String,
    pub has_allergies: bool,
    #[serde(default)]
    pub bio: String,
}

impl Human {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Parse `date_of_birth` as a plain date (`1990-03-12`) or an RFC 3339
    /// timestamp. Returns `None` when neither form matches.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let raw = self.date_of_birth.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// Check the fields the listing relies on.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() && self.last_name.trim().is_empty() {
            return Err(DomainError::InvalidRecord(format!(
                "record {} has no name",
                self.id
            )));
        }
        if self.birth_date().is_none() {
            return Err(DomainError::InvalidRecord(format!(
                "{}: unparseable dateOfBirth '{}'",
                self.full_name(),
                self.date_of_birth
            )));
        }
        Ok(())
    }
}
