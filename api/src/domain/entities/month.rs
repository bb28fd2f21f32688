//! Month domain entity
//!
//! A calendar month label such as `2025-09`. Months are created lazily the
//! first time a pull request is filed under them and are unique by label.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthId(pub Uuid);

impl MonthId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MonthId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MonthId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MonthId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tracked calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Month {
    pub id: MonthId,
    /// Label in `YYYY-MM` form, unique across months
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Check that a label is a real calendar month written as `YYYY-MM`
pub fn validate_month_label(label: &str) -> Result<(), DomainError> {
    let well_formed = label.len() == 7
        && label
            .char_indices()
            .all(|(i, c)| if i == 4 { c == '-' } else { c.is_ascii_digit() })
        && NaiveDate::parse_from_str(&format!("{}-01", label), "%Y-%m-%d").is_ok();

    if well_formed {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "Invalid month '{}', expected YYYY-MM",
            label
        )))
    }
}

/// The ordered set of month labels that aggregate views consider authoritative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedMonths(Vec<String>);

impl TrackedMonths {
    /// Build from labels, validating each one and dropping duplicates
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut months: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            validate_month_label(&label)?;
            if !months.contains(&label) {
                months.push(label);
            }
        }

        if months.is_empty() {
            return Err(DomainError::Validation(
                "At least one tracked month is required".into(),
            ));
        }

        Ok(Self(months))
    }

    /// Parse a comma separated list such as `2025-09,2025-10`
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::new(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|m| m == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for TrackedMonths {
    /// The two months the contribution drive originally ran over
    fn default() -> Self {
        Self(vec!["2025-09".to_string(), "2025-10".to_string()])
    }
}

impl std::fmt::Display for TrackedMonths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}
