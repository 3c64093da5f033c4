//! Person record model.

use serde::{Deserialize, Serialize};

/// A person row from the import target table.
///
/// Every field except the identifier is optional; rows narrower than the
/// full column set simply leave the trailing fields unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Person identifier (the `personId` column).
    #[serde(rename = "personId")]
    pub person_id: i64,

    /// First name.
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Creation timestamp, as stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PersonRecord {
    /// Builds a record from a positional row.
    ///
    /// Column order: personId, firstName, lastName, email, created
    /// timestamp. Missing or null trailing columns map to `None`; a row
    /// without a readable identifier yields no record.
    pub fn from_row(row: &[serde_json::Value]) -> Option<Self> {
        let person_id = row.first()?.as_i64()?;

        let text_at = |idx: usize| {
            row.get(idx)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        Some(Self {
            person_id,
            first_name: text_at(1),
            last_name: text_at(2),
            email: text_at(3),
            created_at: text_at(4),
        })
    }
}
