//! Directory user records and the operator search filter.

use rolescope_core::UserPrincipalName;
use serde::{Deserialize, Deserializer, Serialize};

/// One user account as returned by the directory's reduced field projection.
///
/// Missing or null fields are normalized to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Human readable name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    /// Primary SMTP address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mail: String,
    /// Sign-in name, used as the join key for role lookups.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_principal_name: String,
}

impl UserRecord {
    /// Creates a user record from its three projected fields.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        mail: impl Into<String>,
        user_principal_name: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            mail: mail.into(),
            user_principal_name: user_principal_name.into(),
        }
    }

    /// Returns the principal name when the record carries one.
    #[must_use]
    pub fn principal_name(&self) -> Option<UserPrincipalName> {
        UserPrincipalName::new(self.user_principal_name.as_str()).ok()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Case-insensitive substring query over name, mail and principal name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    needle: String,
}

impl UserQuery {
    /// Creates a query from operator input. `None` and `""` match everything.
    #[must_use]
    pub fn new(text: Option<&str>) -> Self {
        Self {
            needle: text.unwrap_or_default().to_lowercase(),
        }
    }

    /// Returns true when the query matches every record.
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns true when the record contains the query in any searchable field.
    #[must_use]
    pub fn matches(&self, record: &UserRecord) -> bool {
        if self.is_match_all() {
            return true;
        }

        [
            record.display_name.as_str(),
            record.mail.as_str(),
            record.user_principal_name.as_str(),
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(self.needle.as_str()))
    }

    /// Derives the filtered view, preserving input order. The input is untouched.
    #[must_use]
    pub fn filter(&self, records: &[UserRecord]) -> Vec<UserRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}
