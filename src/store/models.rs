//! Store Models
//!
//! Data structures for login records and their usage metadata.

use serde::{Deserialize, Serialize};

/// Opaque stable identifier for a login record.
///
/// The id never changes once assigned; every other field of a record may be
/// replaced wholesale by an update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored login record.
///
/// Held plaintext in memory; encryption at rest is the store's business,
/// not this type's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: RecordId,
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl CredentialRecord {
    /// Create a new record with a generated id
    pub fn new(
        hostname: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            hostname: hostname.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Usage metadata for a record, fetched independently of the record itself.
///
/// Supplementary only: absent until the first fetch completes, and possibly
/// absent forever if the store has nothing for the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Seconds since the epoch at which the password last changed
    pub password_last_changed_at: i64,
    /// Seconds since the epoch at which the record was last used, if ever
    pub last_used_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let rec = CredentialRecord::new("example.com", "alice", "secret");

        assert!(!rec.id.as_str().is_empty());
        assert_eq!(rec.hostname, "example.com");
        assert_eq!(rec.username, "alice");
        assert_eq!(rec.password, "secret");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::from("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }
}
