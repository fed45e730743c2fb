//! Identity types.
//!
//! Stored records, insertion payloads, and the redacted view returned by a
//! lookup.

use serde::{Deserialize, Serialize};

/// Status marker carried by every successful lookup.
pub const VERIFIED_STATUS: &str = "Verified";

/// An identity record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Store-assigned row ID. Never leaves the server.
    pub id: i64,
    /// SHA-256 hex digest of the digits-only phone number.
    pub hashed_phone: String,
    pub full_name: String,
    pub job_title: Option<String>,
    /// Unverified records are invisible to lookups.
    pub is_verified: bool,
    /// Externally assigned; no enforced range.
    pub trust_score: f64,
}

/// Payload for provisioning a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIdentity {
    pub hashed_phone: String,
    pub full_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// Defaults to 0.0 when unset.
    #[serde(default)]
    pub trust_score: Option<f64>,
}

/// Incoming lookup request.
///
/// The key is optional at the type level so that an absent key reaches the
/// service and is rejected as `MissingHashedPhone` rather than as a decode
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupRequest {
    #[serde(default, alias = "hashedPhone")]
    pub hashed_phone: Option<String>,
}

impl LookupRequest {
    pub fn new(hashed_phone: impl Into<String>) -> Self {
        Self {
            hashed_phone: Some(hashed_phone.into()),
        }
    }
}

/// Fixed status of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupStatus {
    Verified,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Verified => VERIFIED_STATUS,
        }
    }
}

/// Redacted view of a verified record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub full_name: String,
    /// Empty when the record has no title.
    pub job_title: String,
    pub trust_score: f64,
    pub status: LookupStatus,
}

impl From<&IdentityRecord> for LookupResult {
    fn from(record: &IdentityRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            job_title: record.job_title.clone().unwrap_or_default(),
            trust_score: record.trust_score,
            status: LookupStatus::Verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_request_deserialization() {
        let request: LookupRequest =
            serde_json::from_str(r#"{"hashed_phone": "abc123"}"#).unwrap();
        assert_eq!(request.hashed_phone.as_deref(), Some("abc123"));

        let request: LookupRequest =
            serde_json::from_str(r#"{"hashedPhone": "abc123"}"#).unwrap();
        assert_eq!(request.hashed_phone.as_deref(), Some("abc123"));

        let request: LookupRequest = serde_json::from_str("{}").unwrap();
        assert!(request.hashed_phone.is_none());
    }

    #[test]
    fn test_lookup_result_redacts_id() {
        let record = IdentityRecord {
            id: 42,
            hashed_phone: "ab".repeat(32),
            full_name: "Fast Delivery Co.".to_string(),
            job_title: None,
            is_verified: true,
            trust_score: 8.5,
        };

        let json = serde_json::to_value(LookupResult::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "full_name": "Fast Delivery Co.",
                "job_title": "",
                "trust_score": 8.5,
                "status": "Verified",
            })
        );
        assert!(json.get("id").is_none());
        assert!(json.get("hashed_phone").is_none());
    }

    #[test]
    fn test_new_identity_defaults() {
        let json = format!(r#"{{"hashed_phone": "{}", "full_name": "A"}}"#, "0".repeat(64));
        let new: NewIdentity = serde_json::from_str(&json).unwrap();
        assert!(!new.is_verified);
        assert!(new.trust_score.is_none());
        assert!(new.job_title.is_none());
    }
}
