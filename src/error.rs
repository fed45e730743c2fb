//! # Error Handling
//!
//! Error types for the TrustCaller lookup server.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                      │
//! │  │                                                                      │
//! │  ├── Request Errors (BadRequest)                                        │
//! │  │   ├── MissingHashedPhone    - hashed_phone absent or empty           │
//! │  │   └── MalformedRequest      - body is not the expected JSON object   │
//! │  │                                                                      │
//! │  ├── Lookup Errors (NotFound)                                           │
//! │  │   └── NotFound              - unknown OR unverified, never split     │
//! │  │                                                                      │
//! │  ├── Provisioning Errors                                                │
//! │  │   ├── DuplicateHash         - hashed_phone already present           │
//! │  │   ├── InvalidRecord         - empty name / malformed digest          │
//! │  │   └── FixtureError          - fixture file unreadable or invalid     │
//! │  │                                                                      │
//! │  └── Infrastructure Errors                                              │
//! │      └── DatabaseError         - SQLite open/query/commit failure       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Infrastructure failures are never folded into `NotFound`: an outage must
//! not look like "number not found" to the caller.

use thiserror::Error;

/// Result type alias for TrustCaller operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for TrustCaller
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Request Errors
    // ========================================================================

    /// The lookup request carried no usable `hashed_phone`
    #[error("Missing hashed_phone")]
    MissingHashedPhone,

    /// The request body could not be decoded
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    // ========================================================================
    // Lookup Errors
    // ========================================================================

    /// No record for the hash, or the record is not verified
    #[error("User not found or unverified")]
    NotFound,

    // ========================================================================
    // Provisioning Errors
    // ========================================================================

    /// A record with this hashed phone already exists
    #[error("An identity with hashed phone {0} already exists")]
    DuplicateHash(String),

    /// The record violates the data model
    #[error("Invalid identity record: {0}")]
    InvalidRecord(String),

    /// Fixture source could not be loaded
    #[error("Fixture error: {0}")]
    FixtureError(String),

    // ========================================================================
    // Infrastructure Errors
    // ========================================================================

    /// Underlying storage failure
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Coarse error category, used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadRequest,
    NotFound,
    Conflict,
    Unprocessable,
    Infrastructure,
}

impl Error {
    /// The category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingHashedPhone | Error::MalformedRequest(_) => ErrorCategory::BadRequest,
            Error::NotFound => ErrorCategory::NotFound,
            Error::DuplicateHash(_) => ErrorCategory::Conflict,
            Error::InvalidRecord(_) => ErrorCategory::Unprocessable,
            Error::FixtureError(_) | Error::DatabaseError(_) => ErrorCategory::Infrastructure,
        }
    }

    /// Whether this error came from the storage layer or the host rather
    /// than from the caller's input.
    pub fn is_infrastructure(&self) -> bool {
        self.category() == ErrorCategory::Infrastructure
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::DatabaseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_messages() {
        assert_eq!(Error::MissingHashedPhone.to_string(), "Missing hashed_phone");
        assert_eq!(Error::NotFound.to_string(), "User not found or unverified");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            Error::MissingHashedPhone.category(),
            ErrorCategory::BadRequest
        );
        assert_eq!(
            Error::MalformedRequest("eof".into()).category(),
            ErrorCategory::BadRequest
        );
        assert_eq!(Error::NotFound.category(), ErrorCategory::NotFound);
        assert_eq!(
            Error::DuplicateHash("ab".into()).category(),
            ErrorCategory::Conflict
        );
        assert!(Error::DatabaseError("disk I/O error".into()).is_infrastructure());
        assert!(!Error::NotFound.is_infrastructure());
    }

    #[test]
    fn test_rusqlite_errors_are_infrastructure() {
        let err: Error = rusqlite::Error::InvalidQuery.into();
        assert!(err.is_infrastructure());
    }
}
