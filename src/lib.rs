//! TrustCaller
//!
//! Caller-identity lookup: a client hashes a phone number locally, sends the
//! digest, and gets back the name, role and trust score of the owner if the
//! number belongs to a verified identity.
//!
//! **Privacy**: the server never receives or stores raw phone numbers, and it
//! answers "unknown" and "known but unverified" identically.

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod hashing;
pub mod identity;
pub mod lookup;
pub mod server;
pub mod store;

pub use config::{LogFormat, ServerConfig};
pub use error::{Error, ErrorCategory, Result};
pub use identity::{IdentityRecord, LookupRequest, LookupResult, LookupStatus, NewIdentity};
pub use lookup::LookupService;
pub use store::{IdentityDatabase, IdentityStore};
