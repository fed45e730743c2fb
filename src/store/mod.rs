//! # Identity Store
//!
//! Exact-match storage of identity records keyed by hashed phone number.
//!
//! The lookup path only ever reads. Provisioning (`insert`, `insert_all`)
//! happens before the server is exposed, through the fixture loader.
//!
//! `Ok(None)` from [`IdentityStore::find_by_hash`] means "no such record";
//! storage failures come back as `Err(Error::DatabaseError)` and must not be
//! confused with it.

mod database;
mod schema;

pub use database::IdentityDatabase;
pub use schema::SCHEMA_VERSION;

use crate::error::Result;
use crate::identity::{IdentityRecord, NewIdentity};

/// Storage backend for identity records.
pub trait IdentityStore: Send + Sync {
    /// Fetch the record for `hashed_phone`, if any.
    ///
    /// The key is opaque; no normalisation is applied before comparison.
    fn find_by_hash(&self, hashed_phone: &str) -> Result<Option<IdentityRecord>>;

    /// Insert a new record and return it with its assigned ID.
    fn insert(&self, identity: &NewIdentity) -> Result<IdentityRecord>;

    /// Insert several records, all or nothing.
    ///
    /// The default implementation is not atomic; backends with transactions
    /// should override it.
    fn insert_all(&self, identities: &[NewIdentity]) -> Result<Vec<IdentityRecord>> {
        identities.iter().map(|identity| self.insert(identity)).collect()
    }

    /// Total number of records.
    fn count(&self) -> Result<u64>;

    /// Number of verified records.
    fn verified_count(&self) -> Result<u64>;
}
