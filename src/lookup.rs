//! Lookup service.
//!
//! Resolves a hashed phone number to the redacted view of a verified
//! identity. Unknown and unverified numbers produce the same
//! [`Error::NotFound`], so a caller cannot enumerate unverified entries.
//!
//! The queried hash is never logged here.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::identity::{LookupRequest, LookupResult};
use crate::store::IdentityStore;

/// Stateless lookup over an injected store handle.
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn IdentityStore>,
}

impl LookupService {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// The store this service reads from.
    pub fn store(&self) -> &Arc<dyn IdentityStore> {
        &self.store
    }

    /// Look up a verified identity.
    ///
    /// - missing or empty `hashed_phone` → `MissingHashedPhone`, store untouched
    /// - no record, or record not verified → `NotFound`
    /// - storage failure → `DatabaseError`, propagated as is
    pub fn lookup(&self, request: &LookupRequest) -> Result<LookupResult> {
        let hashed_phone = match request.hashed_phone.as_deref() {
            Some(h) if !h.is_empty() => h,
            _ => return Err(Error::MissingHashedPhone),
        };

        match self.store.find_by_hash(hashed_phone)? {
            Some(record) if record.is_verified => Ok(LookupResult::from(&record)),
            _ => Err(Error::NotFound),
        }
    }
}
