//! Fixture loader.
//!
//! Provisions the identity store before the server starts accepting
//! lookups. Fixtures carry raw phone numbers; they are hashed here and the
//! raw number is dropped, so the store only ever sees digests.
//!
//! Seeding is conditional: a store that already holds records is left
//! untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hashing::hash_phone;
use crate::identity::NewIdentity;
use crate::store::IdentityStore;

/// A provisioning entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Raw phone number in any formatting (`+20 123 456 7890`).
    pub phone: String,
    pub full_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub verified: bool,
}

impl Fixture {
    pub fn to_new_identity(&self) -> NewIdentity {
        NewIdentity {
            hashed_phone: hash_phone(&self.phone),
            full_name: self.full_name.clone(),
            job_title: self.job_title.clone(),
            is_verified: self.verified,
            trust_score: self.trust_score,
        }
    }
}

/// Built-in demo identities.
pub fn demo_fixtures() -> Vec<Fixture> {
    vec![
        Fixture {
            phone: "+201234567890".to_string(),
            full_name: "Dr. Ahmed Ali".to_string(),
            job_title: Some("Cardiologist (Verified)".to_string()),
            trust_score: Some(9.8),
            verified: true,
        },
        Fixture {
            phone: "+201112223333".to_string(),
            full_name: "Fast Delivery Co.".to_string(),
            job_title: Some("Official Courier".to_string()),
            trust_score: Some(8.5),
            verified: true,
        },
        Fixture {
            phone: "+201555555555".to_string(),
            full_name: "Unknown Spammer".to_string(),
            job_title: Some("Suspected Fraud".to_string()),
            trust_score: Some(1.2),
            verified: false,
        },
    ]
}

/// Read fixtures from a JSON file holding an array of [`Fixture`].
pub fn load_fixture_file(path: &Path) -> Result<Vec<Fixture>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::FixtureError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| Error::FixtureError(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Insert `fixtures` if the store is empty.
///
/// Returns the number of records inserted (0 when the store was already
/// populated). Either every fixture is inserted or none is.
pub fn seed_if_empty(store: &dyn IdentityStore, fixtures: &[Fixture]) -> Result<usize> {
    let existing = store.count()?;
    if existing > 0 {
        tracing::info!(existing, "Identity store already populated, skipping seed");
        return Ok(0);
    }

    let identities: Vec<NewIdentity> = fixtures.iter().map(Fixture::to_new_identity).collect();
    let inserted = store.insert_all(&identities)?;

    tracing::info!(
        inserted = inserted.len(),
        verified = inserted.iter().filter(|r| r.is_verified).count(),
        "Identity store seeded"
    );
    Ok(inserted.len())
}
