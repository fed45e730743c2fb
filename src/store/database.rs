//! # Database
//!
//! SQLite-backed identity store.
//!
//! ```text
//! ┌─────────────────┐
//! │  LookupService  │  find_by_hash (read-only)
//! │  FixtureLoader  │  insert_all (before serving)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ IdentityDatabase│  Arc<Mutex<Connection>>, locked per call
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   SQLite DB     │  - In-memory for tests / ephemeral runs
//! │                 │  - File for production
//! └─────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::schema;
use super::IdentityStore;
use crate::error::{Error, Result};
use crate::hashing::is_sha256_hex;
use crate::identity::{IdentityRecord, NewIdentity};

const SELECT_COLUMNS: &str =
    "SELECT id, hashed_phone, full_name, job_title, is_verified, trust_score FROM users";

/// The identity database handle
///
/// Cloning is cheap and shares the underlying connection. The connection is
/// locked for the duration of a single call and released when the guard
/// drops, on success and error paths alike.
#[derive(Clone)]
pub struct IdentityDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl IdentityDatabase {
    /// Open or create a database
    ///
    /// If path is None, creates an in-memory database.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p)
                .map_err(|e| Error::DatabaseError(format!("Failed to open database: {}", e)))?,
            None => Connection::open_in_memory().map_err(|e| {
                Error::DatabaseError(format!("Failed to create in-memory database: {}", e))
            })?,
        };

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;

        Ok(db)
    }

    /// In-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        let has_version_table: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::DatabaseError(format!("Failed to inspect schema: {}", e)))?;

        if !has_version_table {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(|e| Error::DatabaseError(format!("Failed to create tables: {}", e)))?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?)",
                params![schema::SCHEMA_VERSION],
            )
            .map_err(|e| Error::DatabaseError(format!("Failed to set schema version: {}", e)))?;

            tracing::info!(version = schema::SCHEMA_VERSION, "Identity schema created");
            return Ok(());
        }

        let version: i32 = conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| Error::DatabaseError(format!("Failed to read schema version: {}", e)))?
            .ok_or_else(|| Error::DatabaseError("schema_version table is empty".to_string()))?;

        if version != schema::SCHEMA_VERSION {
            return Err(Error::DatabaseError(format!(
                "Database schema version {} is not supported (expected {})",
                version,
                schema::SCHEMA_VERSION
            )));
        }

        tracing::debug!(version, "Identity schema up to date");
        Ok(())
    }
}

impl IdentityStore for IdentityDatabase {
    fn find_by_hash(&self, hashed_phone: &str) -> Result<Option<IdentityRecord>> {
        let conn = self.conn.lock();

        conn.query_row(
            &format!("{} WHERE hashed_phone = ?", SELECT_COLUMNS),
            params![hashed_phone],
            record_from_row,
        )
        .optional()
        .map_err(|e| Error::DatabaseError(format!("Failed to query identity: {}", e)))
    }

    fn insert(&self, identity: &NewIdentity) -> Result<IdentityRecord> {
        validate(identity)?;
        let conn = self.conn.lock();
        insert_on(&conn, identity)
    }

    fn insert_all(&self, identities: &[NewIdentity]) -> Result<Vec<IdentityRecord>> {
        for identity in identities {
            validate(identity)?;
        }

        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| Error::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // Dropping `tx` on an early return rolls everything back
        let mut records = Vec::with_capacity(identities.len());
        for identity in identities {
            records.push(insert_on(&tx, identity)?);
        }

        tx.commit()
            .map_err(|e| Error::DatabaseError(format!("Failed to commit identities: {}", e)))?;

        Ok(records)
    }

    fn count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(|e| Error::DatabaseError(format!("Failed to count identities: {}", e)))?;
        Ok(count as u64)
    }

    fn verified_count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE is_verified = 1",
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::DatabaseError(format!("Failed to count identities: {}", e)))?;
        Ok(count as u64)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<IdentityRecord> {
    Ok(IdentityRecord {
        id: row.get(0)?,
        hashed_phone: row.get(1)?,
        full_name: row.get(2)?,
        job_title: row.get(3)?,
        is_verified: row.get(4)?,
        trust_score: row.get(5)?,
    })
}

fn validate(identity: &NewIdentity) -> Result<()> {
    if identity.full_name.trim().is_empty() {
        return Err(Error::InvalidRecord("full_name must not be empty".into()));
    }
    if !is_sha256_hex(&identity.hashed_phone) {
        return Err(Error::InvalidRecord(
            "hashed_phone must be a 64-character lowercase hex SHA-256 digest".into(),
        ));
    }
    if let Some(score) = identity.trust_score {
        if !score.is_finite() {
            return Err(Error::InvalidRecord("trust_score must be finite".into()));
        }
    }
    Ok(())
}

fn insert_on(conn: &Connection, identity: &NewIdentity) -> Result<IdentityRecord> {
    let trust_score = identity.trust_score.unwrap_or(0.0);

    conn.execute(
        "INSERT INTO users (hashed_phone, full_name, job_title, is_verified, trust_score)
         VALUES (?, ?, ?, ?, ?)",
        params![
            identity.hashed_phone,
            identity.full_name,
            identity.job_title,
            identity.is_verified,
            trust_score,
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(ref err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Error::DuplicateHash(identity.hashed_phone.clone())
        }
        e => Error::DatabaseError(format!("Failed to insert identity: {}", e)),
    })?;

    Ok(IdentityRecord {
        id: conn.last_insert_rowid(),
        hashed_phone: identity.hashed_phone.clone(),
        full_name: identity.full_name.clone(),
        job_title: identity.job_title.clone(),
        is_verified: identity.is_verified,
        trust_score,
    })
}
