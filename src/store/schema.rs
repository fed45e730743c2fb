//! # Database Schema
//!
//! SQL schema definitions for the identity store.
//!
//! ```text
//! ┌──────────────────────────┐
//! │          users           │
//! ├──────────────────────────┤
//! │ id            PK         │
//! │ hashed_phone  UNIQUE     │
//! │ full_name                │
//! │ job_title     NULL       │
//! │ is_verified              │
//! │ trust_score              │
//! └──────────────────────────┘
//! ```

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL to create all tables
pub const CREATE_TABLES: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Identity records, one per hashed phone number
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    -- SHA-256 hex digest of the digits-only phone number (64 chars)
    hashed_phone TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL,
    job_title TEXT,
    -- 0 = unverified, 1 = verified
    is_verified INTEGER NOT NULL DEFAULT 0,
    trust_score REAL NOT NULL DEFAULT 0.0
);

CREATE INDEX IF NOT EXISTS idx_users_verified ON users(is_verified);
"#;
