//! Persistence seams injected into the application.
//!
//! The scoring and analytics core never touches these; they exist so the
//! service layer can keep user accounts, sessions, and per-user dataset
//! snapshots behind explicit repository interfaces instead of ad hoc global
//! state. In-memory implementations live with the API service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::PersonnelRecord;

/// A user's most recent roster upload. Replaced wholesale on every ingest;
/// a reloaded snapshot flows through the same computation paths as fresh
/// data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub owner: String,
    pub uploaded_at: DateTime<Utc>,
    pub records: Vec<PersonnelRecord>,
}

/// Account identity. The password is an opaque comparand with no security
/// properties, matching the system this replaces; it is never logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("entry already exists")]
    Conflict,
    #[error("entry not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub trait DatasetStore: Send + Sync {
    /// Replace the owner's snapshot; prior data for that owner is dropped.
    fn save(&self, snapshot: DatasetSnapshot) -> Result<(), StoreError>;
    fn load(&self, owner: &str) -> Result<Option<DatasetSnapshot>, StoreError>;
}

pub trait UserStore: Send + Sync {
    fn register(&self, account: UserAccount) -> Result<(), StoreError>;
    fn find(&self, username: &str) -> Result<Option<UserAccount>, StoreError>;
}

pub trait SessionStore: Send + Sync {
    /// Open a session for the username and return its opaque token.
    fn open(&self, username: &str) -> Result<String, StoreError>;
    fn resolve(&self, token: &str) -> Result<Option<String>, StoreError>;
    fn close(&self, token: &str) -> Result<(), StoreError>;
}
