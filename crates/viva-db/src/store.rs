//! Storage handle as seen by request handlers.
//!
//! A `Store` is built once at start-up. Without a configured database, or when
//! the first open fails, it stays disabled for the life of the process: reads
//! degrade to empty results and writes fail with [`StoreError::Unavailable`].

use std::path::Path;

use tracing::{error, warn};
use viva_types::models::User;

use crate::Database;
use crate::models::UpsertUser;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage not available")]
    Unavailable,
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct Store {
    db: Option<Database>,
    owner_open_id: Option<String>,
}

impl Store {
    pub fn new(db: Database, owner_open_id: Option<String>) -> Self {
        Self {
            db: Some(db),
            owner_open_id,
        }
    }

    pub fn disabled(owner_open_id: Option<String>) -> Self {
        Self {
            db: None,
            owner_open_id,
        }
    }

    /// Open the database named by `url`. A missing url or a failed open yields
    /// a disabled store rather than an error.
    pub fn open(url: Option<&str>, owner_open_id: Option<String>) -> Self {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            warn!("[Database] No database configured, storage disabled");
            return Self::disabled(owner_open_id);
        };

        let path = url.strip_prefix("sqlite://").unwrap_or(url);
        match Database::open(Path::new(path)) {
            Ok(db) => Self::new(db, owner_open_id),
            Err(e) => {
                warn!("[Database] Failed to connect: {}", e);
                Self::disabled(owner_open_id)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }

    /// Run a read. Disabled storage yields `T::default()` (empty list, `None`).
    pub fn read<T, F>(&self, op: &'static str, f: F) -> Result<T, StoreError>
    where
        T: Default,
        F: FnOnce(&Database) -> anyhow::Result<T>,
    {
        let Some(db) = &self.db else {
            warn!("[Database] Cannot {}: database not available", op);
            return Ok(T::default());
        };
        f(db).map_err(|e| {
            error!("[Database] Failed to {}: {}", op, e);
            StoreError::Storage(e)
        })
    }

    /// Run a write. Disabled storage is an error.
    pub fn write<T, F>(&self, op: &'static str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Database) -> anyhow::Result<T>,
    {
        let Some(db) = &self.db else {
            warn!("[Database] Cannot {}: database not available", op);
            return Err(StoreError::Unavailable);
        };
        f(db).map_err(|e| {
            error!("[Database] Failed to {}: {}", op, e);
            StoreError::Storage(e)
        })
    }

    /// Upsert a user on login. Unlike other writes this is a logged no-op when
    /// storage is disabled, so sign-in keeps working in database-less dev runs.
    pub fn upsert_user(&self, user: &UpsertUser) -> Result<(), StoreError> {
        if user.open_id.is_empty() {
            return Err(StoreError::InvalidInput("User openId is required for upsert".into()));
        }
        let Some(db) = &self.db else {
            warn!("[Database] Cannot upsert user: database not available");
            return Ok(());
        };
        db.upsert_user(user, self.owner_open_id.as_deref()).map_err(|e| {
            error!("[Database] Failed to upsert user: {}", e);
            StoreError::Storage(e)
        })
    }

    pub fn get_user_by_open_id(&self, open_id: &str) -> Result<Option<User>, StoreError> {
        self.read("get user", |db| db.get_user_by_open_id(open_id))
    }
}
