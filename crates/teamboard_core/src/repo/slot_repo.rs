//! Slot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist one JSON snapshot per store under a fixed slot key.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - `save_slot` replaces the whole payload of a slot; there are no partial writes.
//! - Read paths reject payloads that do not decode instead of masking them.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for slot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Snapshot could not be serialized.
    Encode {
        slot: String,
        source: serde_json::Error,
    },
    /// Stored payload is not a valid snapshot.
    Decode {
        slot: String,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode { slot, source } => {
                write!(f, "failed to encode snapshot for slot `{slot}`: {source}")
            }
            Self::Decode { slot, source } => {
                write!(f, "invalid persisted snapshot in slot `{slot}`: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value storage of raw snapshot payloads.
pub trait SlotRepository {
    fn load_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn save_slot(&self, key: &str, payload: &str) -> RepoResult<()>;
    /// Returns whether a slot existed.
    fn delete_slot(&self, key: &str) -> RepoResult<bool>;
    /// Slot keys sorted ascending.
    fn list_slots(&self) -> RepoResult<Vec<String>>;
}

/// Loads and decodes one snapshot; `None` when the slot was never written.
pub fn load_snapshot<T, R>(repo: &R, key: &str) -> RepoResult<Option<T>>
where
    T: DeserializeOwned,
    R: SlotRepository + ?Sized,
{
    let Some(payload) = repo.load_slot(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&payload)
        .map(Some)
        .map_err(|source| RepoError::Decode {
            slot: key.to_string(),
            source,
        })
}

/// Encodes and writes one snapshot, replacing the previous payload.
pub fn save_snapshot<T, R>(repo: &R, key: &str, snapshot: &T) -> RepoResult<()>
where
    T: Serialize,
    R: SlotRepository + ?Sized,
{
    let payload = serde_json::to_string(snapshot).map_err(|source| RepoError::Encode {
        slot: key.to_string(),
        source,
    })?;
    repo.save_slot(key, &payload)
}

/// SQLite-backed slot repository.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `DbError::SchemaNotReady` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let db_version = current_version(conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::SchemaNotReady {
                db_version,
                expected,
            }
            .into());
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn load_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM storage_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        debug!(
            "event=slot_load module=repo slot={key} found={}",
            payload.is_some()
        );
        Ok(payload)
    }

    fn save_slot(&self, key: &str, payload: &str) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO storage_slots (slot_key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        );
        match result {
            Ok(_) => {
                debug!(
                    "event=slot_save module=repo status=ok slot={key} bytes={}",
                    payload.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=slot_save module=repo status=error slot={key} error={err}");
                Err(err.into())
            }
        }
    }

    fn delete_slot(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM storage_slots WHERE slot_key = ?1;", [key])?;
        Ok(changed > 0)
    }

    fn list_slots(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT slot_key FROM storage_slots ORDER BY slot_key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
