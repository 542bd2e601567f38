//! Destination store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the whole destination collection as one JSON blob under a
//!   fixed key.
//! - Implement point mutations as load -> mutate -> save over that blob.
//!
//! # Invariants
//! - A missing or corrupt blob reads as an empty collection, never an
//!   error surfaced to the user.
//! - Write failures propagate so callers cannot assume durability.
//! - An absent id on remove/toggle is a silent no-op, not an error.
//!
//! Concurrent writers are out of contract: two sessions mutating the same
//! database race on last-save-wins. The store is scoped to one device and
//! one user; a multi-writer port would need per-record rows plus a version
//! token.

use crate::db::DbError;
use crate::model::destination::Destination;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key the serialized destination collection lives under.
pub const DESTINATIONS_KEY: &str = "travel_destinations";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for destination persistence.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "destination collection serialization failed: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Storage interface the registry writes through.
///
/// Point mutations return the collection exactly as persisted so callers
/// can mirror durable truth instead of recomputing it.
pub trait DestinationStore {
    /// Loads the persisted collection. Missing or unreadable data reads as
    /// empty; only transport failures surface as errors.
    fn load(&self) -> StoreResult<Vec<Destination>>;
    /// Serializes and overwrites the persisted collection wholesale.
    fn save(&self, destinations: &[Destination]) -> StoreResult<()>;
    /// Appends one destination and returns the persisted collection.
    fn add(&self, destination: Destination) -> StoreResult<Vec<Destination>>;
    /// Removes the matching record. Absent ids are a silent no-op.
    fn remove(&self, id: &str) -> StoreResult<Vec<Destination>>;
    /// Flips bucket-list membership on the matching record.
    fn toggle_bucket_list(&self, id: &str) -> StoreResult<Vec<Destination>>;
    /// Flips visited state on the matching record, syncing its visited
    /// date.
    fn toggle_visited(&self, id: &str) -> StoreResult<Vec<Destination>>;
    /// Deletes the stored key entirely; the next load reads as empty.
    fn clear(&self) -> StoreResult<()>;
}

/// SQLite-backed destination store.
pub struct SqliteDestinationStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDestinationStore<'conn> {
    /// Constructs a store from a migrated, ready connection.
    ///
    /// # Errors
    /// - Rejects connections whose schema version predates this binary.
    /// - Rejects connections missing the `kv_store` table.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn mutate(
        &self,
        apply: impl FnOnce(&mut Vec<Destination>),
    ) -> StoreResult<Vec<Destination>> {
        let mut destinations = self.load()?;
        apply(&mut destinations);
        self.save(&destinations)?;
        Ok(destinations)
    }
}

impl DestinationStore for SqliteDestinationStore<'_> {
    fn load(&self) -> StoreResult<Vec<Destination>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [DESTINATIONS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = blob else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Destination>>(&raw) {
            Ok(destinations) => Ok(destinations),
            Err(err) => {
                warn!(
                    "event=destinations_load module=store status=degraded error_code=corrupt_blob error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, destinations: &[Destination]) -> StoreResult<()> {
        let blob = serde_json::to_string(destinations)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![DESTINATIONS_KEY, blob],
        )?;
        Ok(())
    }

    fn add(&self, destination: Destination) -> StoreResult<Vec<Destination>> {
        self.mutate(|destinations| destinations.push(destination))
    }

    fn remove(&self, id: &str) -> StoreResult<Vec<Destination>> {
        self.mutate(|destinations| destinations.retain(|d| d.id != id))
    }

    fn toggle_bucket_list(&self, id: &str) -> StoreResult<Vec<Destination>> {
        self.mutate(|destinations| {
            if let Some(destination) = destinations.iter_mut().find(|d| d.id == id) {
                destination.toggle_bucket_list();
            }
        })
    }

    fn toggle_visited(&self, id: &str) -> StoreResult<Vec<Destination>> {
        self.mutate(|destinations| {
            if let Some(destination) = destinations.iter_mut().find(|d| d.id == id) {
                destination.toggle_visited();
            }
        })
    }

    fn clear(&self) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM kv_store WHERE key = ?1;",
            [DESTINATIONS_KEY],
        )?;
        info!("event=destinations_clear module=store status=ok");
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS (
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_store'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(StoreError::MissingRequiredTable("kv_store"));
    }

    Ok(())
}
