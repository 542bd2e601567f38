//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the destination read views and mutation entry points to Dart
//!   via FRB.
//! - Own composition-root concerns: db path resolution and id generation.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutation answers with an envelope carrying `ok` + message, so
//!   the UI can surface "failed to save" without parsing errors.

use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;
use wanderlist_core::db::open_db;
use wanderlist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, Destination,
    DestinationRegistry, NewDestination, SqliteDestinationStore,
};

const DB_FILE_NAME: &str = "wanderlist.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Exposes the core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Destination record as shown to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationItem {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: String,
    pub image_url: String,
    pub is_in_bucket_list: bool,
    pub is_visited: bool,
    /// RFC 3339 timestamp.
    pub date_added: String,
    /// RFC 3339 timestamp, present exactly when `is_visited` is true.
    pub date_visited: Option<String>,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// List envelope for the destination read views.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationListResponse {
    /// Whether the underlying store could be read.
    pub ok: bool,
    /// Records in canonical order (empty on failure).
    pub items: Vec<DestinationItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for mutation calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the affected destination, when one applies.
    pub destination_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, destination_id: Option<String>) -> Self {
        Self {
            ok: true,
            destination_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            destination_id: None,
            message: message.into(),
        }
    }
}

/// Lists the full destination collection in canonical order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_destinations() -> DestinationListResponse {
    list_view("list_destinations", |registry| {
        registry.destinations().iter().map(to_item).collect()
    })
}

/// Lists destinations currently on the bucket list.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_bucket_list() -> DestinationListResponse {
    list_view("list_bucket_list", |registry| {
        registry.bucket_list().into_iter().map(to_item).collect()
    })
}

/// Lists destinations marked visited.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_visited() -> DestinationListResponse {
    list_view("list_visited", |registry| {
        registry
            .visited_destinations()
            .into_iter()
            .map(to_item)
            .collect()
    })
}

/// Adds a destination from the add-screen form fields.
///
/// The unique id is generated here; the core treats it as opaque.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Validation failures (blank name/country) reject before any I/O.
#[flutter_rust_bridge::frb(sync)]
pub fn add_destination(
    name: String,
    country: String,
    description: Option<String>,
    image_url: Option<String>,
    notes: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> ActionResponse {
    let request = NewDestination {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        country: country.trim().to_string(),
        description,
        image_url,
        notes,
        latitude,
        longitude,
    };

    let destination = match Destination::create(request) {
        Ok(destination) => destination,
        Err(err) => return ActionResponse::failure(format!("add_destination rejected: {err}")),
    };
    let destination_id = destination.id.clone();

    match with_registry(move |registry| registry.add_destination(destination)) {
        Ok(Ok(())) => ActionResponse::success("Destination added.", Some(destination_id)),
        Ok(Err(err)) => ActionResponse::failure(format!("add_destination failed: {err}")),
        Err(err) => ActionResponse::failure(format!("add_destination failed: {err}")),
    }
}

/// Removes a destination by id. Absent ids succeed as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_destination(id: String) -> ActionResponse {
    mutation("remove_destination", "Destination removed.", move |registry| {
        registry.remove_destination(&id)
    })
}

/// Toggles bucket-list membership by id. Absent ids succeed as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_bucket_list(id: String) -> ActionResponse {
    mutation("toggle_bucket_list", "Bucket list updated.", move |registry| {
        registry.toggle_bucket_list(&id)
    })
}

/// Toggles visited state by id, syncing the visited date. Absent ids
/// succeed as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_visited(id: String) -> ActionResponse {
    mutation("toggle_visited", "Visited state updated.", move |registry| {
        registry.toggle_visited(&id)
    })
}

/// Overwrites the stored collection with the built-in samples.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Destructive replace, not a merge.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn load_sample_data() -> ActionResponse {
    mutation("load_sample_data", "Sample destinations loaded.", |registry| {
        registry.load_initial_data()
    })
}

/// Clears all stored destinations. Irreversible.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_all_data() -> ActionResponse {
    mutation("reset_all_data", "All data cleared.", |registry| {
        registry.reset_all_data()
    })
}

fn list_view(
    label: &str,
    f: impl FnOnce(&mut DestinationRegistry<SqliteDestinationStore<'_>>) -> Vec<DestinationItem>,
) -> DestinationListResponse {
    match with_registry(f) {
        Ok(items) => {
            let message = if items.is_empty() {
                "No destinations.".to_string()
            } else {
                format!("{} destination(s).", items.len())
            };
            DestinationListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => DestinationListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("{label} failed: {err}"),
        },
    }
}

fn mutation(
    label: &str,
    success_message: &str,
    f: impl FnOnce(
        &mut DestinationRegistry<SqliteDestinationStore<'_>>,
    ) -> wanderlist_core::StoreResult<()>,
) -> ActionResponse {
    match with_registry(f) {
        Ok(Ok(())) => ActionResponse::success(success_message, None),
        Ok(Err(err)) => ActionResponse::failure(format!("{label} failed: {err}")),
        Err(err) => ActionResponse::failure(format!("{label} failed: {err}")),
    }
}

fn with_registry<T>(
    f: impl FnOnce(&mut DestinationRegistry<SqliteDestinationStore<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("destination DB open failed: {err}"))?;
    let store = SqliteDestinationStore::try_new(&conn)
        .map_err(|err| format!("destination store init failed: {err}"))?;
    let mut registry = DestinationRegistry::new(store);
    registry.load_destinations();
    Ok(f(&mut registry))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("WANDERLIST_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn to_item(destination: &Destination) -> DestinationItem {
    DestinationItem {
        id: destination.id.clone(),
        name: destination.name.clone(),
        country: destination.country.clone(),
        description: destination.description.clone(),
        image_url: destination.image_url.clone(),
        is_in_bucket_list: destination.is_in_bucket_list,
        is_visited: destination.is_visited,
        date_added: destination.date_added.to_rfc3339(),
        date_visited: destination.date_visited.map(|date| date.to_rfc3339()),
        notes: destination.notes.clone(),
        latitude: destination.coordinates.map(|c| c.latitude),
        longitude: destination.coordinates.map(|c| c.longitude),
    }
}
