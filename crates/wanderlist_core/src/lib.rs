//! Core domain logic for Wanderlist.
//! This crate is the single source of truth for travel-tracking invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod seed;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::destination::{
    Coordinates, Destination, DestinationValidationError, NewDestination, DEFAULT_IMAGE_URL,
};
pub use registry::destination_registry::{DestinationRegistry, LoadState};
pub use seed::sample_destinations;
pub use store::destination_store::{
    DestinationStore, SqliteDestinationStore, StoreError, StoreResult, DESTINATIONS_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
