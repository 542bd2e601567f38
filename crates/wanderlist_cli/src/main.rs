//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wanderlist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use wanderlist_core::db::open_db_in_memory;
use wanderlist_core::{DestinationRegistry, SqliteDestinationStore};

fn main() {
    println!("wanderlist_core version={}", wanderlist_core::core_version());

    // In-memory seed round trip proves db bootstrap, store and registry
    // wiring without touching on-disk state.
    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("wanderlist_core db_open failed: {err}");
            std::process::exit(1);
        }
    };
    let store = match SqliteDestinationStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("wanderlist_core store_init failed: {err}");
            std::process::exit(1);
        }
    };

    let mut registry = DestinationRegistry::new(store);
    registry.load_destinations();
    if let Err(err) = registry.load_initial_data() {
        eprintln!("wanderlist_core seed failed: {err}");
        std::process::exit(1);
    }

    println!(
        "wanderlist_core destinations={} bucket_list={} visited={}",
        registry.destinations().len(),
        registry.bucket_list().len(),
        registry.visited_destinations().len()
    );
}
