//! Destination registry: the single source of truth for the UI.
//!
//! # Responsibility
//! - Load the collection at startup and expose derived read views.
//! - Mediate all mutations, writing through the store before touching
//!   memory.
//!
//! # Invariants
//! - Memory is only ever assigned from a store result, so it never claims
//!   durability the store did not deliver.
//! - `load_destinations` always ends in `Ready`, even on store failure.
//! - Derived views preserve the canonical list's relative order.

use crate::model::destination::Destination;
use crate::seed::sample_destinations;
use crate::store::destination_store::{DestinationStore, StoreResult};
use log::{error, info};

/// Load lifecycle observed by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Constructed, no load attempted yet.
    Uninitialized,
    /// A load or destructive replace is in flight.
    Loading,
    /// In-memory collection reflects the store (possibly empty).
    Ready,
}

/// Authoritative in-memory view over a destination store.
///
/// Construct one at the application's composition root and hand it to
/// whatever needs it; the registry keeps no global state. The UI is
/// expected to issue one mutation at a time and re-read the views after
/// each call.
pub struct DestinationRegistry<S: DestinationStore> {
    store: S,
    destinations: Vec<Destination>,
    load_state: LoadState,
}

impl<S: DestinationStore> DestinationRegistry<S> {
    /// Creates a registry that has not yet read from its store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            destinations: Vec::new(),
            load_state: LoadState::Uninitialized,
        }
    }

    /// Replaces memory wholesale with store truth and transitions to
    /// `Ready`.
    ///
    /// A failing store read degrades to an empty collection instead of
    /// leaving the UI stuck in a loading state; the failure is logged,
    /// never surfaced.
    pub fn load_destinations(&mut self) {
        self.load_state = LoadState::Loading;
        match self.store.load() {
            Ok(destinations) => {
                info!(
                    "event=registry_load module=registry status=ok count={}",
                    destinations.len()
                );
                self.destinations = destinations;
            }
            Err(err) => {
                error!("event=registry_load module=registry status=error error={err}");
                self.destinations = Vec::new();
            }
        }
        self.load_state = LoadState::Ready;
    }

    /// Overwrites the store with the built-in sample collection and
    /// mirrors it into memory.
    ///
    /// This is a destructive replace, not a merge. Memory is untouched
    /// when the write fails.
    pub fn load_initial_data(&mut self) -> StoreResult<()> {
        self.load_state = LoadState::Loading;
        let seeded = sample_destinations();
        let result = self.store.save(&seeded);
        match &result {
            Ok(()) => {
                info!(
                    "event=registry_seed module=registry status=ok count={}",
                    seeded.len()
                );
                self.destinations = seeded;
            }
            Err(err) => {
                error!("event=registry_seed module=registry status=error error={err}");
            }
        }
        self.load_state = LoadState::Ready;
        result
    }

    /// Appends one destination, store first.
    ///
    /// The record arrives fully built with a caller-supplied unique id;
    /// the registry does not check for collisions.
    pub fn add_destination(&mut self, destination: Destination) -> StoreResult<()> {
        self.destinations = self.store.add(destination)?;
        Ok(())
    }

    /// Removes the matching record from store and memory. Absent ids are a
    /// silent no-op.
    pub fn remove_destination(&mut self, id: &str) -> StoreResult<()> {
        self.destinations = self.store.remove(id)?;
        Ok(())
    }

    /// Flips bucket-list membership in store and memory. Absent ids are a
    /// silent no-op.
    pub fn toggle_bucket_list(&mut self, id: &str) -> StoreResult<()> {
        self.destinations = self.store.toggle_bucket_list(id)?;
        Ok(())
    }

    /// Flips visited state in store and memory, syncing the visited date.
    /// Absent ids are a silent no-op.
    pub fn toggle_visited(&mut self, id: &str) -> StoreResult<()> {
        self.destinations = self.store.toggle_visited(id)?;
        Ok(())
    }

    /// Clears the store and empties memory. Irreversible.
    pub fn reset_all_data(&mut self) -> StoreResult<()> {
        self.store.clear()?;
        self.destinations.clear();
        Ok(())
    }

    /// Canonical list in insertion order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Destinations currently on the bucket list, canonical order
    /// preserved.
    pub fn bucket_list(&self) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| d.is_in_bucket_list)
            .collect()
    }

    /// Destinations marked visited, canonical order preserved.
    pub fn visited_destinations(&self) -> Vec<&Destination> {
        self.destinations.iter().filter(|d| d.is_visited).collect()
    }

    /// True until the first load (or replace) has completed.
    pub fn is_loading(&self) -> bool {
        self.load_state != LoadState::Ready
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }
}
