use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use wanderlist_core::db::{open_db_in_memory, DbError};
use wanderlist_core::{
    sample_destinations, Destination, DestinationRegistry, DestinationStore, LoadState,
    NewDestination, SqliteDestinationStore, StoreError, StoreResult,
};

/// Test double with shared state, so tests can flip failure modes and
/// inspect the "durable" side after the store moved into the registry.
#[derive(Clone, Default)]
struct SharedStore {
    records: Rc<RefCell<Vec<Destination>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

fn io_failure() -> StoreError {
    StoreError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
}

impl DestinationStore for SharedStore {
    fn load(&self) -> StoreResult<Vec<Destination>> {
        if self.fail_reads.get() {
            return Err(io_failure());
        }
        Ok(self.records.borrow().clone())
    }

    fn save(&self, destinations: &[Destination]) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(io_failure());
        }
        *self.records.borrow_mut() = destinations.to_vec();
        Ok(())
    }

    fn add(&self, destination: Destination) -> StoreResult<Vec<Destination>> {
        let mut records = self.load()?;
        records.push(destination);
        self.save(&records)?;
        Ok(records)
    }

    fn remove(&self, id: &str) -> StoreResult<Vec<Destination>> {
        let mut records = self.load()?;
        records.retain(|d| d.id != id);
        self.save(&records)?;
        Ok(records)
    }

    fn toggle_bucket_list(&self, id: &str) -> StoreResult<Vec<Destination>> {
        let mut records = self.load()?;
        if let Some(record) = records.iter_mut().find(|d| d.id == id) {
            record.toggle_bucket_list();
        }
        self.save(&records)?;
        Ok(records)
    }

    fn toggle_visited(&self, id: &str) -> StoreResult<Vec<Destination>> {
        let mut records = self.load()?;
        if let Some(record) = records.iter_mut().find(|d| d.id == id) {
            record.toggle_visited();
        }
        self.save(&records)?;
        Ok(records)
    }

    fn clear(&self) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(io_failure());
        }
        self.records.borrow_mut().clear();
        Ok(())
    }
}

fn destination(id: &str, name: &str, country: &str) -> Destination {
    Destination::create(NewDestination {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        ..NewDestination::default()
    })
    .unwrap()
}

#[test]
fn new_registry_starts_unloaded() {
    let registry = DestinationRegistry::new(SharedStore::default());

    assert_eq!(registry.load_state(), LoadState::Uninitialized);
    assert!(registry.is_loading());
    assert!(registry.destinations().is_empty());
}

#[test]
fn load_destinations_replaces_memory_and_becomes_ready() {
    let store = SharedStore::default();
    store
        .records
        .borrow_mut()
        .push(destination("1", "Kyoto", "Japan"));

    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();

    assert_eq!(registry.load_state(), LoadState::Ready);
    assert!(!registry.is_loading());
    assert_eq!(registry.destinations().len(), 1);
    assert_eq!(registry.destinations()[0].id, "1");
}

#[test]
fn load_failure_degrades_to_empty_and_ready() {
    let store = SharedStore::default();
    store
        .records
        .borrow_mut()
        .push(destination("1", "Kyoto", "Japan"));
    store.fail_reads.set(true);

    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();

    assert_eq!(registry.load_state(), LoadState::Ready);
    assert!(registry.destinations().is_empty());
}

#[test]
fn full_lifecycle_scenario() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();

    registry
        .add_destination(destination("1", "Kyoto", "Japan"))
        .unwrap();
    assert_eq!(registry.destinations().len(), 1);
    assert!(registry.destinations()[0].is_in_bucket_list);
    assert!(!registry.destinations()[0].is_visited);

    registry.toggle_visited("1").unwrap();
    assert!(registry.destinations()[0].is_visited);
    assert!(registry.destinations()[0].date_visited.is_some());

    registry.toggle_bucket_list("1").unwrap();
    assert!(registry.bucket_list().is_empty());
    assert_eq!(registry.visited_destinations().len(), 1);

    registry.remove_destination("1").unwrap();
    assert!(registry.destinations().is_empty());
    assert!(registry.bucket_list().is_empty());
    assert!(registry.visited_destinations().is_empty());
}

#[test]
fn derived_views_filter_canonical_order() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();

    registry
        .add_destination(destination("1", "Santorini", "Greece"))
        .unwrap();
    registry
        .add_destination(destination("2", "Kyoto", "Japan"))
        .unwrap();
    registry
        .add_destination(destination("3", "Venice", "Italy"))
        .unwrap();

    registry.toggle_bucket_list("2").unwrap();
    registry.toggle_visited("2").unwrap();
    registry.toggle_visited("3").unwrap();

    let bucket_ids: Vec<&str> = registry.bucket_list().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(bucket_ids, ["1", "3"]);

    let visited_ids: Vec<&str> = registry
        .visited_destinations()
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(visited_ids, ["2", "3"]);
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();
    registry
        .add_destination(destination("1", "Kyoto", "Japan"))
        .unwrap();

    let before = registry.destinations().to_vec();
    store.fail_writes.set(true);

    assert!(registry
        .add_destination(destination("2", "Venice", "Italy"))
        .is_err());
    assert_eq!(registry.destinations(), before.as_slice());

    assert!(registry.toggle_visited("1").is_err());
    assert_eq!(registry.destinations(), before.as_slice());

    assert!(registry.remove_destination("1").is_err());
    assert_eq!(registry.destinations(), before.as_slice());

    // Durable side also untouched.
    assert_eq!(*store.records.borrow(), before);
}

#[test]
fn mutations_on_absent_ids_are_noops() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();
    registry
        .add_destination(destination("1", "Kyoto", "Japan"))
        .unwrap();

    let before = registry.destinations().to_vec();

    registry.remove_destination("no-such-id").unwrap();
    registry.toggle_bucket_list("no-such-id").unwrap();
    registry.toggle_visited("no-such-id").unwrap();

    assert_eq!(registry.destinations(), before.as_slice());
}

#[test]
fn load_initial_data_seeds_store_and_memory() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();

    registry.load_initial_data().unwrap();

    assert_eq!(registry.load_state(), LoadState::Ready);
    assert_eq!(registry.destinations().len(), 6);
    assert_eq!(registry.destinations()[0].name, "Santorini");
    assert_eq!(*store.records.borrow(), registry.destinations());
}

#[test]
fn load_initial_data_is_a_destructive_replace() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();
    registry
        .add_destination(destination("99", "Kyoto", "Japan"))
        .unwrap();

    registry.load_initial_data().unwrap();

    assert!(registry.destinations().iter().all(|d| d.id != "99"));
}

#[test]
fn load_initial_data_failure_keeps_memory() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();
    registry
        .add_destination(destination("1", "Kyoto", "Japan"))
        .unwrap();

    store.fail_writes.set(true);
    assert!(registry.load_initial_data().is_err());

    assert_eq!(registry.load_state(), LoadState::Ready);
    assert_eq!(registry.destinations().len(), 1);
}

#[test]
fn reset_clears_store_and_memory() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();
    registry.load_initial_data().unwrap();

    registry.reset_all_data().unwrap();

    assert!(registry.destinations().is_empty());
    assert!(store.records.borrow().is_empty());
}

#[test]
fn reset_failure_keeps_memory() {
    let store = SharedStore::default();
    let mut registry = DestinationRegistry::new(store.clone());
    registry.load_destinations();
    registry
        .add_destination(destination("1", "Kyoto", "Japan"))
        .unwrap();

    store.fail_writes.set(true);
    assert!(registry.reset_all_data().is_err());
    assert_eq!(registry.destinations().len(), 1);
}

#[test]
fn sample_destinations_have_unique_ids_and_clean_flags() {
    let samples = sample_destinations();

    assert_eq!(samples.len(), 6);
    let ids: HashSet<&str> = samples.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids.len(), samples.len());
    assert!(samples
        .iter()
        .all(|d| !d.is_in_bucket_list && !d.is_visited && d.date_visited.is_none()));
    assert!(samples.iter().all(|d| d.coordinates.is_some()));
}

#[test]
fn registry_over_sqlite_store_reflects_persisted_truth() {
    let conn = open_db_in_memory().unwrap();

    {
        let store = SqliteDestinationStore::try_new(&conn).unwrap();
        let mut registry = DestinationRegistry::new(store);
        registry.load_destinations();
        registry
            .add_destination(destination("1", "Kyoto", "Japan"))
            .unwrap();
        registry.toggle_visited("1").unwrap();
    }

    // A fresh registry over the same database sees exactly what was
    // persisted, including the visited timestamp.
    let store = SqliteDestinationStore::try_new(&conn).unwrap();
    let mut registry = DestinationRegistry::new(store);
    registry.load_destinations();

    assert_eq!(registry.destinations().len(), 1);
    let record = &registry.destinations()[0];
    assert_eq!(record.id, "1");
    assert!(record.is_visited);
    assert!(record.date_visited.is_some());
    assert_eq!(registry.visited_destinations().len(), 1);
}
