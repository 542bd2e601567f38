//! Persistent storage for the destination collection.
//!
//! # Responsibility
//! - Own the durable single-blob layout under a fixed key.
//! - Convert storage failures into the read/write policy the registry
//!   builds on: reads degrade to empty, writes surface their failure.
//!
//! # Invariants
//! - Point mutations are read-modify-write over the whole blob.
//! - Insertion order of the persisted array is the canonical order.

pub mod destination_store;
