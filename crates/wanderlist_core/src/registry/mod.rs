//! In-memory registry the presentation layer binds to.
//!
//! # Responsibility
//! - Hold the authoritative in-memory collection and its load lifecycle.
//! - Apply mutations write-through: store first, memory only on success.
//!
//! # Invariants
//! - Derived views are filters over the canonical list, never stored.
//! - A failed store write leaves the in-memory collection untouched.

pub mod destination_registry;
