//! Domain model for the travel-tracking core.
//!
//! # Responsibility
//! - Define the canonical `Destination` record and its creation rules.
//! - Keep flag/date consistency helpers next to the data they guard.
//!
//! # Invariants
//! - Every record is identified by a caller-supplied opaque `id`.
//! - `is_visited` and `date_visited` always change together.

pub mod destination;
