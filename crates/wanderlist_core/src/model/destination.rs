//! Destination domain model.
//!
//! # Responsibility
//! - Define the canonical record behind the full/bucket-list/visited views.
//! - Apply creation defaults and validate caller input.
//!
//! # Invariants
//! - `id` is opaque, caller-supplied and never reused within a collection.
//! - `is_visited == true` exactly when `date_visited` is set.
//! - `date_added` is stamped once at creation and never rewritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fallback hero image used when the caller adds a destination without one.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.pexels.com/photos/346885/pexels-photo-346885.jpeg";

/// Geographic point attached to a destination when both halves are known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Canonical travel destination record.
///
/// Serialized field names are camelCase to stay byte-compatible with the
/// blob layout the mobile app persists; optional fields are omitted when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Opaque unique ID. Generation is the caller's concern, not the core's.
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: String,
    pub image_url: String,
    /// Whether the destination currently sits on the bucket list.
    pub is_in_bucket_list: bool,
    /// Whether the user has marked the destination visited.
    pub is_visited: bool,
    pub date_added: DateTime<Utc>,
    /// Present exactly when `is_visited` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_visited: Option<DateTime<Utc>>,
    /// Free-form personal notes, set at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Caller input for adding a destination.
///
/// Flags and timestamps are deliberately absent: a new destination always
/// starts on the bucket list, unvisited, stamped at creation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDestination {
    /// Unique ID supplied by the caller (the core does not generate ids).
    pub id: String,
    pub name: String,
    pub country: String,
    /// Optional; empty or missing input falls back to a generated line.
    pub description: Option<String>,
    /// Optional; empty or missing input falls back to `DEFAULT_IMAGE_URL`.
    pub image_url: Option<String>,
    pub notes: Option<String>,
    /// Kept only when `longitude` is also present.
    pub latitude: Option<f64>,
    /// Kept only when `latitude` is also present.
    pub longitude: Option<f64>,
}

/// Rejection reasons for destination creation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationValidationError {
    EmptyName,
    EmptyCountry,
}

impl Display for DestinationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "destination name must not be empty"),
            Self::EmptyCountry => write!(f, "destination country must not be empty"),
        }
    }
}

impl Error for DestinationValidationError {}

impl Destination {
    /// Builds a destination from caller input, applying creation defaults.
    ///
    /// # Invariants
    /// - `is_in_bucket_list` starts `true`; `is_visited` starts `false`.
    /// - `coordinates` is set only when both halves were supplied.
    /// - `date_added` is stamped with the current time.
    ///
    /// # Errors
    /// - Rejects blank `name` or `country` before anything is persisted.
    pub fn create(request: NewDestination) -> Result<Self, DestinationValidationError> {
        if request.name.trim().is_empty() {
            return Err(DestinationValidationError::EmptyName);
        }
        if request.country.trim().is_empty() {
            return Err(DestinationValidationError::EmptyCountry);
        }

        let description = request
            .description
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("Destination in {}", request.country));
        let image_url = request
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());
        let coordinates = match (request.latitude, request.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok(Self {
            id: request.id,
            name: request.name,
            country: request.country,
            description,
            image_url,
            is_in_bucket_list: true,
            is_visited: false,
            date_added: Utc::now(),
            date_visited: None,
            notes: request.notes,
            coordinates,
        })
    }

    /// Flips bucket-list membership.
    pub fn toggle_bucket_list(&mut self) {
        self.is_in_bucket_list = !self.is_in_bucket_list;
    }

    /// Flips visited state, keeping `date_visited` in sync.
    ///
    /// Turning visited on stamps the current time; turning it off clears
    /// the stamp.
    pub fn toggle_visited(&mut self) {
        self.is_visited = !self.is_visited;
        self.date_visited = if self.is_visited {
            Some(Utc::now())
        } else {
            None
        };
    }
}
