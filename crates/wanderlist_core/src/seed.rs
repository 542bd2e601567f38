//! Built-in sample destinations for first-run seeding.
//!
//! # Responsibility
//! - Provide the fixed starter collection `load_initial_data` writes when
//!   a user's collection is empty.
//!
//! # Invariants
//! - Ids are fixed and unique, so reseeding replaces rather than
//!   duplicates.
//! - Samples start with both flags off; the user opts them into the
//!   bucket list.

use crate::model::destination::{Coordinates, Destination};
use chrono::{DateTime, Utc};

/// Returns the fixed starter collection, stamped with the current time.
pub fn sample_destinations() -> Vec<Destination> {
    let added_at = Utc::now();
    vec![
        sample(
            "1",
            "Santorini",
            "Greece",
            "Famous for its stunning sunsets, white-washed buildings, and blue domes.",
            "https://images.pexels.com/photos/1010657/pexels-photo-1010657.jpeg",
            Coordinates {
                latitude: 36.3932,
                longitude: 25.4615,
            },
            added_at,
        ),
        sample(
            "2",
            "Kyoto",
            "Japan",
            "Known for its classical Buddhist temples, gardens, imperial palaces, and traditional wooden houses.",
            "https://images.pexels.com/photos/5374432/pexels-photo-5374432.jpeg",
            Coordinates {
                latitude: 35.0116,
                longitude: 135.7681,
            },
            added_at,
        ),
        sample(
            "3",
            "Machu Picchu",
            "Peru",
            "An Incan citadel set high in the Andes Mountains, renowned for its sophisticated dry-stone walls.",
            "https://images.pexels.com/photos/2929906/pexels-photo-2929906.jpeg",
            Coordinates {
                latitude: -13.1631,
                longitude: -72.5450,
            },
            added_at,
        ),
        sample(
            "4",
            "Bora Bora",
            "French Polynesia",
            "A small South Pacific island famous for its turquoise lagoon and overwater bungalows.",
            "https://images.pexels.com/photos/753626/pexels-photo-753626.jpeg",
            Coordinates {
                latitude: -16.5004,
                longitude: -151.7415,
            },
            added_at,
        ),
        sample(
            "5",
            "Serengeti National Park",
            "Tanzania",
            "Famous for its annual migration of over 1.5 million wildebeest and 250,000 zebra.",
            "https://images.pexels.com/photos/624063/pexels-photo-624063.jpeg",
            Coordinates {
                latitude: -2.3333,
                longitude: 34.8333,
            },
            added_at,
        ),
        sample(
            "6",
            "Venice",
            "Italy",
            "Built on more than 100 small islands in a lagoon in the Adriatic Sea, with no roads, just canals.",
            "https://images.pexels.com/photos/358/water-italy-boats-boat.jpg",
            Coordinates {
                latitude: 45.4408,
                longitude: 12.3155,
            },
            added_at,
        ),
    ]
}

fn sample(
    id: &str,
    name: &str,
    country: &str,
    description: &str,
    image_url: &str,
    coordinates: Coordinates,
    added_at: DateTime<Utc>,
) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        is_in_bucket_list: false,
        is_visited: false,
        date_added: added_at,
        date_visited: None,
        notes: None,
        coordinates: Some(coordinates),
    }
}
