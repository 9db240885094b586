//! Ride offer search for the rideshare marketplace.
//!
//! Given a candidate pool of ride offers and a [`SearchQuery`], the engine
//! returns references to the matching offers in ranked order:
//!
//! 1. **Location matching**: city tokens extracted from the query and from
//!    each offer's pickup/destination address are compared case-insensitively
//! 2. **Filtering**: price ceiling, seat floor, amenities, departure day
//! 3. **Sorting**: stable ordering by distance, price or departure time
//!
//! The engine is pure. It reads the pool, never mutates it, and holds no
//! state between calls.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use rideshare_search::{search, Position, RideOffer, SearchQuery, SortMode};
//!
//! let pool = vec![
//!     RideOffer::new("far", "Springfield", "Chicago", 20.0, 2, Utc::now())
//!         .with_pickup_coordinate(10.0, 10.0),
//!     RideOffer::new("near", "Springfield", "Chicago", 20.0, 2, Utc::now())
//!         .with_pickup_coordinate(0.0, 0.0),
//! ];
//!
//! let query = SearchQuery::new("", "")
//!     .with_sort_mode(SortMode::Distance)
//!     .with_user_position(Position::new(0.0, 0.0));
//!
//! let results = search(&pool, &query);
//! assert_eq!(results[0].id, "near");
//! ```

mod engine;
mod error;
mod location;
mod model;
mod ranking;

pub use engine::{search, MatchResult, SearchEngine};
pub use error::{Result, SearchError};
pub use location::{extract_city_token, matches, LocationMatcher};
pub use model::{DepartureDay, Filters, Position, RideOffer, SearchQuery, SortMode};
pub use ranking::{apply_filters, matches_filters, sort, sort_with_policy, MissingCoordinates};

pub use rideshare_geo::distance_km;
