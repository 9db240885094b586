//! Error types for the search crate.
//!
//! Searching itself never fails. These errors come from parsing user-facing
//! values (sort mode, departure day, coordinate policy) at the boundary.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building a search query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Unknown sort mode
    #[error("Invalid sort mode '{0}': expected one of distance, price, date")]
    InvalidSortMode(String),

    /// Unrecognised departure day
    #[error("Invalid departure day '{0}': expected today, tomorrow or in-N-days")]
    InvalidDepartureDay(String),

    /// Unknown missing-coordinate policy
    #[error("Invalid missing-coordinate policy '{0}': expected origin or last")]
    InvalidCoordinatePolicy(String),
}
