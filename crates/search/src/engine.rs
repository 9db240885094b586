//! Search orchestration: location matching, filtering, then sorting.

use crate::location::LocationMatcher;
use crate::model::{RideOffer, SearchQuery};
use crate::ranking::{apply_filters, sort_with_policy, MissingCoordinates};
use tracing::{debug, instrument};

/// Ordered references into the caller's pool.
pub type MatchResult<'a> = Vec<&'a RideOffer>;

/// Stateless ride search engine.
///
/// Holds only policy; every call to [`SearchEngine::search`] is independent
/// and side-effect free, so one engine can serve concurrent callers.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use rideshare_search::{Filters, RideOffer, SearchEngine, SearchQuery, SortMode};
///
/// let pool = vec![
///     RideOffer::new("a", "12 Elm St, Springfield, IL", "1 Main, Chicago, IL", 20.0, 3, Utc::now()),
///     RideOffer::new("b", "5 Oak Ave, Springfield, IL", "9 Lake Rd, Chicago, IL", 35.0, 1, Utc::now()),
/// ];
///
/// let query = SearchQuery::new("Springfield", "Chicago")
///     .with_filters(Filters::default().with_max_price(30.0))
///     .with_sort_mode(SortMode::Price);
///
/// let results = SearchEngine::new().search(&pool, &query);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].id, "a");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchEngine {
    missing_coordinates: MissingCoordinates,
}

impl SearchEngine {
    /// Creates an engine with the default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how offers without pickup coordinates rank under distance sort.
    pub fn with_missing_coordinates(mut self, policy: MissingCoordinates) -> Self {
        self.missing_coordinates = policy;
        self
    }

    /// The active missing-coordinate policy.
    pub fn missing_coordinates(&self) -> MissingCoordinates {
        self.missing_coordinates
    }

    /// Runs `query` against `pool` and returns the matching offers in order.
    ///
    /// An empty result is a normal outcome. The pool is never modified.
    #[instrument(level = "debug", skip_all, fields(pool = pool.len(), sort = %query.sort_mode))]
    pub fn search<'a>(&self, pool: &'a [RideOffer], query: &SearchQuery) -> MatchResult<'a> {
        let candidates: Vec<&'a RideOffer> = if query.has_locations() {
            let from = LocationMatcher::new(&query.from_text);
            let to = LocationMatcher::new(&query.to_text);
            pool.iter()
                .filter(|offer| {
                    from.matches_address(&offer.pickup_location)
                        && to.matches_address(&offer.destination_location)
                })
                .collect()
        } else {
            pool.iter().collect()
        };
        debug!(candidates = candidates.len(), "Location stage complete");

        let filters = query.effective_filters();
        let filtered = if filters.is_active() {
            apply_filters(candidates, &filters)
        } else {
            candidates
        };
        debug!(filtered = filtered.len(), "Filter stage complete");

        sort_with_policy(
            &filtered,
            query.sort_mode,
            query.user_position.as_ref(),
            self.missing_coordinates,
        )
    }
}

/// Runs `query` against `pool` with the default engine.
pub fn search<'a>(pool: &'a [RideOffer], query: &SearchQuery) -> MatchResult<'a> {
    SearchEngine::default().search(pool, query)
}
