//! Filter and sort stages of the search pipeline.
//!
//! Both stages take and return references into the caller's pool, never
//! mutate offers, and preserve input order among equals.

use crate::error::SearchError;
use crate::model::{Filters, Position, RideOffer, SortMode};
use rideshare_geo::{distances_from, Coordinate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How offers without pickup coordinates are ranked under distance sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCoordinates {
    /// Treat each missing latitude or longitude as 0.
    #[default]
    Origin,
    /// Rank after every located offer, keeping input order.
    Last,
}

impl MissingCoordinates {
    /// Point used as the distance key for `offer`; `None` ranks last.
    pub fn pickup_point(&self, offer: &RideOffer) -> Option<Coordinate> {
        match self {
            MissingCoordinates::Origin => Some(Coordinate::new(
                offer.pickup_lat.unwrap_or(0.0),
                offer.pickup_lng.unwrap_or(0.0),
            )),
            MissingCoordinates::Last => offer.pickup_coordinate(),
        }
    }
}

impl fmt::Display for MissingCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingCoordinates::Origin => f.write_str("origin"),
            MissingCoordinates::Last => f.write_str("last"),
        }
    }
}

impl FromStr for MissingCoordinates {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "origin" => Ok(MissingCoordinates::Origin),
            "last" => Ok(MissingCoordinates::Last),
            _ => Err(SearchError::InvalidCoordinatePolicy(s.to_string())),
        }
    }
}

/// Returns true if `offer` satisfies every active predicate in `filters`.
pub fn matches_filters(offer: &RideOffer, filters: &Filters) -> bool {
    filters.max_price.is_none_or(|max| offer.price_per_seat <= max)
        && filters.min_seats.is_none_or(|min| offer.available_seats >= min)
        && (!filters.require_air_conditioning || offer.air_conditioning)
        && (!filters.require_wifi || offer.wifi_available)
        && filters
            .departure_date
            .is_none_or(|date| offer.start_date_time.date_naive() == date)
}

/// Keeps the offers that satisfy all active filters, in input order.
///
/// ```
/// use chrono::Utc;
/// use rideshare_search::{apply_filters, Filters, RideOffer};
///
/// let pool = vec![
///     RideOffer::new("a", "Springfield", "Chicago", 20.0, 3, Utc::now()),
///     RideOffer::new("b", "Springfield", "Chicago", 35.0, 1, Utc::now()),
/// ];
///
/// let cheap = apply_filters(&pool, &Filters::default().with_max_price(30.0));
/// assert_eq!(cheap.len(), 1);
/// assert_eq!(cheap[0].id, "a");
/// ```
pub fn apply_filters<'a, I>(offers: I, filters: &Filters) -> Vec<&'a RideOffer>
where
    I: IntoIterator<Item = &'a RideOffer>,
{
    offers
        .into_iter()
        .filter(|offer| matches_filters(offer, filters))
        .collect()
}

/// Returns a new ordering of `offers` using the default coordinate policy.
///
/// See [`sort_with_policy`].
pub fn sort<'a>(
    offers: &[&'a RideOffer],
    mode: SortMode,
    user_position: Option<&Position>,
) -> Vec<&'a RideOffer> {
    sort_with_policy(offers, mode, user_position, MissingCoordinates::default())
}

/// Returns a new, stably sorted ordering of `offers`.
///
/// - `Price`: ascending price per seat
/// - `Date`: ascending departure time
/// - `Distance`: ascending great-circle distance from `user_position` to the
///   pickup point; without a position the input order is returned unchanged
pub fn sort_with_policy<'a>(
    offers: &[&'a RideOffer],
    mode: SortMode,
    user_position: Option<&Position>,
    missing: MissingCoordinates,
) -> Vec<&'a RideOffer> {
    let mut sorted = offers.to_vec();

    match mode {
        SortMode::Price => {
            // `+ 0.0` folds -0.0 into 0.0 so the two compare equal.
            sorted.sort_by(|a, b| (a.price_per_seat + 0.0).total_cmp(&(b.price_per_seat + 0.0)));
        }
        SortMode::Date => {
            sorted.sort_by(|a, b| a.start_date_time.cmp(&b.start_date_time));
        }
        SortMode::Distance => {
            let Some(origin) = user_position else {
                debug!("Distance sort requested without a user position; keeping input order");
                return sorted;
            };
            sorted = sort_by_distance(offers, origin, missing);
        }
    }

    sorted
}

fn sort_by_distance<'a>(
    offers: &[&'a RideOffer],
    origin: &Position,
    missing: MissingCoordinates,
) -> Vec<&'a RideOffer> {
    let points: Vec<Option<Coordinate>> = offers
        .iter()
        .map(|offer| missing.pickup_point(offer))
        .collect();

    let unlocated = offers.iter().filter(|offer| offer.pickup_coordinate().is_none()).count();
    if unlocated > 0 {
        debug!(unlocated, policy = %missing, "Ranking offers without pickup coordinates");
    }

    let distances = distances_from(origin, &points);

    let mut keyed: Vec<(f64, &'a RideOffer)> = distances
        .into_iter()
        .zip(offers.iter().copied())
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    keyed.into_iter().map(|(_, offer)| offer).collect()
}
