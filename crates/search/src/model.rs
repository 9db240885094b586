//! Ride offers and search queries.

use crate::error::{Result, SearchError};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rideshare_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user's position, used as the origin for distance ranking.
pub type Position = Coordinate;

/// A single shared-ride trip available for booking.
///
/// Records are owned by the document store; the engine only reads them.
/// Field names follow the store's camelCase JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOffer {
    /// Opaque unique identifier
    pub id: String,
    /// Free-text pickup address
    pub pickup_location: String,
    /// Free-text destination address
    pub destination_location: String,
    /// Pickup latitude, if geocoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_lat: Option<f64>,
    /// Pickup longitude, if geocoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_lng: Option<f64>,
    /// Price per seat
    pub price_per_seat: f64,
    /// Seats still available
    pub available_seats: u32,
    /// Car has air conditioning
    #[serde(default)]
    pub air_conditioning: bool,
    /// Car has WiFi
    #[serde(default)]
    pub wifi_available: bool,
    /// Departure time
    pub start_date_time: DateTime<Utc>,
}

impl RideOffer {
    /// Creates an offer without coordinates or amenities.
    pub fn new(
        id: impl Into<String>,
        pickup_location: impl Into<String>,
        destination_location: impl Into<String>,
        price_per_seat: f64,
        available_seats: u32,
        start_date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            pickup_location: pickup_location.into(),
            destination_location: destination_location.into(),
            pickup_lat: None,
            pickup_lng: None,
            price_per_seat,
            available_seats,
            air_conditioning: false,
            wifi_available: false,
            start_date_time,
        }
    }

    /// Sets the pickup coordinates.
    pub fn with_pickup_coordinate(mut self, lat: f64, lng: f64) -> Self {
        self.pickup_lat = Some(lat);
        self.pickup_lng = Some(lng);
        self
    }

    /// Sets the air conditioning flag.
    pub fn with_air_conditioning(mut self, air_conditioning: bool) -> Self {
        self.air_conditioning = air_conditioning;
        self
    }

    /// Sets the WiFi flag.
    pub fn with_wifi(mut self, wifi_available: bool) -> Self {
        self.wifi_available = wifi_available;
        self
    }

    /// Pickup point, present only when both latitude and longitude are set.
    pub fn pickup_coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.pickup_lat?, self.pickup_lng?))
    }
}

/// Ordering applied to the filtered offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Nearest pickup to the user first
    #[default]
    Distance,
    /// Cheapest seat first
    Price,
    /// Earliest departure first
    Date,
}

impl SortMode {
    /// All sort modes, in display order.
    pub const ALL: [SortMode; 3] = [SortMode::Distance, SortMode::Price, SortMode::Date];

    /// Lowercase name used in flags and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Distance => "distance",
            SortMode::Price => "price",
            SortMode::Date => "date",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| SearchError::InvalidSortMode(s.to_string()))
    }
}

/// Relative departure day as offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureDay {
    /// Departing today
    Today,
    /// Departing tomorrow
    Tomorrow,
    /// Departing in the given number of days
    InDays(u32),
}

impl DepartureDay {
    /// Builds a departure day from an offset in days, normalising 0 and 1.
    pub fn from_offset(days: u32) -> Self {
        match days {
            0 => DepartureDay::Today,
            1 => DepartureDay::Tomorrow,
            n => DepartureDay::InDays(n),
        }
    }

    /// Offset from today in days.
    pub fn offset(&self) -> u32 {
        match self {
            DepartureDay::Today => 0,
            DepartureDay::Tomorrow => 1,
            DepartureDay::InDays(n) => *n,
        }
    }

    /// Resolves to a calendar date relative to `today`.
    ///
    /// Saturates at the latest representable date.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.offset())))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for DepartureDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartureDay::Today => f.write_str("today"),
            DepartureDay::Tomorrow => f.write_str("tomorrow"),
            DepartureDay::InDays(n) => write!(f, "in-{n}-days"),
        }
    }
}

impl FromStr for DepartureDay {
    type Err = SearchError;

    /// Accepts `today`, `tomorrow`, `in-N-days`, `in N days` and `+N`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "-");
        let invalid = || SearchError::InvalidDepartureDay(s.to_string());

        match normalized.as_str() {
            "today" => return Ok(DepartureDay::Today),
            "tomorrow" => return Ok(DepartureDay::Tomorrow),
            _ => {}
        }

        let digits = normalized
            .strip_prefix('+')
            .or_else(|| {
                normalized
                    .strip_prefix("in-")
                    .and_then(|rest| rest.strip_suffix("-days").or_else(|| rest.strip_suffix("-day")))
            })
            .ok_or_else(invalid)?;

        digits
            .parse::<u32>()
            .map(DepartureDay::from_offset)
            .map_err(|_| invalid())
    }
}

/// Optional predicates narrowing the candidate offers.
///
/// A predicate is inactive when its threshold is unset or its flag is false.
/// `Filters::default()` is the reset state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Highest acceptable price per seat
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Fewest acceptable available seats
    #[serde(default)]
    pub min_seats: Option<u32>,
    /// Only offers with air conditioning
    #[serde(default)]
    pub require_air_conditioning: bool,
    /// Only offers with WiFi
    #[serde(default)]
    pub require_wifi: bool,
    /// Only offers departing on this UTC calendar date
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
}

impl Filters {
    /// Sets the price ceiling.
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Sets the seat floor.
    pub fn with_min_seats(mut self, min_seats: u32) -> Self {
        self.min_seats = Some(min_seats);
        self
    }

    /// Requires air conditioning.
    pub fn with_air_conditioning(mut self) -> Self {
        self.require_air_conditioning = true;
        self
    }

    /// Requires WiFi.
    pub fn with_wifi(mut self) -> Self {
        self.require_wifi = true;
        self
    }

    /// Restricts departures to one calendar date.
    pub fn with_departure_date(mut self, date: NaiveDate) -> Self {
        self.departure_date = Some(date);
        self
    }

    /// Returns true if at least one predicate is active.
    pub fn is_active(&self) -> bool {
        self.max_price.is_some()
            || self.min_seats.is_some()
            || self.require_air_conditioning
            || self.require_wifi
            || self.departure_date.is_some()
    }
}

/// A single search request.
///
/// Built once per request from user input and passed by reference into the
/// engine. Location texts are trimmed on construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Pickup location text; empty disables location matching
    #[serde(default)]
    pub from_text: String,
    /// Destination location text; empty disables location matching
    #[serde(default)]
    pub to_text: String,
    /// Filter predicates
    #[serde(default)]
    pub filters: Filters,
    /// Result ordering
    #[serde(default)]
    pub sort_mode: SortMode,
    /// Origin for distance ranking
    #[serde(default)]
    pub user_position: Option<Position>,
    /// Number of travelling passengers, a lower bound on available seats
    #[serde(default)]
    pub passengers: Option<u32>,
}

impl SearchQuery {
    /// Creates a query between two free-text locations.
    pub fn new(from_text: impl Into<String>, to_text: impl Into<String>) -> Self {
        Self {
            from_text: from_text.into().trim().to_string(),
            to_text: to_text.into().trim().to_string(),
            ..Self::default()
        }
    }

    /// Sets the filters.
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the sort mode.
    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Sets the user's position.
    pub fn with_user_position(mut self, position: Position) -> Self {
        self.user_position = Some(position);
        self
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = Some(passengers);
        self
    }

    /// Location matching applies only when both texts are present.
    pub fn has_locations(&self) -> bool {
        !self.from_text.trim().is_empty() && !self.to_text.trim().is_empty()
    }

    /// Filters with the passenger count folded into the seat floor.
    pub fn effective_filters(&self) -> Filters {
        let mut filters = self.filters;
        if let Some(passengers) = self.passengers {
            filters.min_seats = Some(filters.min_seats.map_or(passengers, |min| min.max(passengers)));
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_pickup_coordinate_requires_both_fields() {
        let offer = RideOffer::new("a", "x", "y", 10.0, 1, departure());
        assert!(offer.pickup_coordinate().is_none());

        let mut partial = offer.clone();
        partial.pickup_lat = Some(1.0);
        assert!(partial.pickup_coordinate().is_none());

        let located = offer.with_pickup_coordinate(1.0, 2.0);
        assert_eq!(located.pickup_coordinate(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_offer_deserializes_store_layout() {
        let json = r#"{
            "id": "r1",
            "pickupLocation": "12 Elm St, Springfield, IL",
            "destinationLocation": "1 Main, Chicago, IL",
            "pricePerSeat": 20,
            "availableSeats": 3,
            "airConditioning": true,
            "startDateTime": "2024-05-01T09:00:00Z"
        }"#;

        let offer: RideOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.id, "r1");
        assert_eq!(offer.price_per_seat, 20.0);
        assert!(offer.air_conditioning);
        assert!(!offer.wifi_available);
        assert!(offer.pickup_lat.is_none());
        assert_eq!(offer.start_date_time, departure());
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("price".parse::<SortMode>().unwrap(), SortMode::Price);
        assert_eq!(" Date ".parse::<SortMode>().unwrap(), SortMode::Date);
        assert_eq!("DISTANCE".parse::<SortMode>().unwrap(), SortMode::Distance);
        assert_eq!(
            "rating".parse::<SortMode>(),
            Err(SearchError::InvalidSortMode("rating".to_string()))
        );
    }

    #[test]
    fn test_sort_mode_defaults_to_distance() {
        assert_eq!(SortMode::default(), SortMode::Distance);
        assert_eq!(SearchQuery::default().sort_mode, SortMode::Distance);
    }

    #[test]
    fn test_departure_day_parse() {
        assert_eq!("today".parse::<DepartureDay>().unwrap(), DepartureDay::Today);
        assert_eq!("Tomorrow".parse::<DepartureDay>().unwrap(), DepartureDay::Tomorrow);
        assert_eq!("In 2 days".parse::<DepartureDay>().unwrap(), DepartureDay::InDays(2));
        assert_eq!("in-3-days".parse::<DepartureDay>().unwrap(), DepartureDay::InDays(3));
        assert_eq!("+1".parse::<DepartureDay>().unwrap(), DepartureDay::Tomorrow);
        assert_eq!("+0".parse::<DepartureDay>().unwrap(), DepartureDay::Today);
        assert!("yesterday".parse::<DepartureDay>().is_err());
        assert!("in-x-days".parse::<DepartureDay>().is_err());
    }

    #[test]
    fn test_departure_day_resolve() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(DepartureDay::Today.resolve(today), today);
        assert_eq!(
            DepartureDay::Tomorrow.resolve(today),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            DepartureDay::InDays(3).resolve(today),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
        );
        assert_eq!(DepartureDay::InDays(2).to_string(), "in-2-days");
    }

    #[test]
    fn test_filters_activity() {
        assert!(!Filters::default().is_active());
        assert!(Filters::default().with_max_price(30.0).is_active());
        assert!(Filters::default().with_wifi().is_active());
    }

    #[test]
    fn test_query_trims_locations() {
        let query = SearchQuery::new("  Springfield ", "Chicago\n");
        assert_eq!(query.from_text, "Springfield");
        assert_eq!(query.to_text, "Chicago");
        assert!(query.has_locations());
        assert!(!SearchQuery::new("Springfield", "   ").has_locations());
    }

    #[test]
    fn test_passengers_raise_seat_floor() {
        let query = SearchQuery::new("", "").with_passengers(3);
        assert_eq!(query.effective_filters().min_seats, Some(3));

        let query = SearchQuery::new("", "")
            .with_filters(Filters::default().with_min_seats(4))
            .with_passengers(2);
        assert_eq!(query.effective_filters().min_seats, Some(4));

        let query = SearchQuery::new("", "").with_filters(Filters::default().with_min_seats(2));
        assert_eq!(query.effective_filters(), query.filters);
    }
}
