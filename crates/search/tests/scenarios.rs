//! End-to-end search scenarios over a small Illinois pool.

use chrono::{DateTime, TimeZone, Utc};
use rideshare_search::{
    distance_km, search, sort, Filters, Position, RideOffer, SearchQuery, SortMode,
};

fn departure(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 14, hour, 30, 0).unwrap()
}

fn offer_a() -> RideOffer {
    RideOffer::new(
        "A",
        "12 Elm St, Springfield, IL",
        "1 Main, Chicago, IL",
        20.0,
        3,
        departure(8),
    )
    .with_air_conditioning(true)
}

fn offer_b() -> RideOffer {
    RideOffer::new(
        "B",
        "5 Oak Ave, Springfield, IL",
        "9 Lake Rd, Chicago, IL",
        35.0,
        1,
        departure(7),
    )
}

fn pool() -> Vec<RideOffer> {
    vec![offer_a(), offer_b()]
}

fn ids(results: &[&RideOffer]) -> Vec<String> {
    results.iter().map(|o| o.id.clone()).collect()
}

#[test]
fn price_filter_excludes_expensive_offer() {
    let pool = pool();
    let query = SearchQuery::new("Springfield", "Chicago")
        .with_filters(Filters::default().with_max_price(30.0))
        .with_sort_mode(SortMode::Price);

    assert_eq!(ids(&search(&pool, &query)), vec!["A"]);
}

#[test]
fn price_sort_orders_cheapest_first() {
    let pool = vec![offer_b(), offer_a()];
    let query = SearchQuery::new("Springfield", "Chicago").with_sort_mode(SortMode::Price);

    assert_eq!(ids(&search(&pool, &query)), vec!["A", "B"]);
}

#[test]
fn empty_locations_return_whole_pool_in_order() {
    let pool = pool();
    let query = SearchQuery::new("", "");

    // Distance sort without a position keeps pool order.
    assert_eq!(ids(&search(&pool, &query)), vec!["A", "B"]);
}

#[test]
fn date_sort_orders_earliest_first() {
    let pool = pool();
    let query = SearchQuery::new("", "").with_sort_mode(SortMode::Date);

    assert_eq!(ids(&search(&pool, &query)), vec!["B", "A"]);
}

#[test]
fn distance_sort_puts_nearest_pickup_first() {
    let pool = vec![
        RideOffer::new("far", "x", "y", 10.0, 1, departure(9)).with_pickup_coordinate(10.0, 10.0),
        RideOffer::new("near", "x", "y", 10.0, 1, departure(9)).with_pickup_coordinate(0.0, 0.0),
    ];
    let query = SearchQuery::new("", "")
        .with_sort_mode(SortMode::Distance)
        .with_user_position(Position::new(0.0, 0.0));

    assert_eq!(ids(&search(&pool, &query)), vec!["near", "far"]);

    let far = distance_km(0.0, 0.0, 10.0, 10.0);
    assert!((far - 1568.5).abs() < 0.5, "distance to (10,10): {far}");
}

#[test]
fn amenity_and_seat_filters_apply_to_full_pool() {
    let pool = pool();

    let ac = SearchQuery::new("", "").with_filters(Filters::default().with_air_conditioning());
    assert_eq!(ids(&search(&pool, &ac)), vec!["A"]);

    let seats = SearchQuery::new("", "").with_filters(Filters::default().with_min_seats(2));
    assert_eq!(ids(&search(&pool, &seats)), vec!["A"]);

    let wifi = SearchQuery::new("", "").with_filters(Filters::default().with_wifi());
    assert!(search(&pool, &wifi).is_empty());
}

#[test]
fn short_query_token_overmatches_by_design() {
    let pool = pool();
    let query = SearchQuery::new("Spring", "Chi").with_sort_mode(SortMode::Price);

    assert_eq!(ids(&search(&pool, &query)), vec!["A", "B"]);
}

#[test]
fn departure_day_filter_resolves_against_reference_date() {
    let pool = pool();
    let today = departure(0).date_naive();
    let tomorrow = rideshare_search::DepartureDay::Tomorrow.resolve(today);

    let query = SearchQuery::new("", "")
        .with_filters(Filters::default().with_departure_date(today));
    assert_eq!(search(&pool, &query).len(), 2);

    let query = SearchQuery::new("", "")
        .with_filters(Filters::default().with_departure_date(tomorrow));
    assert!(search(&pool, &query).is_empty());
}

#[test]
fn pool_loaded_from_store_json_is_searchable() {
    let json = r#"[
        {
            "id": "r-100",
            "pickupLocation": "400 W Monroe St, Springfield, IL",
            "destinationLocation": "233 S Wacker Dr, Chicago, IL",
            "pickupLat": 39.8017,
            "pickupLng": -89.6437,
            "pricePerSeat": 18.5,
            "availableSeats": 2,
            "airConditioning": true,
            "wifiAvailable": true,
            "startDateTime": "2024-06-14T08:00:00Z"
        },
        {
            "id": "r-101",
            "pickupLocation": "Bloomington, IL",
            "destinationLocation": "Chicago, IL",
            "pricePerSeat": 12,
            "availableSeats": 4,
            "startDateTime": "2024-06-14T09:00:00Z"
        }
    ]"#;
    let pool: Vec<RideOffer> = serde_json::from_str(json).unwrap();

    let query = SearchQuery::new("Springfield", "Chicago");
    assert_eq!(ids(&search(&pool, &query)), vec!["r-100"]);

    let refs: Vec<&RideOffer> = pool.iter().collect();
    let by_price = sort(&refs, SortMode::Price, None);
    assert_eq!(ids(&by_price), vec!["r-101", "r-100"]);
}

#[test]
fn free_rides_keep_pool_order_under_price_sort() {
    let json = r#"[
        {"id": "first", "pickupLocation": "a", "destinationLocation": "b",
         "pricePerSeat": 0.0, "availableSeats": 1, "startDateTime": "2024-06-14T08:00:00Z"},
        {"id": "second", "pickupLocation": "a", "destinationLocation": "b",
         "pricePerSeat": -0.0, "availableSeats": 1, "startDateTime": "2024-06-14T08:00:00Z"}
    ]"#;
    let pool: Vec<RideOffer> = serde_json::from_str(json).unwrap();

    let query = SearchQuery::new("", "").with_sort_mode(SortMode::Price);
    assert_eq!(ids(&search(&pool, &query)), vec!["first", "second"]);
}

#[test]
fn query_user_position_uses_lat_lng_fields() {
    let json = r#"{
        "fromText": "Springfield",
        "toText": "Chicago",
        "sortMode": "distance",
        "userPosition": {"lat": 39.8, "lng": -89.6}
    }"#;
    let query: SearchQuery = serde_json::from_str(json).unwrap();
    assert_eq!(query.user_position, Some(Position::new(39.8, -89.6)));

    let encoded = serde_json::to_value(&query).unwrap();
    assert_eq!(encoded["userPosition"]["lat"], 39.8);
    assert_eq!(encoded["userPosition"]["lng"], -89.6);
}
