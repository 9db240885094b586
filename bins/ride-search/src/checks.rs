//! Strict checks on pool records.
//!
//! The engine ranks whatever it is given; these checks let callers reject
//! records the lenient defaults would otherwise paper over.

use rideshare_core::validation::{ValidationError, ValidationResult, Validator};
use rideshare_geo::{Coordinate, GeoError};
use rideshare_search::RideOffer;
use std::collections::HashSet;

/// Check a single offer.
pub fn check_offer(offer: &RideOffer) -> ValidationResult {
    let field = |name: &str| format!("{}.{}", offer.id, name);

    let validator = Validator::new()
        .required(&field("id"), &offer.id)
        .required(&field("pickupLocation"), &offer.pickup_location)
        .required(&field("destinationLocation"), &offer.destination_location)
        .non_negative(&field("pricePerSeat"), offer.price_per_seat)
        .warn_if(
            &field("pickupLocation"),
            !offer.pickup_location.contains(','),
            "Address has no comma-separated city segment",
        )
        .warn_if(
            &field("destinationLocation"),
            !offer.destination_location.contains(','),
            "Address has no comma-separated city segment",
        );

    let mut result = validator.validate();
    if let Some(problem) = pickup_problem(offer) {
        result.add_error(ValidationError {
            field: field("pickup"),
            message: problem.to_string(),
            code: problem.code().to_string(),
            expected: Some("latitude -90..90, longitude -180..180".to_string()),
            actual: Some(format!("({:?}, {:?})", offer.pickup_lat, offer.pickup_lng)),
        });
    }
    result
}

fn pickup_problem(offer: &RideOffer) -> Option<GeoError> {
    match (offer.pickup_lat, offer.pickup_lng) {
        (Some(lat), Some(lng)) => Coordinate::try_new(lat, lng).err(),
        _ => Some(GeoError::MissingCoordinate(
            "pickup latitude and longitude are required for distance ranking".to_string(),
        )),
    }
}

/// Check every offer plus pool-wide constraints.
pub fn check_pool(pool: &[RideOffer]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();

    for offer in pool {
        result.merge(check_offer(offer));

        if !seen.insert(offer.id.as_str()) {
            let duplicate = Validator::new()
                .custom(&offer.id, || Some("Duplicate ride offer id".to_string()))
                .validate();
            result.merge(duplicate);
        }
    }

    result
}
