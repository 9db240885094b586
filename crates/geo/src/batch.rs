//! Batch distance calculations with optional parallelism.
//!
//! Ranking by distance needs one key per candidate; this module computes the
//! whole key vector in a single pass.

use crate::{haversine_distance, Coordinate};

/// Calculate distances from `origin` to every point, in kilometers.
///
/// The output has the same length and order as `points`. A `None` point has
/// no location and yields `f64::INFINITY`.
///
/// # Example
/// ```
/// use rideshare_geo::{distances_from, Coordinate};
///
/// let points = vec![
///     Some(Coordinate::new(52.5200, 13.4050)),
///     None,
/// ];
///
/// let distances = distances_from(&Coordinate::new(50.0, 10.0), &points);
/// assert_eq!(distances.len(), 2);
/// assert!(distances[1].is_infinite());
/// ```
pub fn distances_from(origin: &Coordinate, points: &[Option<Coordinate>]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        points
            .par_iter()
            .map(|point| single_distance(origin, point.as_ref()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        points
            .iter()
            .map(|point| single_distance(origin, point.as_ref()))
            .collect()
    }
}

#[inline]
fn single_distance(origin: &Coordinate, point: Option<&Coordinate>) -> f64 {
    point
        .map(|coord| haversine_distance(origin, coord))
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_points() -> Vec<Option<Coordinate>> {
        vec![
            // Berlin
            Some(Coordinate::new(52.5200, 13.4050)),
            // Paris
            Some(Coordinate::new(48.8566, 2.3522)),
            // London
            Some(Coordinate::new(51.5074, -0.1276)),
            // No location
            None,
        ]
    }

    #[test]
    fn test_batch_distances() {
        let points = create_test_points();
        // User in Frankfurt (roughly between Berlin and Paris)
        let results = distances_from(&Coordinate::new(50.1109, 8.6821), &points);

        assert_eq!(results.len(), 4);
        assert!(results[0] > 0.0 && results[0] < 500.0);
        assert!(results[2] > results[0]);
        assert!(results[3].is_infinite());
    }

    #[test]
    fn test_output_order_matches_input() {
        let points = create_test_points();
        let origin = Coordinate::new(48.8566, 2.3522);
        let results = distances_from(&origin, &points);

        assert!(results[1].abs() < 0.001);
        for (point, distance) in points.iter().zip(&results) {
            if let Some(point) = point {
                assert!((haversine_distance(&origin, point) - distance).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(distances_from(&Coordinate::default(), &[]).is_empty());
    }
}
