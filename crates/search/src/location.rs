//! City-level location matching.
//!
//! Addresses are free text in the conventional "street, city, state" layout.
//! Matching extracts a city token from each side and checks case-insensitive
//! containment of the query token in the candidate token. This is a
//! heuristic, not a geocoder: "Spring" matches "Springfield".

/// Extracts the city token from a free-text address.
///
/// Splits on commas and trims each segment. With more than two segments the
/// second-to-last one is returned, otherwise the last one. An address with no
/// commas yields the whole trimmed string.
///
/// ```
/// use rideshare_search::extract_city_token;
///
/// assert_eq!(extract_city_token("12 Elm St, Springfield, IL"), "Springfield");
/// assert_eq!(extract_city_token("Springfield, IL"), "IL");
/// assert_eq!(extract_city_token("  Springfield "), "Springfield");
/// ```
pub fn extract_city_token(address: &str) -> &str {
    let mut segments = address.rsplit(',').map(str::trim);
    let last = segments.next().unwrap_or_default();

    match (segments.next(), segments.next()) {
        (Some(second_to_last), Some(_)) => second_to_last,
        _ => last,
    }
}

/// Returns true if `candidate_token` contains `query_token`, ignoring case.
///
/// Containment is checked in one direction only, query into candidate. An
/// empty query token matches everything.
pub fn matches(query_token: &str, candidate_token: &str) -> bool {
    if query_token.is_empty() {
        return true;
    }
    candidate_token
        .to_lowercase()
        .contains(&query_token.to_lowercase())
}

/// Matcher for one side of a query, with the city token extracted and
/// lowercased once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMatcher {
    token: String,
}

impl LocationMatcher {
    /// Builds a matcher from the user's free-text location.
    pub fn new(query_text: &str) -> Self {
        Self {
            token: extract_city_token(query_text).to_lowercase(),
        }
    }

    /// The lowercased query city token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns true if the address's city token contains the query token.
    pub fn matches_address(&self, address: &str) -> bool {
        self.token.is_empty() || extract_city_token(address).to_lowercase().contains(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_segments_takes_second_to_last() {
        assert_eq!(extract_city_token("12 Elm St, Springfield, IL"), "Springfield");
        assert_eq!(extract_city_token("1 Main,Chicago,IL"), "Chicago");
    }

    #[test]
    fn test_many_segments_takes_second_to_last() {
        assert_eq!(extract_city_token("Apt 4, 9 Lake Rd, Chicago, IL, USA"), "IL");
    }

    #[test]
    fn test_two_segments_takes_last() {
        assert_eq!(extract_city_token("Springfield, IL"), "IL");
    }

    #[test]
    fn test_no_commas_returns_trimmed_input() {
        assert_eq!(extract_city_token("  Chicago  "), "Chicago");
        assert_eq!(extract_city_token(""), "");
    }

    #[test]
    fn test_trailing_comma_counts_as_segment() {
        assert_eq!(extract_city_token("12 Elm St, Springfield, "), "Springfield");
        assert_eq!(extract_city_token("Springfield,"), "");
    }

    #[test]
    fn test_matches_case_insensitive() {
        assert!(matches("springfield", "Springfield"));
        assert!(matches("CHICAGO", "chicago"));
    }

    #[test]
    fn test_matches_is_one_directional() {
        assert!(matches("Spring", "Springfield"));
        assert!(!matches("Springfield", "Spring"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches("", "Springfield"));
        assert!(matches("", ""));
        assert!(LocationMatcher::new("").matches_address("anything, at, all"));
    }

    #[test]
    fn test_matcher_uses_query_city_token() {
        let matcher = LocationMatcher::new("500 Pine St, Chicago, IL");
        assert_eq!(matcher.token(), "chicago");
        assert!(matcher.matches_address("1 Main, Chicago, IL"));
        assert!(!matcher.matches_address("12 Elm St, Springfield, IL"));
    }

    #[test]
    fn test_matcher_handles_non_ascii() {
        let matcher = LocationMatcher::new("MÜNCHEN");
        assert!(matcher.matches_address("Marienplatz 1, München, Bayern"));
    }

    proptest! {
        #[test]
        fn prop_three_or_more_segments(segments in prop::collection::vec("[a-zA-Z ]{0,8}", 3..6)) {
            let address = segments.join(",");
            prop_assert_eq!(extract_city_token(&address), segments[segments.len() - 2].trim());
        }

        #[test]
        fn prop_one_or_two_segments(segments in prop::collection::vec("[a-zA-Z ]{0,8}", 1..3)) {
            let address = segments.join(",");
            prop_assert_eq!(extract_city_token(&address), segments[segments.len() - 1].trim());
        }

        #[test]
        fn prop_matcher_agrees_with_matches(query in "[a-zA-Z, ]{0,12}", address in "[a-zA-Z, ]{0,24}") {
            let expected = matches(extract_city_token(&query), extract_city_token(&address));
            prop_assert_eq!(LocationMatcher::new(&query).matches_address(&address), expected);
        }
    }
}
