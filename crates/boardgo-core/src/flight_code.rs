//! Flight code normalization.

use regex::Regex;
use std::sync::LazyLock;

/// IATA/ICAO style flight designators: airline prefix plus flight number.
static FLIGHT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,10}$").expect("Invalid flight code regex"));

/// Trims and upper-cases a flight code.
///
/// Returns `None` for codes that are empty or contain anything besides ASCII
/// letters and digits.
pub fn normalize_flight_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    FLIGHT_CODE_REGEX.is_match(&code).then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(normalize_flight_code(" rja3813 "), Some("RJA3813".to_string()));
        assert_eq!(normalize_flight_code("CA908"), Some("CA908".to_string()));
    }

    #[test]
    fn test_rejects_invalid_codes() {
        assert_eq!(normalize_flight_code(""), None);
        assert_eq!(normalize_flight_code("   "), None);
        assert_eq!(normalize_flight_code("RJ 3813"), None);
        assert_eq!(normalize_flight_code("RJA-3813"), None);
        assert_eq!(normalize_flight_code("X"), None);
    }
}
