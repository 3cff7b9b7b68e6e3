//! Validation of user-entered values.

/// Default search radius in miles when the user gives none or an
/// unparseable value.
pub const DEFAULT_RADIUS_MILES: f64 = 30.0;

/// Smallest accepted search radius in miles.
pub const MIN_RADIUS_MILES: f64 = 0.1;

/// Parses a radius entered by a user. Accepts a comma as decimal
/// separator. Missing, unparseable, non-finite or too small values
/// fall back to [`DEFAULT_RADIUS_MILES`].
pub fn radius_miles_from_param(param: Option<&str>) -> f64 {
    param
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.replace(',', ".").parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r >= MIN_RADIUS_MILES)
        .unwrap_or(DEFAULT_RADIUS_MILES)
}

/// Trims a required text field, returning `None` when nothing
/// remains.
pub fn nonempty_trimmed(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Trims an optional text field, dropping it entirely when empty.
pub fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value.and_then(nonempty_trimmed).map(str::to_string)
}
