use thiserror::Error;

/// Mean radius of the earth in statute miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

const LAT_DEG_MIN: f64 = -90.0;
const LAT_DEG_MAX: f64 = 90.0;
const LNG_DEG_MIN: f64 = -180.0;
const LNG_DEG_MAX: f64 = 180.0;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum CoordParseError {
    #[error("Invalid latitude")]
    Latitude,
    #[error("Invalid longitude")]
    Longitude,
}

/// A geographical position in decimal degrees.
///
/// Values are validated on construction, i.e. an instance always
/// holds a latitude in [-90, 90] and a longitude in [-180, 180].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !(LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat) {
            return None;
        }
        if !lng.is_finite() || !(LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Parse a latitude/longitude pair as entered by a user.
    ///
    /// A comma as decimal separator is accepted and normalized to a
    /// period before parsing.
    pub fn parse_lat_lng_deg(lat_str: &str, lng_str: &str) -> Result<Self, CoordParseError> {
        let lat = parse_coord_deg(lat_str).ok_or(CoordParseError::Latitude)?;
        let lng = parse_coord_deg(lng_str).ok_or(CoordParseError::Longitude)?;
        let lat_valid = (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat);
        let lng_valid = (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng);
        match (lat_valid, lng_valid) {
            (true, true) => Ok(Self { lat, lng }),
            (false, _) => Err(CoordParseError::Latitude),
            (_, false) => Err(CoordParseError::Longitude),
        }
    }

    /// Great-circle distance between two points.
    ///
    /// Uses the haversine formula in its asin/sqrt form, which stays
    /// numerically stable for near-zero and near-antipodal distances.
    /// Reference: https://en.wikipedia.org/wiki/Haversine_formula
    pub fn distance(p1: GeoPoint, p2: GeoPoint) -> Distance {
        let (lat1_rad, lng1_rad) = (p1.lat.to_radians(), p1.lng.to_radians());
        let (lat2_rad, lng2_rad) = (p2.lat.to_radians(), p2.lng.to_radians());

        let dlat_sin_half = ((lat1_rad - lat2_rad) / 2.0).sin();
        let dlng_sin_half = ((lng1_rad - lng2_rad) / 2.0).sin();

        let h = dlat_sin_half * dlat_sin_half
            + lat2_rad.cos() * lat1_rad.cos() * dlng_sin_half * dlng_sin_half;

        // Clamp guards against rounding slightly above 1.0 for
        // antipodal points.
        Distance::from_miles(2.0 * EARTH_RADIUS_MILES * h.sqrt().min(1.0).asin())
    }
}

fn parse_coord_deg(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".").parse::<f64>().ok().filter(|d| d.is_finite())
}

/// A non-negative distance in statute miles.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn infinite() -> Self {
        Self(f64::INFINITY)
    }

    pub const fn from_miles(miles: f64) -> Self {
        Self(miles)
    }

    pub const fn to_miles(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}
