//! Sort variants for market listings.

use strum::EnumString;

use crate::entities::GeoPoint;

/// The user-selectable sort column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    Id,
    Rating,
    City,
    State,
    Distance,
}

impl SortKey {
    /// Resolves a raw sort parameter, falling back to the default
    /// order for unknown values. The fallback is logged but not
    /// surfaced to the user; the listing is still served.
    pub fn resolve(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }
        raw.parse().unwrap_or_else(|_| {
            log::warn!("Unsupported sort key '{raw}', falling back to id order");
            Self::default()
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(serialize = "asc")]
    Ascending,
    #[strum(serialize = "desc")]
    Descending,
}

impl SortDirection {
    pub fn resolve(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

/// A fully resolved ordering, ready to be mapped to an ORDER BY
/// clause. Every variant breaks ties by id ascending so that paging
/// through a listing never repeats or skips rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarketOrdering {
    ById(SortDirection),
    ByRating(SortDirection),
    ByCity(SortDirection),
    ByState(SortDirection),
    /// Ascending distance from `origin`. Only markets with known
    /// coordinates participate.
    ByDistance { origin: GeoPoint },
}

impl Default for MarketOrdering {
    fn default() -> Self {
        Self::ById(SortDirection::Ascending)
    }
}

impl MarketOrdering {
    /// Builds the ordering for a sort key. Returns `None` for
    /// [`SortKey::Distance`] when no origin is available, which
    /// callers treat as falling back to the default order.
    pub fn from_key(key: SortKey, direction: SortDirection, origin: Option<GeoPoint>) -> Option<Self> {
        match key {
            SortKey::Id => Some(Self::ById(direction)),
            SortKey::Rating => Some(Self::ByRating(direction)),
            SortKey::City => Some(Self::ByCity(direction)),
            SortKey::State => Some(Self::ByState(direction)),
            SortKey::Distance => origin.map(|origin| Self::ByDistance { origin }),
        }
    }

    /// Distance ordering can only rank markets that have coordinates,
    /// so its listings pair with the located-markets total.
    pub const fn requires_coordinates(&self) -> bool {
        matches!(self, Self::ByDistance { .. })
    }

    pub const fn origin(&self) -> Option<GeoPoint> {
        match self {
            Self::ByDistance { origin } => Some(*origin),
            _ => None,
        }
    }
}
