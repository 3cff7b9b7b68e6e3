use crate::{geo::GeoPoint, id::*, links::MarketLinks};

/// A farmer market as stored in the directory.
///
/// The position is optional: not every record of the source dataset
/// carries coordinates. Distance queries only consider markets with
/// a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    pub location_id: LocationId,
    pub links: MarketLinks,
    pub position: Option<GeoPoint>,
}
