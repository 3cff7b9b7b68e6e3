use super::{list_markets::MarketPage, prelude::*};

/// Loads one page of all markets within `radius` of `origin`,
/// nearest first.
pub fn markets_within_radius<R: MarketRepo>(
    repo: &R,
    origin: GeoPoint,
    radius: Distance,
    per_page: u64,
    page: u64,
) -> Result<MarketPage> {
    if !radius.is_valid() {
        return Err(Error::InvalidRadius);
    }
    let total = repo.count_markets_within_radius(origin, radius)?;
    let page = PageState::new(total, per_page, page);
    let markets = repo.markets_within_radius(origin, radius, &page.to_pagination())?;
    Ok(MarketPage { page, markets })
}

/// The `limit` markets closest to `origin`, capped at `radius`.
pub fn nearest_markets<R: MarketRepo>(
    repo: &R,
    origin: GeoPoint,
    radius: Distance,
    limit: u64,
) -> Result<Vec<MarketSummary>> {
    if !radius.is_valid() {
        return Err(Error::InvalidRadius);
    }
    let pagination = Pagination { offset: 0, limit };
    Ok(repo.markets_within_radius(origin, radius, &pagination)?)
}
