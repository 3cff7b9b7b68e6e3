use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSearchPage {
    pub page: PageState,
    pub markets: Vec<MarketSearchHit>,
}

/// Searches markets by any combination of city, state and zip.
/// An entirely empty filter matches every market.
pub fn search_markets<R: MarketRepo>(
    repo: &R,
    filter: &MarketFilter,
    per_page: u64,
    page: u64,
) -> Result<MarketSearchPage> {
    let filter = MarketFilter {
        city: validate::optional_trimmed(filter.city.as_deref()),
        state: validate::optional_trimmed(filter.state.as_deref()),
        zip: validate::optional_trimmed(filter.zip.as_deref()),
    };
    let total = repo.count_markets_filtered(&filter)?;
    let page = PageState::new(total, per_page, page);
    let markets = repo.filter_markets(&filter, &page.to_pagination())?;
    Ok(MarketSearchPage { page, markets })
}

/// Free-text search over market name, city and state.
pub fn search_markets_by_text<R: MarketRepo>(
    repo: &R,
    query: &str,
    per_page: u64,
    page: u64,
) -> Result<MarketSearchPage> {
    let query = validate::nonempty_trimmed(query).ok_or(Error::EmptyField("search text"))?;
    let total = repo.count_markets_matching_text(query)?;
    let page = PageState::new(total, per_page, page);
    let markets = repo.search_markets_by_text(query, &page.to_pagination())?;
    Ok(MarketSearchPage { page, markets })
}
