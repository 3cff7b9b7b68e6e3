use super::prelude::*;

/// One page of a market listing together with the paging state it
/// was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPage {
    pub page: PageState,
    pub markets: Vec<MarketSummary>,
}

/// Loads one page of the market directory in the given order.
///
/// Distance orderings can only rank markets with known coordinates,
/// so their page math uses the located-markets total. All other
/// orderings page over the full directory.
pub fn list_markets<R: MarketRepo>(
    repo: &R,
    ordering: &MarketOrdering,
    per_page: u64,
    page: u64,
) -> Result<MarketPage> {
    let total = if ordering.requires_coordinates() {
        repo.count_located_markets()?
    } else {
        repo.count_markets()?
    };
    let page = PageState::new(total, per_page, page);
    let markets = repo.list_markets(ordering, &page.to_pagination())?;
    Ok(MarketPage { page, markets })
}
