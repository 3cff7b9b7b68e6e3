use super::prelude::*;

pub const TOP_STATES_LIMIT: u64 = 10;
pub const TOP_CATEGORIES_LIMIT: u64 = 10;

/// The numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStats {
    pub market_count: u64,
    pub review_count: u64,
    pub state_count: u64,
    pub city_count: u64,
    pub top_states: Vec<StateMarketCount>,
    pub category_counts: Vec<CategoryMarketCount>,
}

pub fn directory_stats<R>(repo: &R) -> Result<DirectoryStats>
where
    R: MarketRepo + ReviewRepo + StatsRepo,
{
    Ok(DirectoryStats {
        market_count: repo.count_markets()?,
        review_count: repo.count_reviews()?,
        state_count: repo.distinct_state_count()?,
        city_count: repo.distinct_city_count()?,
        top_states: repo.top_states_by_market_count(TOP_STATES_LIMIT)?,
        category_counts: repo.top_categories_by_market_count(TOP_CATEGORIES_LIMIT)?,
    })
}
