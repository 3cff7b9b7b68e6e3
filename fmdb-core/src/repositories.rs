// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.
//
// Every method maps to a single statement executed in its own
// implicit transaction (autocommit). In particular a count query and
// the row query of the same listing do not share a snapshot: the
// total used for pagination can be stale if another writer commits
// in between. This race is accepted.

use crate::{entities::*, util::sort::MarketOrdering};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Resolved paging window as passed to the row source.
///
/// Derived from user input by [`crate::util::paging::PageState`];
/// repositories never see raw page numbers.
#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

/// One row of a market listing, including the fields derived per
/// request (average rating, review count and, for distance queries,
/// the distance to the reference point).
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub id: MarketId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub avg_rating: AvgRating,
    pub review_count: u64,
    pub distance: Option<Distance>,
}

/// One row of a market search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSearchHit {
    pub id: MarketId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub zip: Option<String>,
}

/// Search criteria for the city/state/zip search. Empty fields do
/// not restrict the result. City and state match as case-insensitive
/// substrings, zip matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl MarketFilter {
    pub fn is_empty(&self) -> bool {
        let Self { city, state, zip } = self;
        city.is_none() && state.is_none() && zip.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMarket {
    pub name: String,
    pub location_id: LocationId,
    pub links: MarketLinks,
    pub position: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub street: Option<String>,
    pub city: String,
    pub county: Option<String>,
    pub state: String,
    pub zip: Option<String>,
}

/// A validated review that is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub market_id: MarketId,
    pub user_name: String,
    pub rating: Rating,
    pub text: String,
    pub author_id: Option<UserId>,
}

pub trait MarketRepo {
    fn get_market(&self, id: MarketId) -> Result<Market>;
    fn create_market(&self, market: NewMarket) -> Result<MarketId>;
    fn delete_market(&self, id: MarketId) -> Result<()>;

    fn count_markets(&self) -> Result<u64>;
    // Only markets with non-null coordinates, i.e. the total that
    // pairs with distance-ordered listings.
    fn count_located_markets(&self) -> Result<u64>;
    fn list_markets(
        &self,
        ordering: &MarketOrdering,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSummary>>;

    fn count_markets_filtered(&self, filter: &MarketFilter) -> Result<u64>;
    fn filter_markets(
        &self,
        filter: &MarketFilter,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSearchHit>>;

    // Substring search over name/city/state, ordered by name.
    fn count_markets_matching_text(&self, query: &str) -> Result<u64>;
    fn search_markets_by_text(
        &self,
        query: &str,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSearchHit>>;

    // Rows sorted ascending by distance, ties broken by id.
    fn count_markets_within_radius(&self, origin: GeoPoint, radius: Distance) -> Result<u64>;
    fn markets_within_radius(
        &self,
        origin: GeoPoint,
        radius: Distance,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSummary>>;

    fn count_markets_in_category(&self, category_id: CategoryId) -> Result<u64>;
    fn markets_in_category(
        &self,
        category_id: CategoryId,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSummary>>;
}

pub trait LocationRepo {
    fn get_location(&self, id: LocationId) -> Result<Location>;
    fn create_location(&self, location: NewLocation) -> Result<LocationId>;
}

pub trait ReviewRepo {
    fn create_review(&self, review: NewReview) -> Result<ReviewId>;
    fn get_review(&self, id: ReviewId) -> Result<Review>;
    fn load_reviews_of_market(&self, market_id: MarketId) -> Result<Vec<Review>>;
    fn delete_review(&self, id: ReviewId) -> Result<()>;
    fn count_reviews(&self) -> Result<u64>;
}

pub trait CategoryRepo {
    fn all_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, id: CategoryId) -> Result<Category>;
    fn categories_of_market(&self, market_id: MarketId) -> Result<Vec<Category>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMarketCount {
    pub state: String,
    pub market_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMarketCount {
    pub category: String,
    pub market_count: u64,
}

pub trait StatsRepo {
    fn distinct_state_count(&self) -> Result<u64>;
    fn distinct_city_count(&self) -> Result<u64>;
    fn top_states_by_market_count(&self, limit: u64) -> Result<Vec<StateMarketCount>>;
    fn top_categories_by_market_count(&self, limit: u64) -> Result<Vec<CategoryMarketCount>>;
}
