mod add_review;
mod create_market;
mod delete_market;
mod delete_review;
mod error;
mod list_markets;
mod market_details;
mod markets_in_category;
mod markets_within_radius;
mod search_markets;
mod stats;

#[cfg(test)]
mod tests;

pub use self::{
    add_review::*, create_market::*, delete_market::*, delete_review::*, error::Error,
    list_markets::*, market_details::*, markets_in_category::*, markets_within_radius::*,
    search_markets::*, stats::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        entities::*,
        repositories::*,
        util::{paging::PageState, sort::MarketOrdering, validate},
    };
}
use self::prelude::*;

pub fn get_market<R: MarketRepo>(repo: &R, id: MarketId) -> Result<Market> {
    Ok(repo.get_market(id)?)
}

pub fn all_categories<R: CategoryRepo>(repo: &R) -> Result<Vec<Category>> {
    Ok(repo.all_categories()?)
}
