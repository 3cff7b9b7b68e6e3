use super::prelude::*;

/// Everything the detail view of a single market shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDetails {
    pub market: Market,
    pub location: Location,
    pub categories: Vec<Category>,
    pub reviews: Vec<Review>,
    pub avg_rating: AvgRating,
}

pub fn market_details<R>(repo: &R, id: MarketId) -> Result<MarketDetails>
where
    R: MarketRepo + LocationRepo + ReviewRepo + CategoryRepo,
{
    let market = repo.get_market(id)?;
    let location = repo.get_location(market.location_id)?;
    let categories = repo.categories_of_market(id)?;
    let reviews = repo.load_reviews_of_market(id)?;
    let ratings: Vec<_> = reviews.iter().map(|r| r.rating).collect();
    let avg_rating = AvgRating::from_ratings(&ratings);
    Ok(MarketDetails {
        market,
        location,
        categories,
        reviews,
        avg_rating,
    })
}
