use super::prelude::*;

/// Raw input for a new review. The rating arrives as the primitive
/// the front-end read and is validated here.
#[derive(Debug, Clone)]
pub struct NewReviewRequest {
    pub market_id: MarketId,
    pub user_name: String,
    pub rating: RatingPrimitive,
    pub text: String,
    pub author_id: Option<UserId>,
}

pub fn add_review<R>(repo: &R, req: NewReviewRequest) -> Result<ReviewId>
where
    R: MarketRepo + ReviewRepo,
{
    let rating = Rating::new(req.rating)?;
    let user_name = validate::nonempty_trimmed(&req.user_name)
        .ok_or(Error::EmptyField("name"))?
        .to_string();
    let text = validate::nonempty_trimmed(&req.text)
        .ok_or(Error::EmptyReviewText)?
        .to_string();

    // The market must exist; a dangling review helps nobody.
    repo.get_market(req.market_id)?;

    Ok(repo.create_review(NewReview {
        market_id: req.market_id,
        user_name,
        rating,
        text,
        author_id: req.author_id,
    })?)
}
