use super::prelude::*;

/// Raw input for creating a market, as collected by a front-end.
#[derive(Debug, Clone, Default)]
pub struct NewMarketRequest {
    pub name: String,
    pub street: Option<String>,
    pub city: String,
    pub county: Option<String>,
    pub state: String,
    pub zip: Option<String>,
    pub links: MarketLinks,
    pub position: Option<GeoPoint>,
}

/// Validates the request, stores the location and then the market
/// referencing it.
pub fn create_market<R>(repo: &R, req: NewMarketRequest) -> Result<MarketId>
where
    R: MarketRepo + LocationRepo,
{
    let name = validate::nonempty_trimmed(&req.name)
        .ok_or(Error::EmptyField("name"))?
        .to_string();
    let city = validate::nonempty_trimmed(&req.city)
        .ok_or(Error::EmptyField("city"))?
        .to_string();
    let state = validate::nonempty_trimmed(&req.state)
        .ok_or(Error::EmptyField("state"))?
        .to_string();

    let location_id = repo.create_location(NewLocation {
        street: validate::optional_trimmed(req.street.as_deref()),
        city,
        county: validate::optional_trimmed(req.county.as_deref()),
        state,
        zip: validate::optional_trimmed(req.zip.as_deref()),
    })?;

    Ok(repo.create_market(NewMarket {
        name,
        location_id,
        links: req.links,
        position: req.position,
    })?)
}
