use super::prelude::*;

/// Deletes a market and everything hanging off it (reviews and
/// category assignments are removed by the storage layer).
pub fn delete_market<R: MarketRepo>(repo: &R, id: MarketId) -> Result<()> {
    Ok(repo.delete_market(id)?)
}
