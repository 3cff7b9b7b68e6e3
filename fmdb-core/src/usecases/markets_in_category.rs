use super::{list_markets::MarketPage, prelude::*};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMarkets {
    pub category: Category,
    pub page: MarketPage,
}

/// Loads one page of the markets assigned to a category.
pub fn markets_in_category<R>(
    repo: &R,
    category_id: CategoryId,
    per_page: u64,
    page: u64,
) -> Result<CategoryMarkets>
where
    R: MarketRepo + CategoryRepo,
{
    let category = repo.get_category(category_id)?;
    let total = repo.count_markets_in_category(category_id)?;
    let page = PageState::new(total, per_page, page);
    let markets = repo.markets_in_category(category_id, &page.to_pagination())?;
    Ok(CategoryMarkets {
        category,
        page: MarketPage { page, markets },
    })
}
