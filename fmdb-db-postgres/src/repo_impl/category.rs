use super::*;

impl CategoryRepo for Db {
    fn all_categories(&self) -> Result<Vec<Category>> {
        all_categories(&mut self.conn.borrow_mut())
    }
    fn get_category(&self, id: CategoryId) -> Result<Category> {
        get_category(&mut self.conn.borrow_mut(), id)
    }
    fn categories_of_market(&self, market_id: MarketId) -> Result<Vec<Category>> {
        categories_of_market(&mut self.conn.borrow_mut(), market_id)
    }
}

fn category_from_row(row: models::CategoryRow) -> Category {
    Category {
        id: row.id.into(),
        name: row.name,
    }
}

fn all_categories(conn: &mut PgConnection) -> Result<Vec<Category>> {
    use schema::categories::dsl;
    let rows = schema::categories::table
        .order(dsl::name.asc())
        .load::<models::CategoryRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(category_from_row).collect())
}

fn get_category(conn: &mut PgConnection, id: CategoryId) -> Result<Category> {
    let row = schema::categories::table
        .find(id.value())
        .first::<models::CategoryRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(category_from_row(row))
}

fn categories_of_market(conn: &mut PgConnection, market_id: MarketId) -> Result<Vec<Category>> {
    use schema::{categories, market_categories};
    let rows = market_categories::table
        .inner_join(categories::table)
        .filter(market_categories::market_id.eq(market_id.value()))
        .select((categories::id, categories::name))
        .order(categories::name.asc())
        .load::<models::CategoryRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(category_from_row).collect())
}
