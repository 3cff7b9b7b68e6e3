use super::*;

impl StatsRepo for Db {
    fn distinct_state_count(&self) -> Result<u64> {
        distinct_count(&mut self.conn.borrow_mut(), "state")
    }
    fn distinct_city_count(&self) -> Result<u64> {
        distinct_count(&mut self.conn.borrow_mut(), "city")
    }
    fn top_states_by_market_count(&self, limit: u64) -> Result<Vec<StateMarketCount>> {
        top_states_by_market_count(&mut self.conn.borrow_mut(), limit)
    }
    fn top_categories_by_market_count(&self, limit: u64) -> Result<Vec<CategoryMarketCount>> {
        top_categories_by_market_count(&mut self.conn.borrow_mut(), limit)
    }
}

// `column` is one of two fixed identifiers, never user input.
fn distinct_count(conn: &mut PgConnection, column: &'static str) -> Result<u64> {
    let sql = format!(
        "SELECT COUNT(DISTINCT l.{column}) AS total \
         FROM markets m \
         JOIN locations l ON l.id = m.location_id",
    );
    let row = diesel::sql_query(sql)
        .get_result::<models::CountRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(row.total as u64)
}

fn top_states_by_market_count(
    conn: &mut PgConnection,
    limit: u64,
) -> Result<Vec<StateMarketCount>> {
    let sql = "SELECT l.state AS state, COUNT(*) AS market_count \
         FROM markets m \
         JOIN locations l ON l.id = m.location_id \
         GROUP BY l.state \
         ORDER BY market_count DESC, state ASC \
         LIMIT $1";
    let rows = diesel::sql_query(sql)
        .bind::<BigInt, _>(limit as i64)
        .load::<models::StateCountRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows
        .into_iter()
        .map(|row| StateMarketCount {
            state: row.state,
            market_count: row.market_count as u64,
        })
        .collect())
}

fn top_categories_by_market_count(
    conn: &mut PgConnection,
    limit: u64,
) -> Result<Vec<CategoryMarketCount>> {
    // Inner join: categories without any market stay off the chart.
    let sql = "SELECT c.name AS category, COUNT(mc.market_id) AS market_count \
         FROM categories c \
         JOIN market_categories mc ON mc.category_id = c.id \
         GROUP BY c.name \
         ORDER BY market_count DESC, category ASC \
         LIMIT $1";
    let rows = diesel::sql_query(sql)
        .bind::<BigInt, _>(limit as i64)
        .load::<models::CategoryCountRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows
        .into_iter()
        .map(|row| CategoryMarketCount {
            category: row.category,
            market_count: row.market_count as u64,
        })
        .collect())
}
