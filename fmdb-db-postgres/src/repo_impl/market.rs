use super::*;

/// Haversine distance in statute miles between a market's position
/// and a reference point. `$1` is the reference latitude, `$2` the
/// reference longitude, both in decimal degrees. The `least` guard
/// keeps the argument of `asin` in range for antipodal points.
const DISTANCE_MILES_SQL: &str = "2.0 * 3959.0 * asin(sqrt(least(1.0, \
     power(sin(radians(m.lat - $1) / 2), 2) \
     + cos(radians($1)) * cos(radians(m.lat)) \
     * power(sin(radians(m.lng - $2) / 2), 2))))";

impl MarketRepo for Db {
    fn get_market(&self, id: MarketId) -> Result<Market> {
        get_market(&mut self.conn.borrow_mut(), id)
    }
    fn create_market(&self, market: NewMarket) -> Result<MarketId> {
        create_market(&mut self.conn.borrow_mut(), market)
    }
    fn delete_market(&self, id: MarketId) -> Result<()> {
        delete_market(&mut self.conn.borrow_mut(), id)
    }
    fn count_markets(&self) -> Result<u64> {
        count_markets(&mut self.conn.borrow_mut())
    }
    fn count_located_markets(&self) -> Result<u64> {
        count_located_markets(&mut self.conn.borrow_mut())
    }
    fn list_markets(
        &self,
        ordering: &MarketOrdering,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSummary>> {
        list_markets(&mut self.conn.borrow_mut(), ordering, pagination)
    }
    fn count_markets_filtered(&self, filter: &MarketFilter) -> Result<u64> {
        count_markets_filtered(&mut self.conn.borrow_mut(), filter)
    }
    fn filter_markets(
        &self,
        filter: &MarketFilter,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSearchHit>> {
        filter_markets(&mut self.conn.borrow_mut(), filter, pagination)
    }
    fn count_markets_matching_text(&self, query: &str) -> Result<u64> {
        count_markets_matching_text(&mut self.conn.borrow_mut(), query)
    }
    fn search_markets_by_text(
        &self,
        query: &str,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSearchHit>> {
        search_markets_by_text(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_markets_within_radius(&self, origin: GeoPoint, radius: Distance) -> Result<u64> {
        count_markets_within_radius(&mut self.conn.borrow_mut(), origin, radius)
    }
    fn markets_within_radius(
        &self,
        origin: GeoPoint,
        radius: Distance,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSummary>> {
        markets_within_radius(&mut self.conn.borrow_mut(), origin, radius, pagination)
    }
    fn count_markets_in_category(&self, category_id: CategoryId) -> Result<u64> {
        count_markets_in_category(&mut self.conn.borrow_mut(), category_id)
    }
    fn markets_in_category(
        &self,
        category_id: CategoryId,
        pagination: &Pagination,
    ) -> Result<Vec<MarketSummary>> {
        markets_in_category(&mut self.conn.borrow_mut(), category_id, pagination)
    }
}

pub(super) fn market_from_row(row: models::MarketRow) -> Market {
    let position = match (row.lat, row.lng) {
        (Some(lat), Some(lng)) => GeoPoint::try_from_lat_lng_deg(lat, lng),
        _ => None,
    };
    Market {
        id: row.id.into(),
        name: row.name,
        location_id: row.location_id.into(),
        links: MarketLinks {
            website: row.website,
            facebook: row.facebook,
            twitter: row.twitter,
            youtube: row.youtube,
            other_media: row.other_media,
        },
        position,
    }
}

fn summary_from_row(row: models::MarketSummaryRow) -> MarketSummary {
    MarketSummary {
        id: row.id.into(),
        name: row.name,
        city: row.city,
        state: row.state,
        avg_rating: row.avg_rating.into(),
        review_count: row.review_count as u64,
        distance: row.distance_miles.map(Distance::from_miles),
    }
}

fn get_market(conn: &mut PgConnection, id: MarketId) -> Result<Market> {
    let row = schema::markets::table
        .find(id.value())
        .first::<models::MarketRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(market_from_row(row))
}

fn create_market(conn: &mut PgConnection, market: NewMarket) -> Result<MarketId> {
    let NewMarket {
        name,
        location_id,
        links,
        position,
    } = market;
    let new_row = models::NewMarketRow {
        name,
        location_id: location_id.value(),
        website: links.website,
        facebook: links.facebook,
        twitter: links.twitter,
        youtube: links.youtube,
        other_media: links.other_media,
        lat: position.map(GeoPoint::lat),
        lng: position.map(GeoPoint::lng),
    };
    let id = diesel::insert_into(schema::markets::table)
        .values(&new_row)
        .returning(schema::markets::id)
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(id.into())
}

fn delete_market(conn: &mut PgConnection, id: MarketId) -> Result<()> {
    // Reviews and category assignments go away with the market
    // (ON DELETE CASCADE).
    let count = diesel::delete(schema::markets::table.find(id.value()))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn count_markets(conn: &mut PgConnection) -> Result<u64> {
    let total = schema::markets::table
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(total as u64)
}

fn count_located_markets(conn: &mut PgConnection) -> Result<u64> {
    use schema::markets::dsl;
    let total = schema::markets::table
        .filter(dsl::lat.is_not_null())
        .filter(dsl::lng.is_not_null())
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(total as u64)
}

/// Maps an ordering to its ORDER BY clause. Only values from this
/// enumeration ever reach the SQL text; user input never does.
/// Every clause ends in the id so that paging is deterministic.
fn order_clause(ordering: &MarketOrdering) -> &'static str {
    use SortDirection::*;
    match ordering {
        MarketOrdering::ById(Ascending) => "m.id ASC",
        MarketOrdering::ById(Descending) => "m.id DESC",
        MarketOrdering::ByRating(Ascending) => "avg_rating ASC, m.id ASC",
        MarketOrdering::ByRating(Descending) => "avg_rating DESC, m.id ASC",
        MarketOrdering::ByCity(Ascending) => "l.city ASC, m.id ASC",
        MarketOrdering::ByCity(Descending) => "l.city DESC, m.id ASC",
        MarketOrdering::ByState(Ascending) => "l.state ASC, m.id ASC",
        MarketOrdering::ByState(Descending) => "l.state DESC, m.id ASC",
        MarketOrdering::ByDistance { .. } => "distance_miles ASC, id ASC",
    }
}

fn list_markets(
    conn: &mut PgConnection,
    ordering: &MarketOrdering,
    pagination: &Pagination,
) -> Result<Vec<MarketSummary>> {
    if let MarketOrdering::ByDistance { origin } = ordering {
        // Distance listings share the radius query with an
        // unbounded radius.
        return markets_within_radius(conn, *origin, Distance::infinite(), pagination);
    }
    let sql = format!(
        "SELECT m.id, m.name, l.city, l.state, \
         COALESCE(AVG(r.rating), 0)::float8 AS avg_rating, \
         COUNT(r.id) AS review_count, \
         NULL::float8 AS distance_miles \
         FROM markets m \
         JOIN locations l ON l.id = m.location_id \
         LEFT JOIN reviews r ON r.market_id = m.id \
         GROUP BY m.id, m.name, l.city, l.state \
         ORDER BY {order} \
         LIMIT $1 OFFSET $2",
        order = order_clause(ordering),
    );
    let rows = diesel::sql_query(sql)
        .bind::<BigInt, _>(pagination.limit as i64)
        .bind::<BigInt, _>(pagination.offset as i64)
        .load::<models::MarketSummaryRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(summary_from_row).collect())
}

fn count_markets_within_radius(
    conn: &mut PgConnection,
    origin: GeoPoint,
    radius: Distance,
) -> Result<u64> {
    let sql = format!(
        "SELECT COUNT(*) AS total FROM ( \
         SELECT {DISTANCE_MILES_SQL} AS distance_miles \
         FROM markets m \
         WHERE m.lat IS NOT NULL AND m.lng IS NOT NULL \
         ) AS located \
         WHERE distance_miles <= $3",
    );
    let row = diesel::sql_query(sql)
        .bind::<Double, _>(origin.lat())
        .bind::<Double, _>(origin.lng())
        .bind::<Double, _>(radius.to_miles())
        .get_result::<models::CountRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(row.total as u64)
}

fn markets_within_radius(
    conn: &mut PgConnection,
    origin: GeoPoint,
    radius: Distance,
    pagination: &Pagination,
) -> Result<Vec<MarketSummary>> {
    let sql = format!(
        "SELECT id, name, city, state, avg_rating, review_count, distance_miles FROM ( \
         SELECT m.id, m.name, l.city, l.state, \
         COALESCE(AVG(r.rating), 0)::float8 AS avg_rating, \
         COUNT(r.id) AS review_count, \
         {DISTANCE_MILES_SQL} AS distance_miles \
         FROM markets m \
         JOIN locations l ON l.id = m.location_id \
         LEFT JOIN reviews r ON r.market_id = m.id \
         WHERE m.lat IS NOT NULL AND m.lng IS NOT NULL \
         GROUP BY m.id, m.name, l.city, l.state, m.lat, m.lng \
         ) AS located \
         WHERE distance_miles <= $3 \
         ORDER BY distance_miles ASC, id ASC \
         LIMIT $4 OFFSET $5",
    );
    let rows = diesel::sql_query(sql)
        .bind::<Double, _>(origin.lat())
        .bind::<Double, _>(origin.lng())
        .bind::<Double, _>(radius.to_miles())
        .bind::<BigInt, _>(pagination.limit as i64)
        .bind::<BigInt, _>(pagination.offset as i64)
        .load::<models::MarketSummaryRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(summary_from_row).collect())
}

type SearchHitTuple = (i64, String, String, String, Option<String>);

fn search_hit_from_tuple((id, name, city, state, zip): SearchHitTuple) -> MarketSearchHit {
    MarketSearchHit {
        id: id.into(),
        name,
        city,
        state,
        zip,
    }
}

fn count_markets_filtered(conn: &mut PgConnection, filter: &MarketFilter) -> Result<u64> {
    use schema::{locations, markets};
    let mut query = markets::table
        .inner_join(locations::table)
        .count()
        .into_boxed();
    if let Some(city) = &filter.city {
        query = query.filter(locations::city.ilike(format!("%{city}%")));
    }
    if let Some(state) = &filter.state {
        query = query.filter(locations::state.ilike(format!("%{state}%")));
    }
    if let Some(zip) = &filter.zip {
        query = query.filter(locations::zip.eq(zip.clone()));
    }
    let total = query.get_result::<i64>(conn).map_err(from_diesel_err)?;
    Ok(total as u64)
}

fn filter_markets(
    conn: &mut PgConnection,
    filter: &MarketFilter,
    pagination: &Pagination,
) -> Result<Vec<MarketSearchHit>> {
    use schema::{locations, markets};
    let mut query = markets::table
        .inner_join(locations::table)
        .select((
            markets::id,
            markets::name,
            locations::city,
            locations::state,
            locations::zip,
        ))
        .order(markets::id.asc())
        .into_boxed();
    if let Some(city) = &filter.city {
        query = query.filter(locations::city.ilike(format!("%{city}%")));
    }
    if let Some(state) = &filter.state {
        query = query.filter(locations::state.ilike(format!("%{state}%")));
    }
    if let Some(zip) = &filter.zip {
        query = query.filter(locations::zip.eq(zip.clone()));
    }
    let rows = query
        .limit(pagination.limit as i64)
        .offset(pagination.offset as i64)
        .load::<SearchHitTuple>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(search_hit_from_tuple).collect())
}

fn count_markets_matching_text(conn: &mut PgConnection, query: &str) -> Result<u64> {
    use schema::{locations, markets};
    let pattern = format!("%{query}%");
    let total = markets::table
        .inner_join(locations::table)
        .filter(
            markets::name
                .ilike(pattern.clone())
                .or(locations::city.ilike(pattern.clone()))
                .or(locations::state.ilike(pattern)),
        )
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(total as u64)
}

fn search_markets_by_text(
    conn: &mut PgConnection,
    query: &str,
    pagination: &Pagination,
) -> Result<Vec<MarketSearchHit>> {
    use schema::{locations, markets};
    let pattern = format!("%{query}%");
    let rows = markets::table
        .inner_join(locations::table)
        .filter(
            markets::name
                .ilike(pattern.clone())
                .or(locations::city.ilike(pattern.clone()))
                .or(locations::state.ilike(pattern)),
        )
        .select((
            markets::id,
            markets::name,
            locations::city,
            locations::state,
            locations::zip,
        ))
        .order((markets::name.asc(), markets::id.asc()))
        .limit(pagination.limit as i64)
        .offset(pagination.offset as i64)
        .load::<SearchHitTuple>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(search_hit_from_tuple).collect())
}

fn count_markets_in_category(conn: &mut PgConnection, category_id: CategoryId) -> Result<u64> {
    use schema::market_categories::dsl;
    let total = schema::market_categories::table
        .filter(dsl::category_id.eq(category_id.value()))
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(total as u64)
}

fn markets_in_category(
    conn: &mut PgConnection,
    category_id: CategoryId,
    pagination: &Pagination,
) -> Result<Vec<MarketSummary>> {
    let sql = "SELECT m.id, m.name, l.city, l.state, \
         COALESCE(AVG(r.rating), 0)::float8 AS avg_rating, \
         COUNT(r.id) AS review_count, \
         NULL::float8 AS distance_miles \
         FROM markets m \
         JOIN locations l ON l.id = m.location_id \
         JOIN market_categories mc ON mc.market_id = m.id \
         LEFT JOIN reviews r ON r.market_id = m.id \
         WHERE mc.category_id = $1 \
         GROUP BY m.id, m.name, l.city, l.state \
         ORDER BY m.id ASC \
         LIMIT $2 OFFSET $3";
    let rows = diesel::sql_query(sql)
        .bind::<BigInt, _>(category_id.value())
        .bind::<BigInt, _>(pagination.limit as i64)
        .bind::<BigInt, _>(pagination.offset as i64)
        .load::<models::MarketSummaryRow>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows.into_iter().map(summary_from_row).collect())
}
