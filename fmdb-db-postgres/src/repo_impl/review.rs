use super::*;

impl ReviewRepo for Db {
    fn create_review(&self, review: NewReview) -> Result<ReviewId> {
        create_review(&mut self.conn.borrow_mut(), review)
    }
    fn get_review(&self, id: ReviewId) -> Result<Review> {
        get_review(&mut self.conn.borrow_mut(), id)
    }
    fn load_reviews_of_market(&self, market_id: MarketId) -> Result<Vec<Review>> {
        load_reviews_of_market(&mut self.conn.borrow_mut(), market_id)
    }
    fn delete_review(&self, id: ReviewId) -> Result<()> {
        delete_review(&mut self.conn.borrow_mut(), id)
    }
    fn count_reviews(&self) -> Result<u64> {
        count_reviews(&mut self.conn.borrow_mut())
    }
}

fn review_from_row(row: models::ReviewRow) -> Result<Review> {
    // The column has a CHECK constraint, so an out-of-range value
    // means the database was tampered with.
    let rating = Rating::new(row.rating)
        .map_err(|err| repo::Error::Other(anyhow::Error::new(err)))?;
    Ok(Review {
        id: row.id.into(),
        market_id: row.market_id.into(),
        user_name: row.user_name,
        rating,
        text: row.text,
        author_id: row.author_id.map(Into::into),
    })
}

fn create_review(conn: &mut PgConnection, review: NewReview) -> Result<ReviewId> {
    let NewReview {
        market_id,
        user_name,
        rating,
        text,
        author_id,
    } = review;
    let new_row = models::NewReviewRow {
        market_id: market_id.value(),
        user_name,
        rating: rating.into(),
        text,
        author_id: author_id.map(UserId::value),
    };
    let id = diesel::insert_into(schema::reviews::table)
        .values(&new_row)
        .returning(schema::reviews::id)
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(id.into())
}

fn get_review(conn: &mut PgConnection, id: ReviewId) -> Result<Review> {
    let row = schema::reviews::table
        .find(id.value())
        .first::<models::ReviewRow>(conn)
        .map_err(from_diesel_err)?;
    review_from_row(row)
}

fn load_reviews_of_market(conn: &mut PgConnection, market_id: MarketId) -> Result<Vec<Review>> {
    use schema::reviews::dsl;
    let rows = schema::reviews::table
        .filter(dsl::market_id.eq(market_id.value()))
        .order(dsl::id.asc())
        .load::<models::ReviewRow>(conn)
        .map_err(from_diesel_err)?;
    rows.into_iter().map(review_from_row).collect()
}

fn delete_review(conn: &mut PgConnection, id: ReviewId) -> Result<()> {
    let count = diesel::delete(schema::reviews::table.find(id.value()))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn count_reviews(conn: &mut PgConnection) -> Result<u64> {
    let total = schema::reviews::table
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(total as u64)
}
