use diesel::sql_types::{BigInt, Double, Nullable, Text};

use super::schema::*;

#[derive(Queryable)]
pub struct LocationRow {
    pub id: i64,
    pub street: Option<String>,
    pub city: String,
    pub county: Option<String>,
    pub state: String,
    pub zip: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocationRow {
    pub street: Option<String>,
    pub city: String,
    pub county: Option<String>,
    pub state: String,
    pub zip: Option<String>,
}

#[derive(Queryable)]
pub struct MarketRow {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub other_media: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Insertable)]
#[diesel(table_name = markets)]
pub struct NewMarketRow {
    pub name: String,
    pub location_id: i64,
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub other_media: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Queryable)]
pub struct ReviewRow {
    pub id: i64,
    pub market_id: i64,
    pub user_name: String,
    pub rating: i16,
    pub text: String,
    pub author_id: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub market_id: i64,
    pub user_name: String,
    pub rating: i16,
    pub text: String,
    pub author_id: Option<i64>,
}

#[derive(Queryable)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

// Rows produced by the hand-written listing queries.

#[derive(QueryableByName)]
pub struct MarketSummaryRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub city: String,
    #[diesel(sql_type = Text)]
    pub state: String,
    #[diesel(sql_type = Double)]
    pub avg_rating: f64,
    #[diesel(sql_type = BigInt)]
    pub review_count: i64,
    #[diesel(sql_type = Nullable<Double>)]
    pub distance_miles: Option<f64>,
}

#[derive(QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

#[derive(QueryableByName)]
pub struct StateCountRow {
    #[diesel(sql_type = Text)]
    pub state: String,
    #[diesel(sql_type = BigInt)]
    pub market_count: i64,
}

#[derive(QueryableByName)]
pub struct CategoryCountRow {
    #[diesel(sql_type = Text)]
    pub category: String,
    #[diesel(sql_type = BigInt)]
    pub market_count: i64,
}
