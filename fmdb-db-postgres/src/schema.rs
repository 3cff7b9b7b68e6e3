table! {
    locations (id) {
        id -> BigInt,
        street -> Nullable<Text>,
        city -> Text,
        county -> Nullable<Text>,
        state -> Text,
        zip -> Nullable<Text>,
    }
}

table! {
    markets (id) {
        id -> BigInt,
        name -> Text,
        location_id -> BigInt,
        website -> Nullable<Text>,
        facebook -> Nullable<Text>,
        twitter -> Nullable<Text>,
        youtube -> Nullable<Text>,
        other_media -> Nullable<Text>,
        // NULL for markets the source dataset has no coordinates for
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
    }
}

joinable!(markets -> locations (location_id));

table! {
    reviews (id) {
        id -> BigInt,
        market_id -> BigInt,
        user_name -> Text,
        rating -> SmallInt,
        text -> Text,
        author_id -> Nullable<BigInt>,
    }
}

joinable!(reviews -> markets (market_id));

table! {
    categories (id) {
        id -> BigInt,
        name -> Text,
    }
}

table! {
    market_categories (market_id, category_id) {
        market_id -> BigInt,
        category_id -> BigInt,
    }
}

joinable!(market_categories -> markets (market_id));
joinable!(market_categories -> categories (category_id));

allow_tables_to_appear_in_same_query!(locations, markets, reviews, categories, market_categories);
