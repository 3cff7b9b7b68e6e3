
use self::mock_db::MockDb;
use super::Error;
use super::*;
use crate::{
    entities::*,
    repositories::*,
    util::sort::{MarketOrdering, SortDirection},
};

const MINNEAPOLIS: (f64, f64) = (44.98, -93.26);
const ST_PAUL: (f64, f64) = (44.95, -93.09);
const DULUTH: (f64, f64) = (46.79, -92.10);
const CHICAGO: (f64, f64) = (41.88, -87.63);

fn add_market(
    db: &MockDb,
    name: &str,
    city: &str,
    state: &str,
    pos: Option<(f64, f64)>,
) -> MarketId {
    create_market(
        db,
        NewMarketRequest {
            name: name.into(),
            city: city.into(),
            state: state.into(),
            position: pos.and_then(|(lat, lng)| GeoPoint::try_from_lat_lng_deg(lat, lng)),
            ..Default::default()
        },
    )
    .unwrap()
}

fn add_rated_review(db: &MockDb, market_id: MarketId, rating: RatingPrimitive) -> ReviewId {
    add_review(
        db,
        NewReviewRequest {
            market_id,
            user_name: "pat".into(),
            rating,
            text: "worth a visit".into(),
            author_id: None,
        },
    )
    .unwrap()
}

fn origin() -> GeoPoint {
    GeoPoint::try_from_lat_lng_deg(MINNEAPOLIS.0, MINNEAPOLIS.1).unwrap()
}

#[test]
fn ratings_average_into_the_listing() {
    use fmdb_entities::builders::Builder;

    let db = MockDb::default();
    db.locations.borrow_mut().push(
        Location::build()
            .id(1)
            .city("Minneapolis")
            .state("MN")
            .finish(),
    );
    db.markets.borrow_mut().push(
        Market::build()
            .id(2)
            .name("Mill City")
            .location_id(1)
            .finish(),
    );
    db.reviews.borrow_mut().push(
        Review::build()
            .id(3)
            .market_id(2)
            .user_name("pat")
            .rating(4)
            .text("good")
            .finish(),
    );
    db.reviews.borrow_mut().push(
        Review::build()
            .id(4)
            .market_id(2)
            .user_name("sam")
            .rating(2)
            .text("meh")
            .finish(),
    );

    let result = list_markets(&db, &MarketOrdering::default(), 10, 1).unwrap();
    assert_eq!(3.0, result.markets[0].avg_rating.to_f64());
    assert_eq!(2, result.markets[0].review_count);
}

#[test]
fn list_markets_pages_by_id() {
    let db = MockDb::default();
    let ids: Vec<_> = (0..7)
        .map(|i| add_market(&db, &format!("Market {i}"), "Mill City", "MN", None))
        .collect();

    let result = list_markets(&db, &MarketOrdering::default(), 3, 3).unwrap();
    assert_eq!(7, result.page.total);
    assert_eq!(3, result.page.total_pages);
    assert_eq!(3, result.page.page);
    assert_eq!(6, result.page.offset);
    assert_eq!(1, result.markets.len());
    assert_eq!(ids[6], result.markets[0].id);
}

#[test]
fn list_markets_clamps_page_into_range() {
    let db = MockDb::default();
    for i in 0..5 {
        add_market(&db, &format!("Market {i}"), "Mill City", "MN", None);
    }
    let result = list_markets(&db, &MarketOrdering::default(), 2, 99).unwrap();
    assert_eq!(3, result.page.page);
    assert_eq!(1, result.markets.len());
}

#[test]
fn list_markets_on_empty_directory() {
    let db = MockDb::default();
    let result = list_markets(&db, &MarketOrdering::default(), 10, 1).unwrap();
    assert_eq!(0, result.page.total);
    assert_eq!(1, result.page.total_pages);
    assert_eq!(1, result.page.page);
    assert!(result.markets.is_empty());
}

#[test]
fn list_markets_by_rating_descending() {
    let db = MockDb::default();
    let low = add_market(&db, "Low", "A", "MN", None);
    let unrated = add_market(&db, "Unrated", "B", "MN", None);
    let high = add_market(&db, "High", "C", "MN", None);

    add_rated_review(&db, low, 2);
    add_rated_review(&db, high, 4);
    add_rated_review(&db, high, 5);

    let ordering = MarketOrdering::ByRating(SortDirection::Descending);
    let result = list_markets(&db, &ordering, 10, 1).unwrap();
    let ids: Vec<_> = result.markets.iter().map(|m| m.id).collect();
    assert_eq!(vec![high, low, unrated], ids);
    assert_eq!(4.5, result.markets[0].avg_rating.to_f64());
    assert_eq!(2, result.markets[0].review_count);
    // Markets without reviews average to zero instead of dropping out.
    assert_eq!(0.0, result.markets[2].avg_rating.to_f64());
}

#[test]
fn list_markets_by_city_breaks_ties_by_id() {
    let db = MockDb::default();
    let b1 = add_market(&db, "First", "Bemidji", "MN", None);
    let a = add_market(&db, "Second", "Austin", "MN", None);
    let b2 = add_market(&db, "Third", "Bemidji", "MN", None);

    let ordering = MarketOrdering::ByCity(SortDirection::Ascending);
    let result = list_markets(&db, &ordering, 10, 1).unwrap();
    let ids: Vec<_> = result.markets.iter().map(|m| m.id).collect();
    assert_eq!(vec![a, b1, b2], ids);
}

#[test]
fn distance_listing_pages_over_located_markets_only() {
    let db = MockDb::default();
    let near = add_market(&db, "Near", "St Paul", "MN", Some(ST_PAUL));
    let far = add_market(&db, "Far", "Duluth", "MN", Some(DULUTH));
    add_market(&db, "Nowhere", "Unknown", "MN", None);

    let ordering = MarketOrdering::ByDistance { origin: origin() };
    let result = list_markets(&db, &ordering, 10, 1).unwrap();
    assert_eq!(2, result.page.total);
    let ids: Vec<_> = result.markets.iter().map(|m| m.id).collect();
    assert_eq!(vec![near, far], ids);
    let d0 = result.markets[0].distance.unwrap().to_miles();
    let d1 = result.markets[1].distance.unwrap().to_miles();
    assert!(d0 < d1);
    assert!(d0 > 5.0 && d0 < 15.0);
}

#[test]
fn filter_search_matches_substrings_case_insensitively() {
    let db = MockDb::default();
    let mpls = add_market(&db, "Mill City", "Minneapolis", "MN", None);
    add_market(&db, "Pike Place", "Seattle", "WA", None);

    let filter = MarketFilter {
        city: Some("minnea".into()),
        ..Default::default()
    };
    let result = search_markets(&db, &filter, 10, 1).unwrap();
    assert_eq!(1, result.page.total);
    assert_eq!(mpls, result.markets[0].id);

    // An empty filter matches everything.
    let result = search_markets(&db, &MarketFilter::default(), 10, 1).unwrap();
    assert_eq!(2, result.page.total);
}

#[test]
fn filter_search_matches_zip_exactly() {
    let db = MockDb::default();
    let id = create_market(
        &db,
        NewMarketRequest {
            name: "Mill City".into(),
            city: "Minneapolis".into(),
            state: "MN".into(),
            zip: Some("55401".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let filter = MarketFilter {
        zip: Some("55401".into()),
        ..Default::default()
    };
    let result = search_markets(&db, &filter, 10, 1).unwrap();
    assert_eq!(vec![id], result.markets.iter().map(|m| m.id).collect::<Vec<_>>());

    let filter = MarketFilter {
        zip: Some("554".into()),
        ..Default::default()
    };
    assert_eq!(0, search_markets(&db, &filter, 10, 1).unwrap().page.total);
}

#[test]
fn text_search_requires_a_query() {
    let db = MockDb::default();
    assert!(matches!(
        search_markets_by_text(&db, "  ", 10, 1),
        Err(Error::EmptyField(_))
    ));
}

#[test]
fn text_search_covers_name_city_and_state() {
    let db = MockDb::default();
    let a = add_market(&db, "Grand Farmers Market", "Duluth", "MN", None);
    let b = add_market(&db, "Riverside", "Grand Rapids", "MI", None);
    add_market(&db, "Pike Place", "Seattle", "WA", None);

    let result = search_markets_by_text(&db, "grand", 10, 1).unwrap();
    assert_eq!(2, result.page.total);
    let ids: Vec<_> = result.markets.iter().map(|m| m.id).collect();
    assert!(ids.contains(&a) && ids.contains(&b));
}

#[test]
fn radius_search_excludes_markets_beyond_the_radius() {
    let db = MockDb::default();
    let near = add_market(&db, "Near", "St Paul", "MN", Some(ST_PAUL));
    add_market(&db, "Far", "Duluth", "MN", Some(DULUTH));
    add_market(&db, "Farther", "Chicago", "IL", Some(CHICAGO));
    add_market(&db, "Nowhere", "Unknown", "MN", None);

    let result =
        markets_within_radius(&db, origin(), Distance::from_miles(30.0), 10, 1).unwrap();
    assert_eq!(1, result.page.total);
    assert_eq!(near, result.markets[0].id);
}

#[test]
fn radius_search_rejects_negative_radius() {
    let db = MockDb::default();
    assert!(matches!(
        markets_within_radius(&db, origin(), Distance::from_miles(-1.0), 10, 1),
        Err(Error::InvalidRadius)
    ));
}

#[test]
fn nearest_markets_caps_the_count() {
    let db = MockDb::default();
    let near = add_market(&db, "Near", "St Paul", "MN", Some(ST_PAUL));
    let mid = add_market(&db, "Mid", "Duluth", "MN", Some(DULUTH));
    add_market(&db, "Far", "Chicago", "IL", Some(CHICAGO));

    // All three are inside the radius, only the closest two fit the cap.
    let result = nearest_markets(&db, origin(), Distance::from_miles(500.0), 2).unwrap();
    let ids: Vec<_> = result.iter().map(|m| m.id).collect();
    assert_eq!(vec![near, mid], ids);
}

#[test]
fn nearest_markets_stays_inside_the_radius() {
    let db = MockDb::default();
    let near = add_market(&db, "Near", "St Paul", "MN", Some(ST_PAUL));
    add_market(&db, "Far", "Duluth", "MN", Some(DULUTH));

    let result = nearest_markets(&db, origin(), Distance::from_miles(30.0), 20).unwrap();
    let ids: Vec<_> = result.iter().map(|m| m.id).collect();
    assert_eq!(vec![near], ids);
}

#[test]
fn market_details_aggregates_reviews_and_categories() {
    let db = MockDb::default();
    let id = add_market(&db, "Mill City", "Minneapolis", "MN", Some(MINNEAPOLIS));
    add_rated_review(&db, id, 3);
    add_rated_review(&db, id, 5);

    let produce = CategoryId::new(900);
    db.categories.borrow_mut().push(Category {
        id: produce,
        name: "Produce".into(),
    });
    db.market_categories.borrow_mut().push((id, produce));

    let details = market_details(&db, id).unwrap();
    assert_eq!("Mill City", details.market.name);
    assert_eq!("Minneapolis", details.location.city);
    assert_eq!(2, details.reviews.len());
    assert_eq!(4.0, details.avg_rating.to_f64());
    assert_eq!(1, details.categories.len());
    assert_eq!("Produce", details.categories[0].name);
}

#[test]
fn market_details_of_unknown_market() {
    let db = MockDb::default();
    assert!(matches!(
        market_details(&db, MarketId::new(4711)),
        Err(Error::Repo(crate::repositories::Error::NotFound))
    ));
}

#[test]
fn markets_in_category_pages_assigned_markets() {
    let db = MockDb::default();
    let a = add_market(&db, "A", "Austin", "MN", None);
    add_market(&db, "B", "Bemidji", "MN", None);
    let c = add_market(&db, "C", "Crookston", "MN", None);

    let produce = CategoryId::new(900);
    db.categories.borrow_mut().push(Category {
        id: produce,
        name: "Produce".into(),
    });
    db.market_categories.borrow_mut().push((a, produce));
    db.market_categories.borrow_mut().push((c, produce));

    let result = markets_in_category(&db, produce, 10, 1).unwrap();
    assert_eq!("Produce", result.category.name);
    assert_eq!(2, result.page.page.total);
    let ids: Vec<_> = result.page.markets.iter().map(|m| m.id).collect();
    assert_eq!(vec![a, c], ids);

    assert!(matches!(
        markets_in_category(&db, CategoryId::new(4711), 10, 1),
        Err(Error::Repo(crate::repositories::Error::NotFound))
    ));
}

#[test]
fn create_market_requires_name_city_and_state() {
    let db = MockDb::default();
    let req = NewMarketRequest {
        name: "  ".into(),
        city: "Minneapolis".into(),
        state: "MN".into(),
        ..Default::default()
    };
    assert!(matches!(
        create_market(&db, req),
        Err(Error::EmptyField("name"))
    ));

    let req = NewMarketRequest {
        name: "Mill City".into(),
        city: "".into(),
        state: "MN".into(),
        ..Default::default()
    };
    assert!(matches!(
        create_market(&db, req),
        Err(Error::EmptyField("city"))
    ));

    let req = NewMarketRequest {
        name: "Mill City".into(),
        city: "Minneapolis".into(),
        state: " ".into(),
        ..Default::default()
    };
    assert!(matches!(
        create_market(&db, req),
        Err(Error::EmptyField("state"))
    ));
}

#[test]
fn create_market_trims_fields_and_stores_the_location() {
    let db = MockDb::default();
    let id = create_market(
        &db,
        NewMarketRequest {
            name: " Mill City ".into(),
            city: " Minneapolis ".into(),
            state: " MN ".into(),
            zip: Some("  ".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let details = market_details(&db, id).unwrap();
    assert_eq!("Mill City", details.market.name);
    assert_eq!("Minneapolis", details.location.city);
    assert_eq!("MN", details.location.state);
    assert_eq!(None, details.location.zip);
}

#[test]
fn delete_market_removes_its_reviews() {
    let db = MockDb::default();
    let id = add_market(&db, "Mill City", "Minneapolis", "MN", None);
    add_rated_review(&db, id, 4);

    delete_market(&db, id).unwrap();
    assert!(matches!(
        get_market(&db, id),
        Err(Error::Repo(crate::repositories::Error::NotFound))
    ));
    assert_eq!(0, db.reviews.borrow().len());

    assert!(delete_market(&db, id).is_err());
}

#[test]
fn add_review_validates_its_input() {
    let db = MockDb::default();
    let id = add_market(&db, "Mill City", "Minneapolis", "MN", None);

    let req = NewReviewRequest {
        market_id: id,
        user_name: "pat".into(),
        rating: 0,
        text: "meh".into(),
        author_id: None,
    };
    assert!(matches!(add_review(&db, req), Err(Error::RatingValue)));

    let req = NewReviewRequest {
        market_id: id,
        user_name: "pat".into(),
        rating: 6,
        text: "great".into(),
        author_id: None,
    };
    assert!(matches!(add_review(&db, req), Err(Error::RatingValue)));

    let req = NewReviewRequest {
        market_id: id,
        user_name: "pat".into(),
        rating: 4,
        text: "   ".into(),
        author_id: None,
    };
    assert!(matches!(add_review(&db, req), Err(Error::EmptyReviewText)));

    let req = NewReviewRequest {
        market_id: MarketId::new(4711),
        user_name: "pat".into(),
        rating: 4,
        text: "great".into(),
        author_id: None,
    };
    assert!(matches!(
        add_review(&db, req),
        Err(Error::Repo(crate::repositories::Error::NotFound))
    ));
}

#[test]
fn delete_review_authorization() {
    let db = MockDb::default();
    let market = add_market(&db, "Mill City", "Minneapolis", "MN", None);

    let owned = add_review(
        &db,
        NewReviewRequest {
            market_id: market,
            user_name: "pat".into(),
            rating: 4,
            text: "nice".into(),
            author_id: Some(UserId::new(7)),
        },
    )
    .unwrap();
    let anonymous = add_review(
        &db,
        NewReviewRequest {
            market_id: market,
            user_name: "sam".into(),
            rating: 3,
            text: "ok".into(),
            author_id: None,
        },
    )
    .unwrap();

    // A name match is not enough when the review has a recorded author.
    let impostor = Actor {
        user_id: Some(UserId::new(8)),
        user_name: Some("pat".into()),
        is_moderator: false,
    };
    assert!(matches!(
        delete_review(&db, &impostor, owned),
        Err(Error::Forbidden)
    ));

    let author = Actor {
        user_id: Some(UserId::new(7)),
        user_name: None,
        is_moderator: false,
    };
    delete_review(&db, &author, owned).unwrap();

    // Anonymous reviews are matched by reviewer name.
    let stranger = Actor {
        user_id: None,
        user_name: Some("pat".into()),
        is_moderator: false,
    };
    assert!(matches!(
        delete_review(&db, &stranger, anonymous),
        Err(Error::Forbidden)
    ));
    let sam = Actor {
        user_id: None,
        user_name: Some("sam".into()),
        is_moderator: false,
    };
    delete_review(&db, &sam, anonymous).unwrap();

    // Moderators may delete anything.
    let extra = add_rated_review(&db, market, 5);
    delete_review(&db, &Actor::moderator(), extra).unwrap();
    assert_eq!(0, db.reviews.borrow().len());
}

#[test]
fn directory_stats_summarizes_the_directory() {
    let db = MockDb::default();
    let a = add_market(&db, "A", "Minneapolis", "MN", None);
    add_market(&db, "B", "St Paul", "MN", None);
    add_market(&db, "C", "Madison", "WI", None);
    add_rated_review(&db, a, 5);

    let produce = CategoryId::new(900);
    let crafts = CategoryId::new(901);
    db.categories.borrow_mut().push(Category {
        id: produce,
        name: "Produce".into(),
    });
    db.categories.borrow_mut().push(Category {
        id: crafts,
        name: "Crafts".into(),
    });
    db.market_categories.borrow_mut().push((a, produce));

    let stats = directory_stats(&db).unwrap();
    assert_eq!(3, stats.market_count);
    assert_eq!(1, stats.review_count);
    assert_eq!(2, stats.state_count);
    assert_eq!(3, stats.city_count);
    assert_eq!(
        vec![("MN".to_string(), 2), ("WI".to_string(), 1)],
        stats
            .top_states
            .iter()
            .map(|s| (s.state.clone(), s.market_count))
            .collect::<Vec<_>>()
    );
    // "Crafts" has no market assigned, so the chart leaves it out.
    assert_eq!(
        vec![("Produce".to_string(), 1)],
        stats
            .category_counts
            .iter()
            .map(|c| (c.category.clone(), c.market_count))
            .collect::<Vec<_>>()
    );
}

#[test]
fn all_categories_are_sorted_by_name() {
    let db = MockDb::default();
    db.categories.borrow_mut().push(Category {
        id: CategoryId::new(2),
        name: "Produce".into(),
    });
    db.categories.borrow_mut().push(Category {
        id: CategoryId::new(1),
        name: "Crafts".into(),
    });
    let names: Vec<_> = all_categories(&db)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(vec!["Crafts".to_string(), "Produce".to_string()], names);
}
