pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{location_builder::*, market_builder::*, review_builder::*};

pub mod market_builder {

    use super::*;
    use crate::{geo::*, id::*, market::*};

    #[derive(Debug)]
    pub struct MarketBuild {
        market: Market,
    }

    impl MarketBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.market.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.market.name = name.into();
            self
        }
        pub fn location_id(mut self, id: i64) -> Self {
            self.market.location_id = id.into();
            self
        }
        pub fn pos(mut self, lat: f64, lng: f64) -> Self {
            self.market.position = GeoPoint::try_from_lat_lng_deg(lat, lng);
            self
        }
        pub fn website(mut self, url: &str) -> Self {
            self.market.links.website = Some(url.into());
            self
        }
        pub fn finish(self) -> Market {
            self.market
        }
    }

    impl Builder for Market {
        type Build = MarketBuild;
        fn build() -> Self::Build {
            MarketBuild {
                market: Market {
                    id: MarketId::default(),
                    name: Default::default(),
                    location_id: LocationId::default(),
                    links: Default::default(),
                    position: None,
                },
            }
        }
    }
}

pub mod location_builder {

    use super::*;
    use crate::{id::*, location::*};

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.location.id = id.into();
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.location.city = city.into();
            self
        }
        pub fn state(mut self, state: &str) -> Self {
            self.location.state = state.into();
            self
        }
        pub fn zip(mut self, zip: &str) -> Self {
            self.location.zip = Some(zip.into());
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> Self::Build {
            LocationBuild {
                location: Location {
                    id: LocationId::default(),
                    street: None,
                    city: Default::default(),
                    county: None,
                    state: Default::default(),
                    zip: None,
                },
            }
        }
    }
}

pub mod review_builder {

    use super::*;
    use crate::{id::*, review::*};

    #[derive(Debug)]
    pub struct ReviewBuild {
        review: Review,
    }

    impl ReviewBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.review.id = id.into();
            self
        }
        pub fn market_id(mut self, id: i64) -> Self {
            self.review.market_id = id.into();
            self
        }
        pub fn user_name(mut self, name: &str) -> Self {
            self.review.user_name = name.into();
            self
        }
        pub fn rating(mut self, value: RatingPrimitive) -> Self {
            self.review.rating = Rating::new(value).unwrap();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.review.text = text.into();
            self
        }
        pub fn author_id(mut self, id: i64) -> Self {
            self.review.author_id = Some(id.into());
            self
        }
        pub fn finish(self) -> Review {
            self.review
        }
    }

    impl Builder for Review {
        type Build = ReviewBuild;
        fn build() -> Self::Build {
            ReviewBuild {
                review: Review {
                    id: ReviewId::default(),
                    market_id: MarketId::default(),
                    user_name: Default::default(),
                    rating: Rating::min(),
                    text: Default::default(),
                    author_id: None,
                },
            }
        }
    }
}
