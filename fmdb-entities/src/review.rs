use thiserror::Error;

use crate::id::{MarketId, ReviewId, UserId};

pub type RatingPrimitive = i16;

/// A star rating, valid range 1..=5.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Rating(RatingPrimitive);

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("Rating value out of range: {0}")]
pub struct RatingOutOfRange(RatingPrimitive);

impl Rating {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn new<R: Into<RatingPrimitive>>(value: R) -> Result<Self, RatingOutOfRange> {
        let value = value.into();
        if (Self::min().0..=Self::max().0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }
}

impl TryFrom<RatingPrimitive> for Rating {
    type Error = RatingOutOfRange;
    fn try_from(from: RatingPrimitive) -> Result<Self, Self::Error> {
        Self::new(from)
    }
}

impl From<Rating> for RatingPrimitive {
    fn from(from: Rating) -> Self {
        from.0
    }
}

impl From<Rating> for f64 {
    fn from(from: Rating) -> Self {
        f64::from(from.0)
    }
}

/// Mean of all ratings of a market, or 0.0 when it has no reviews.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRating(f64);

impl AvgRating {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }
        let sum: f64 = ratings.iter().copied().map(f64::from).sum();
        Self(sum / ratings.len() as f64)
    }

    pub const fn to_f64(self) -> f64 {
        self.0
    }
}

impl From<f64> for AvgRating {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub market_id: MarketId,
    pub user_name: String,
    pub rating: Rating,
    pub text: String,
    /// Account id of the author, if the review was written by a
    /// registered user. Anonymous console reviews leave this empty.
    pub author_id: Option<UserId>,
}
