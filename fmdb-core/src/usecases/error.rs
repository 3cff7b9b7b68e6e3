use thiserror::Error;

use crate::repositories;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Empty review text")]
    EmptyReviewText,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Invalid search radius")]
    InvalidRadius,
    #[error("This is not allowed")]
    Forbidden,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<fmdb_entities::review::RatingOutOfRange> for Error {
    fn from(_: fmdb_entities::review::RatingOutOfRange) -> Self {
        Self::RatingValue
    }
}

impl From<fmdb_entities::geo::CoordParseError> for Error {
    fn from(_: fmdb_entities::geo::CoordParseError) -> Self {
        Self::InvalidPosition
    }
}
