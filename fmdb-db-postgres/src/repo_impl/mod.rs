use diesel::{
    self,
    prelude::*,
    result::Error as DieselError,
    sql_types::{BigInt, Double},
};

use fmdb_core::{
    entities::*,
    repositories::{self as repo, *},
    util::sort::{MarketOrdering, SortDirection},
};

use super::{models, schema, Db};

mod category;
mod location;
mod market;
mod review;
mod stats;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}
