//! # fmdb-core
//!
//! The listing query engine of the farmer-markets directory:
//! pagination arithmetic, sort variants, geo-radius queries and the
//! use cases that drive them. Persistence is accessed exclusively
//! through the repository traits in [`repositories`].

pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use fmdb_entities::{
        category::*, geo::*, id::*, links::*, location::*, market::*, review::*,
    };
}
