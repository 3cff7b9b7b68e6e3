#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # fmdb-entities
//!
//! Reusable, agnostic domain entities for the farmer-markets directory.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod category;
pub mod geo;
pub mod id;
pub mod links;
pub mod location;
pub mod market;
pub mod review;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
