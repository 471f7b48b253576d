//! Local persistence for Orbit Theme Studio
//!
//! A sled-backed store holding the brand registry and the current token
//! document. Everything is serialized as JSON, so the on-disk format stays
//! inspectable and survives schema additions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod brands;
pub mod store;

pub use brands::BrandRecord;
pub use store::{Result, StoreConfig, StoreError, TokenStore};
