//! Token document data model for Orbit Theme Studio
//!
//! This crate provides the typed representation of an orbit-tokens.json
//! document: the two-tier global/semantic tree, the tagged token node
//! variants, alias reference parsing, and the fixed color step lattice.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod lattice;
pub mod reference;
pub mod types;

pub use document::{DocumentError, TokenDocument};
pub use lattice::StepLattice;
pub use reference::Reference;
pub use types::{CompositeToken, MultiToken, SingleToken, TokenGroup, TokenNode, TokenType};
