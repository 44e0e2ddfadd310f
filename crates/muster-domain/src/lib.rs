//! Domain types shared across all Muster crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod clock;
pub mod id;
pub mod user;
