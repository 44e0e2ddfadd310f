//! Bearer-token authentication shared by Muster services.
//!
//! Provides JWT issue/validation and the `Identity` extractor.

pub mod identity;
pub mod token;
