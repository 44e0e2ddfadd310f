//! Cross-cutting plumbing shared by Muster services: error rendering,
//! configuration loading, tracing, request ids, health checks and
//! sea-orm/serde helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
