//! Domain models backed by the storefront database.

pub mod message;
pub mod user;
