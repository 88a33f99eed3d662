//! Core types for Dem Claire.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod consciousness;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use consciousness::ConsciousnessLevel;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{NeuralTag, Product};
pub use status::*;
