//! Dem Claire Core - Shared types and session state machines.
//!
//! This crate provides the pieces used across all Dem Claire components:
//! - `storefront` - Public JSON API for catalog, cart, contact, and auth
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O,
//! no database access, no HTTP clients. The shopping cart and the checkout
//! wizard live here: they are session-scoped, single-owner state that the
//! storefront drives from request handlers and that tests can exercise
//! without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, statuses, and product records
//! - [`cart`] - Cart line items with derived totals
//! - [`checkout`] - Multi-step wizard, express checkout, and input formatters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{Cart, LineItem};
pub use checkout::{
    CheckoutForm, CheckoutWizard, ExpressCheckout, ExpressState, PaymentMethod, PaymentOutcome,
    Step, SubmitError, WizardState,
};
pub use types::*;
