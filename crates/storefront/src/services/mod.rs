//! Application services.
//!
//! Services own the business rules that sit between the HTTP handlers
//! and the repositories: account lifecycle, payment authorization,
//! token minting, and the ambient sync readout.

pub mod auth;
pub mod payment;
pub mod sync;
pub mod tokens;

pub use auth::AuthService;
pub use payment::SimulatedGateway;
pub use sync::{SyncMonitor, SyncReading};
