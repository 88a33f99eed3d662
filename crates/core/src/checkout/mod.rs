//! Checkout state machines and input formatting.
//!
//! Two independent flows share the same payment tail:
//!
//! - [`wizard`] - the four-step checkout (personal data, address, payment,
//!   confirmation) followed by processing
//! - [`express`] - the single-screen payment-method picker
//!
//! Both resolve through [`PaymentOutcome`]. Gateways decline and time
//! out, so both are first-class outcomes and the UI layer decides what
//! to do with a `Failed` state.
//!
//! [`format`] holds the pure keystroke formatters (card number, CPF, CEP,
//! phone).

pub mod express;
pub mod format;
pub mod wizard;

pub use express::{ExpressCheckout, ExpressState, PaymentMethod};
pub use wizard::{CheckoutForm, CheckoutWizard, Step, SubmitError, WizardState};

use serde::{Deserialize, Serialize};

/// Result of an external payment-gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum PaymentOutcome {
    /// Payment authorized.
    Approved,
    /// Gateway reached, payment refused.
    Declined,
    /// Gateway did not answer within the deadline.
    TimedOut,
}
