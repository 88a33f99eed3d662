//! Single-screen express checkout.
//!
//! Structurally the tail of the main wizard - pick a payment method, leave
//! a contact email, submit - with personal-info and address collection
//! skipped. Shares [`PaymentOutcome`] with the wizard so both flows fail
//! the same way.

use serde::{Deserialize, Serialize};

use super::PaymentOutcome;
use crate::types::{Email, EmailError};

/// The five payment options offered on the express screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Pix,
    ApplePay,
    GooglePay,
    Crypto,
    Card,
}

impl PaymentMethod {
    /// Every method, in display order.
    pub const ALL: [Self; 5] = [
        Self::Pix,
        Self::ApplePay,
        Self::GooglePay,
        Self::Crypto,
        Self::Card,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::ApplePay => "Apple Pay",
            Self::GooglePay => "Google Pay",
            Self::Crypto => "Neural Crypto",
            Self::Card => "Cartão de Crédito",
        }
    }

    /// Advertised settlement time.
    #[must_use]
    pub const fn settlement(self) -> &'static str {
        match self {
            Self::Pix => "Imediato",
            Self::ApplePay | Self::GooglePay => "1 clique",
            Self::Crypto => "Instantâneo",
            Self::Card => "2 segundos",
        }
    }
}

/// Express checkout machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ExpressState {
    SelectingPayment,
    Processing,
    Complete,
    Failed { reason: PaymentOutcome },
}

/// Why `begin` refused to start processing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExpressError {
    /// No contact email entered, or it failed to parse.
    #[error("a valid contact email is required: {0}")]
    Email(#[from] EmailError),
    /// Already processing or finished.
    #[error("express checkout is not selecting a payment method")]
    NotSelecting,
}

/// The express checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressCheckout {
    state: ExpressState,
    method: PaymentMethod,
    email: String,
}

impl Default for ExpressCheckout {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressCheckout {
    /// Open the screen with PIX preselected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ExpressState::SelectingPayment,
            method: PaymentMethod::Pix,
            email: String::new(),
        }
    }

    /// Current machine state.
    #[must_use]
    pub const fn state(&self) -> ExpressState {
        self.state
    }

    /// The currently selected method.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Select a payment method. Ignored once processing has started.
    pub fn select(&mut self, method: PaymentMethod) {
        if self.state == ExpressState::SelectingPayment {
            self.method = method;
        }
    }

    /// Record the contact email as typed.
    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.state == ExpressState::SelectingPayment {
            self.email = email.into();
        }
    }

    /// Start processing: `SelectingPayment → Processing`.
    ///
    /// # Errors
    ///
    /// Refuses without a parseable contact email, or outside the
    /// selection state.
    pub fn begin(&mut self) -> Result<Email, ExpressError> {
        if self.state != ExpressState::SelectingPayment {
            return Err(ExpressError::NotSelecting);
        }
        let email = Email::parse(&self.email)?;
        self.state = ExpressState::Processing;
        Ok(email)
    }

    /// Record the gateway's answer. Ignored unless processing.
    pub fn resolve(&mut self, outcome: PaymentOutcome) {
        if self.state != ExpressState::Processing {
            return;
        }
        self.state = match outcome {
            PaymentOutcome::Approved => ExpressState::Complete,
            reason => ExpressState::Failed { reason },
        };
    }

    /// After a failure, return to method selection with the email kept.
    pub fn retry(&mut self) {
        if matches!(self.state, ExpressState::Failed { .. }) {
            self.state = ExpressState::SelectingPayment;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn begin_requires_an_email() {
        let mut x = ExpressCheckout::new();
        assert!(x.begin().is_err());
        assert_eq!(x.state(), ExpressState::SelectingPayment);

        x.set_email("visitor@demclaire.com");
        let email = x.begin().unwrap();
        assert_eq!(email.as_str(), "visitor@demclaire.com");
        assert_eq!(x.state(), ExpressState::Processing);
    }

    #[test]
    fn selection_is_frozen_once_processing() {
        let mut x = ExpressCheckout::new();
        x.select(PaymentMethod::Crypto);
        x.set_email("a@b.co");
        x.begin().unwrap();

        x.select(PaymentMethod::Card);
        assert_eq!(x.method(), PaymentMethod::Crypto);
        assert!(x.begin().is_err());
    }

    #[test]
    fn approved_completes_declined_can_retry() {
        let mut x = ExpressCheckout::new();
        x.set_email("a@b.co");
        x.begin().unwrap();
        x.resolve(PaymentOutcome::Declined);
        assert_eq!(
            x.state(),
            ExpressState::Failed {
                reason: PaymentOutcome::Declined
            }
        );

        x.retry();
        assert_eq!(x.state(), ExpressState::SelectingPayment);
        // Email survives the retry - begin works immediately.
        x.begin().unwrap();
        x.resolve(PaymentOutcome::Approved);
        assert_eq!(x.state(), ExpressState::Complete);
    }

    #[test]
    fn default_method_is_pix() {
        assert_eq!(ExpressCheckout::new().method(), PaymentMethod::Pix);
        assert_eq!(PaymentMethod::ALL.len(), 5);
    }
}
