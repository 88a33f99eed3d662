//! The four-step checkout wizard.
//!
//! Transitions are strictly linear: `next` advances one step, `previous`
//! retreats one, both saturating at the ends. There is no per-step
//! validation gate - a visitor can page through with empty fields. The
//! only hard gate is at submission: the terms-acceptance flag must be
//! set before `submit` will move the wizard into `Processing`.
//!
//! Processing resolves through [`PaymentOutcome`]: `Approved` completes
//! the wizard, anything else lands in `Failed`, from which `retry` returns
//! to the confirmation step with the form intact.

use serde::{Deserialize, Serialize};

use super::PaymentOutcome;

/// The linear steps of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PersonalInfo,
    Address,
    Payment,
    Confirmation,
}

impl Step {
    /// One-based position, for the step indicator.
    #[must_use]
    pub const fn position(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::Address => 2,
            Self::Payment => 3,
            Self::Confirmation => 4,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::PersonalInfo => Self::Address,
            Self::Address => Self::Payment,
            Self::Payment | Self::Confirmation => Self::Confirmation,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::PersonalInfo | Self::Address => Self::PersonalInfo,
            Self::Payment => Self::Address,
            Self::Confirmation => Self::Payment,
        }
    }
}

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum WizardState {
    /// Filling in one of the four steps.
    Filling { step: Step },
    /// Submitted; waiting on the payment gateway.
    Processing,
    /// Terminal: payment approved.
    Complete,
    /// Payment declined or timed out; retry is allowed.
    Failed { reason: PaymentOutcome },
}

/// Why `submit` refused to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The terms-acceptance flag is still false.
    #[error("terms must be accepted before submitting")]
    TermsNotAccepted,
    /// The wizard is not at the confirmation step.
    #[error("submit is only available from the confirmation step")]
    NotAtConfirmation,
}

/// Flat record of everything the wizard collects.
///
/// Created empty when checkout opens, mutated field by field, discarded
/// with the wizard. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    // Personal data
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,

    // Delivery address
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,

    // Payment
    pub card_number: String,
    pub card_holder: String,
    pub expiry: String,
    pub cvv: String,
    pub installments: u8,

    // Consent flags
    pub newsletter_opt_in: bool,
    pub terms_accepted: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            cpf: String::new(),
            postal_code: String::new(),
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            neighborhood: String::new(),
            city: String::new(),
            state: String::new(),
            card_number: String::new(),
            card_holder: String::new(),
            expiry: String::new(),
            cvv: String::new(),
            installments: 1,
            // Newsletter is opt-out; terms are not.
            newsletter_opt_in: true,
            terms_accepted: false,
        }
    }
}

/// The checkout wizard: form state plus the step machine driving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutWizard {
    state: WizardState,
    form: CheckoutForm,
}

impl Default for CheckoutWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutWizard {
    /// Open the wizard at the first step with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: WizardState::Filling {
                step: Step::PersonalInfo,
            },
            form: CheckoutForm::default(),
        }
    }

    /// Current machine state.
    #[must_use]
    pub const fn state(&self) -> WizardState {
        self.state
    }

    /// Current step, if the wizard is still in the filling phase.
    #[must_use]
    pub const fn current_step(&self) -> Option<Step> {
        match self.state {
            WizardState::Filling { step } => Some(step),
            _ => None,
        }
    }

    /// Read access to the form.
    #[must_use]
    pub const fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable access to the form. Fields are free-form until submission;
    /// formatters in [`super::format`] normalize them as the user types.
    pub const fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Advance one step. Saturates at `Confirmation`; ignored outside the
    /// filling phase.
    pub fn next(&mut self) {
        if let WizardState::Filling { step } = self.state {
            self.state = WizardState::Filling { step: step.next() };
        }
    }

    /// Retreat one step. Saturates at `PersonalInfo`; ignored outside the
    /// filling phase.
    pub fn previous(&mut self) {
        if let WizardState::Filling { step } = self.state {
            self.state = WizardState::Filling {
                step: step.previous(),
            };
        }
    }

    /// Whether `submit` would currently succeed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.form.terms_accepted
            && matches!(
                self.state,
                WizardState::Filling {
                    step: Step::Confirmation
                }
            )
    }

    /// Submit the order: `Confirmation → Processing`.
    ///
    /// # Errors
    ///
    /// Refuses while the terms flag is false or the wizard is anywhere
    /// other than the confirmation step.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if !matches!(
            self.state,
            WizardState::Filling {
                step: Step::Confirmation
            }
        ) {
            return Err(SubmitError::NotAtConfirmation);
        }
        if !self.form.terms_accepted {
            return Err(SubmitError::TermsNotAccepted);
        }
        self.state = WizardState::Processing;
        Ok(())
    }

    /// Record the gateway's answer: `Processing → Complete` or `Failed`.
    /// Ignored unless the wizard is processing, so a terminal state is
    /// reached exactly once.
    pub fn resolve(&mut self, outcome: PaymentOutcome) {
        if self.state != WizardState::Processing {
            return;
        }
        self.state = match outcome {
            PaymentOutcome::Approved => WizardState::Complete,
            reason => WizardState::Failed { reason },
        };
    }

    /// After a failure, return to the confirmation step with the form
    /// intact. Ignored in any other state.
    pub fn retry(&mut self) {
        if matches!(self.state, WizardState::Failed { .. }) {
            self.state = WizardState::Filling {
                step: Step::Confirmation,
            };
        }
    }

    /// Abandon the wizard. A no-op during `Processing`: the in-flight
    /// gateway call still resolves, and the terminal state is whatever
    /// `resolve` records.
    pub fn cancel(self) -> Option<CheckoutForm> {
        match self.state {
            WizardState::Processing => None,
            _ => Some(self.form),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wizard_at_confirmation() -> CheckoutWizard {
        let mut w = CheckoutWizard::new();
        w.next();
        w.next();
        w.next();
        assert_eq!(w.current_step(), Some(Step::Confirmation));
        w
    }

    #[test]
    fn steps_advance_linearly_and_saturate() {
        let mut w = CheckoutWizard::new();
        assert_eq!(w.current_step(), Some(Step::PersonalInfo));

        w.next();
        assert_eq!(w.current_step(), Some(Step::Address));
        w.next();
        assert_eq!(w.current_step(), Some(Step::Payment));
        w.next();
        w.next(); // saturates
        assert_eq!(w.current_step(), Some(Step::Confirmation));
    }

    #[test]
    fn previous_saturates_at_first_step() {
        let mut w = CheckoutWizard::new();
        w.previous();
        assert_eq!(w.current_step(), Some(Step::PersonalInfo));

        w.next();
        w.previous();
        assert_eq!(w.current_step(), Some(Step::PersonalInfo));
    }

    #[test]
    fn advancing_with_empty_fields_is_allowed() {
        // Permissive by design: no validation gate between steps.
        let w = wizard_at_confirmation();
        assert!(w.form().first_name.is_empty());
    }

    #[test]
    fn submit_gated_on_terms_flag_alone() {
        let mut w = wizard_at_confirmation();
        assert!(!w.can_submit());
        assert_eq!(w.submit(), Err(SubmitError::TermsNotAccepted));

        // The instant the flag flips, submit is available - other fields
        // can still be empty.
        w.form_mut().terms_accepted = true;
        assert!(w.can_submit());
        w.submit().unwrap();
        assert_eq!(w.state(), WizardState::Processing);
    }

    #[test]
    fn submit_requires_confirmation_step() {
        let mut w = CheckoutWizard::new();
        w.form_mut().terms_accepted = true;
        assert_eq!(w.submit(), Err(SubmitError::NotAtConfirmation));
    }

    #[test]
    fn approved_payment_completes() {
        let mut w = wizard_at_confirmation();
        w.form_mut().terms_accepted = true;
        w.submit().unwrap();
        w.resolve(PaymentOutcome::Approved);
        assert_eq!(w.state(), WizardState::Complete);
    }

    #[test]
    fn declined_payment_fails_and_retry_returns_to_confirmation() {
        let mut w = wizard_at_confirmation();
        w.form_mut().terms_accepted = true;
        w.form_mut().first_name = "Ana".into();
        w.submit().unwrap();
        w.resolve(PaymentOutcome::Declined);
        assert_eq!(
            w.state(),
            WizardState::Failed {
                reason: PaymentOutcome::Declined
            }
        );

        w.retry();
        assert_eq!(w.current_step(), Some(Step::Confirmation));
        // Form survives the round trip.
        assert_eq!(w.form().first_name, "Ana");
    }

    #[test]
    fn resolve_is_ignored_outside_processing() {
        let mut w = wizard_at_confirmation();
        w.resolve(PaymentOutcome::Approved);
        assert_eq!(w.current_step(), Some(Step::Confirmation));

        // Terminal state reached exactly once.
        w.form_mut().terms_accepted = true;
        w.submit().unwrap();
        w.resolve(PaymentOutcome::TimedOut);
        w.resolve(PaymentOutcome::Approved);
        assert_eq!(
            w.state(),
            WizardState::Failed {
                reason: PaymentOutcome::TimedOut
            }
        );
    }

    #[test]
    fn cancel_mid_processing_is_refused() {
        let mut w = wizard_at_confirmation();
        w.form_mut().terms_accepted = true;
        w.submit().unwrap();
        assert!(w.cancel().is_none());

        let mut w = wizard_at_confirmation();
        w.form_mut().email = "a@b.co".into();
        let form = w.cancel().unwrap();
        assert_eq!(form.email, "a@b.co");
    }

    #[test]
    fn step_positions_are_one_based() {
        assert_eq!(Step::PersonalInfo.position(), 1);
        assert_eq!(Step::Confirmation.position(), 4);
    }
}
