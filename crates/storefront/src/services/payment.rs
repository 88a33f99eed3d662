//! Simulated payment gateway.
//!
//! Checkout never talks to a real acquirer; it drives this gateway,
//! which sleeps for a configured latency before answering. Orders
//! above zero are approved, non-positive totals are declined, and an
//! answer that misses the configured deadline becomes a timeout.

use rust_decimal::Decimal;
use tracing::instrument;

use dem_claire_core::PaymentOutcome;

use crate::config::GatewayConfig;

/// A payment gateway that answers after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    config: GatewayConfig,
}

impl SimulatedGateway {
    #[must_use]
    pub const fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Authorize a charge for the given total.
    ///
    /// The outcome is terminal from the caller's point of view; a
    /// timeout result does not mean the charge will settle later.
    #[instrument(skip(self), fields(total = %total))]
    pub async fn authorize(&self, total: Decimal) -> PaymentOutcome {
        let settle = async {
            tokio::time::sleep(self.config.latency).await;
            if total > Decimal::ZERO {
                PaymentOutcome::Approved
            } else {
                PaymentOutcome::Declined
            }
        };

        match tokio::time::timeout(self.config.deadline, settle).await {
            Ok(outcome) => outcome,
            Err(_) => PaymentOutcome::TimedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn fast_gateway(latency_ms: u64, deadline_ms: u64) -> SimulatedGateway {
        SimulatedGateway::new(GatewayConfig {
            latency: Duration::from_millis(latency_ms),
            deadline: Duration::from_millis(deadline_ms),
        })
    }

    #[tokio::test]
    async fn positive_total_is_approved() {
        let gateway = fast_gateway(1, 100);
        let outcome = gateway.authorize(Decimal::new(52_000, 2)).await;
        assert!(matches!(outcome, PaymentOutcome::Approved));
    }

    #[tokio::test]
    async fn zero_total_is_declined() {
        let gateway = fast_gateway(1, 100);
        let outcome = gateway.authorize(Decimal::ZERO).await;
        assert!(matches!(outcome, PaymentOutcome::Declined));
    }

    #[tokio::test]
    async fn slow_gateway_times_out() {
        let gateway = fast_gateway(200, 10);
        let outcome = gateway.authorize(Decimal::ONE).await;
        assert!(matches!(outcome, PaymentOutcome::TimedOut));
    }
}
