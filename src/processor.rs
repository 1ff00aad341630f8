// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Payment processing seam.
//!
//! The booking flow awaits a [`PaymentProcessor`] between leaving review and
//! completing. [`SimulatedProcessor`] stands in for a real gateway: it sleeps
//! for a fixed delay and then succeeds, unless a failure has been configured.

use crate::base::{EventId, TicketTierId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Delay used by the simulated processor unless configured otherwise.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(3000);

/// What is being paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub event_id: EventId,
    pub tier_id: TicketTierId,
    pub quantity: u32,
    pub amount: Decimal,
    pub card_holder: String,
    /// Card number with all but the last four digits hidden.
    pub card_number: String,
}

/// Payment failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Processor refused the card
    #[error("card declined: {0}")]
    Declined(String),

    /// Processor could not be reached
    #[error("payment processor unavailable")]
    Unavailable,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charges for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] when the charge does not go through.
    async fn process(&self, request: &PaymentRequest) -> Result<(), PaymentError>;
}

/// Processor that waits out a fixed delay and then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
    failure: Option<String>,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// No delay; completes on the first poll after being awaited.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Makes every payment fail with [`PaymentError::Declined`] after the delay.
    pub fn failing_with(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn process(&self, request: &PaymentRequest) -> Result<(), PaymentError> {
        tracing::debug!(
            event_id = %request.event_id,
            amount = %request.amount,
            delay_ms = self.delay.as_millis() as u64,
            "simulating payment"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.failure {
            Some(reason) => Err(PaymentError::Declined(reason.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> PaymentRequest {
        PaymentRequest {
            event_id: EventId(1),
            tier_id: TicketTierId(2),
            quantity: 1,
            amount: dec!(299),
            card_holder: "Ada Lovelace".to_string(),
            card_number: "**** **** **** 1111".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn default_processor_waits_three_seconds() {
        let processor = SimulatedProcessor::default();
        let started = tokio::time::Instant::now();

        processor.process(&request()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn instant_processor_succeeds() {
        let processor = SimulatedProcessor::instant();
        assert_eq!(processor.delay(), Duration::ZERO);
        assert_eq!(processor.process(&request()).await, Ok(()));
    }

    #[tokio::test]
    async fn configured_failure_is_reported() {
        let processor = SimulatedProcessor::instant().failing_with("insufficient funds");
        assert_eq!(
            processor.process(&request()).await,
            Err(PaymentError::Declined("insufficient funds".to_string()))
        );
    }
}
