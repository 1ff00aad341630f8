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

//! Booking flow controller.
//!
//! Implemented State Machine
//!
//! ```text
//!  PersonalInfo ──advance──► Payment ──advance──► Review ──submit──► Completed
//!       ▲                      │                    │
//!       └──────retreat─────────┘◄──────retreat──────┘
//! ```
//!
//! `advance` is the only way forward and only succeeds when the current stage
//! validates. While a submission is in flight every command except reads is
//! rejected, and once completed the flow is read-only.
//!
//! # Example
//!
//! ```
//! use event_booking_rs::{BookingFlow, Field, Stage, TicketSelection, TicketTierId, fixtures};
//!
//! let selection = TicketSelection::new(fixtures::featured_event(), TicketTierId(2), 1).unwrap();
//! let flow = BookingFlow::new(selection);
//!
//! flow.update_field(Field::FirstName, "Ada");
//! assert!(flow.advance().is_err());
//! assert_eq!(flow.stage(), Stage::PersonalInfo);
//! assert!(flow.errors().contains(Field::LastName));
//! ```

use crate::base::ConfirmationCode;
use crate::config::BookingConfig;
use crate::confirmation::{ConfirmationCodeGenerator, RandomCodeGenerator};
use crate::error::BookingError;
use crate::form::{BookingForm, Field, format_card_number, sanitize_cvv};
use crate::processor::{PaymentProcessor, PaymentRequest, SimulatedProcessor};
use crate::selection::TicketSelection;
use crate::stage::Stage;
use crate::validation::{FieldErrors, validate_stage};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Proof of a completed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub confirmation_code: ConfirmationCode,
    pub event_title: String,
    pub event_date_display: String,
    pub ticket_name: String,
    pub quantity: u32,
    pub total: Decimal,
}

/// Everything the host UI renders, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSnapshot {
    pub stage: Stage,
    pub form: BookingForm,
    pub errors: FieldErrors,
    pub submitting: bool,
    pub completed: bool,
}

#[derive(Debug, Default)]
struct FlowData {
    stage: Stage,
    form: BookingForm,
    errors: FieldErrors,
    submitting: bool,
    receipt: Option<BookingReceipt>,
}

impl FlowData {
    /// Rejects stage changes once completed or while a submission runs.
    fn ensure_mutable(&self) -> Result<(), BookingError> {
        if self.receipt.is_some() {
            return Err(BookingError::AlreadyCompleted);
        }
        if self.submitting {
            return Err(BookingError::SubmissionInProgress);
        }
        Ok(())
    }

    fn assert_invariants(&self) {
        debug_assert!(
            !(self.submitting && self.receipt.is_some()),
            "Invariant violated: submitting after completion"
        );
        debug_assert!(
            self.receipt.is_none() || passed_stage_errors(self.stage, &self.form).is_empty(),
            "Invariant violated: completed booking with invalid fields"
        );
    }
}

/// Errors of every stage strictly before `stage`.
fn passed_stage_errors(stage: Stage, form: &BookingForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for passed in Stage::ALL.into_iter().filter(|s| *s < stage) {
        errors.extend(validate_stage(passed, form));
    }
    errors
}

/// Clears the submitting flag when a submission ends, including when the
/// submitting future is dropped before the processor finishes.
struct InFlight<'a> {
    data: &'a Mutex<FlowData>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.data.lock().submitting = false;
    }
}

/// Drives one customer through the three booking stages.
pub struct BookingFlow {
    selection: TicketSelection,
    inner: Mutex<FlowData>,
    processor: Arc<dyn PaymentProcessor>,
    codes: Arc<dyn ConfirmationCodeGenerator>,
}

impl BookingFlow {
    /// Starts an empty flow for `selection` with the simulated processor and
    /// random confirmation codes.
    pub fn new(selection: TicketSelection) -> Self {
        Self {
            selection,
            inner: Mutex::new(FlowData::default()),
            processor: Arc::new(SimulatedProcessor::default()),
            codes: Arc::new(RandomCodeGenerator::default()),
        }
    }

    /// Starts an empty flow wired according to `config`.
    pub fn from_config(selection: TicketSelection, config: &BookingConfig) -> Self {
        Self::new(selection)
            .with_processor(Arc::new(config.processor()))
            .with_code_generator(Arc::new(config.code_generator()))
    }

    pub fn with_processor(mut self, processor: Arc<dyn PaymentProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn with_code_generator(mut self, codes: Arc<dyn ConfirmationCodeGenerator>) -> Self {
        self.codes = codes;
        self
    }

    pub fn selection(&self) -> &TicketSelection {
        &self.selection
    }

    pub fn stage(&self) -> Stage {
        self.inner.lock().stage
    }

    pub fn form(&self) -> BookingForm {
        self.inner.lock().form.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.inner.lock().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.lock().submitting
    }

    pub fn is_completed(&self) -> bool {
        self.inner.lock().receipt.is_some()
    }

    pub fn receipt(&self) -> Option<BookingReceipt> {
        self.inner.lock().receipt.clone()
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let data = self.inner.lock();
        FlowSnapshot {
            stage: data.stage,
            form: data.form.clone(),
            errors: data.errors.clone(),
            submitting: data.submitting,
            completed: data.receipt.is_some(),
        }
    }

    /// Stores a field value and clears that field's error.
    ///
    /// Card numbers are regrouped with [`format_card_number`] and CVVs keep
    /// only their digits, as the input boxes do on every keystroke. Never
    /// validates. Ignored while submitting or after completion, since
    /// the form is then frozen.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let mut data = self.inner.lock();
        if data.ensure_mutable().is_err() {
            tracing::debug!(%field, "ignoring edit to frozen booking form");
            return;
        }
        let value = value.into();
        let value = match field {
            Field::CardNumber => format_card_number(&value),
            Field::Cvv => sanitize_cvv(&value),
            _ => value,
        };
        data.form.set(field, value);
        if data.errors.remove(field).is_some() {
            tracing::debug!(%field, "cleared field error");
        }
    }

    /// [`update_field`](Self::update_field) addressed by the host's field name.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownField`] if `name` is not a form field.
    pub fn update_field_by_name(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), BookingError> {
        let field = name.parse::<Field>()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Validates the current stage and moves to the next one.
    ///
    /// At [`Stage::Review`] this succeeds without moving.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`] - The stage has invalid fields; they are
    ///   also stored as the current errors and the stage is unchanged.
    /// - [`BookingError::SubmissionInProgress`] - A submission is running.
    /// - [`BookingError::AlreadyCompleted`] - The booking is finished.
    pub fn advance(&self) -> Result<Stage, BookingError> {
        let mut data = self.inner.lock();
        data.ensure_mutable()?;

        let errors = validate_stage(data.stage, &data.form);
        if !errors.is_empty() {
            tracing::debug!(stage = ?data.stage, invalid = errors.len(), "stage validation failed");
            data.errors = errors.clone();
            return Err(BookingError::Validation(errors));
        }

        data.errors = FieldErrors::new();
        let from = data.stage;
        data.stage = from.next();
        data.assert_invariants();
        tracing::debug!(?from, to = ?data.stage, "advanced booking stage");
        Ok(data.stage)
    }

    /// Moves back one stage without validating or touching errors.
    ///
    /// At [`Stage::PersonalInfo`] this succeeds without moving.
    ///
    /// # Errors
    ///
    /// - [`BookingError::SubmissionInProgress`] - A submission is running.
    /// - [`BookingError::AlreadyCompleted`] - The booking is finished.
    pub fn retreat(&self) -> Result<Stage, BookingError> {
        let mut data = self.inner.lock();
        data.ensure_mutable()?;
        let from = data.stage;
        data.stage = from.previous();
        tracing::debug!(?from, to = ?data.stage, "retreated booking stage");
        Ok(data.stage)
    }

    /// Discards everything entered and returns to [`Stage::PersonalInfo`].
    ///
    /// Also allowed after completion, which starts a new booking for the same
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::SubmissionInProgress`] while a submission is running.
    pub fn reset(&self) -> Result<(), BookingError> {
        let mut data = self.inner.lock();
        if data.submitting {
            return Err(BookingError::SubmissionInProgress);
        }
        *data = FlowData::default();
        tracing::debug!("booking flow reset");
        Ok(())
    }

    /// Pays for the selection and completes the booking.
    ///
    /// Only one submission runs at a time: a concurrent call is rejected
    /// rather than queued, so at most one receipt is ever produced.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotAtReview`] - The flow has not reached review.
    /// - [`BookingError::Validation`] - A field of an earlier stage was edited
    ///   into an invalid value after that stage was passed.
    /// - [`BookingError::SubmissionInProgress`] - Another submission is running.
    /// - [`BookingError::AlreadyCompleted`] - A receipt was already issued.
    /// - [`BookingError::Payment`] - The processor failed; the flow stays at
    ///   review and may be submitted again.
    pub async fn submit(&self) -> Result<BookingReceipt, BookingError> {
        let request = {
            let mut data = self.inner.lock();
            if let Err(e) = data.ensure_mutable() {
                tracing::warn!(error = %e, "rejected booking submission");
                return Err(e);
            }
            if data.stage != Stage::Review {
                return Err(BookingError::NotAtReview { stage: data.stage });
            }
            // Fields of earlier stages may have been edited since they were passed.
            let stale = passed_stage_errors(data.stage, &data.form);
            if !stale.is_empty() {
                tracing::debug!(invalid = stale.len(), "earlier stage no longer valid");
                data.errors = stale.clone();
                return Err(BookingError::Validation(stale));
            }
            data.submitting = true;
            self.payment_request(&data.form)
        };
        let in_flight = InFlight { data: &self.inner };

        let outcome = self.processor.process(&request).await;

        let result = {
            let mut data = self.inner.lock();
            match outcome {
                Ok(()) => {
                    let receipt = self.issue_receipt();
                    data.receipt = Some(receipt.clone());
                    data.submitting = false;
                    data.assert_invariants();
                    tracing::info!(
                        code = %receipt.confirmation_code,
                        event = %receipt.event_title,
                        quantity = receipt.quantity,
                        total = %receipt.total,
                        "booking completed"
                    );
                    Ok(receipt)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "booking payment failed");
                    Err(BookingError::Payment(e))
                }
            }
        };
        drop(in_flight);
        result
    }

    fn payment_request(&self, form: &BookingForm) -> PaymentRequest {
        PaymentRequest {
            event_id: self.selection.event().id,
            tier_id: self.selection.tier().id,
            quantity: self.selection.quantity(),
            amount: self.selection.total(),
            card_holder: form.card_name.clone(),
            card_number: form.masked_card_number(),
        }
    }

    fn issue_receipt(&self) -> BookingReceipt {
        let event = self.selection.event();
        BookingReceipt {
            confirmation_code: ConfirmationCode(self.codes.generate()),
            event_title: event.title.clone(),
            event_date_display: event.date_display(),
            ticket_name: self.selection.tier().name.clone(),
            quantity: self.selection.quantity(),
            total: self.selection.total(),
        }
    }
}

impl std::fmt::Debug for BookingFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingFlow")
            .field("selection", &self.selection)
            .field("state", &*self.inner.lock())
            .finish_non_exhaustive()
    }
}
