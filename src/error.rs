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

//! Error types for the booking flow and ticket selection.

use crate::base::TicketTierId;
use crate::processor::PaymentError;
use crate::stage::Stage;
use crate::validation::FieldErrors;
use thiserror::Error;

/// Booking errors.
///
/// Only [`BookingError::Validation`] is expected during normal use; every
/// variant is recoverable by correcting input or restarting the flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// One or more fields of the current stage failed validation
    #[error("{} field(s) failed validation", .0.len())]
    Validation(FieldErrors),

    /// A submission is still being processed
    #[error("booking submission already in progress")]
    SubmissionInProgress,

    /// The flow already produced a receipt
    #[error("booking already completed")]
    AlreadyCompleted,

    /// Submit was attempted before reaching the review stage
    #[error("booking can only be submitted from review (current stage: {stage})")]
    NotAtReview { stage: Stage },

    /// Field name not recognized
    #[error("unknown form field: {0}")]
    UnknownField(String),

    /// Event does not offer the requested ticket tier
    #[error("ticket tier {0} not found")]
    TierNotFound(TicketTierId),

    /// Quantity must be at least one
    #[error("invalid ticket quantity (must be at least 1)")]
    InvalidQuantity,

    /// Not enough tickets remain in the tier
    #[error("only {remaining} ticket(s) remaining, {requested} requested")]
    InsufficientInventory { requested: u32, remaining: u32 },

    /// Payment processor rejected the booking
    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),
}
