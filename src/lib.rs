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

//! # Event Booking
//!
//! This library provides the booking flow and catalog browsing logic for an
//! event ticketing site: a three-stage checkout with per-stage validation and
//! a simulated payment step, plus the filtered and sorted event listing.
//!
//! ## Core Components
//!
//! - [`BookingFlow`]: Stage machine that collects, validates and submits a booking
//! - [`validate_stage`]: Pure per-stage form validation producing [`FieldErrors`]
//! - [`query`]: Catalog filter and sort over [`EventRecord`]s
//! - [`PaymentProcessor`] / [`ConfirmationCodeGenerator`]: Injectable seams for
//!   payment and receipt codes
//! - [`BookingError`]: Error types for booking failures
//!
//! ## Example
//!
//! ```
//! use event_booking_rs::{
//!     BookingFlow, Field, SimulatedProcessor, Stage, TicketSelection, TicketTierId, fixtures,
//! };
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let selection = TicketSelection::new(fixtures::featured_event(), TicketTierId(2), 1).unwrap();
//! let flow = BookingFlow::new(selection).with_processor(Arc::new(SimulatedProcessor::instant()));
//!
//! for (field, value) in [
//!     (Field::FirstName, "Ada"),
//!     (Field::LastName, "Lovelace"),
//!     (Field::Email, "ada@example.com"),
//!     (Field::Phone, "555-0100"),
//!     (Field::Address, "747 Howard St"),
//!     (Field::City, "San Francisco"),
//!     (Field::State, "CA"),
//!     (Field::ZipCode, "94103"),
//! ] {
//!     flow.update_field(field, value);
//! }
//! assert_eq!(flow.advance().unwrap(), Stage::Payment);
//!
//! flow.update_field(Field::CardNumber, "4111 1111 1111 1111");
//! flow.update_field(Field::CardName, "Ada Lovelace");
//! flow.update_field(Field::ExpiryDate, "12/27");
//! flow.update_field(Field::Cvv, "123");
//! assert_eq!(flow.advance().unwrap(), Stage::Review);
//!
//! let receipt = flow.submit().await.unwrap();
//! assert_eq!(receipt.event_title, "Tech Conference 2024");
//! assert!(flow.is_completed());
//! # });
//! ```
//!
//! ## Concurrency
//!
//! A [`BookingFlow`] has a single logical writer, but its state sits behind a
//! mutex so that an in-flight [`BookingFlow::submit`] can reject a second
//! concurrent submission instead of producing a second receipt.

mod base;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod fixtures;
mod form;
pub mod processor;
mod selection;
mod stage;
mod validation;

pub use base::{ConfirmationCode, EventId, TicketTierId};
pub use booking::{BookingFlow, BookingReceipt, FlowSnapshot};
pub use catalog::{EventQuery, EventRecord, Selection, SortKey, TicketTier, query};
pub use config::BookingConfig;
pub use confirmation::{ConfirmationCodeGenerator, RandomCodeGenerator};
pub use error::BookingError;
pub use form::{BookingForm, Field, format_card_number, sanitize_cvv};
pub use processor::{PaymentError, PaymentProcessor, PaymentRequest, SimulatedProcessor};
pub use selection::TicketSelection;
pub use stage::Stage;
pub use validation::{FieldErrors, is_valid_email, validate_stage};
