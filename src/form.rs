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

//! Booking form fields and input formatting.
//!
//! [`BookingForm`] is the flat record accumulated across the flow. Each
//! [`Field`] belongs to exactly one [`Stage`]; fields of stages not yet
//! reached may be empty.
//!
//! # Example
//!
//! ```
//! use event_booking_rs::{BookingForm, Field, format_card_number};
//!
//! let mut form = BookingForm::default();
//! form.set(Field::CardNumber, format_card_number("4111111111111111"));
//! assert_eq!(form.get(Field::CardNumber), "4111 1111 1111 1111");
//! ```

use crate::error::BookingError;
use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest card number accepted by [`format_card_number`], in digits.
const CARD_DIGITS: usize = 16;
const CARD_GROUP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    CardNumber,
    CardName,
    ExpiryDate,
    Cvv,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::City,
        Field::State,
        Field::ZipCode,
        Field::CardNumber,
        Field::CardName,
        Field::ExpiryDate,
        Field::Cvv,
    ];

    /// Name used by the host UI when reporting input events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::CardNumber => "cardNumber",
            Self::CardName => "cardName",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }

    /// The stage whose validation covers this field.
    pub fn stage(self) -> Stage {
        match self {
            Self::CardNumber | Self::CardName | Self::ExpiryDate | Self::Cvv => Stage::Payment,
            _ => Stage::PersonalInfo,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| BookingError::UnknownField(s.to_string()))
    }
}

/// Values entered so far, one string per [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl BookingForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
            Field::CardNumber => &self.card_number,
            Field::CardName => &self.card_name,
            Field::ExpiryDate => &self.expiry_date,
            Field::Cvv => &self.cvv,
        }
    }

    /// Replaces the stored value. No validation happens here.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::ZipCode => &mut self.zip_code,
            Field::CardNumber => &mut self.card_number,
            Field::CardName => &mut self.card_name,
            Field::ExpiryDate => &mut self.expiry_date,
            Field::Cvv => &mut self.cvv,
        };
        *slot = value.into();
    }

    /// Card number with all but the last four digits hidden, for review screens.
    pub fn masked_card_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("**** **** **** {tail}")
    }
}

/// Normalizes raw card input into space-separated groups of four digits.
///
/// Non-digits are dropped and anything past sixteen digits is cut off. With
/// fewer than four digits there is no group to form, so the bare digits come
/// back unchanged.
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < CARD_GROUP {
        return digits;
    }

    // Only ASCII digits remain, so byte slicing is on char boundaries.
    let kept = &digits[..digits.len().min(CARD_DIGITS)];
    kept.as_bytes()
        .chunks(CARD_GROUP)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips everything but digits from CVV input.
pub fn sanitize_cvv(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
