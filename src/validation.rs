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

//! Per-stage validation of the booking form.
//!
//! Validation is pure: [`validate_stage`] inspects a form and reports every
//! failing field at once as a [`FieldErrors`] map. An empty map means the stage
//! may be left.

use crate::form::{BookingForm, Field};
use crate::stage::Stage;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::LazyLock;

/// Deliberately loose: anything shaped like `x@y.z` with no whitespace.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

const CARD_NUMBER_LEN: usize = 16;
const CVV_LEN: usize = 3;

/// Validation messages keyed by the field they belong to.
///
/// Iteration follows [`Field`] declaration order, which is also the order the
/// fields appear on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drops the message for `field`, returning it if one was present.
    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Field, String> {
        self.0.iter()
    }
}

impl Extend<(Field, String)> for FieldErrors {
    fn extend<I: IntoIterator<Item = (Field, String)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for FieldErrors {
    type Item = (Field, String);
    type IntoIter = btree_map::IntoIter<Field, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a Field, &'a String);
    type IntoIter = btree_map::Iter<'a, Field, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns `true` when `email` contains an `x@y.z` shaped run of non-whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Checks every rule that applies to `stage`.
///
/// | Stage | Rules |
/// |-------|-------|
/// | PersonalInfo | all eight contact fields required, email shape |
/// | Payment | card number of 16 digits ignoring whitespace, holder name, expiry, 3-digit CVV |
/// | Review | none |
pub fn validate_stage(stage: Stage, form: &BookingForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match stage {
        Stage::PersonalInfo => {
            require(&mut errors, form, Field::FirstName, "First name is required");
            require(&mut errors, form, Field::LastName, "Last name is required");
            if require(&mut errors, form, Field::Email, "Email is required")
                && !is_valid_email(&form.email)
            {
                errors.insert(Field::Email, "Email is invalid");
            }
            require(&mut errors, form, Field::Phone, "Phone number is required");
            require(&mut errors, form, Field::Address, "Address is required");
            require(&mut errors, form, Field::City, "City is required");
            require(&mut errors, form, Field::State, "State is required");
            require(&mut errors, form, Field::ZipCode, "ZIP code is required");
        }
        Stage::Payment => {
            if require(&mut errors, form, Field::CardNumber, "Card number is required")
                && !is_digits_of_len(
                    form.card_number.chars().filter(|c| !c.is_whitespace()),
                    CARD_NUMBER_LEN,
                )
            {
                errors.insert(Field::CardNumber, "Card number must be 16 digits");
            }
            require(&mut errors, form, Field::CardName, "Card holder name is required");
            require(&mut errors, form, Field::ExpiryDate, "Expiry date is required");
            if require(&mut errors, form, Field::Cvv, "CVV is required")
                && !is_digits_of_len(form.cvv.chars(), CVV_LEN)
            {
                errors.insert(Field::Cvv, "CVV must be 3 digits");
            }
        }
        Stage::Review => {}
    }

    errors
}

fn is_digits_of_len(chars: impl Iterator<Item = char>, len: usize) -> bool {
    let mut count = 0;
    for c in chars {
        if !c.is_ascii_digit() {
            return false;
        }
        count += 1;
    }
    count == len
}

/// Records `message` when the field is blank. Returns whether the field was present.
fn require(errors: &mut FieldErrors, form: &BookingForm, field: Field, message: &str) -> bool {
    if form.get(field).trim().is_empty() {
        errors.insert(field, message);
        false
    } else {
        true
    }
}
