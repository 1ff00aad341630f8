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

//! Confirmation code generation.

use rand::Rng;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DEFAULT_PREFIX: &str = "BK";
pub const DEFAULT_LENGTH: usize = 9;

/// Source of confirmation codes for completed bookings.
pub trait ConfirmationCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Prefix followed by `length` random characters from `[0-9A-Z]`.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    prefix: String,
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(prefix: impl Into<String>, length: usize) -> Self {
        Self {
            prefix: prefix.into(),
            length,
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_LENGTH)
    }
}

impl ConfirmationCodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..self.length)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        format!("{}{}", self.prefix, suffix)
    }
}
