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

//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional file, then
//! `BOOKING__`-prefixed environment variables (for example
//! `BOOKING__PROCESSING_DELAY_MS=500`).

use crate::confirmation::{DEFAULT_LENGTH, DEFAULT_PREFIX, RandomCodeGenerator};
use crate::processor::{DEFAULT_PROCESSING_DELAY, SimulatedProcessor};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// How long the simulated payment takes.
    pub processing_delay_ms: u64,
    pub confirmation_prefix: String,
    /// Random characters after the prefix.
    pub confirmation_length: usize,
    /// When set, every simulated payment is declined with this reason.
    pub simulated_failure: Option<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: DEFAULT_PROCESSING_DELAY.as_millis() as u64,
            confirmation_prefix: DEFAULT_PREFIX.to_string(),
            confirmation_length: DEFAULT_LENGTH,
            simulated_failure: None,
        }
    }
}

impl BookingConfig {
    /// Loads configuration, reading `path` if it is given and exists.
    ///
    /// # Errors
    ///
    /// Returns a [`config::ConfigError`] if the file is malformed or a value
    /// has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder
            .add_source(config::Environment::with_prefix("BOOKING").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn processor(&self) -> SimulatedProcessor {
        let processor = SimulatedProcessor::new(self.processing_delay());
        match &self.simulated_failure {
            Some(reason) => processor.failing_with(reason.clone()),
            None => processor,
        }
    }

    pub fn code_generator(&self) -> RandomCodeGenerator {
        RandomCodeGenerator::new(self.confirmation_prefix.clone(), self.confirmation_length)
    }
}
