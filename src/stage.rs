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

//! Booking stages.
//!
//! Stages follow a strict linear order:
//! - [`PersonalInfo`] → [`Payment`] (via a successful advance)
//! - [`Payment`] → [`Review`] (via a successful advance)
//!
//! Retreating walks the same order backwards and stops at [`PersonalInfo`].
//! Completion is not a stage; it is a flag on the flow reached from [`Review`].
//!
//! [`PersonalInfo`]: Stage::PersonalInfo
//! [`Payment`]: Stage::Payment
//! [`Review`]: Stage::Review

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    PersonalInfo,
    Payment,
    Review,
}

impl Stage {
    /// All stages in flow order.
    pub const ALL: [Stage; 3] = [Stage::PersonalInfo, Stage::Payment, Stage::Review];

    /// The following stage, clamped at [`Stage::Review`].
    pub fn next(self) -> Stage {
        match self {
            Self::PersonalInfo => Self::Payment,
            Self::Payment | Self::Review => Self::Review,
        }
    }

    /// The preceding stage, clamped at [`Stage::PersonalInfo`].
    pub fn previous(self) -> Stage {
        match self {
            Self::PersonalInfo | Self::Payment => Self::PersonalInfo,
            Self::Review => Self::Payment,
        }
    }

    /// 1-based step number shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::Payment => "Payment Details",
            Self::Review => "Confirmation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
