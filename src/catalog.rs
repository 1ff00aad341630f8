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

//! Event catalog records and the listing query.
//!
//! [`query`] filters a slice of [`EventRecord`]s by free text, category and
//! location, then orders the survivors by a [`SortKey`]. It borrows from the
//! input and never reorders it.
//!
//! # Example
//!
//! ```
//! use event_booking_rs::{EventQuery, Selection, SortKey, fixtures, query};
//!
//! let events = fixtures::catalog();
//! let music = EventQuery::default()
//!     .with_category(Selection::only("Music"))
//!     .with_sort(SortKey::Rating);
//!
//! let titles: Vec<&str> = query(&events, &music).iter().map(|e| e.title.as_str()).collect();
//! assert_eq!(titles, ["Music Festival"]);
//! ```

use crate::base::{EventId, TicketTierId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A purchasable ticket option of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    pub id: TicketTierId,
    pub name: String,
    pub price: Decimal,
    /// Pre-discount price, shown struck through when present.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Remaining inventory.
    pub available: u32,
}

/// Read-only description of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub venue: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    /// Headline ("from") price used for listing and sorting.
    pub price: Decimal,
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    pub attendees: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub tickets: Vec<TicketTier>,
}

impl EventRecord {
    pub fn tier(&self, id: TicketTierId) -> Option<&TicketTier> {
        self.tickets.iter().find(|tier| tier.id == id)
    }

    /// Calendar date rendered as `M/D/YYYY`.
    pub fn date_display(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }

    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Filter value for a single dimension: everything, or one named value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub const ALL_LABEL: &'static str = "All";

    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    fn accepts_exact(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    fn accepts_within(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.contains(wanted.as_str()),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(value) => f.write_str(value),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Earliest first.
    #[default]
    Date,
    /// Cheapest first.
    Price,
    /// Best rated first.
    Rating,
    /// Most attended first.
    Attendees,
    /// Keep input order.
    Unsorted,
}

impl SortKey {
    fn compare(self, a: &EventRecord, b: &EventRecord) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Price => a.price.cmp(&b.price),
            Self::Rating => b.rating.total_cmp(&a.rating),
            Self::Attendees => b.attendees.cmp(&a.attendees),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl From<&str> for SortKey {
    /// Unrecognized keys fall back to [`SortKey::Unsorted`].
    fn from(value: &str) -> Self {
        match value {
            "date" => Self::Date,
            "price" => Self::Price,
            "rating" => Self::Rating,
            "attendees" => Self::Attendees,
            _ => Self::Unsorted,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Parameters of a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    pub search: String,
    pub category: Selection,
    pub location: Selection,
    pub sort_by: SortKey,
}

impl EventQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Selection) -> Self {
        self.category = category;
        self
    }

    pub fn with_location(mut self, location: Selection) -> Self {
        self.location = location;
        self
    }

    pub fn with_sort(mut self, sort_by: SortKey) -> Self {
        self.sort_by = sort_by;
        self
    }
}

/// Returns the events matching `params`, ordered by `params.sort_by`.
///
/// An event matches when all of these hold:
/// - the search text is empty or occurs (case-insensitively) in its title or description
/// - the category selection is `All` or equals its category
/// - the location selection is `All` or occurs in its location
///
/// The sort is stable, so ties and [`SortKey::Unsorted`] keep input order.
pub fn query<'a>(events: &'a [EventRecord], params: &EventQuery) -> Vec<&'a EventRecord> {
    let needle = params.search.to_lowercase();

    let mut matched: Vec<&EventRecord> = events
        .iter()
        .filter(|event| {
            event.matches_search(&needle)
                && params.category.accepts_exact(&event.category)
                && params.location.accepts_within(&event.location)
        })
        .collect();

    matched.sort_by(|a, b| params.sort_by.compare(a, b));

    tracing::debug!(
        total = events.len(),
        matched = matched.len(),
        sort_by = ?params.sort_by,
        "catalog query"
    );
    matched
}
