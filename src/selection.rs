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

//! Ticket selection made on the event page before booking starts.

use crate::base::TicketTierId;
use crate::catalog::{EventRecord, TicketTier};
use crate::error::BookingError;
use rust_decimal::Decimal;
use serde::Serialize;

/// An event, one of its tiers, and how many tickets of that tier.
///
/// # Invariants
///
/// - `tier` is one of `event.tickets`.
/// - `1 <= quantity <= tier.available`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSelection {
    event: EventRecord,
    tier: TicketTier,
    quantity: u32,
}

impl TicketSelection {
    /// Picks `quantity` tickets of tier `tier_id` from `event`.
    ///
    /// # Errors
    ///
    /// - [`BookingError::TierNotFound`] - The event has no such tier.
    /// - [`BookingError::InvalidQuantity`] - Quantity is zero.
    /// - [`BookingError::InsufficientInventory`] - Quantity exceeds remaining tickets.
    pub fn new(
        event: EventRecord,
        tier_id: TicketTierId,
        quantity: u32,
    ) -> Result<Self, BookingError> {
        let tier = event
            .tier(tier_id)
            .cloned()
            .ok_or(BookingError::TierNotFound(tier_id))?;
        check_quantity(&tier, quantity)?;
        Ok(Self {
            event,
            tier,
            quantity,
        })
    }

    /// Changes the quantity, keeping the previous one on error.
    ///
    /// # Errors
    ///
    /// Same quantity rules as [`TicketSelection::new`].
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), BookingError> {
        check_quantity(&self.tier, quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn event(&self) -> &EventRecord {
        &self.event
    }

    pub fn tier(&self) -> &TicketTier {
        &self.tier
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn total(&self) -> Decimal {
        self.tier.price * Decimal::from(self.quantity)
    }
}

fn check_quantity(tier: &TicketTier, quantity: u32) -> Result<(), BookingError> {
    if quantity == 0 {
        return Err(BookingError::InvalidQuantity);
    }
    if quantity > tier.available {
        return Err(BookingError::InsufficientInventory {
            requested: quantity,
            remaining: tier.available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::featured_event;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_price_times_quantity() {
        let selection = TicketSelection::new(featured_event(), TicketTierId(3), 2).unwrap();
        assert_eq!(selection.tier().name, "VIP");
        assert_eq!(selection.total(), dec!(998));
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let result = TicketSelection::new(featured_event(), TicketTierId(42), 1);
        assert_eq!(result, Err(BookingError::TierNotFound(TicketTierId(42))));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = TicketSelection::new(featured_event(), TicketTierId(1), 0);
        assert_eq!(result, Err(BookingError::InvalidQuantity));
    }

    #[test]
    fn quantity_is_bounded_by_inventory() {
        let result = TicketSelection::new(featured_event(), TicketTierId(3), 26);
        assert_eq!(
            result,
            Err(BookingError::InsufficientInventory {
                requested: 26,
                remaining: 25
            })
        );
    }

    #[test]
    fn failed_quantity_change_keeps_previous_value() {
        let mut selection = TicketSelection::new(featured_event(), TicketTierId(1), 2).unwrap();
        assert!(selection.set_quantity(0).is_err());
        assert_eq!(selection.quantity(), 2);

        selection.set_quantity(4).unwrap();
        assert_eq!(selection.total(), dec!(796));
    }
}
