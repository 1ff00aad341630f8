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

//! Built-in reference data.
//!
//! Stand-in for a catalog service: six listings for the browse page and the
//! fully detailed featured event that the booking flow sells tickets for.

use crate::base::{EventId, TicketTierId};
use crate::catalog::{EventRecord, TicketTier};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Categories offered by the browse page filter, `All` first.
pub const CATEGORIES: [&str; 7] = [
    "All",
    "Technology",
    "Design",
    "Music",
    "Business",
    "Education",
    "Sports",
];

/// Locations offered by the browse page filter, `All` first.
pub const LOCATIONS: [&str; 7] = [
    "All",
    "San Francisco",
    "New York",
    "Los Angeles",
    "Chicago",
    "Miami",
    "Austin",
];

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid calendar dates")
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: u32,
    title: &str,
    category: &str,
    location: &str,
    on: NaiveDate,
    time: &str,
    price: Decimal,
    attendees: u32,
    rating: f64,
    description: &str,
    premium: bool,
) -> EventRecord {
    EventRecord {
        id: EventId(id),
        title: title.to_string(),
        category: category.to_string(),
        location: location.to_string(),
        venue: None,
        date: on,
        time: time.to_string(),
        price,
        rating,
        reviews: 0,
        attendees,
        description: description.to_string(),
        premium,
        tickets: Vec::new(),
    }
}

/// The browse page listings, in their original display order.
pub fn catalog() -> Vec<EventRecord> {
    vec![
        listing(
            1,
            "Tech Conference 2024",
            "Technology",
            "San Francisco, CA",
            date(2024, 12, 15),
            "09:00 AM",
            dec!(299),
            2500,
            4.8,
            "Join the biggest tech conference of the year with industry leaders and innovators.",
            true,
        ),
        listing(
            2,
            "Design Summit",
            "Design",
            "New York, NY",
            date(2025, 1, 20),
            "10:00 AM",
            dec!(199),
            1800,
            4.9,
            "Explore the latest design trends and connect with creative professionals.",
            false,
        ),
        listing(
            3,
            "Music Festival",
            "Music",
            "Los Angeles, CA",
            date(2025, 2, 10),
            "06:00 PM",
            dec!(150),
            5000,
            4.7,
            "Experience the ultimate music festival with top artists and amazing performances.",
            true,
        ),
        listing(
            4,
            "Business Innovation Summit",
            "Business",
            "Chicago, IL",
            date(2025, 3, 5),
            "08:30 AM",
            dec!(399),
            1200,
            4.6,
            "Learn from business leaders and discover innovative strategies for growth.",
            false,
        ),
        listing(
            5,
            "Sports Championship",
            "Sports",
            "Miami, FL",
            date(2025, 4, 12),
            "02:00 PM",
            dec!(89),
            8000,
            4.5,
            "Witness the most exciting sports championship with top athletes.",
            false,
        ),
        listing(
            6,
            "Education Workshop",
            "Education",
            "Austin, TX",
            date(2025, 5, 8),
            "11:00 AM",
            dec!(79),
            500,
            4.4,
            "Enhance your skills with hands-on workshops and expert guidance.",
            false,
        ),
    ]
}

fn features(base: &[&str], extra: &[&str]) -> Vec<String> {
    base.iter().chain(extra).map(|name| name.to_string()).collect()
}

/// The detailed event page data, including its three ticket tiers.
pub fn featured_event() -> EventRecord {
    let base = [
        "Full conference access",
        "Lunch included",
        "Networking reception",
        "Digital materials",
    ];

    EventRecord {
        id: EventId(1),
        title: "Tech Conference 2024".to_string(),
        category: "Technology".to_string(),
        location: "San Francisco, CA".to_string(),
        venue: Some("Moscone Center".to_string()),
        date: date(2024, 12, 15),
        time: "09:00 AM - 06:00 PM".to_string(),
        price: dec!(299),
        rating: 4.8,
        reviews: 1247,
        attendees: 2500,
        description: "Join the biggest tech conference of the year with industry leaders and \
                      innovators. This three-day event brings together the brightest minds in \
                      technology to share insights, network, and explore the future of innovation."
            .to_string(),
        premium: true,
        tickets: vec![
            TicketTier {
                id: TicketTierId(1),
                name: "Early Bird".to_string(),
                price: dec!(199),
                original_price: Some(dec!(299)),
                description: "Limited time offer".to_string(),
                features: features(&base, &[]),
                available: 50,
            },
            TicketTier {
                id: TicketTierId(2),
                name: "Regular".to_string(),
                price: dec!(299),
                original_price: None,
                description: "Standard conference ticket".to_string(),
                features: features(&base, &["Workshop access"]),
                available: 200,
            },
            TicketTier {
                id: TicketTierId(3),
                name: "VIP".to_string(),
                price: dec!(499),
                original_price: None,
                description: "Premium experience".to_string(),
                features: features(
                    &base,
                    &[
                        "Workshop access",
                        "VIP seating",
                        "Exclusive dinner",
                        "Meet & greet with speakers",
                    ],
                ),
                available: 25,
            },
        ],
    }
}
