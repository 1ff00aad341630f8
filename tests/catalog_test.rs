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

//! Catalog query public API integration tests.

use chrono::NaiveDate;
use event_booking_rs::{EventId, EventQuery, EventRecord, Selection, SortKey, fixtures, query};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// === Helper Functions ===

fn make_event(
    id: u32,
    title: &str,
    category: &str,
    location: &str,
    rating: f64,
    price: Decimal,
    date: &str,
) -> EventRecord {
    EventRecord {
        id: EventId(id),
        title: title.to_string(),
        category: category.to_string(),
        location: location.to_string(),
        venue: None,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        time: "10:00 AM".to_string(),
        price,
        rating,
        reviews: 0,
        attendees: 0,
        description: String::new(),
        premium: false,
        tickets: Vec::new(),
    }
}

fn two_events() -> Vec<EventRecord> {
    vec![
        make_event(1, "Tech Conf", "Technology", "SF", 4.8, dec!(299), "2024-12-15"),
        make_event(2, "Music Fest", "Music", "LA", 4.9, dec!(120), "2025-02-10"),
    ]
}

fn titles<'a>(events: &[&'a EventRecord]) -> Vec<&'a str> {
    events.iter().map(|e| e.title.as_str()).collect()
}

// === Filtering ===

#[test]
fn category_filter_selects_music() {
    let events = two_events();
    let params = EventQuery::default()
        .with_category(Selection::from("Music"))
        .with_location(Selection::from("All"))
        .with_sort(SortKey::from("rating"));

    assert_eq!(titles(&query(&events, &params)), vec!["Music Fest"]);
}

#[test]
fn empty_query_returns_everything_by_date() {
    let events = fixtures::catalog();
    let result = query(&events, &EventQuery::default());
    assert_eq!(result.len(), 6);
    assert!(result.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn search_is_case_insensitive() {
    let events = fixtures::catalog();
    let params = EventQuery::default().with_search("SUMMIT");
    assert_eq!(
        titles(&query(&events, &params)),
        vec!["Design Summit", "Business Innovation Summit"]
    );
}

#[test]
fn search_matches_description_text() {
    let events = fixtures::catalog();
    let params = EventQuery::default().with_search("athletes");
    assert_eq!(titles(&query(&events, &params)), vec!["Sports Championship"]);
}

#[test]
fn location_filter_matches_city_prefix() {
    let events = fixtures::catalog();
    let params = EventQuery::default().with_location(Selection::from("New York"));
    assert_eq!(titles(&query(&events, &params)), vec!["Design Summit"]);
}

#[test]
fn filters_combine_with_and() {
    let events = fixtures::catalog();
    let params = EventQuery::default()
        .with_category(Selection::from("Music"))
        .with_location(Selection::from("Chicago"));
    assert!(query(&events, &params).is_empty());
}

// === Sorting ===

#[test]
fn price_sort_is_ascending() {
    let events = fixtures::catalog();
    let result = query(&events, &EventQuery::default().with_sort(SortKey::Price));
    assert!(result.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(result[0].title, "Education Workshop");
}

#[test]
fn rating_sort_is_descending() {
    let events = fixtures::catalog();
    let result = query(&events, &EventQuery::default().with_sort(SortKey::Rating));
    assert!(result.windows(2).all(|w| w[0].rating >= w[1].rating));
    assert_eq!(result[0].title, "Design Summit");
}

#[test]
fn attendees_sort_is_descending() {
    let events = fixtures::catalog();
    let result = query(&events, &EventQuery::default().with_sort(SortKey::Attendees));
    assert!(result.windows(2).all(|w| w[0].attendees >= w[1].attendees));
    assert_eq!(result[0].title, "Sports Championship");
}

#[test]
fn equal_keys_keep_input_order() {
    let events = vec![
        make_event(1, "First", "Music", "LA", 4.5, dec!(50), "2025-01-01"),
        make_event(2, "Second", "Music", "LA", 4.5, dec!(50), "2025-01-01"),
        make_event(3, "Third", "Music", "LA", 4.5, dec!(50), "2025-01-01"),
    ];
    for key in [SortKey::Date, SortKey::Price, SortKey::Rating, SortKey::Attendees] {
        let result = query(&events, &EventQuery::default().with_sort(key));
        assert_eq!(titles(&result), vec!["First", "Second", "Third"], "{key:?}");
    }
}

#[test]
fn query_does_not_mutate_input() {
    let events = two_events();
    let before = events.clone();
    let _ = query(&events, &EventQuery::default().with_sort(SortKey::Price));
    assert_eq!(events, before);
}
