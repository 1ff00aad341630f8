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

//! Benchmarks for catalog queries and form validation.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Catalog query over the built-in listings
//! - Catalog query scaling with catalog size, per sort key
//! - Stage validation and card number formatting

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use event_booking_rs::{
    BookingForm, EventId, EventQuery, EventRecord, Selection, SortKey, Stage, fixtures,
    format_card_number, query, validate_stage,
};
use rust_decimal::Decimal;

// =============================================================================
// Helper Functions
// =============================================================================

const CATEGORIES: [&str; 4] = ["Technology", "Music", "Design", "Sports"];
const LOCATIONS: [&str; 4] = ["San Francisco, CA", "Los Angeles, CA", "Austin, TX", "Miami, FL"];

fn make_catalog(size: usize) -> Vec<EventRecord> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..size)
        .map(|i| EventRecord {
            id: EventId(i as u32),
            title: format!("Event {i}"),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            location: LOCATIONS[(i / 3) % LOCATIONS.len()].to_string(),
            venue: None,
            date: start + Days::new(((i * 7919) % 365) as u64),
            time: "10:00 AM".to_string(),
            price: Decimal::new(((i * 104_729) % 50_000) as i64, 2),
            rating: ((i * 31) % 50) as f64 / 10.0,
            reviews: 0,
            attendees: ((i * 613) % 10_000) as u32,
            description: format!("Description for event number {i}"),
            premium: i % 5 == 0,
            tickets: Vec::new(),
        })
        .collect()
}

fn valid_form() -> BookingForm {
    BookingForm {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
        address: "747 Howard St".into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        zip_code: "94103".into(),
        card_number: "4111 1111 1111 1111".into(),
        card_name: "Ada Lovelace".into(),
        expiry_date: "12/27".into(),
        cvv: "123".into(),
    }
}

// =============================================================================
// Catalog Benchmarks
// =============================================================================

fn bench_builtin_catalog(c: &mut Criterion) {
    let events = fixtures::catalog();
    let params = EventQuery::default()
        .with_search("summit")
        .with_sort(SortKey::Rating);

    c.bench_function("query_builtin_catalog", |b| {
        b.iter(|| black_box(query(black_box(&events), black_box(&params))).len())
    });
}

fn bench_catalog_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scaling");

    for size in [100usize, 1_000, 10_000] {
        let events = make_catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        for key in [SortKey::Date, SortKey::Price, SortKey::Rating, SortKey::Attendees] {
            let params = EventQuery::default()
                .with_location(Selection::only(", CA"))
                .with_sort(key);
            group.bench_with_input(
                BenchmarkId::new(format!("{key:?}"), size),
                &events,
                |b, events| b.iter(|| black_box(query(events, &params)).len()),
            );
        }

        let search = EventQuery::default().with_search("NUMBER 9");
        group.bench_with_input(BenchmarkId::new("search", size), &events, |b, events| {
            b.iter(|| black_box(query(events, &search)).len())
        });
    }

    group.finish();
}

// =============================================================================
// Form Benchmarks
// =============================================================================

fn bench_validation(c: &mut Criterion) {
    let valid = valid_form();
    let empty = BookingForm::default();

    c.bench_function("validate_personal_info_valid", |b| {
        b.iter(|| validate_stage(Stage::PersonalInfo, black_box(&valid)))
    });
    c.bench_function("validate_personal_info_empty", |b| {
        b.iter(|| validate_stage(Stage::PersonalInfo, black_box(&empty)))
    });
    c.bench_function("validate_payment_valid", |b| {
        b.iter(|| validate_stage(Stage::Payment, black_box(&valid)))
    });
    c.bench_function("format_card_number", |b| {
        b.iter(|| format_card_number(black_box("4111-1111-1111-1111-9999")))
    });
}

criterion_group!(
    benches,
    bench_builtin_catalog,
    bench_catalog_scaling,
    bench_validation
);
criterion_main!(benches);
