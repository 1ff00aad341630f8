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

use clap::{Args, Parser, Subcommand};
use csv::{ReaderBuilder, Trim, Writer};
use event_booking_rs::{
    BookingConfig, BookingError, BookingFlow, BookingReceipt, EventId, EventQuery, EventRecord,
    FieldErrors, Selection, SortKey, TicketSelection, TicketTierId, fixtures, query,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Event Booking - Browse the event catalog and run bookings
///
/// Listings and receipts are written to stdout as CSV; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "event-booking-rs")]
#[command(about = "Browse events and book tickets from the command line", long_about = None)]
struct Cli {
    /// Optional configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events matching a query
    Search(SearchArgs),
    /// Book tickets for the featured event using form values from a CSV file
    Book(BookArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// CSV file of events; the built-in catalog is used when omitted
    ///
    /// Expected format: id,title,category,location,date,time,price,rating,attendees,description
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Case-insensitive text matched against title and description
    #[arg(long, default_value = "")]
    search: String,

    /// Exact category, or "All"
    ///
    /// Listed choices: All, Technology, Design, Music, Business, Education, Sports
    #[arg(long, default_value = Selection::ALL_LABEL)]
    category: String,

    /// Location substring, or "All"
    ///
    /// Listed choices: All, San Francisco, New York, Los Angeles, Chicago, Miami, Austin
    #[arg(long, default_value = Selection::ALL_LABEL)]
    location: String,

    /// One of date, price, rating, attendees; anything else keeps file order
    #[arg(long, default_value = "date")]
    sort_by: String,
}

#[derive(Args, Debug)]
struct BookArgs {
    /// CSV file of `field,value` rows, e.g. `firstName,Ada`
    #[arg(long, value_name = "FILE")]
    form: PathBuf,

    /// Ticket tier of the featured event
    #[arg(long, default_value_t = 2)]
    tier: u32,

    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Overrides the configured simulated payment delay
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("event_booking_rs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match BookingConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let outcome = match cli.command {
        Command::Search(args) => search(args),
        Command::Book(args) => {
            if let Some(delay_ms) = args.delay_ms {
                config.processing_delay_ms = delay_ms;
            }
            book(args, &config).await
        }
    };

    if let Err(message) = outcome {
        eprintln!("{}", message);
        process::exit(1);
    }
}

fn search(args: SearchArgs) -> Result<(), String> {
    let events = match &args.file {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Error opening file '{}': {}", path.display(), e))?;
            load_events(BufReader::new(file))
                .map_err(|e| format!("Error reading events: {}", e))?
        }
        None => fixtures::catalog(),
    };

    known_filter_value("category", &args.category, &fixtures::CATEGORIES);
    known_filter_value("location", &args.location, &fixtures::LOCATIONS);

    let params = EventQuery::default()
        .with_search(args.search)
        .with_category(Selection::from(args.category.as_str()))
        .with_location(Selection::from(args.location.as_str()))
        .with_sort(SortKey::from(args.sort_by.as_str()));

    write_events(&query(&events, &params), std::io::stdout())
        .map_err(|e| format!("Error writing output: {}", e))
}

/// Checks a filter value against the browse page's choices.
///
/// Unknown values are still applied, since a CSV catalog may use its own
/// categories and locations, but they are logged.
fn known_filter_value(name: &str, value: &str, choices: &[&str]) -> bool {
    let known = choices.contains(&value);
    if !known {
        tracing::warn!(filter = name, value, choices = ?choices, "filter value is not a listed choice");
    }
    known
}

async fn book(args: BookArgs, config: &BookingConfig) -> Result<(), String> {
    let selection = TicketSelection::new(
        fixtures::featured_event(),
        TicketTierId(args.tier),
        args.quantity,
    )
    .map_err(|e| format!("Invalid ticket selection: {}", e))?;
    let flow = BookingFlow::from_config(selection, config);

    let file = File::open(&args.form)
        .map_err(|e| format!("Error opening file '{}': {}", args.form.display(), e))?;
    apply_form(&flow, BufReader::new(file)).map_err(|e| format!("Error reading form: {}", e))?;

    match complete_booking(&flow).await {
        Ok(receipt) => write_receipt(&receipt, std::io::stdout())
            .map_err(|e| format!("Error writing output: {}", e)),
        Err(BookingError::Validation(errors)) => {
            write_field_errors(&errors, std::io::stderr())
                .map_err(|e| format!("Error writing output: {}", e))?;
            Err(format!("Booking stopped at stage: {}", flow.stage()))
        }
        Err(e) => Err(format!("Booking failed: {}", e)),
    }
}

/// Raw CSV record of a catalog listing.
#[derive(Debug, Deserialize)]
struct CsvEvent {
    id: u32,
    title: String,
    category: String,
    location: String,
    date: chrono::NaiveDate,
    time: String,
    price: Decimal,
    rating: f64,
    attendees: u32,
    #[serde(default)]
    description: String,
}

impl From<CsvEvent> for EventRecord {
    fn from(row: CsvEvent) -> Self {
        EventRecord {
            id: EventId(row.id),
            title: row.title,
            category: row.category,
            location: row.location,
            venue: None,
            date: row.date,
            time: row.time,
            price: row.price,
            rating: row.rating,
            reviews: 0,
            attendees: row.attendees,
            description: row.description,
            premium: false,
            tickets: Vec::new(),
        }
    }
}

/// Output row of a listing.
#[derive(Debug, Serialize)]
struct EventRow<'a> {
    id: EventId,
    title: &'a str,
    category: &'a str,
    location: &'a str,
    date: String,
    time: &'a str,
    price: Decimal,
    rating: f64,
    attendees: u32,
}

/// Reads catalog events from CSV.
///
/// Malformed rows are skipped.
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the header is unreadable.
fn load_events<R: Read>(reader: R) -> Result<Vec<EventRecord>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut events = Vec::new();
    for result in rdr.deserialize::<CsvEvent>() {
        match result {
            Ok(row) => events.push(EventRecord::from(row)),
            Err(e) => tracing::warn!(error = %e, "skipping malformed event row"),
        }
    }
    Ok(events)
}

fn write_events<W: Write>(events: &[&EventRecord], writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for event in events {
        wtr.serialize(EventRow {
            id: event.id,
            title: &event.title,
            category: &event.category,
            location: &event.location,
            date: event.date.to_string(),
            time: &event.time,
            price: event.price,
            rating: event.rating,
            attendees: event.attendees,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CsvFormValue {
    field: String,
    #[serde(default)]
    value: String,
}

/// Feeds `field,value` rows into the flow in file order.
///
/// Unknown field names and malformed rows are skipped.
///
/// # Errors
///
/// Returns a CSV error if the reader fails.
fn apply_form<R: Read>(flow: &BookingFlow, reader: R) -> Result<(), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvFormValue>() {
        match result {
            Ok(row) => {
                if let Err(e) = flow.update_field_by_name(row.field.trim(), row.value) {
                    tracing::warn!(error = %e, "skipping form row");
                }
            }
            Err(e) => tracing::warn!(error = %e, "skipping malformed form row"),
        }
    }
    Ok(())
}

/// Advances through every stage and submits.
async fn complete_booking(flow: &BookingFlow) -> Result<BookingReceipt, BookingError> {
    flow.advance()?;
    flow.advance()?;
    flow.submit().await
}

fn write_receipt<W: Write>(receipt: &BookingReceipt, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.serialize(receipt)?;
    wtr.flush()?;
    Ok(())
}

fn write_field_errors<W: Write>(errors: &FieldErrors, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["field", "error"])?;
    for (field, message) in errors {
        wtr.write_record([field.as_str(), message.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_booking_rs::{Field, SimulatedProcessor, Stage};
    use std::io::Cursor;
    use std::sync::Arc;

    const EVENTS_CSV: &str = "id,title,category,location,date,time,price,rating,attendees,description\n\
                              1,Tech Conf,Technology,SF,2024-12-15,09:00 AM,299,4.8,2500,Big tech\n\
                              2,Music Fest,Music,LA,2025-02-10,06:00 PM,120,4.9,5000,Live music\n";

    fn flow() -> BookingFlow {
        let selection =
            TicketSelection::new(fixtures::featured_event(), TicketTierId(1), 1).unwrap();
        BookingFlow::new(selection).with_processor(Arc::new(SimulatedProcessor::instant()))
    }

    #[test]
    fn filter_values_are_checked_against_listed_choices() {
        assert!(known_filter_value("category", "Music", &fixtures::CATEGORIES));
        assert!(known_filter_value("location", Selection::ALL_LABEL, &fixtures::LOCATIONS));
        assert!(!known_filter_value("category", "Opera", &fixtures::CATEGORIES));
        assert!(!known_filter_value("location", "Francisco", &fixtures::LOCATIONS));
    }

    #[test]
    fn load_events_from_csv() {
        let events = load_events(Cursor::new(EVENTS_CSV)).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].title, "Music Fest");
        assert_eq!(events[1].price, Decimal::from(120));
    }

    #[test]
    fn load_events_skips_malformed_rows() {
        let csv = "id,title,category,location,date,time,price,rating,attendees\n\
                   1,A,Music,LA,2025-01-01,10:00 AM,10,4.0,10\n\
                   x,B,Music,LA,not-a-date,10:00 AM,10,4.0,10\n\
                   3,C,Music,LA,2025-01-02,10:00 AM,10,4.0,10\n";
        let events = load_events(Cursor::new(csv)).unwrap();
        let ids: Vec<u32> = events.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn write_events_outputs_header_and_rows() {
        let events = load_events(Cursor::new(EVENTS_CSV)).unwrap();
        let params = EventQuery::default().with_sort(SortKey::Price);

        let mut output = Vec::new();
        write_events(&query(&events, &params), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "id,title,category,location,date,time,price,rating,attendees"
        );
        assert!(lines[1].starts_with("2,Music Fest,"));
        assert!(lines[2].starts_with("1,Tech Conf,"));
    }

    #[test]
    fn apply_form_sets_known_fields_and_skips_unknown() {
        let flow = flow();
        let csv = "field,value\nfirstName,Ada\nnickname,Countess\ncity,San Francisco\n";
        apply_form(&flow, Cursor::new(csv)).unwrap();

        let form = flow.form();
        assert_eq!(form.get(Field::FirstName), "Ada");
        assert_eq!(form.get(Field::City), "San Francisco");
    }

    #[tokio::test]
    async fn incomplete_form_stops_with_field_errors() {
        let flow = flow();
        apply_form(&flow, Cursor::new("field,value\nfirstName,Ada\n")).unwrap();

        let result = complete_booking(&flow).await;

        let Err(BookingError::Validation(errors)) = result else {
            panic!("expected validation errors");
        };
        assert_eq!(flow.stage(), Stage::PersonalInfo);

        let mut output = Vec::new();
        write_field_errors(&errors, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("field,error\n"));
        assert!(output.contains("lastName,Last name is required"));
    }

    #[tokio::test]
    async fn complete_form_produces_receipt_csv() {
        let flow = flow();
        let csv = "field,value\n\
                   firstName,Ada\nlastName,Lovelace\nemail,ada@example.com\nphone,555-0100\n\
                   address,747 Howard St\ncity,San Francisco\nstate,CA\nzipCode,94103\n\
                   cardNumber,4111 1111 1111 1111\ncardName,Ada Lovelace\nexpiryDate,12/27\ncvv,123\n";
        apply_form(&flow, Cursor::new(csv)).unwrap();

        let receipt = complete_booking(&flow).await.unwrap();

        let mut output = Vec::new();
        write_receipt(&receipt, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with(
            "confirmation_code,event_title,event_date_display,ticket_name,quantity,total\n"
        ));
        assert!(output.contains("Tech Conference 2024,12/15/2024,Early Bird,1,199"));
    }

    #[tokio::test]
    async fn dashed_card_number_in_form_is_reformatted() {
        let flow = flow();
        let csv = "field,value\n\
                   firstName,Ada\nlastName,Lovelace\nemail,ada@example.com\nphone,555-0100\n\
                   address,747 Howard St\ncity,San Francisco\nstate,CA\nzipCode,94103\n\
                   cardNumber,4111-1111-1111-1111\ncardName,Ada Lovelace\nexpiryDate,12/27\ncvv,123\n";
        apply_form(&flow, Cursor::new(csv)).unwrap();

        assert_eq!(flow.form().card_number, "4111 1111 1111 1111");
        assert!(complete_booking(&flow).await.is_ok());
    }
}
