//! ICS file generation.
//!
//! Serializes birthday events into a single iCalendar document according to RFC 5545.

mod generate;

pub use generate::generate_ics;
