//! Core types for bdaycal.
//!
//! This crate turns vCard birthdays into yearly recurring calendar events:
//! - `vcard` reads contact records from a vCard export
//! - `birthday` normalizes the many `BDAY` encodings into month/day (+ year)
//! - `event` builds the yearly all-day event for a birthday
//! - `ics` serializes events into an iCalendar file
//! - `convert` ties the steps together

pub mod birthday;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod event;
pub mod ics;
pub mod vcard;

pub use birthday::{
    Age, BirthdayFormat, FixedDateNotice, Normalized, NormalizedBirthday, normalize,
};
pub use convert::{Conversion, ConvertOptions, convert_contacts, convert_file};
pub use error::{BdayCalError, BdayCalResult};
pub use event::{BirthdayEvent, Recurrence, build_event};
pub use vcard::{RawContact, read_contacts};
