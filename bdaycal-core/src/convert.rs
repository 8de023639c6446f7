//! Contacts to birthday calendar conversion.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::birthday::{FixedDateNotice, normalize};
use crate::constants::DEFAULT_TITLE_SUFFIX;
use crate::error::BdayCalResult;
use crate::event::{BirthdayEvent, build_event};
use crate::ics::generate_ics;
use crate::vcard::{RawContact, read_contacts};

/// Settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Text appended to each contact name in the event title
    pub title_suffix: String,
    /// Reference date: its year places every event and computes ages
    pub today: NaiveDate,
    /// Display name for the generated calendar
    pub calendar_name: Option<String>,
}

impl ConvertOptions {
    pub fn new(today: NaiveDate) -> Self {
        ConvertOptions {
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            today,
            calendar_name: None,
        }
    }
}

/// Outcome of converting a set of contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// One event per contact with both a name and a birthday, in file order
    pub events: Vec<BirthdayEvent>,
    /// Yearless birthdays that were placed on the reference year
    pub notices: Vec<FixedDateNotice>,
    /// Contacts without a name or without a birthday
    pub skipped: usize,
}

/// Build birthday events for `contacts`.
///
/// Contacts lacking a name or a birthday are skipped. The first birthday
/// in an unrecognized format aborts the whole conversion.
pub fn convert_contacts(
    contacts: &[RawContact],
    options: &ConvertOptions,
) -> BdayCalResult<Conversion> {
    let reference_year = options.today.year();
    let mut conversion = Conversion::default();

    for contact in contacts {
        let (Some(name), Some(raw_birthday)) = (&contact.name, &contact.birthday) else {
            debug!(
                line = contact.line,
                name = contact.name.as_deref().unwrap_or(""),
                "Skipping contact without name or birthday"
            );
            conversion.skipped += 1;
            continue;
        };

        let normalized = normalize(raw_birthday, options.today)?;
        let event = build_event(
            name,
            &options.title_suffix,
            &normalized.birthday,
            normalized.age,
            reference_year,
        );
        info!("{}", event.title);

        conversion.notices.extend(normalized.notice);
        conversion.events.push(event);
    }

    Ok(conversion)
}

/// Convert the vCard file at `input` into an .ics file at `output`.
///
/// The output file is only written once every contact converted
/// successfully; on error it is left untouched.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> BdayCalResult<Conversion> {
    let content = std::fs::read_to_string(input)?;
    let contacts = read_contacts(&content)?;
    let conversion = convert_contacts(&contacts, options)?;

    let ics = generate_ics(&conversion.events, options.calendar_name.as_deref());
    std::fs::write(output, ics)?;

    info!(
        "Wrote {} birthday events to {}",
        conversion.events.len(),
        output.display()
    );

    Ok(conversion)
}
