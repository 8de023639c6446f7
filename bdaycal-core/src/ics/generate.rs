//! ICS file generation.

use crate::constants::PRODID;
use crate::event::BirthdayEvent;
use chrono::NaiveDate;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

/// Generate .ics content holding one VEVENT per birthday event
pub fn generate_ics(events: &[BirthdayEvent], calendar_name: Option<&str>) -> String {
    let mut cal = Calendar::new();

    // NAME and X-WR-CALNAME
    if let Some(name) = calendar_name {
        cal.name(name);
    }

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.summary(&event.title);

        // All-day: date-only DTSTART, no DTEND
        add_date_property(&mut ics_event, "DTSTART", event.date);

        // Repeats forever, no COUNT or UNTIL
        ics_event.add_property("RRULE", event.recurrence.as_rrule());

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar crate's output
    strip_ics_bloat(&cal.to_string())
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a DATE-valued property (`NAME;VALUE=DATE:YYYYMMDD`)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Recurrence;

    fn make_test_event(title: &str, y: i32, m: u32, d: u32) -> BirthdayEvent {
        BirthdayEvent {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            recurrence: Recurrence::Yearly,
        }
    }

    #[test]
    fn test_generate_ics_all_day_yearly_event() {
        let events = vec![make_test_event("Jane Doe Birthday (35)", 2025, 7, 15)];

        let ics = generate_ics(&events, None);

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20250715"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(ics.contains("RRULE:FREQ=YEARLY"), "Missing RRULE. ICS:\n{}", ics);
        assert!(
            ics.contains("SUMMARY:Jane Doe Birthday (35)"),
            "Missing SUMMARY. ICS:\n{}",
            ics
        );
        assert!(!ics.contains("DTEND"), "All-day birthday should not have DTEND");
    }

    #[test]
    fn test_generate_ics_one_vevent_per_event() {
        let events = vec![
            make_test_event("A Geburtstag", 2025, 1, 1),
            make_test_event("B Geburtstag", 2025, 2, 2),
            make_test_event("C Geburtstag", 2025, 3, 3),
        ];

        let ics = generate_ics(&events, None);

        let vevent_count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(vevent_count, 3, "ICS:\n{}", ics);
        let rrule_count = ics.lines().filter(|l| *l == "RRULE:FREQ=YEARLY").count();
        assert_eq!(rrule_count, 3, "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_empty_calendar() {
        let ics = generate_ics(&[], None);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_generate_ics_replaces_prodid_and_drops_calscale() {
        let ics = generate_ics(&[make_test_event("A", 2025, 1, 1)], None);

        let prodids: Vec<_> = ics.lines().filter(|l| l.starts_with("PRODID:")).collect();
        assert_eq!(prodids, vec![format!("PRODID:{PRODID}")]);
        assert!(!ics.contains("CALSCALE:GREGORIAN"));
    }

    #[test]
    fn test_generate_ics_calendar_name() {
        let ics = generate_ics(&[], Some("Birthdays"));
        assert!(ics.contains("X-WR-CALNAME:Birthdays"), "ICS:\n{}", ics);

        let unnamed = generate_ics(&[], None);
        assert!(!unnamed.contains("X-WR-CALNAME"));
    }
}
