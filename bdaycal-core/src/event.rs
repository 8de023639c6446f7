//! Birthday events.

use chrono::NaiveDate;

use crate::birthday::{Age, NormalizedBirthday};

/// How often a birthday event repeats. Birthdays only ever repeat yearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    Yearly,
}

impl Recurrence {
    /// RRULE value, without the `RRULE:` prefix. No end condition.
    pub fn as_rrule(&self) -> &'static str {
        match self {
            Recurrence::Yearly => "FREQ=YEARLY",
        }
    }
}

/// An all-day, yearly recurring birthday event.
///
/// `date` is the occurrence in the reference year, never the birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayEvent {
    pub title: String,
    pub date: NaiveDate,
    pub recurrence: Recurrence,
}

/// Build the event for one birthday.
///
/// The title is `"{name} {title_suffix}"`, followed by `" ({age})"` whenever
/// an age is known, including an age of zero.
///
/// A Feb 29 birthday in a non-leap `reference_year` is dated Feb 28, and the
/// yearly recurrence then repeats on Feb 28, leap years included.
pub fn build_event(
    name: &str,
    title_suffix: &str,
    birthday: &NormalizedBirthday,
    age: Option<Age>,
    reference_year: i32,
) -> BirthdayEvent {
    let mut title = if title_suffix.is_empty() {
        name.to_string()
    } else {
        format!("{name} {title_suffix}")
    };
    if let Some(age) = age {
        title = format!("{title} ({age})");
    }

    BirthdayEvent {
        title,
        date: birthday.date_in(reference_year),
        recurrence: Recurrence::Yearly,
    }
}
