//! Birthday normalization.
//!
//! vCard exporters disagree on how `BDAY` is written. Three encodings are
//! understood, tried in order:
//!
//! | Encoding          | Example    | Year known |
//! |-------------------|------------|------------|
//! | dotted day-month  | `23.04.`   | no         |
//! | compact full date | `19850423` | yes        |
//! | dashed month-day  | `--0423`   | no         |
//!
//! A birth year is never invented for the yearless encodings.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::{BdayCalError, BdayCalResult};

/// Age in whole years: reference year minus birth year.
pub type Age = i32;

/// A leap year, so that `29.02.` counts as a valid yearless birthday.
const ANY_LEAP_YEAR: i32 = 2000;

/// A birthday reduced to month and day, plus the birth year when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedBirthday {
    month: u32,
    day: u32,
    year: Option<i32>,
}

impl NormalizedBirthday {
    /// Returns `None` when the month/day (or full date, if a year is given)
    /// does not exist.
    pub fn new(month: u32, day: u32, year: Option<i32>) -> Option<Self> {
        NaiveDate::from_ymd_opt(year.unwrap_or(ANY_LEAP_YEAR), month, day)?;
        Some(NormalizedBirthday { month, day, year })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// This birthday's occurrence in `year`.
    ///
    /// Feb 29 falls on Feb 28 in non-leap years.
    pub fn date_in(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .unwrap_or_default()
    }
}

/// The shape of a raw `BDAY` value after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdayFormat {
    FullDate { year: i32, month: u32, day: u32 },
    MonthDayOnly { month: u32, day: u32 },
}

/// Recognizers in priority order. The first one that matches wins.
const RECOGNIZERS: &[fn(&str) -> Option<BirthdayFormat>] =
    &[parse_dotted_day_month, parse_compact_date, parse_dashed_month_day];

impl BirthdayFormat {
    /// Classify a raw `BDAY` value.
    pub fn classify(raw: &str) -> BdayCalResult<Self> {
        let value = raw.trim();

        RECOGNIZERS
            .iter()
            .find_map(|recognize| recognize(value))
            .ok_or_else(|| BdayCalError::UnrecognizedDateFormat(raw.to_string()))
    }
}

/// `DD.MM.`, one or two digits each, e.g. `23.04.` or `1.4.`
fn parse_dotted_day_month(value: &str) -> Option<BirthdayFormat> {
    let (day, month) = value.strip_suffix('.')?.split_once('.')?;
    let day = parse_digits(day, 1, 2)?;
    let month = parse_digits(month, 1, 2)?;

    NormalizedBirthday::new(month, day, None)?;
    Some(BirthdayFormat::MonthDayOnly { month, day })
}

/// `YYYYMMDD`, exactly eight digits.
fn parse_compact_date(value: &str) -> Option<BirthdayFormat> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = value[..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..].parse().ok()?;

    NormalizedBirthday::new(month, day, Some(year))?;
    Some(BirthdayFormat::FullDate { year, month, day })
}

/// `--MMDD`, the vCard spelling of "year unknown".
fn parse_dashed_month_day(value: &str) -> Option<BirthdayFormat> {
    let digits = value.strip_prefix("--")?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month = parse_digits(&digits[..2], 2, 2)?;
    let day = parse_digits(&digits[2..], 2, 2)?;

    NormalizedBirthday::new(month, day, None)?;
    Some(BirthdayFormat::MonthDayOnly { month, day })
}

fn parse_digits(s: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if s.len() < min_len || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A yearless birthday that was placed on the reference year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDateNotice {
    pub raw: String,
    pub date: NaiveDate,
}

/// Result of normalizing one raw birthday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub birthday: NormalizedBirthday,
    /// Present only when the raw value carried a year. May be zero.
    pub age: Option<Age>,
    /// Present only for yearless encodings.
    pub notice: Option<FixedDateNotice>,
}

/// Normalize a raw `BDAY` value relative to `today`.
///
/// Fails with [`BdayCalError::UnrecognizedDateFormat`] when the value
/// matches none of the known encodings or names a date that does not exist.
pub fn normalize(raw: &str, today: NaiveDate) -> BdayCalResult<Normalized> {
    let normalized = match BirthdayFormat::classify(raw)? {
        BirthdayFormat::FullDate { year, month, day } => Normalized {
            birthday: NormalizedBirthday {
                month,
                day,
                year: Some(year),
            },
            age: Some(today.year() - year),
            notice: None,
        },
        BirthdayFormat::MonthDayOnly { month, day } => {
            let birthday = NormalizedBirthday {
                month,
                day,
                year: None,
            };
            let notice = FixedDateNotice {
                raw: raw.trim().to_string(),
                date: birthday.date_in(today.year()),
            };
            info!("Fixed date without year: {} -> {}", notice.raw, notice.date);

            Normalized {
                birthday,
                age: None,
                notice: Some(notice),
            }
        }
    };

    Ok(normalized)
}
