//!
//! Day and month names, parsing and formatting of the textual date.
//!
//! The textual form is always `DD/MM/YYYY`. Names for weekdays and
//! months come from chrono's locale tables.
//!
//! ```
//! use rat_date_picker::format::DateFormatter;
//! use chrono::NaiveDate;
//!
//! let fmt = DateFormatter::default();
//! let date = fmt.parse("15/06/2021").expect("date");
//! assert_eq!(date, NaiveDate::from_ymd_opt(2021, 6, 15).expect("date"));
//! assert_eq!(fmt.format(date), "15/06/2021");
//! assert_eq!(fmt.describe_for_label(date), "Tuesday 15 June 2021");
//! ```
//!

use crate::util::{rollover_date, MAX_YEAR};
use chrono::{Datelike, Locale, NaiveDate};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Failed to read a date from text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Expected three parts separated by '/'. Contains the number found.
    Parts(usize),
    /// One part is not a number.
    NotANumber(String),
    /// The numbers don't give a usable date.
    OutOfRange,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for ParseError {}

/// Long or abbreviated names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// Monday, January
    #[default]
    Long,
    /// Mon, Jan
    Short,
}

/// Date formatting for one locale.
///
/// Nothing is cached here, the names are produced on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateFormatter {
    loc: Locale,
}

impl DateFormatter {
    pub fn new(loc: Locale) -> Self {
        Self { loc }
    }

    /// Formatter for a locale identifier like `fr-FR` or `de_AT`.
    ///
    /// Unknown identifiers fall back to the POSIX locale.
    pub fn from_identifier(locale: &str) -> Self {
        Self::new(locale_from_identifier(locale))
    }

    /// Locale.
    pub fn locale(&self) -> Locale {
        self.loc
    }

    /// Weekday names starting with Monday.
    pub fn weekday_names(&self, style: NameStyle) -> [String; 7] {
        let pattern = match style {
            NameStyle::Long => "%A",
            NameStyle::Short => "%a",
        };
        // 7th of June 2021 is a Monday.
        std::array::from_fn(|i| {
            let day = NaiveDate::from_ymd_opt(2021, 6, 7 + i as u32).unwrap_or_default();
            let name = day.format_localized(pattern, self.loc).to_string();
            capitalize(&name.replace('.', ""))
        })
    }

    /// Month names starting with January.
    pub fn month_names(&self, style: NameStyle) -> [String; 12] {
        let pattern = match style {
            NameStyle::Long => "%B",
            NameStyle::Short => "%b",
        };
        std::array::from_fn(|i| {
            let day = NaiveDate::from_ymd_opt(2021, 1 + i as u32, 1).unwrap_or_default();
            capitalize(&day.format_localized(pattern, self.loc).to_string())
        })
    }

    /// Weekday name for the date.
    pub fn weekday_name(&self, date: NaiveDate, style: NameStyle) -> String {
        let names = self.weekday_names(style);
        names[date.weekday().num_days_from_monday() as usize].clone()
    }

    /// Month name for the date.
    pub fn month_name(&self, date: NaiveDate, style: NameStyle) -> String {
        let names = self.month_names(style);
        names[date.month0() as usize].clone()
    }

    /// Reads a `DD/MM/YYYY` date.
    ///
    /// A year with one or two digits is taken as 2000 + year,
    /// a zero padded year like `0050` is read as is. Day and month
    /// are not range checked, an overflow rolls into the next
    /// month/year: `31/02/2021` is the 3rd of March 2021.
    pub fn parse(&self, text: &str) -> Result<NaiveDate, ParseError> {
        let parts = text.split('/').collect::<Vec<_>>();
        if parts.len() != 3 {
            return Err(ParseError::Parts(parts.len()));
        }

        let day = parse_part(parts[0])?;
        let month = parse_part(parts[1])?;
        let mut year = parse_part(parts[2])?;
        if parts[2].trim().len() <= 2 {
            year += 2000;
        }
        if year > MAX_YEAR as i64 {
            return Err(ParseError::OutOfRange);
        }

        rollover_date(year, month - 1, day).ok_or(ParseError::OutOfRange)
    }

    /// Writes a `DD/MM/YYYY` date.
    pub fn format(&self, date: NaiveDate) -> String {
        format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
    }

    /// Readable form for screen readers and labels.
    ///
    /// "weekday day month year"
    pub fn describe_for_label(&self, date: NaiveDate) -> String {
        format!(
            "{} {} {} {}",
            self.weekday_name(date, NameStyle::Long),
            date.day(),
            self.month_name(date, NameStyle::Long),
            date.year()
        )
    }

    /// Heading for the displayed month, "month year".
    pub fn month_year_title(&self, date: NaiveDate) -> String {
        format!("{} {}", self.month_name(date, NameStyle::Long), date.year())
    }
}

/// Locale from an identifier. Accepts `-` or `_` as separator.
/// Falls back to POSIX.
pub fn locale_from_identifier(locale: &str) -> Locale {
    let id = locale.trim().replace('-', "_");
    match Locale::from_str(&id) {
        Ok(loc) => loc,
        Err(_) => {
            warn!("unknown locale {:?}, using POSIX", locale);
            Locale::POSIX
        }
    }
}

fn parse_part(part: &str) -> Result<i64, ParseError> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::NotANumber(part.to_string()));
    }
    // more digits than any date needs.
    part.parse::<i64>().map_err(|_| ParseError::OutOfRange)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
