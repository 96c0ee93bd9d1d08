//!
//! Small helpers.
//!
use chrono::{Datelike, Days, NaiveDate};
use ratatui::style::{Style, Stylize};
use std::mem;

/// Smallest year the date arithmetic will move to.
pub const MIN_YEAR: i32 = 0;
/// Largest year the date arithmetic will move to.
/// Keeps the textual form at four digits.
pub const MAX_YEAR: i32 = 9999;

/// Returns a new style with fg and bg swapped.
///
/// This is not the same as setting Style::reversed().
/// The latter sends special controls to the terminal,
/// the former just swaps.
pub fn revert_style(mut style: Style) -> Style {
    if style.fg.is_some() || style.bg.is_some() {
        mem::swap(&mut style.fg, &mut style.bg);
        style
    } else {
        style.black().on_white()
    }
}

/// Fallback for select style.
pub fn fallback_select_style(style: Style) -> Style {
    if style.fg.is_some() || style.bg.is_some() {
        style
    } else {
        style.underlined()
    }
}

/// Construct a date from parts that may be out of range.
///
/// Works like a lenient date constructor: the zero-based month
/// rolls over into the year, the day rolls over into the neighbouring
/// months. `rollover_date(2021, 1, 31)` is the 3rd of March 2021,
/// `rollover_date(2021, 0, 0)` is the 31st of December 2020.
///
/// Returns None if the result is outside [MIN_YEAR]..=[MAX_YEAR].
pub fn rollover_date(year: i64, month0: i64, day: i64) -> Option<NaiveDate> {
    let year = year.checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;

    let year = i32::try_from(year).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = add_days(first, day.checked_sub(1)?)?;

    in_supported_range(date).then_some(date)
}

/// Add a signed number of days.
///
/// Returns None if the result is outside [MIN_YEAR]..=[MAX_YEAR].
pub fn add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    let date = if n >= 0 {
        date.checked_add_days(Days::new(n as u64))?
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))?
    };
    in_supported_range(date).then_some(date)
}

/// Is the date within [MIN_YEAR]..=[MAX_YEAR].
pub fn in_supported_range(date: NaiveDate) -> bool {
    date.year() >= MIN_YEAR && date.year() <= MAX_YEAR
}

/// Same year and month.
pub fn same_month(d1: NaiveDate, d2: NaiveDate) -> bool {
    d1.year() == d2.year() && d1.month() == d2.month()
}
