//!
//! Focus day and selected day, and the navigation between days.
//!
//! Month and year steps don't clamp the day to the end of the
//! month. They roll over instead: the 31st of January plus one
//! month is the 3rd of March (2nd of March in a leap year).
//! The 29th of February plus one year is the 1st of March.
//!

use crate::util::{add_days, rollover_date, same_month};
use chrono::{Datelike, NaiveDate};

/// What a navigation did to the focus day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FocusChange {
    /// Nothing changed.
    Unchanged,
    /// Focus moved within the displayed month.
    /// Only the focusable cell needs to change.
    Moved,
    /// Focus moved to a different month.
    /// The grid must be rebuilt.
    MonthChanged,
}

/// Owns the focus day and the selected day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FocusController {
    /// Day with the keyboard focus. Defines the displayed month.
    pub focus_day: NaiveDate,
    /// Last confirmed day.
    pub selected_day: Option<NaiveDate>,
}

impl FocusController {
    pub fn new(focus_day: NaiveDate, selected_day: Option<NaiveDate>) -> Self {
        Self {
            focus_day,
            selected_day,
        }
    }

    /// Focus day.
    pub fn focus_day(&self) -> NaiveDate {
        self.focus_day
    }

    /// Selected day.
    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selected_day
    }

    /// Sets the focus day directly.
    pub fn set_focus_day(&mut self, day: NaiveDate) -> FocusChange {
        let old = self.focus_day;
        self.focus_day = day;
        change(old, day)
    }

    /// Move n days forward/back.
    pub fn move_day(&mut self, n: i64) -> FocusChange {
        match add_days(self.focus_day, n) {
            Some(day) => self.set_focus_day(day),
            None => FocusChange::Unchanged,
        }
    }

    /// Move n weeks forward/back.
    pub fn move_week(&mut self, n: i64) -> FocusChange {
        match n.checked_mul(7) {
            Some(days) => self.move_day(days),
            None => FocusChange::Unchanged,
        }
    }

    /// Move n months forward/back. The day rolls over if the
    /// target month is shorter.
    pub fn move_month(&mut self, n: i64) -> FocusChange {
        let d = self.focus_day;
        let month0 = (d.month0() as i64).checked_add(n);
        match month0.and_then(|m| rollover_date(d.year() as i64, m, d.day() as i64)) {
            Some(day) => self.set_focus_day(day),
            None => FocusChange::Unchanged,
        }
    }

    /// Move n years forward/back. The 29th of February rolls
    /// over to the 1st of March.
    pub fn move_year(&mut self, n: i64) -> FocusChange {
        let d = self.focus_day;
        let year = (d.year() as i64).checked_add(n);
        match year.and_then(|y| rollover_date(y, d.month0() as i64, d.day() as i64)) {
            Some(day) => self.set_focus_day(day),
            None => FocusChange::Unchanged,
        }
    }

    /// Move to the Monday of the week.
    pub fn move_to_week_start(&mut self) -> FocusChange {
        let n = self.focus_day.weekday().num_days_from_monday() as i64;
        self.move_day(-n)
    }

    /// Move to the Sunday of the week.
    pub fn move_to_week_end(&mut self) -> FocusChange {
        let n = 6 - self.focus_day.weekday().num_days_from_monday() as i64;
        self.move_day(n)
    }

    /// Confirms the date as selected day.
    ///
    /// The focus day follows only if the date lies in a
    /// different month.
    pub fn confirm_selection(&mut self, date: NaiveDate) -> FocusChange {
        self.selected_day = Some(date);
        if !same_month(date, self.focus_day) {
            self.set_focus_day(date)
        } else {
            FocusChange::Unchanged
        }
    }
}

fn change(old: NaiveDate, new: NaiveDate) -> FocusChange {
    if old == new {
        FocusChange::Unchanged
    } else if same_month(old, new) {
        FocusChange::Moved
    } else {
        FocusChange::MonthChanged
    }
}
