//!
//! The 6x7 grid of days shown by the dialog.
//!
//! The grid always starts with the Monday on or before the first
//! of the month and holds 42 consecutive days. Days of the
//! neighbouring months are part of the grid but flagged as
//! not in the current month.
//!

use crate::util::same_month;
use chrono::{Datelike, Days, NaiveDate};
use std::slice::Chunks;

/// Number of weeks in the grid.
pub const WEEKS: usize = 6;
/// Number of days in the grid.
pub const CELLS: usize = WEEKS * 7;

/// One day in the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Date.
    pub date: NaiveDate,
    /// Date is in the displayed month.
    /// Other cells are disabled.
    pub in_current_month: bool,
    /// Date is the selected day.
    pub is_selected: bool,
    /// The one cell that takes part in keyboard navigation.
    pub is_focusable: bool,
}

/// Grid of 42 days for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    cells: [GridCell; CELLS],
    last_row_hidden: bool,
}

impl Default for CalendarGrid {
    fn default() -> Self {
        Self::build(NaiveDate::default(), None)
    }
}

impl CalendarGrid {
    /// Builds the grid for the month of `focus_day`.
    ///
    /// The cell for `focus_day` is the focusable one.
    pub fn build(focus_day: NaiveDate, selected_day: Option<NaiveDate>) -> Self {
        let start = Self::start_date(focus_day);

        let mut cells = [GridCell::default(); CELLS];
        let mut day = start;
        for cell in cells.iter_mut() {
            *cell = GridCell {
                date: day,
                in_current_month: same_month(day, focus_day),
                is_selected: selected_day == Some(day),
                is_focusable: day == focus_day,
            };
            day = day + Days::new(1);
        }

        let last_row_hidden = cells[CELLS - 7..].iter().all(|v| !v.in_current_month);

        Self {
            cells,
            last_row_hidden,
        }
    }

    /// First date shown for the month of `date`.
    /// Monday on or before the first of the month.
    pub fn start_date(date: NaiveDate) -> NaiveDate {
        let first = date - Days::new(date.day0() as u64);
        first - Days::new(first.weekday().num_days_from_monday() as u64)
    }

    /// First date of the grid.
    pub fn first_date(&self) -> NaiveDate {
        self.cells[0].date
    }

    /// Last date of the grid.
    pub fn last_date(&self) -> NaiveDate {
        self.cells[CELLS - 1].date
    }

    /// Date is somewhere in the grid.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_date() && date <= self.last_date()
    }

    /// All cells in order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell by index.
    pub fn get(&self, idx: usize) -> Option<&GridCell> {
        self.cells.get(idx)
    }

    /// Cell by week and weekday.
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row < WEEKS && col < 7 {
            self.cells.get(row * 7 + col)
        } else {
            None
        }
    }

    /// Iterate the weeks.
    pub fn rows(&self) -> Chunks<'_, GridCell> {
        self.cells.chunks(7)
    }

    /// The last week lies completely in the next month.
    /// It should not be visible, but it still exists.
    pub fn last_row_hidden(&self) -> bool {
        self.last_row_hidden
    }

    /// Index of the cell for the given date.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if self.contains(date) {
            Some((date - self.first_date()).num_days() as usize)
        } else {
            None
        }
    }

    /// Index of the focusable cell.
    pub fn focused_index(&self) -> Option<usize> {
        self.cells.iter().position(|v| v.is_focusable)
    }

    /// Number of focusable cells. Should always be one.
    pub fn focusable_count(&self) -> usize {
        self.cells.iter().filter(|v| v.is_focusable).count()
    }

    /// Moves the focusable flag to the given date.
    ///
    /// Returns false if the date is not part of the grid,
    /// in which case nothing changes.
    pub fn set_focus(&mut self, date: NaiveDate) -> bool {
        if !self.contains(date) {
            return false;
        }
        for cell in self.cells.iter_mut() {
            cell.is_focusable = cell.date == date;
        }
        true
    }

    /// Updates the selected flag.
    pub fn set_selected(&mut self, selected_day: Option<NaiveDate>) {
        for cell in self.cells.iter_mut() {
            cell.is_selected = selected_day == Some(cell.date);
        }
    }
}
