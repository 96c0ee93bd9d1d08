//!
//! Open/close of the dialog and the focus between its parts.
//!
//! The dialog is either open or closed. Opening reads the
//! text value, closing either writes the chosen date back
//! (confirm) or discards the navigation (cancel).
//!
//! Inside the open dialog the focus cycles between the header
//! buttons, the grid and the confirm/cancel buttons and never
//! leaves the dialog by keyboard. Focus of the widget itself
//! is handled by rat-focus.
//!

use crate::date_picker::DatePickerState;
use crate::event::DateOutcome;
use crate::navigation::FocusChange;
use crate::translate::LabelKey;
use chrono::NaiveDate;
use log::debug;
use std::time::Instant;

/// Which part of the open dialog has the input focus.
///
/// Focus of the widget as a whole is the [FocusFlag](rat_focus::FocusFlag)
/// of the state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFocus {
    PrevYear,
    PrevMonth,
    NextMonth,
    NextYear,
    /// The focusable cell of the grid.
    #[default]
    Grid,
    Cancel,
    Confirm,
}

impl DateFocus {
    /// Tab order inside the dialog.
    pub const CYCLE: [DateFocus; 7] = [
        DateFocus::PrevYear,
        DateFocus::PrevMonth,
        DateFocus::NextMonth,
        DateFocus::NextYear,
        DateFocus::Grid,
        DateFocus::Cancel,
        DateFocus::Confirm,
    ];

    /// Next in tab order. Wraps around.
    pub fn next(&self) -> DateFocus {
        match Self::CYCLE.iter().position(|v| v == self) {
            Some(idx) => Self::CYCLE[(idx + 1) % Self::CYCLE.len()],
            None => *self,
        }
    }

    /// Previous in tab order. Wraps around.
    pub fn prev(&self) -> DateFocus {
        match Self::CYCLE.iter().position(|v| v == self) {
            Some(idx) => Self::CYCLE[(idx + Self::CYCLE.len() - 1) % Self::CYCLE.len()],
            None => *self,
        }
    }
}

/// Focus inside the dialog.
///
/// Open/closed is the active flag of the popup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DialogState {
    /// Focused part.
    pub focus: DateFocus,
    /// Focus day when the dialog was opened.
    pub(crate) snapshot: Option<NaiveDate>,
}

impl DatePickerState {
    /// Dialog is open.
    pub fn is_open(&self) -> bool {
        self.popup.is_active()
    }

    /// Focused part of the dialog.
    pub fn element_focus(&self) -> DateFocus {
        self.dialog.focus
    }

    /// Open the dialog.
    ///
    /// Reads the text value, builds the grid and moves
    /// the focus to the focus day.
    pub fn open(&mut self) -> DateOutcome {
        if self.is_open() {
            return DateOutcome::Unchanged;
        }
        self.sync_from_text();
        self.popup.set_active(true);
        self.dialog.snapshot = Some(self.dates.focus_day);
        self.dialog.focus = DateFocus::Grid;
        self.announce_keys();
        debug!("open date-picker at {}", self.dates.focus_day);
        DateOutcome::Opened
    }

    /// Close the dialog.
    ///
    /// Clears the status message. If `return_focus` is set,
    /// the widget keeps the focus and the trigger button gets
    /// the key input again.
    pub fn close(&mut self, return_focus: bool) -> DateOutcome {
        if !self.is_open() {
            return DateOutcome::Unchanged;
        }
        self.popup.set_active(false);
        self.dialog.snapshot = None;
        self.status.clear();
        if return_focus {
            self.focus.set(true);
        }
        debug!("close date-picker, return focus {}", return_focus);
        DateOutcome::Closed
    }

    /// Open if closed, close if open. Closing doesn't confirm anything.
    pub fn toggle(&mut self) -> DateOutcome {
        if self.is_open() {
            self.cancel()
        } else {
            self.open()
        }
    }

    /// Select the date, write it to the text and close.
    pub fn confirm(&mut self, date: NaiveDate) -> DateOutcome {
        let change = self.dates.confirm_selection(date);
        if change == FocusChange::MonthChanged {
            self.rebuild_grid();
        } else {
            self.grid.set_selected(self.dates.selected_day);
        }
        self.text = self.formatter.format(date);
        debug!("confirm date {}", self.text);
        self.close(true);
        DateOutcome::Confirmed
    }

    /// Confirm the focus day.
    pub fn confirm_focus_day(&mut self) -> DateOutcome {
        self.confirm(self.dates.focus_day)
    }

    /// Close without confirming. Any navigation since opening
    /// is discarded.
    pub fn cancel(&mut self) -> DateOutcome {
        if !self.is_open() {
            return DateOutcome::Unchanged;
        }
        if let Some(day) = self.dialog.snapshot {
            if self.dates.set_focus_day(day) != FocusChange::Unchanged {
                self.rebuild_grid();
            }
        }
        self.close(true)
    }

    /// Close after some interaction outside the widget.
    /// The focus stays where the host puts it.
    pub fn dismiss(&mut self) -> DateOutcome {
        if self.is_open() {
            self.close(false)
        } else {
            DateOutcome::Continue
        }
    }

    /// Move the focus to a part of the dialog.
    ///
    /// Focusing the grid announces the key help, leaving
    /// the grid clears it.
    pub fn set_element_focus(&mut self, focus: DateFocus) -> DateOutcome {
        let old = self.dialog.focus;
        if old == focus {
            return DateOutcome::Unchanged;
        }
        self.dialog.focus = focus;

        if focus == DateFocus::Grid {
            self.announce_keys();
        } else if old == DateFocus::Grid {
            self.status.set_message("", Instant::now());
        }
        DateOutcome::Changed
    }

    fn announce_keys(&mut self) {
        let hint = self.labels.get(LabelKey::CursorKeysHint).to_string();
        self.status.set_message(&hint, Instant::now());
    }

    /// Next part of the dialog.
    pub fn focus_next(&mut self) -> DateOutcome {
        self.set_element_focus(self.dialog.focus.next())
    }

    /// Previous part of the dialog.
    pub fn focus_prev(&mut self) -> DateOutcome {
        self.set_element_focus(self.dialog.focus.prev())
    }

    /// Sets focus day and selected day from the text value.
    ///
    /// If the text is no valid date, the focus goes to today
    /// and nothing is selected.
    pub fn sync_from_text(&mut self) {
        match self.formatter.parse(&self.text) {
            Ok(date) => {
                self.dates.focus_day = date;
                self.dates.selected_day = Some(date);
            }
            Err(e) => {
                debug!("no date in {:?}: {}", self.text, e);
                self.dates.focus_day = self.today();
                self.dates.selected_day = None;
            }
        }
        self.rebuild_grid();
    }
}
