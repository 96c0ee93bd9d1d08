//!
//! Maps input on the parts of the widget to commands.
//!
//! The table is independent of the terminal backend. The
//! crossterm event-handler translates its events into a
//! [Target] and an [Input] and asks [route] what to do.
//!
//! Key names follow the DOM `KeyboardEvent.key` values and are
//! case-sensitive. `Esc` is accepted for `Escape`, and
//! `Left`, `Right`, `Up`, `Down` for the arrow keys.
//!

use crate::date_picker::DatePickerState;
use crate::dialog::DateFocus;
use crate::event::DateOutcome;
use crate::navigation::{FocusChange, FocusController};

/// Part of the widget that receives the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Button next to the text.
    Trigger,
    /// Cell of the grid by index.
    Cell(usize),
    Confirm,
    Cancel,
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    /// Anywhere outside the trigger and the dialog.
    Document,
}

/// Backend independent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Mouse click. Secondary is the right button.
    Click { secondary: bool },
    /// Key press.
    Key { key: &'a str, shift: bool },
    /// Mouse button pressed outside the trigger and the dialog.
    PointerOutside,
}

/// Operations on the date-picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCommand {
    /// Open or close.
    Toggle,
    /// Confirm the cell if it is in the current month, then close.
    ClickCell(usize),
    MoveDay(i64),
    MoveWeek(i64),
    MoveMonth(i64),
    MoveYear(i64),
    WeekStart,
    WeekEnd,
    /// Confirm the focus day and close.
    Confirm,
    /// Close without confirming.
    Cancel,
    /// Move the focus to this part.
    FocusTo(DateFocus),
    /// Next part in tab order.
    FocusNext,
    /// Previous part in tab order.
    FocusPrev,
    /// Close without returning the focus.
    Dismiss,
    /// Recognized, but does nothing.
    Ignore,
}

fn normalize_key(key: &str) -> &str {
    match key {
        "Esc" => "Escape",
        "Left" => "ArrowLeft",
        "Right" => "ArrowRight",
        "Up" => "ArrowUp",
        "Down" => "ArrowDown",
        "Spacebar" => " ",
        k => k,
    }
}

/// Command for the input on the target.
///
/// `open` is the current state of the dialog. Everything but the
/// trigger is only reachable while the dialog is open.
///
/// Returns None if the input is of no interest.
pub fn route(target: Target, input: &Input<'_>, open: bool) -> Option<DateCommand> {
    use DateCommand as C;

    if !open && !matches!(target, Target::Trigger) {
        return None;
    }

    match (target, *input) {
        (Target::Trigger, Input::Click { secondary: false }) => Some(C::Toggle),
        (Target::Trigger, Input::Key { key, .. }) => match normalize_key(key) {
            "Enter" | " " => Some(C::Toggle),
            _ => None,
        },

        (Target::Cell(_), Input::Click { secondary: true }) => Some(C::Ignore),
        (Target::Cell(idx), Input::Click { secondary: false }) => Some(C::ClickCell(idx)),
        (Target::Cell(_), Input::Key { key, shift }) => match (normalize_key(key), shift) {
            ("ArrowRight", _) => Some(C::MoveDay(1)),
            ("ArrowLeft", _) => Some(C::MoveDay(-1)),
            ("ArrowDown", _) => Some(C::MoveWeek(1)),
            ("ArrowUp", _) => Some(C::MoveWeek(-1)),
            ("PageDown", false) => Some(C::MoveMonth(1)),
            ("PageUp", false) => Some(C::MoveMonth(-1)),
            ("PageDown", true) => Some(C::MoveYear(1)),
            ("PageUp", true) => Some(C::MoveYear(-1)),
            ("Home", _) => Some(C::WeekStart),
            ("End", _) => Some(C::WeekEnd),
            ("Enter", _) | (" ", _) => Some(C::Confirm),
            ("Escape", _) => Some(C::Cancel),
            ("Tab", false) => Some(C::FocusTo(DateFocus::Cancel)),
            ("Tab", true) => Some(C::FocusTo(DateFocus::NextYear)),
            _ => None,
        },

        (Target::Confirm, Input::Click { secondary: false }) => Some(C::Confirm),
        (Target::Cancel, Input::Click { secondary: false }) => Some(C::Cancel),
        (Target::Confirm | Target::Cancel, Input::Key { key, shift }) => {
            match (normalize_key(key), shift) {
                ("Enter", _) | (" ", _) if target == Target::Confirm => Some(C::Confirm),
                ("Enter", _) | (" ", _) => Some(C::Cancel),
                ("Escape", _) => Some(C::Cancel),
                ("Tab", false) => Some(C::FocusNext),
                ("Tab", true) => Some(C::FocusPrev),
                _ => None,
            }
        }

        (
            Target::PrevMonth | Target::NextMonth | Target::PrevYear | Target::NextYear,
            Input::Click { secondary: false },
        ) => Some(step_command(target)),
        (
            Target::PrevMonth | Target::NextMonth | Target::PrevYear | Target::NextYear,
            Input::Key { key, shift },
        ) => match (normalize_key(key), shift) {
            ("Enter", _) => Some(step_command(target)),
            ("Escape", _) => Some(C::Cancel),
            ("Tab", false) => Some(C::FocusNext),
            ("Tab", true) => Some(C::FocusPrev),
            _ => None,
        },

        (Target::Document, Input::PointerOutside) => Some(C::Dismiss),

        _ => None,
    }
}

fn step_command(target: Target) -> DateCommand {
    match target {
        Target::PrevMonth => DateCommand::MoveMonth(-1),
        Target::NextMonth => DateCommand::MoveMonth(1),
        Target::PrevYear => DateCommand::MoveYear(-1),
        Target::NextYear => DateCommand::MoveYear(1),
        _ => DateCommand::Ignore,
    }
}

impl DatePickerState {
    /// Route the input and execute the resulting command.
    pub fn dispatch(&mut self, target: Target, input: &Input<'_>) -> DateOutcome {
        match route(target, input, self.is_open()) {
            Some(cmd) => self.execute(cmd),
            None => DateOutcome::Continue,
        }
    }

    /// Executes a command.
    ///
    /// Everything but [DateCommand::Dismiss] on a closed dialog counts
    /// as consumed.
    pub fn execute(&mut self, cmd: DateCommand) -> DateOutcome {
        let r = match cmd {
            DateCommand::Toggle => self.toggle(),
            DateCommand::ClickCell(idx) => match self.grid.get(idx) {
                Some(cell) if cell.in_current_month => self.confirm(cell.date),
                _ => DateOutcome::Unchanged,
            },
            DateCommand::MoveDay(n) => self.navigate(|v| v.move_day(n)),
            DateCommand::MoveWeek(n) => self.navigate(|v| v.move_week(n)),
            DateCommand::MoveMonth(n) => self.navigate(|v| v.move_month(n)),
            DateCommand::MoveYear(n) => self.navigate(|v| v.move_year(n)),
            DateCommand::WeekStart => self.navigate(|v| v.move_to_week_start()),
            DateCommand::WeekEnd => self.navigate(|v| v.move_to_week_end()),
            DateCommand::Confirm => self.confirm_focus_day(),
            DateCommand::Cancel => self.cancel(),
            DateCommand::FocusTo(focus) => self.set_element_focus(focus),
            DateCommand::FocusNext => self.focus_next(),
            DateCommand::FocusPrev => self.focus_prev(),
            DateCommand::Dismiss => return self.dismiss(),
            DateCommand::Ignore => DateOutcome::Unchanged,
        };
        // handled means consumed, even if nothing changed.
        if r == DateOutcome::Continue {
            DateOutcome::Unchanged
        } else {
            r
        }
    }

    /// Runs a navigation on the focus day and updates the grid.
    ///
    /// A change of month rebuilds the grid, otherwise only
    /// the focusable cell moves.
    pub fn navigate(&mut self, op: impl FnOnce(&mut FocusController) -> FocusChange) -> DateOutcome {
        match op(&mut self.dates) {
            FocusChange::Unchanged => DateOutcome::Unchanged,
            FocusChange::Moved => {
                self.grid.set_focus(self.dates.focus_day);
                DateOutcome::Changed
            }
            FocusChange::MonthChanged => {
                self.rebuild_grid();
                DateOutcome::Changed
            }
        }
    }
}
