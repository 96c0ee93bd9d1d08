use chrono::NaiveDate;
use rat_date_picker::date_picker::DatePickerState;
use rat_date_picker::dialog::DateFocus;
use rat_date_picker::event::DateOutcome;
use rat_date_picker::focus::HasFocus;
use rat_date_picker::router::{DateCommand, Input, Target};
use rat_date_picker::translate::LabelKey;
use std::time::{Duration, Instant};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn key(key: &str) -> Input<'_> {
    Input::Key { key, shift: false }
}

fn shift_key(key: &str) -> Input<'_> {
    Input::Key { key, shift: true }
}

fn cell(state: &DatePickerState) -> Target {
    Target::Cell(state.grid.focused_index().expect("focus"))
}

#[test]
fn test_open_confirm() {
    let mut state = DatePickerState::with_text("15/06/2021");
    assert!(!state.is_open());

    assert_eq!(state.open(), DateOutcome::Opened);
    assert!(state.is_open());
    assert_eq!(state.focus_day(), date(2021, 6, 15));
    assert_eq!(state.selected_day(), Some(date(2021, 6, 15)));
    assert_eq!(state.element_focus(), DateFocus::Grid);
    assert_eq!(state.open(), DateOutcome::Unchanged);

    assert_eq!(state.dispatch(cell(&state), &key("ArrowRight")), DateOutcome::Changed);
    assert_eq!(state.dispatch(cell(&state), &key("Enter")), DateOutcome::Confirmed);

    assert!(!state.is_open());
    assert_eq!(state.text(), "16/06/2021");
    assert_eq!(state.value(), Some(date(2021, 6, 16)));
    assert_eq!(state.selected_day(), Some(date(2021, 6, 16)));
    assert!(state.is_focused());
}

#[test]
fn test_space_confirms() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    state.dispatch(cell(&state), &key("ArrowDown"));
    assert_eq!(state.dispatch(cell(&state), &key(" ")), DateOutcome::Confirmed);
    assert_eq!(state.text(), "22/06/2021");
}

#[test]
fn test_empty_text() {
    let mut state = DatePickerState::new();
    state.set_today(Some(date(2021, 6, 15)));

    state.open();
    assert_eq!(state.focus_day(), date(2021, 6, 15));
    assert_eq!(state.selected_day(), None);
    assert!(state.grid.cells().iter().all(|v| !v.is_selected));
}

#[test]
fn test_invalid_text() {
    let mut state = DatePickerState::with_text("no date");
    state.set_today(Some(date(2022, 1, 10)));

    state.open();
    assert_eq!(state.focus_day(), date(2022, 1, 10));
    assert_eq!(state.selected_day(), None);

    state.cancel();
    assert_eq!(state.text(), "no date");
}

#[test]
fn test_escape() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    state.dispatch(cell(&state), &key("PageDown"));
    state.dispatch(cell(&state), &key("PageDown"));
    assert_eq!(state.focus_day(), date(2021, 8, 15));

    assert_eq!(state.dispatch(cell(&state), &key("Escape")), DateOutcome::Closed);
    assert!(!state.is_open());
    assert_eq!(state.text(), "15/06/2021");
    assert_eq!(state.focus_day(), date(2021, 6, 15));
    assert!(state.is_focused());

    // legacy key name
    state.open();
    assert_eq!(state.dispatch(cell(&state), &key("Esc")), DateOutcome::Closed);
}

#[test]
fn test_escape_on_buttons() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    state.set_element_focus(DateFocus::NextMonth);
    assert_eq!(state.dispatch(Target::NextMonth, &key("Escape")), DateOutcome::Closed);

    state.open();
    state.set_element_focus(DateFocus::Confirm);
    assert_eq!(state.dispatch(Target::Confirm, &key("Escape")), DateOutcome::Closed);
    assert_eq!(state.text(), "15/06/2021");
}

#[test]
fn test_tab_cycle() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();

    assert_eq!(state.dispatch(cell(&state), &key("Tab")), DateOutcome::Changed);
    assert_eq!(state.element_focus(), DateFocus::Cancel);
    state.dispatch(Target::Cancel, &key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::Confirm);
    state.dispatch(Target::Confirm, &key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::PrevYear);
    state.dispatch(Target::PrevYear, &key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::PrevMonth);
    state.dispatch(Target::PrevMonth, &key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::NextMonth);
    state.dispatch(Target::NextMonth, &key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::NextYear);
    state.dispatch(Target::NextYear, &key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::Grid);

    state.dispatch(cell(&state), &shift_key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::NextYear);
    state.dispatch(Target::NextYear, &shift_key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::NextMonth);

    state.set_element_focus(DateFocus::PrevYear);
    state.dispatch(Target::PrevYear, &shift_key("Tab"));
    assert_eq!(state.element_focus(), DateFocus::Confirm);
    assert!(state.is_open());
}

#[test]
fn test_header_buttons() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();

    assert_eq!(
        state.dispatch(Target::NextMonth, &Input::Click { secondary: false }),
        DateOutcome::Changed
    );
    assert_eq!(state.focus_day(), date(2021, 7, 15));
    state.dispatch(Target::PrevYear, &key("Enter"));
    assert_eq!(state.focus_day(), date(2020, 7, 15));
    state.dispatch(Target::NextYear, &Input::Click { secondary: false });
    state.dispatch(Target::PrevMonth, &Input::Click { secondary: false });
    assert_eq!(state.focus_day(), date(2021, 6, 15));
    assert!(state.is_open());

    // space does nothing on the header.
    assert_eq!(state.dispatch(Target::NextMonth, &key(" ")), DateOutcome::Continue);
}

#[test]
fn test_buttons() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    state.execute(DateCommand::MoveDay(2));
    assert_eq!(
        state.dispatch(Target::Confirm, &Input::Click { secondary: false }),
        DateOutcome::Confirmed
    );
    assert_eq!(state.text(), "17/06/2021");

    state.open();
    state.execute(DateCommand::MoveDay(2));
    assert_eq!(
        state.dispatch(Target::Cancel, &Input::Click { secondary: false }),
        DateOutcome::Closed
    );
    assert_eq!(state.text(), "17/06/2021");

    state.open();
    state.set_element_focus(DateFocus::Cancel);
    assert_eq!(state.dispatch(Target::Cancel, &key("Enter")), DateOutcome::Closed);
}

#[test]
fn test_click_cells() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();

    // 31st of May is visible but disabled.
    assert_eq!(
        state.dispatch(Target::Cell(0), &Input::Click { secondary: false }),
        DateOutcome::Unchanged
    );
    assert!(state.is_open());

    assert_eq!(
        state.dispatch(Target::Cell(3), &Input::Click { secondary: true }),
        DateOutcome::Unchanged
    );
    assert!(state.is_open());

    assert_eq!(
        state.dispatch(Target::Cell(3), &Input::Click { secondary: false }),
        DateOutcome::Confirmed
    );
    assert_eq!(state.text(), "03/06/2021");
    assert!(!state.is_open());
}

#[test]
fn test_trigger() {
    let mut state = DatePickerState::with_text("15/06/2021");
    let click = Input::Click { secondary: false };

    assert_eq!(state.dispatch(Target::Trigger, &click), DateOutcome::Opened);
    assert_eq!(state.dispatch(Target::Trigger, &click), DateOutcome::Closed);
    assert_eq!(state.dispatch(Target::Trigger, &key("Enter")), DateOutcome::Opened);
    assert_eq!(state.dispatch(Target::Trigger, &key(" ")), DateOutcome::Closed);
    assert_eq!(state.dispatch(Target::Trigger, &key("x")), DateOutcome::Continue);
    assert_eq!(
        state.dispatch(Target::Trigger, &Input::Click { secondary: true }),
        DateOutcome::Continue
    );
}

#[test]
fn test_closed_ignores() {
    let mut state = DatePickerState::with_text("15/06/2021");

    assert_eq!(state.dispatch(Target::Cell(3), &key("ArrowRight")), DateOutcome::Continue);
    assert_eq!(
        state.dispatch(Target::Confirm, &Input::Click { secondary: false }),
        DateOutcome::Continue
    );
    assert_eq!(
        state.dispatch(Target::Document, &Input::PointerOutside),
        DateOutcome::Continue
    );
    assert_eq!(state.focus_day(), date(2021, 6, 15));
}

#[test]
fn test_pointer_outside() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();

    assert_eq!(
        state.dispatch(Target::Document, &Input::PointerOutside),
        DateOutcome::Closed
    );
    assert!(!state.is_open());
    assert!(!state.is_focused());
    assert_eq!(state.text(), "15/06/2021");
}

#[test]
fn test_reopen_resets_element_focus() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    state.set_element_focus(DateFocus::Confirm);
    state.cancel();

    state.open();
    assert_eq!(state.element_focus(), DateFocus::Grid);
    assert_eq!(
        state.status.requested(),
        LabelKey::CursorKeysHint.default_label()
    );
}

#[test]
fn test_small_year_round_trip() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    state.execute(DateCommand::MoveYear(-1971));
    assert_eq!(state.focus_day(), date(50, 6, 15));

    assert_eq!(state.confirm_focus_day(), DateOutcome::Confirmed);
    assert_eq!(state.text(), "15/06/0050");
    assert_eq!(state.value(), Some(date(50, 6, 15)));

    state.open();
    assert_eq!(state.focus_day(), date(50, 6, 15));
    assert_eq!(state.selected_day(), Some(date(50, 6, 15)));
    let idx = state.grid.focused_index().expect("focus");
    assert_eq!(state.grid.get(idx).map(|v| v.date), Some(date(50, 6, 15)));
}

#[test]
fn test_confirm_other_month() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();
    assert_eq!(state.confirm(date(2021, 9, 2)), DateOutcome::Confirmed);
    assert_eq!(state.text(), "02/09/2021");
    assert_eq!(state.focus_day(), date(2021, 9, 2));
    assert_eq!(state.grid.first_date(), date(2021, 8, 30));
}

#[test]
fn test_set_text() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.set_text("01/01/2022");
    assert_eq!(state.focus_day(), date(2022, 1, 1));

    // open dialog keeps its state
    state.open();
    state.execute(DateCommand::MoveDay(3));
    state.set_text("01/05/2022");
    assert_eq!(state.focus_day(), date(2022, 1, 4));
    state.cancel();

    // and reads the text when opened again.
    state.open();
    assert_eq!(state.focus_day(), date(2022, 5, 1));

    state.cancel();
    state.set_value(None);
    assert_eq!(state.text(), "");
    state.set_value(Some(date(2023, 4, 5)));
    assert_eq!(state.text(), "05/04/2023");
}

#[test]
fn test_trigger_label() {
    let mut state = DatePickerState::with_text("15/06/2021");
    assert_eq!(state.trigger_label(), "Change date, Tuesday 15 June 2021");

    state.set_text("");
    assert_eq!(state.trigger_label(), "Pick a date");

    assert_eq!(
        DatePickerState::with_text("15/06/2021").cell_label(15),
        Some("Tuesday 15 June 2021".to_string())
    );
}

#[test]
fn test_messages() {
    let mut state = DatePickerState::with_text("15/06/2021");
    state.open();

    let hint = LabelKey::CursorKeysHint.default_label();
    assert_eq!(state.status.requested(), hint);
    assert_eq!(state.message(), "");

    let later = Instant::now() + Duration::from_millis(500);
    assert!(state.status.poll(later));
    assert_eq!(state.message(), hint);

    // leaving the grid inside the dialog clears.
    state.set_element_focus(DateFocus::Cancel);
    assert_eq!(state.status.requested(), "");

    // closing clears at once.
    state.set_element_focus(DateFocus::Grid);
    state.status.poll(later + Duration::from_millis(500));
    assert_eq!(state.message(), hint);
    state.cancel();
    assert_eq!(state.message(), "");
    assert_eq!(state.status.pending_count(), 0);
    assert_eq!(state.message_sleep_time(), None);
}
