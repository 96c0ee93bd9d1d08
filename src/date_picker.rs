//!
//! Date-picker for a text value.
//!
//! Renders the text with a trigger button. The trigger opens
//! a dialog with a month grid. Confirming a day in the dialog
//! writes it back as `DD/MM/YYYY`.
//!
//! Render:
//! ```rust ignore
//! DatePicker::new()
//!     .styles(THEME.date_picker_style())
//!     .render(area, frame.buffer_mut(), &mut state.date);
//! ```
//!
//! The dialog is a popup placed below the text line, or above if
//! there is no room below. See [DatePicker::popup_placement].
//! Render the widget after everything it may cover.
//!
//! Event handling:
//! ```rust ignore
//! match state.date.handle(event, Regular) {
//!     DateOutcome::Confirmed => {
//!         data.date = state.date.value();
//!         Outcome::Changed
//!     }
//!     r => r.into(),
//! }
//! ```
//!
//! The status line of the dialog is delayed. Poll it from the
//! event-loop with [DatePickerState::poll_message] and use
//! [DatePickerState::message_sleep_time] as a timeout.
//!

use crate::_private::NonExhaustive;
use crate::dialog::{DateFocus, DialogState};
use crate::event::DateOutcome;
use crate::navigation::FocusController;
use crate::format::{DateFormatter, NameStyle};
use crate::grid::{CalendarGrid, CELLS, WEEKS};
use crate::router::{Input, Target};
use crate::status::StatusMessage;
use crate::translate::{LabelKey, Labels, TranslationProvider};
use crate::util::{fallback_select_style, revert_style};
use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use rat_event::util::{item_at, mouse_trap};
use rat_event::{ct_event, ConsumedEvent, HandleEvent, MouseOnly, Popup, Regular};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus, Navigation};
use rat_popup::event::PopupOutcome;
use rat_popup::{Placement, PopupCore, PopupCoreState, PopupStyle};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::Span;
#[cfg(feature = "unstable-widget-ref")]
use ratatui::widgets::StatefulWidgetRef;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::cmp::min;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Width of one grid column.
const COL_WIDTH: u16 = 4;
/// Header, weekdays, 6 weeks, status line, buttons.
const DIALOG_ROWS: u16 = 2 + WEEKS as u16 + 2;

/// Date-picker widget.
#[derive(Debug)]
pub struct DatePicker<'a> {
    style: Style,
    text_style: Option<Style>,
    trigger_style: Option<Style>,
    trigger_symbol: Option<&'a str>,
    title_style: Option<Style>,
    weekday_style: Option<Style>,
    day_style: Option<Style>,
    disabled_style: Option<Style>,
    select_style: Option<Style>,
    focus_style: Option<Style>,
    message_style: Option<Style>,
    button_style: Option<Style>,

    popup_alignment: Alignment,
    popup_placement: Placement,
    popup: PopupCore<'a>,
}

/// Composite style.
#[derive(Debug, Clone)]
pub struct DatePickerStyle {
    /// Base style.
    pub style: Style,
    /// Text value.
    pub text: Option<Style>,
    /// Trigger button.
    pub trigger: Option<Style>,
    /// Month and year.
    pub title: Option<Style>,
    /// Weekday header.
    pub weekday: Option<Style>,
    /// Days of the month.
    pub day: Option<Style>,
    /// Days outside the month.
    pub disabled: Option<Style>,
    /// Selected day.
    pub select: Option<Style>,
    /// Focused part.
    pub focus: Option<Style>,
    /// Status line.
    pub message: Option<Style>,
    /// Buttons in the dialog.
    pub button: Option<Style>,
    /// Dialog popup.
    pub popup: PopupStyle,

    pub non_exhaustive: NonExhaustive,
}

impl Default for DatePickerStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            text: None,
            trigger: None,
            title: None,
            weekday: None,
            day: None,
            disabled: None,
            select: None,
            focus: None,
            message: None,
            button: None,
            popup: Default::default(),
            non_exhaustive: NonExhaustive,
        }
    }
}

/// State & event-handling.
#[derive(Debug)]
pub struct DatePickerState {
    /// Complete area of the text line.
    /// __readonly__. renewed for each render.
    pub area: Rect,
    /// Area of the text.
    /// __readonly__. renewed for each render.
    pub text_area: Rect,
    /// Area of the trigger button.
    /// __readonly__. renewed for each render.
    pub trigger_area: Rect,
    /// Month and year title.
    /// __readonly__. renewed for each render.
    pub title_area: Rect,
    /// __readonly__. renewed for each render.
    pub prev_year_area: Rect,
    /// __readonly__. renewed for each render.
    pub prev_month_area: Rect,
    /// __readonly__. renewed for each render.
    pub next_month_area: Rect,
    /// __readonly__. renewed for each render.
    pub next_year_area: Rect,
    /// Weekday header.
    /// __readonly__. renewed for each render.
    pub weekday_areas: [Rect; 7],
    /// Grid cells. The cells of a hidden last row are empty.
    /// __readonly__. renewed for each render.
    pub cell_areas: [Rect; CELLS],
    /// Status line.
    /// __readonly__. renewed for each render.
    pub message_area: Rect,
    /// __readonly__. renewed for each render.
    pub cancel_area: Rect,
    /// __readonly__. renewed for each render.
    pub confirm_area: Rect,

    /// Text value.
    pub(crate) text: String,
    /// Focus day and selected day.
    /// __read+write__ use the navigation functions to keep the grid in sync.
    pub dates: FocusController,
    /// Grid for the month of the focus day.
    /// __readonly__
    pub grid: CalendarGrid,
    /// Dialog popup. Active while the dialog is open.
    /// Area of the dialog is `popup.area`, inside the border `popup.widget_area`.
    /// __read+write__ use open/close to change the active flag.
    pub popup: PopupCoreState,
    /// Focus inside the dialog.
    /// __readonly__
    pub dialog: DialogState,
    /// Delayed status line.
    pub status: StatusMessage,
    /// Names and text conversion.
    pub formatter: DateFormatter,
    /// Labels.
    pub labels: Labels,

    /// Focus flag.
    /// __read+write__
    pub focus: FocusFlag,

    /// Locale identifier used for the translations.
    locale: String,
    /// Fixed date for today.
    today: Option<NaiveDate>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for DatePicker<'_> {
    fn default() -> Self {
        Self {
            style: Default::default(),
            text_style: None,
            trigger_style: None,
            trigger_symbol: None,
            title_style: None,
            weekday_style: None,
            day_style: None,
            disabled_style: None,
            select_style: None,
            focus_style: None,
            message_style: None,
            button_style: None,
            popup_alignment: Alignment::Left,
            popup_placement: Placement::BelowOrAbove,
            popup: Default::default(),
        }
    }
}

impl<'a> DatePicker<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all styles.
    #[inline]
    pub fn styles_opt(self, styles: Option<DatePickerStyle>) -> Self {
        if let Some(styles) = styles {
            self.styles(styles)
        } else {
            self
        }
    }

    /// Set all styles.
    #[inline]
    pub fn styles(mut self, styles: DatePickerStyle) -> Self {
        self.style = styles.style;
        if styles.text.is_some() {
            self.text_style = styles.text;
        }
        if styles.trigger.is_some() {
            self.trigger_style = styles.trigger;
        }
        if styles.title.is_some() {
            self.title_style = styles.title;
        }
        if styles.weekday.is_some() {
            self.weekday_style = styles.weekday;
        }
        if styles.day.is_some() {
            self.day_style = styles.day;
        }
        if styles.disabled.is_some() {
            self.disabled_style = styles.disabled;
        }
        if styles.select.is_some() {
            self.select_style = styles.select;
        }
        if styles.focus.is_some() {
            self.focus_style = styles.focus;
        }
        if styles.message.is_some() {
            self.message_style = styles.message;
        }
        if styles.button.is_some() {
            self.button_style = styles.button;
        }
        if let Some(alignment) = styles.popup.alignment {
            self.popup_alignment = alignment;
        }
        if let Some(placement) = styles.popup.placement {
            self.popup_placement = placement;
        }
        self.popup = self.popup.styles(styles.popup);
        self
    }

    /// Base style.
    #[inline]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    /// Style for the text value.
    #[inline]
    pub fn text_style(mut self, style: impl Into<Style>) -> Self {
        self.text_style = Some(style.into());
        self
    }

    /// Style for the trigger button.
    #[inline]
    pub fn trigger_style(mut self, style: impl Into<Style>) -> Self {
        self.trigger_style = Some(style.into());
        self
    }

    /// Symbol for the trigger button. Default is ` ▼ `.
    #[inline]
    pub fn trigger_symbol(mut self, symbol: &'a str) -> Self {
        self.trigger_symbol = Some(symbol);
        self
    }

    /// Style for month and year.
    #[inline]
    pub fn title_style(mut self, style: impl Into<Style>) -> Self {
        self.title_style = Some(style.into());
        self
    }

    /// Style for the weekday header.
    #[inline]
    pub fn weekday_style(mut self, style: impl Into<Style>) -> Self {
        self.weekday_style = Some(style.into());
        self
    }

    /// Style for days of the displayed month.
    #[inline]
    pub fn day_style(mut self, style: impl Into<Style>) -> Self {
        self.day_style = Some(style.into());
        self
    }

    /// Style for days outside the displayed month.
    #[inline]
    pub fn disabled_style(mut self, style: impl Into<Style>) -> Self {
        self.disabled_style = Some(style.into());
        self
    }

    /// Style for the selected day.
    #[inline]
    pub fn select_style(mut self, style: impl Into<Style>) -> Self {
        self.select_style = Some(style.into());
        self
    }

    /// Style for the focused part.
    #[inline]
    pub fn focus_style(mut self, style: impl Into<Style>) -> Self {
        self.focus_style = Some(style.into());
        self
    }

    /// Style for the status line.
    #[inline]
    pub fn message_style(mut self, style: impl Into<Style>) -> Self {
        self.message_style = Some(style.into());
        self
    }

    /// Style for confirm/cancel.
    #[inline]
    pub fn button_style(mut self, style: impl Into<Style>) -> Self {
        self.button_style = Some(style.into());
        self
    }

    /// Placement of the dialog relative to the text line.
    ///
    /// __Default__
    /// Default is BelowOrAbove.
    pub fn popup_placement(mut self, placement: Placement) -> Self {
        self.popup_placement = placement;
        self
    }

    /// Alignment of the dialog.
    ///
    /// __Default__
    /// Default is Left.
    pub fn popup_alignment(mut self, alignment: Alignment) -> Self {
        self.popup_alignment = alignment;
        self
    }

    /// Outer boundary for the dialog.
    pub fn popup_boundary(mut self, boundary: Rect) -> Self {
        self.popup = self.popup.boundary(boundary);
        self
    }

    /// Base style for the dialog.
    pub fn popup_style(mut self, style: Style) -> Self {
        self.popup = self.popup.style(style);
        self
    }

    /// Dialog border.
    pub fn popup_block(mut self, block: Block<'a>) -> Self {
        self.popup = self.popup.block(block);
        self
    }

    /// Adds an extra offset to the dialog area.
    pub fn popup_offset(mut self, offset: (i16, i16)) -> Self {
        self.popup = self.popup.offset(offset);
        self
    }

    /// Inherent width of the dialog.
    pub fn dialog_width(&self) -> u16 {
        7 * COL_WIDTH + self.popup.get_block_size().width
    }

    /// Inherent height of the dialog.
    pub fn dialog_height(&self) -> u16 {
        DIALOG_ROWS + self.popup.get_block_size().height
    }

    fn trigger(&self) -> &'a str {
        self.trigger_symbol.unwrap_or(" ▼ ")
    }
}

#[cfg(feature = "unstable-widget-ref")]
impl<'a> StatefulWidgetRef for DatePicker<'a> {
    type State = DatePickerState;

    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl<'a> StatefulWidget for &DatePicker<'a> {
    type State = DatePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for DatePicker<'_> {
    type State = DatePickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &DatePicker<'_>, area: Rect, buf: &mut Buffer, state: &mut DatePickerState) {
    state.area = area;
    state.clear_dialog_areas();

    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));
    let text_style = widget.text_style.unwrap_or(widget.style);
    let trigger_style = widget.trigger_style.unwrap_or(widget.style);

    // text line
    let trigger = widget.trigger();
    let trigger_width = min(Span::from(trigger).width() as u16, area.width);
    state.text_area = Rect::new(area.x, area.y, area.width - trigger_width, min(1, area.height));
    state.trigger_area = Rect::new(
        area.x + state.text_area.width,
        area.y,
        trigger_width,
        min(1, area.height),
    );

    buf.set_style(area.intersection(buf.area), widget.style);
    Span::from(state.text.as_str())
        .style(text_style)
        .render(state.text_area.intersection(buf.area), buf);
    Span::from(trigger)
        .style(if state.is_focused() && !state.is_open() {
            focus_style
        } else {
            trigger_style
        })
        .render(state.trigger_area.intersection(buf.area), buf);

    if state.popup.is_active() {
        render_dialog(widget, buf, state);
    } else {
        state.popup.clear_areas();
    }
}

fn render_dialog(widget: &DatePicker<'_>, buf: &mut Buffer, state: &mut DatePickerState) {
    let focus_style = widget.focus_style.unwrap_or(revert_style(widget.style));
    let title_style = widget.title_style.unwrap_or(widget.style);
    let weekday_style = widget.weekday_style.unwrap_or(widget.style);
    let day_style = widget.day_style.unwrap_or(widget.style);
    let disabled_style = widget.disabled_style.unwrap_or(widget.style.dim());
    let select_style = widget
        .select_style
        .unwrap_or(fallback_select_style(widget.style));
    let message_style = widget.message_style.unwrap_or(widget.style);
    let button_style = widget.button_style.unwrap_or(widget.style);
    let focus = state.dialog.focus;
    let style_for = |part: DateFocus, style: Style| {
        if focus == part {
            focus_style
        } else {
            style
        }
    };

    let line_area = Rect::new(
        state.area.x,
        state.area.y,
        state.area.width,
        min(1, state.area.height),
    );
    let pop_area = Rect::new(0, 0, widget.dialog_width(), widget.dialog_height());
    widget
        .popup
        .ref_constraint(
            widget
                .popup_placement
                .into_constraint(widget.popup_alignment, line_area),
        )
        .render(pop_area, buf, &mut state.popup);

    let inner = state.popup.widget_area;
    let clip = |r: Rect| r.intersection(inner);

    // header
    let y = inner.y;
    state.prev_year_area = clip(Rect::new(inner.x, y, 2, 1));
    state.prev_month_area = clip(Rect::new(inner.x + 3, y, 1, 1));
    state.next_month_area = clip(Rect::new(inner.right().saturating_sub(4), y, 1, 1));
    state.next_year_area = clip(Rect::new(inner.right().saturating_sub(2), y, 2, 1));
    state.title_area = clip(Rect::new(
        inner.x + 5,
        y,
        inner.width.saturating_sub(10),
        1,
    ));

    Span::from("<<")
        .style(style_for(DateFocus::PrevYear, button_style))
        .render(state.prev_year_area, buf);
    Span::from("<")
        .style(style_for(DateFocus::PrevMonth, button_style))
        .render(state.prev_month_area, buf);
    Span::from(">")
        .style(style_for(DateFocus::NextMonth, button_style))
        .render(state.next_month_area, buf);
    Span::from(">>")
        .style(style_for(DateFocus::NextYear, button_style))
        .render(state.next_year_area, buf);

    let title = state.formatter.month_year_title(state.dates.focus_day);
    let title_width = Span::from(title.as_str()).width() as u16;
    let title_x = state.title_area.x + state.title_area.width.saturating_sub(title_width) / 2;
    Span::from(title)
        .style(title_style)
        .render(clip(Rect::new(title_x, y, title_width, 1)), buf);

    // weekdays
    let y = inner.y + 1;
    let names = state.formatter.weekday_names(NameStyle::Short);
    for (i, name) in names.iter().enumerate() {
        let area = clip(Rect::new(inner.x + i as u16 * COL_WIDTH, y, COL_WIDTH, 1));
        state.weekday_areas[i] = area;
        let name = name.chars().take(2).collect::<String>();
        Span::from(format!("{:>3} ", name))
            .style(weekday_style)
            .render(area, buf);
    }

    // days
    let hide_last = state.grid.last_row_hidden();
    for (row, week) in state.grid.rows().enumerate() {
        if hide_last && row == WEEKS - 1 {
            break;
        }
        let y = inner.y + 2 + row as u16;
        for (col, cell) in week.iter().enumerate() {
            let idx = row * 7 + col;
            let area = clip(Rect::new(inner.x + col as u16 * COL_WIDTH, y, COL_WIDTH, 1));
            state.cell_areas[idx] = area;

            let style = if !cell.in_current_month {
                disabled_style
            } else if cell.is_focusable && focus == DateFocus::Grid {
                focus_style
            } else if cell.is_selected {
                day_style.patch(select_style)
            } else {
                day_style
            };
            Span::from(format!("{:>3} ", cell.date.day()))
                .style(style)
                .render(area, buf);
        }
    }

    // status
    state.message_area = clip(Rect::new(inner.x, inner.y + 2 + WEEKS as u16, inner.width, 1));
    Span::from(state.status.message())
        .style(message_style)
        .render(state.message_area, buf);

    // buttons
    let y = inner.y + 3 + WEEKS as u16;
    let confirm = format!("[{}]", state.labels.get(LabelKey::Confirm));
    let cancel = format!("[{}]", state.labels.get(LabelKey::Cancel));
    let confirm_width = Span::from(confirm.as_str()).width() as u16;
    let cancel_width = Span::from(cancel.as_str()).width() as u16;
    let confirm_x = inner.right().saturating_sub(confirm_width);
    let cancel_x = confirm_x.saturating_sub(cancel_width + 1);
    state.confirm_area = clip(Rect::new(confirm_x, y, confirm_width, 1));
    state.cancel_area = clip(Rect::new(cancel_x, y, cancel_width, 1));
    Span::from(cancel)
        .style(style_for(DateFocus::Cancel, button_style))
        .render(state.cancel_area, buf);
    Span::from(confirm)
        .style(style_for(DateFocus::Confirm, button_style))
        .render(state.confirm_area, buf);
}

impl Default for DatePickerState {
    fn default() -> Self {
        let mut z = Self {
            area: Default::default(),
            text_area: Default::default(),
            trigger_area: Default::default(),
            title_area: Default::default(),
            prev_year_area: Default::default(),
            prev_month_area: Default::default(),
            next_month_area: Default::default(),
            next_year_area: Default::default(),
            weekday_areas: Default::default(),
            cell_areas: [Rect::default(); CELLS],
            message_area: Default::default(),
            cancel_area: Default::default(),
            confirm_area: Default::default(),
            text: Default::default(),
            dates: Default::default(),
            grid: Default::default(),
            popup: Default::default(),
            dialog: Default::default(),
            status: Default::default(),
            formatter: Default::default(),
            labels: Default::default(),
            focus: Default::default(),
            locale: Default::default(),
            today: None,
            non_exhaustive: NonExhaustive,
        };
        z.sync_from_text();
        z
    }
}

impl Clone for DatePickerState {
    fn clone(&self) -> Self {
        Self {
            area: self.area,
            text_area: self.text_area,
            trigger_area: self.trigger_area,
            title_area: self.title_area,
            prev_year_area: self.prev_year_area,
            prev_month_area: self.prev_month_area,
            next_month_area: self.next_month_area,
            next_year_area: self.next_year_area,
            weekday_areas: self.weekday_areas,
            cell_areas: self.cell_areas,
            message_area: self.message_area,
            cancel_area: self.cancel_area,
            confirm_area: self.confirm_area,
            text: self.text.clone(),
            dates: self.dates.clone(),
            grid: self.grid.clone(),
            popup: self.popup.clone(),
            dialog: self.dialog,
            status: self.status.clone(),
            formatter: self.formatter.clone(),
            labels: self.labels.clone(),
            focus: FocusFlag::named(self.focus.name()),
            locale: self.locale.clone(),
            today: self.today,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for DatePickerState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.widget_with_flags(self.focus(), self.area(), 0, self.navigable());
        builder.widget_with_flags(self.focus(), self.popup.area, 1, Navigation::Mouse);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl DatePickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            focus: FocusFlag::named(name),
            ..Default::default()
        }
    }

    /// New state with the given text value.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut z = Self::default();
        z.set_text(text);
        z
    }

    /// New state with a locale and translated labels.
    ///
    /// The locale is used both for the names of days and months
    /// and as the key for the translation provider.
    pub fn with_translations(locale: &str, provider: &dyn TranslationProvider) -> Self {
        let mut z = Self::default();
        z.set_locale(locale);
        z.set_translations(provider);
        z
    }

    /// Sets the locale for day and month names.
    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
        self.formatter = DateFormatter::from_identifier(locale);
    }

    /// Locale identifier.
    pub fn locale(&self) -> &str {
        self.locale.as_str()
    }

    /// Loads the labels for the current locale.
    /// Labels the provider doesn't know keep their defaults.
    pub fn set_translations(&mut self, provider: &dyn TranslationProvider) {
        self.labels = Labels::load(provider, &self.locale);
    }

    /// Apply translations that arrive late.
    ///
    /// Returns the number of labels changed.
    pub fn apply_translation(&mut self, map: &HashMap<String, String>) -> usize {
        self.labels.merge(map)
    }

    /// Delay for the status line.
    pub fn set_message_delay(&mut self, delay: Duration) {
        self.status.set_delay(delay);
    }

    /// Use a fixed date as today. None uses the local clock.
    pub fn set_today(&mut self, today: Option<NaiveDate>) {
        self.today = today;
        if !self.is_open() {
            self.sync_from_text();
        }
    }

    /// Today.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Text value.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Set the text value.
    ///
    /// While the dialog is closed the focus day and selected day
    /// follow the text. An open dialog reads the text when it
    /// is opened the next time.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if !self.is_open() {
            self.sync_from_text();
        }
    }

    /// Parsed text value.
    pub fn value(&self) -> Option<NaiveDate> {
        self.formatter.parse(&self.text).ok()
    }

    /// Set the value as text.
    pub fn set_value(&mut self, date: Option<NaiveDate>) {
        match date {
            Some(date) => self.set_text(self.formatter.format(date)),
            None => self.set_text(""),
        }
    }

    /// Focus day.
    pub fn focus_day(&self) -> NaiveDate {
        self.dates.focus_day
    }

    /// Selected day.
    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.dates.selected_day
    }

    /// Label for the trigger button.
    ///
    /// Names the current date if there is one.
    pub fn trigger_label(&self) -> String {
        match self.formatter.parse(&self.text) {
            Ok(date) => format!(
                "{}, {}",
                self.labels.get(LabelKey::ChangeDateLabel),
                self.formatter.describe_for_label(date)
            ),
            Err(_) => self.labels.get(LabelKey::PickADate).to_string(),
        }
    }

    /// Label for a grid cell.
    pub fn cell_label(&self, idx: usize) -> Option<String> {
        self.grid
            .get(idx)
            .map(|v| self.formatter.describe_for_label(v.date))
    }

    /// Visible status message.
    pub fn message(&self) -> &str {
        self.status.message()
    }

    /// Shows any status message that is due.
    /// Returns true if the message changed and a repaint is needed.
    pub fn poll_message(&mut self) -> bool {
        self.status.poll(Instant::now())
    }

    /// Time until the next status message is due.
    pub fn message_sleep_time(&self) -> Option<Duration> {
        self.status.sleep_time(Instant::now())
    }

    /// Rebuilds the grid for the focus day.
    pub fn rebuild_grid(&mut self) {
        self.grid = CalendarGrid::build(self.dates.focus_day, self.dates.selected_day);
    }

    pub(crate) fn clear_dialog_areas(&mut self) {
        self.title_area = Rect::default();
        self.prev_year_area = Rect::default();
        self.prev_month_area = Rect::default();
        self.next_month_area = Rect::default();
        self.next_year_area = Rect::default();
        self.weekday_areas = Default::default();
        self.cell_areas = [Rect::default(); CELLS];
        self.message_area = Rect::default();
        self.cancel_area = Rect::default();
        self.confirm_area = Rect::default();
    }

    /// Part of the widget at the screen position.
    pub fn target_at(&self, x: u16, y: u16) -> Option<Target> {
        let pos = (x, y).into();
        if self.trigger_area.contains(pos) {
            return Some(Target::Trigger);
        }
        if !self.is_open() {
            return None;
        }
        if let Some(idx) = item_at(&self.cell_areas, x, y) {
            Some(Target::Cell(idx))
        } else if self.prev_year_area.contains(pos) {
            Some(Target::PrevYear)
        } else if self.prev_month_area.contains(pos) {
            Some(Target::PrevMonth)
        } else if self.next_month_area.contains(pos) {
            Some(Target::NextMonth)
        } else if self.next_year_area.contains(pos) {
            Some(Target::NextYear)
        } else if self.cancel_area.contains(pos) {
            Some(Target::Cancel)
        } else if self.confirm_area.contains(pos) {
            Some(Target::Confirm)
        } else {
            None
        }
    }

    /// Target for keyboard input.
    ///
    /// The trigger gets the keys while the widget has the focus
    /// and the dialog is closed. The open dialog gets all keys.
    fn focus_target(&self) -> Option<Target> {
        if !self.is_open() {
            return if self.is_focused() {
                Some(Target::Trigger)
            } else {
                None
            };
        }
        match self.dialog.focus {
            DateFocus::PrevYear => Some(Target::PrevYear),
            DateFocus::PrevMonth => Some(Target::PrevMonth),
            DateFocus::NextMonth => Some(Target::NextMonth),
            DateFocus::NextYear => Some(Target::NextYear),
            DateFocus::Grid => self.grid.focused_index().map(Target::Cell),
            DateFocus::Cancel => Some(Target::Cancel),
            DateFocus::Confirm => Some(Target::Confirm),
        }
    }
}

/// Key names as the router knows them.
fn key_name(code: crossterm::event::KeyCode) -> Option<&'static str> {
    use crossterm::event::KeyCode;
    Some(match code {
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Char(' ') => " ",
        _ => return None,
    })
}

pub(crate) mod event {
    use rat_event::{ConsumedEvent, Outcome};
    use rat_popup::event::PopupOutcome;

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum DateOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it.
        /// Further processing for this event may stop.
        /// Rendering the ui is advised.
        Changed,
        /// The dialog has been opened.
        Opened,
        /// The dialog has been closed without a new value.
        Closed,
        /// A date has been confirmed and written to the text.
        Confirmed,
    }

    impl ConsumedEvent for DateOutcome {
        fn is_consumed(&self) -> bool {
            *self != DateOutcome::Continue
        }
    }

    impl From<Outcome> for DateOutcome {
        fn from(value: Outcome) -> Self {
            match value {
                Outcome::Continue => DateOutcome::Continue,
                Outcome::Unchanged => DateOutcome::Unchanged,
                Outcome::Changed => DateOutcome::Changed,
            }
        }
    }

    impl From<PopupOutcome> for DateOutcome {
        fn from(value: PopupOutcome) -> Self {
            match value {
                PopupOutcome::Continue => DateOutcome::Continue,
                PopupOutcome::Unchanged => DateOutcome::Unchanged,
                PopupOutcome::Changed => DateOutcome::Changed,
                PopupOutcome::Hide => DateOutcome::Changed,
            }
        }
    }

    impl From<DateOutcome> for Outcome {
        fn from(value: DateOutcome) -> Self {
            match value {
                DateOutcome::Continue => Outcome::Continue,
                DateOutcome::Unchanged => Outcome::Unchanged,
                DateOutcome::Changed => Outcome::Changed,
                DateOutcome::Opened => Outcome::Changed,
                DateOutcome::Closed => Outcome::Changed,
                DateOutcome::Confirmed => Outcome::Changed,
            }
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, DateOutcome> for DatePickerState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: Regular) -> DateOutcome {
        use crossterm::event::{Event, KeyEvent, KeyEventKind, KeyModifiers};

        if self.lost_focus() {
            self.dismiss();
            // focus change triggers the repaint.
        }

        let r = match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => match (self.focus_target(), key_name(*code)) {
                (Some(target), Some(key)) => {
                    let shift = modifiers.contains(KeyModifiers::SHIFT)
                        || *code == crossterm::event::KeyCode::BackTab;
                    self.dispatch(target, &Input::Key { key, shift })
                }
                _ => DateOutcome::Continue,
            },
            _ => DateOutcome::Continue,
        };

        // modal: the open dialog swallows all other keys.
        let r = if r == DateOutcome::Continue
            && self.is_open()
            && matches!(event, Event::Key(_))
        {
            DateOutcome::Unchanged
        } else {
            r
        };

        r.or_else(|| self.handle(event, MouseOnly))
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, DateOutcome> for DatePickerState {
    fn handle(&mut self, event: &crossterm::event::Event, _qualifier: MouseOnly) -> DateOutcome {
        let mut r = match event {
            ct_event!(mouse down Left for x, y) if self.target_at(*x, *y).is_some() => {
                self.click(*x, *y, false)
            }
            ct_event!(mouse down Right for x, y) if self.target_at(*x, *y).is_some() => {
                self.click(*x, *y, true)
            }
            ct_event!(mouse down Left for x, y)
            | ct_event!(mouse down Right for x, y)
            | ct_event!(mouse down Middle for x, y)
                if !self.trigger_area.contains((*x, *y).into()) =>
            {
                match self.popup.handle(event, Popup) {
                    PopupOutcome::Hide => self.dispatch(Target::Document, &Input::PointerOutside),
                    r => r.into(),
                }
            }
            _ => DateOutcome::Continue,
        };

        r = r.or_else(|| mouse_trap(event, self.popup.area).into());

        self.popup.active.set_lost(false);
        self.popup.active.set_gained(false);
        r
    }
}

impl DatePickerState {
    /// Click on a part of the widget.
    ///
    /// A primary click on a header button moves the focus there first.
    fn click(&mut self, x: u16, y: u16, secondary: bool) -> DateOutcome {
        let Some(target) = self.target_at(x, y) else {
            return DateOutcome::Continue;
        };
        if !secondary {
            let part = match target {
                Target::PrevYear => Some(DateFocus::PrevYear),
                Target::PrevMonth => Some(DateFocus::PrevMonth),
                Target::NextMonth => Some(DateFocus::NextMonth),
                Target::NextYear => Some(DateFocus::NextYear),
                _ => None,
            };
            if let Some(part) = part {
                self.set_element_focus(part);
            }
        }
        let r = self.dispatch(target, &Input::Click { secondary });
        debug!("click {:?} -> {:?}", target, r);
        r
    }
}

/// Handle all events.
/// Key events are processed if the widget has the focus.
/// Mouse events are processed if they are in range.
pub fn handle_events(
    state: &mut DatePickerState,
    event: &crossterm::event::Event,
) -> DateOutcome {
    HandleEvent::handle(state, event, Regular)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(
    state: &mut DatePickerState,
    event: &crossterm::event::Event,
) -> DateOutcome {
    HandleEvent::handle(state, event, MouseOnly)
}
