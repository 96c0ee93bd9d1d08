#![doc = include_str!("../readme.md")]
//
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::clone_on_copy)]

pub mod event {
    //!
    //! Event-handler traits and Keybindings.
    //!
    //! See [rat-event](https://docs.rs/rat-event/latest/rat_event/)
    //!
    pub use rat_event::*;

    pub use crate::date_picker::event::DateOutcome;
    pub use rat_popup::event::PopupOutcome;
}

/// Module for focus-handling functionality.
/// See [rat-focus](https://docs.rs/rat-focus)
pub mod focus {
    pub use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus, Navigation};
}

/// Popup placement.
/// See [rat-popup](https://docs.rs/rat-popup)
pub mod popup {
    pub use rat_popup::{Placement, PopupStyle};
}

/// Date-picker widget.
pub mod date_picker;
/// Open/close of the dialog and focus inside.
pub mod dialog;
/// Parsing, formatting and localized names.
pub mod format;
pub mod grid;
/// Focus day, selected day and moves between days.
pub mod navigation;
pub mod router;
pub mod status;
pub mod translate;
pub mod util;

pub use chrono::Locale;

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
