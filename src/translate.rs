//!
//! Labels for the dialog.
//!
//! The labels come from a [TranslationProvider] which maps label
//! keys to localized text. Whatever the provider doesn't deliver
//! stays at the built-in default.
//!
//! Loading and caching of the translations is the provider's business.
//!

use log::{debug, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Keys for all the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    /// Trigger label if there is no valid date.
    PickADate,
    /// Trigger label prefix if there is a valid date.
    ChangeDateLabel,
    /// Status message when the grid has the focus.
    CursorKeysHint,
    PrevYear,
    PrevMonth,
    NextYear,
    NextMonth,
    Confirm,
    Cancel,
}

impl LabelKey {
    pub const ALL: [LabelKey; 9] = [
        LabelKey::PickADate,
        LabelKey::ChangeDateLabel,
        LabelKey::CursorKeysHint,
        LabelKey::PrevYear,
        LabelKey::PrevMonth,
        LabelKey::NextYear,
        LabelKey::NextMonth,
        LabelKey::Confirm,
        LabelKey::Cancel,
    ];

    /// Key used in translation tables.
    pub fn key(&self) -> &'static str {
        match self {
            LabelKey::PickADate => "pickADate",
            LabelKey::ChangeDateLabel => "changeDateLabel",
            LabelKey::CursorKeysHint => "cursorKeysHint",
            LabelKey::PrevYear => "prevYear",
            LabelKey::PrevMonth => "prevMonth",
            LabelKey::NextYear => "nextYear",
            LabelKey::NextMonth => "nextMonth",
            LabelKey::Confirm => "confirm",
            LabelKey::Cancel => "cancel",
        }
    }

    /// Older key names still found in translation files.
    pub fn legacy_key(&self) -> &'static str {
        match self {
            LabelKey::PickADate => "pickaDateLabel",
            LabelKey::ChangeDateLabel => "buttonLabelChange",
            LabelKey::CursorKeysHint => "messageCursorKeys",
            LabelKey::PrevYear => "prevYearLabel",
            LabelKey::PrevMonth => "prevMonthLabel",
            LabelKey::NextYear => "nextYearLabel",
            LabelKey::NextMonth => "nextMonthLabel",
            LabelKey::Confirm => "okButtonLabel",
            LabelKey::Cancel => "cancelButtonLabel",
        }
    }

    /// Built-in label.
    pub fn default_label(&self) -> &'static str {
        match self {
            LabelKey::PickADate => "Pick a date",
            LabelKey::ChangeDateLabel => "Change date",
            LabelKey::CursorKeysHint => "You can navigate with the arrow keys",
            LabelKey::PrevYear => "Previous year",
            LabelKey::PrevMonth => "Previous month",
            LabelKey::NextYear => "Next year",
            LabelKey::NextMonth => "Next month",
            LabelKey::Confirm => "Confirm",
            LabelKey::Cancel => "Cancel",
        }
    }

    /// Find the key for a key-name. Knows the legacy names too.
    pub fn from_key(key: &str) -> Option<LabelKey> {
        Self::ALL
            .iter()
            .find(|v| v.key() == key || v.legacy_key() == key)
            .copied()
    }

    fn idx(&self) -> usize {
        *self as usize
    }
}

/// Translations are not available.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TranslationError {
    /// No translation for this locale.
    UnknownLocale(String),
    /// Provider failed.
    Unavailable(String),
}

impl Display for TranslationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for TranslationError {}

/// Source of translated labels.
pub trait TranslationProvider: Debug {
    /// Map of label keys to text for the locale.
    ///
    /// The provider may answer with only some or none of the keys.
    /// An asynchronous provider can answer with what it has now
    /// and deliver the rest later via
    /// [DatePickerState::apply_translation](crate::date_picker::DatePickerState::apply_translation).
    fn labels(&self, locale: &str) -> Result<HashMap<String, String>, TranslationError>;
}

/// Provider that knows nothing. Everything stays at the defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslations;

impl TranslationProvider for NoTranslations {
    fn labels(&self, _locale: &str) -> Result<HashMap<String, String>, TranslationError> {
        Ok(HashMap::new())
    }
}

/// Provider with fixed tables per locale.
#[derive(Debug, Default, Clone)]
pub struct StaticTranslations {
    tables: HashMap<String, HashMap<String, String>>,
}

impl StaticTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label.
    pub fn label(mut self, locale: &str, key: &str, text: &str) -> Self {
        self.tables
            .entry(locale.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
        self
    }

    /// Add a complete table.
    pub fn table(mut self, locale: &str, table: HashMap<String, String>) -> Self {
        self.tables.insert(locale.to_string(), table);
        self
    }
}

impl TranslationProvider for StaticTranslations {
    fn labels(&self, locale: &str) -> Result<HashMap<String, String>, TranslationError> {
        self.tables
            .get(locale)
            .cloned()
            .ok_or_else(|| TranslationError::UnknownLocale(locale.to_string()))
    }
}

/// Resolved labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    labels: [String; 9],
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            labels: LabelKey::ALL.map(|v| v.default_label().to_string()),
        }
    }
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels for the locale from the provider.
    ///
    /// Any failure of the provider is logged and
    /// leaves the defaults.
    pub fn load(provider: &dyn TranslationProvider, locale: &str) -> Self {
        let mut labels = Self::default();
        match provider.labels(locale) {
            Ok(map) => {
                labels.merge(&map);
            }
            Err(e) => {
                warn!("translation for {:?} not available: {}", locale, e);
            }
        }
        labels
    }

    /// Label text.
    pub fn get(&self, key: LabelKey) -> &str {
        self.labels[key.idx()].as_str()
    }

    /// Set a label.
    pub fn set(&mut self, key: LabelKey, text: impl Into<String>) {
        self.labels[key.idx()] = text.into();
    }

    /// Takes all known keys from the map.
    /// The current key name wins over the legacy name if the map
    /// has both. Unknown keys are ignored.
    ///
    /// Returns the number of labels taken.
    pub fn merge(&mut self, map: &HashMap<String, String>) -> usize {
        let mut n = 0;
        for key in LabelKey::ALL {
            let text = map
                .get(key.key())
                .or_else(|| map.get(key.legacy_key()));
            if let Some(text) = text {
                self.set(key, text.as_str());
                n += 1;
            }
        }
        for k in map.keys() {
            if LabelKey::from_key(k).is_none() {
                debug!("unknown label key {:?}", k);
            }
        }
        n
    }
}
