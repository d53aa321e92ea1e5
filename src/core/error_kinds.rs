use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// Input/validation problems reported by the chart engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Empty,
    UnevenSeries,
    TooManySeries,
    TooFewSeries,
    NanValues,
    NotDates,
    CantAutoType,
    #[serde(rename = "UNEVEN_TZ")]
    UnevenTimezone,
    TooMuchRightAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLocation {
    Input,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Error,
    Warning,
}

impl ErrorKind {
    pub const ALL: [Self; 9] = [
        Self::Empty,
        Self::UnevenSeries,
        Self::TooManySeries,
        Self::TooFewSeries,
        Self::NanValues,
        Self::NotDates,
        Self::CantAutoType,
        Self::UnevenTimezone,
        Self::TooMuchRightAxis,
    ];

    /// Stable identifier shared with the engine's error table.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::UnevenSeries => "UNEVEN_SERIES",
            Self::TooManySeries => "TOO_MANY_SERIES",
            Self::TooFewSeries => "TOO_FEW_SERIES",
            Self::NanValues => "NAN_VALUES",
            Self::NotDates => "NOT_DATES",
            Self::CantAutoType => "CANT_AUTO_TYPE",
            Self::UnevenTimezone => "UNEVEN_TZ",
            Self::TooMuchRightAxis => "TOO_MUCH_RIGHT_AXIS",
        }
    }

    #[must_use]
    pub fn location(self) -> ErrorLocation {
        match self {
            Self::TooMuchRightAxis => ErrorLocation::Scale,
            _ => ErrorLocation::Input,
        }
    }

    #[must_use]
    pub fn severity(self) -> ErrorSeverity {
        match self {
            Self::TooMuchRightAxis | Self::UnevenTimezone => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Local message text. Replaces whatever text the engine ships for the kind.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Empty => "The selected table has no rows to chart.",
            Self::UnevenSeries => {
                "At least one row does not have the same number of columns as the rest."
            }
            Self::TooManySeries => "You have more than 12 columns to chart. Select fewer columns.",
            Self::TooFewSeries => "Select at least two columns: one for the X axis and one to plot.",
            Self::NanValues => "Some cells in the plotted columns are not numbers.",
            Self::NotDates => "Some values in the X axis column are not dates.",
            Self::CantAutoType => "We could not work out the type of the X axis column.",
            Self::UnevenTimezone => "Dates in the X axis column use more than one time zone.",
            Self::TooMuchRightAxis => {
                "Too many series are assigned to the right axis. Move some to the left axis."
            }
        }
    }
}

impl FromStr for ErrorKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> BridgeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| BridgeError::InvalidData(format!("unknown error kind `{s}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub kind: ErrorKind,
    pub location: ErrorLocation,
    pub severity: ErrorSeverity,
    pub text: String,
}

impl ErrorMessage {
    #[must_use]
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: kind.location(),
            severity: kind.severity(),
            text: kind.text().to_owned(),
        }
    }
}

/// Outstanding validation problems keyed by kind, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSet {
    messages: IndexMap<ErrorKind, ErrorMessage>,
}

impl ErrorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from an engine report. Engine-supplied text is discarded
    /// in favour of the local table.
    pub fn from_engine_report<'a, I>(report: I) -> BridgeResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = Self::new();
        for (id, _engine_text) in report {
            set.insert(id.parse()?);
        }
        Ok(set)
    }

    /// Records `kind`. Returns `false` when it was already present.
    pub fn insert(&mut self, kind: ErrorKind) -> bool {
        if self.messages.contains_key(&kind) {
            return false;
        }
        self.messages.insert(kind, ErrorMessage::from_kind(kind));
        true
    }

    #[must_use]
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.messages.contains_key(&kind)
    }

    #[must_use]
    pub fn get(&self, kind: ErrorKind) -> Option<&ErrorMessage> {
        self.messages.get(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `true` when any message is still outstanding, warnings included.
    #[must_use]
    pub fn has_outstanding(&self) -> bool {
        !self.messages.is_empty()
    }

    /// `true` when no error-severity message is present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.messages
            .values()
            .all(|message| message.severity != ErrorSeverity::Error)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ErrorKind> + '_ {
        self.messages.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorMessage> {
        self.messages.values()
    }
}
