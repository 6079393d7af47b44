use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-call settings for parsing.
///
/// Both fields fall back to values derived from today's local date when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Date that weekday names are projected forward from.
    pub reference_date: Option<NaiveDate>,
    /// Two-digit years above this are placed in the previous century.
    /// Defaults to the reference date's year modulo 100.
    pub two_digit_year_pivot: Option<u8>,
}

impl ParseOptions {
    #[must_use]
    pub const fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    #[must_use]
    pub const fn with_two_digit_year_pivot(mut self, pivot: u8) -> Self {
        self.two_digit_year_pivot = Some(pivot);
        self
    }
}
