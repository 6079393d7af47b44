use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FieldError;
use crate::types::{Day, Hour, Microsecond, Minute, Month, Second, Year};

/// A fully validated point in time recovered from text.
///
/// Every field passed its range check, and the day fits its month. Fields the
/// text did not mention hold their defaults (first day, first month, midnight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimestampFields", into = "TimestampFields")]
pub struct Timestamp {
    year: Year,
    month: Month,
    day: Day,
    hour: Hour,
    minute: Minute,
    second: Second,
    microsecond: Microsecond,
}

impl Timestamp {
    /// Creates a timestamp from raw numbers.
    ///
    /// # Errors
    /// Returns the `FieldError` of the first field that is out of range.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> Result<Self, FieldError> {
        let month = Month::new(month)?;
        Ok(Self {
            year: Year::new(year)?,
            month,
            day: Day::new(day, month)?,
            hour: Hour::new(hour)?,
            minute: Minute::new(minute)?,
            second: Second::new(second)?,
            microsecond: Microsecond::new(microsecond)?,
        })
    }

    /// Midnight on the given date.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidDay` if `day` is past the end of `month`.
    pub fn from_date(year: Year, month: Month, day: Day) -> Result<Self, FieldError> {
        Self::from_parts(
            year,
            month,
            day,
            Hour::ZERO,
            Minute::ZERO,
            Second::ZERO,
            Microsecond::ZERO,
        )
    }

    /// Creates a timestamp from already validated parts.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidDay` if `day` is past the end of `month`.
    pub fn from_parts(
        year: Year,
        month: Month,
        day: Day,
        hour: Hour,
        minute: Minute,
        second: Second,
        microsecond: Microsecond,
    ) -> Result<Self, FieldError> {
        let day = Day::new(day.get(), month)?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }

    pub const fn second(&self) -> u8 {
        self.second.get()
    }

    pub const fn microsecond(&self) -> u32 {
        self.microsecond.get()
    }

    /// The calendar date, or `None` for 29 February in a common year.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year()),
            u32::from(self.month()),
            u32::from(self.day()),
        )
    }

    /// Converts to a chrono value.
    ///
    /// Returns `None` where chrono is stricter than this type: hour 24,
    /// second 60, and 29 February in a common year.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_micro_opt(
            u32::from(self.hour()),
            u32::from(self.minute()),
            u32::from(self.second()),
            self.microsecond(),
        )
    }
}

impl TryFrom<NaiveDateTime> for Timestamp {
    type Error = FieldError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = Year::try_from(value.year())?;
        let month = Month::new(narrow(value.month())?)?;
        let day = Day::new(narrow(value.day())?, month)?;
        let micros = value.nanosecond() / 1_000;
        Self::from_parts(
            year,
            month,
            day,
            Hour::new(narrow(value.hour())?)?,
            Minute::new(narrow(value.minute())?)?,
            Second::new(narrow(value.second())?)?,
            Microsecond::new(micros)?,
        )
    }
}

/// Narrows a chrono calendar field.
pub(crate) fn narrow(value: u32) -> Result<u8, FieldError> {
    u8::try_from(value).map_err(|_| FieldError::NotNumeric(value.to_string()))
}

impl fmt::Display for Timestamp {
    /// ISO-like rendering: `2012-05-14T13:06:26`, with `.230000` appended
    /// only when there is a fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )?;
        if self.microsecond() > 0 {
            write!(f, ".{:06}", self.microsecond())?;
        }
        Ok(())
    }
}

/// Serialized shape of a [`Timestamp`], validated as a whole on the way in.
#[derive(Serialize, Deserialize)]
struct TimestampFields {
    year: u16,
    month: u8,
    day: u8,
    #[serde(default)]
    hour: u8,
    #[serde(default)]
    minute: u8,
    #[serde(default)]
    second: u8,
    #[serde(default)]
    microsecond: u32,
}

impl TryFrom<TimestampFields> for Timestamp {
    type Error = FieldError;

    fn try_from(fields: TimestampFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.microsecond,
        )
    }
}

impl From<Timestamp> for TimestampFields {
    fn from(ts: Timestamp) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
            day: ts.day(),
            hour: ts.hour(),
            minute: ts.minute(),
            second: ts.second(),
            microsecond: ts.microsecond(),
        }
    }
}
