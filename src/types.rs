use crate::FieldError;
use crate::consts::{
    DAYS_IN_MONTH, MAX_HOUR, MAX_MICROSECOND, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MAX_YEAR, MIN_DAY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `FieldError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, FieldError> {
        let non_zero = NonZeroU16::new(value).ok_or(FieldError::InvalidYear(i32::from(value)))?;
        if value > MAX_YEAR {
            return Err(FieldError::InvalidYear(i32::from(value)));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = FieldError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// Century arithmetic works in signed years and can land below 1.
impl TryFrom<i32> for Year {
    type Error = FieldError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map_err(|_| FieldError::InvalidYear(value))
            .and_then(Self::new)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `FieldError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, FieldError> {
        let non_zero = NonZeroU8::new(value).ok_or(FieldError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(FieldError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given month.
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the fixed length of `month`.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, month: Month) -> Result<Self, FieldError> {
        let invalid = FieldError::InvalidDay {
            month: month.get(),
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > days_in_month(month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate without month context, so only check the widest month
        if !(MIN_DAY..=DAYS_IN_MONTH[1]).contains(&value) {
            return Err(FieldError::InvalidDay {
                month: 0,
                day: value,
            });
        }
        NonZeroU8::new(value).map(Self).ok_or(FieldError::InvalidDay {
            month: 0,
            day: value,
        })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares a zero-based clock unit with an inclusive upper bound.
macro_rules! clock_unit {
    ($(#[$meta:meta])* $name:ident($repr:ty, $repr_name:tt), $max:expr, $error:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = $repr_name, into = $repr_name)]
        pub struct $name($repr);

        impl $name {
            /// Zero, the value of an absent field.
            pub const ZERO: Self = Self(0);

            #[doc = concat!("Creates a new ", stringify!($name), ", rejecting values above the maximum.")]
            ///
            /// # Errors
            #[doc = concat!("Returns `FieldError::", stringify!($error), "` if the value is out of range.")]
            pub fn new(value: $repr) -> Result<Self, FieldError> {
                if value > $max {
                    return Err(FieldError::$error(value));
                }
                Ok(Self(value))
            }

            #[inline]
            pub const fn get(self) -> $repr {
                self.0
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = FieldError;

            fn try_from(value: $repr) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for $repr {
            fn from(unit: $name) -> Self {
                unit.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

clock_unit!(
    /// An hour in `0..=MAX_HOUR` (24 is accepted as end of day)
    Hour(u8, "u8"),
    MAX_HOUR,
    InvalidHour
);
clock_unit!(
    /// A minute in `0..=MAX_MINUTE`
    Minute(u8, "u8"),
    MAX_MINUTE,
    InvalidMinute
);
clock_unit!(
    /// A second in `0..=MAX_SECOND`
    Second(u8, "u8"),
    MAX_SECOND,
    InvalidSecond
);
clock_unit!(
    /// A microsecond in `0..=MAX_MICROSECOND`
    Microsecond(u32, "u32"),
    MAX_MICROSECOND,
    InvalidMicrosecond
);

// Helper functions

/// Days in `month` from the fixed table. February always has 29.
pub const fn days_in_month(month: Month) -> u8 {
    DAYS_IN_MONTH[month.get() as usize]
}
