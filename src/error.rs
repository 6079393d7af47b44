use crate::component::Component;
use crate::consts::{MAX_HOUR, MAX_MICROSECOND, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MAX_YEAR};
use crate::prelude::*;

/// Why a match candidate was rejected by the field resolver.
///
/// Rejection is the normal outcome for most candidates in free-form text, so
/// this never surfaces from [`crate::DateParser::parse`]; it is logged and the
/// candidate is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldError {
    #[display(fmt = "Not a number: {_0}")]
    NotNumeric(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month}")]
    InvalidDay { month: u8, day: u8 },
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Invalid second: {} (must be 0-{})", "_0", MAX_SECOND)]
    InvalidSecond(u8),
    #[display(fmt = "Invalid microsecond: {} (must be 0-{})", "_0", MAX_MICROSECOND)]
    InvalidMicrosecond(u32),
    #[display(fmt = "Unknown month name: {_0}")]
    UnknownMonth(String),
    #[display(fmt = "Unknown weekday: {_0}")]
    UnknownWeekday(String),
    #[display(fmt = "Unknown {component} phrase: {phrase}")]
    UnknownPhrase { component: Component, phrase: String },
    #[display(fmt = "Unknown component: {_0}")]
    UnknownComponent(String),
    #[display(fmt = "Day {_0} given without a month")]
    DayWithoutMonth(u8),
    #[display(fmt = "Minute given both in a compact hour and on its own")]
    ConflictingMinute,
    #[display(fmt = "Relative century given without a century")]
    RelativeCenturyWithoutCentury,
    #[display(fmt = "Weekday projection overflowed the calendar")]
    ProjectionOverflow,
    #[display(fmt = "No year could be resolved")]
    MissingYear,
}

impl std::error::Error for FieldError {}

/// Errors in a grammar definition or its compiled pattern.
///
/// The catalog is static, so these are programming errors caught when an
/// engine is constructed.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// A grammar with no components.
    #[error("Grammar must contain at least one component")]
    Empty,

    /// The same component appears twice in one grammar.
    #[error("Component {0} appears more than once")]
    DuplicateComponent(Component),

    /// A component name that is not in the catalog.
    #[error("Unknown component name: {0}")]
    UnknownComponent(String),

    /// A component that can only appear inside another component's shape.
    #[error("Component {0} cannot stand alone in a grammar")]
    NotStandalone(Component),

    /// The assembled pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}
