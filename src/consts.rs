/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January, the default month
pub const JANUARY: u8 = 1;

/// Maximum days in each month (index 0 is unused, months are 1-indexed).
///
/// February is fixed at 29 days. No leap-year rule is applied, so
/// 29 February is accepted for every year.
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    29, // February (always 29)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Maximum hour (inclusive, so "24" is accepted)
pub const MAX_HOUR: u8 = 24;
/// Maximum minute (inclusive)
pub const MAX_MINUTE: u8 = 60;
/// Maximum second (inclusive)
pub const MAX_SECOND: u8 = 60;
/// Maximum microsecond (inclusive)
pub const MAX_MICROSECOND: u32 = 999_999;

/// Number of fractional-second digits kept in a microsecond value
pub const MICROSECOND_DIGITS: usize = 6;

/// Years in a century
pub(crate) const CENTURY_YEARS: i32 = 100;
/// Correction applied to ordinal centuries ("19. århundre" starts at 1800)
pub(crate) const ORDINAL_CENTURY_CORRECTION: i32 = -100;
/// Base of the previous century for bare two-digit years
pub(crate) const PREVIOUS_CENTURY_BASE: u16 = 1900;
/// Base of the current century for bare two-digit years
pub(crate) const CURRENT_CENTURY_BASE: u16 = 2000;
