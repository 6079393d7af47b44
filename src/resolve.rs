//! Field resolution: raw captured text to a validated [`Timestamp`].
//!
//! Rules run in a fixed order because later ones read fields settled by
//! earlier ones:
//!
//! 1. year, from a century phrase (plus relative offset) or from digits
//! 2. month, numeric or by name
//! 3. day, checked against the month
//! 4. weekday, projected from the reference date; owns year, month and day
//! 5. relative-year phrase; owns the month
//! 6. hour and minute, with compact `HHMM` hours split
//! 7. second and its fraction
//! 8. defaults for whatever is still missing

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::FieldError;
use crate::candidate::MatchCandidate;
use crate::component::Component;
use crate::consts::{
    CENTURY_YEARS, CURRENT_CENTURY_BASE, JANUARY, MICROSECOND_DIGITS, MIN_DAY, PREVIOUS_CENTURY_BASE,
};
use crate::lexicon::Lexicon;
use crate::options::ParseOptions;
use crate::timestamp::{Timestamp, narrow};
use crate::types::{Day, Hour, Microsecond, Minute, Month, Second, Year};

/// Weekdays by bare digit, 0 = Monday.
const WEEKDAY_DIGITS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const COMPACT_HOUR_DIGITS: usize = 4;
const TWO_DIGIT_YEAR_DIGITS: usize = 2;

/// Settled values of [`ParseOptions`] for one parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveContext {
    pub reference_date: NaiveDate,
    pub two_digit_year_pivot: u8,
}

impl ResolveContext {
    /// Context anchored at `reference_date`, with the pivot taken from its year.
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            two_digit_year_pivot: two_digit_year(reference_date),
        }
    }
}

impl From<&ParseOptions> for ResolveContext {
    fn from(options: &ParseOptions) -> Self {
        let reference_date = options
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        Self {
            reference_date,
            two_digit_year_pivot: options
                .two_digit_year_pivot
                .unwrap_or_else(|| two_digit_year(reference_date)),
        }
    }
}

fn two_digit_year(date: NaiveDate) -> u8 {
    u8::try_from(date.year().rem_euclid(CENTURY_YEARS)).unwrap_or_default()
}

/// Validates and normalizes one candidate.
///
/// # Errors
/// Returns the `FieldError` of the first rule the candidate breaks.
pub fn resolve(
    candidate: &MatchCandidate<'_>,
    lexicon: &Lexicon,
    context: &ResolveContext,
) -> Result<Timestamp, FieldError> {
    let mut year = resolve_year(candidate, lexicon, context)?;

    let mut month = candidate
        .month
        .map(|raw| resolve_month(raw, lexicon))
        .transpose()?;

    let mut day = match candidate.day {
        Some(raw) => {
            let value: u8 = parse_number(raw)?;
            let month = month.ok_or(FieldError::DayWithoutMonth(value))?;
            Some(Day::new(value, month)?)
        }
        None => None,
    };

    if let Some(raw) = candidate.weekday {
        let weekday = resolve_weekday(raw, lexicon)?;
        let date = project_weekday(context.reference_date, weekday)?;
        let projected_month = Month::new(narrow(date.month())?)?;
        year = Some(Year::try_from(date.year())?);
        month = Some(projected_month);
        day = Some(Day::new(narrow(date.day())?, projected_month)?);
    }

    if let Some(raw) = candidate.relative_year {
        let anchor = lexicon
            .relative_year(raw)
            .ok_or_else(|| unknown_phrase(Component::RelativeYear, raw))?;
        let anchor = Month::new(anchor)?;
        month = Some(anchor);
        if let Some(current) = day {
            day = Some(Day::new(current.get(), anchor)?);
        }
    }

    let (hour, minute) = resolve_clock(candidate.hour, candidate.minute)?;
    let second = candidate
        .second
        .map(|raw| parse_number(raw).and_then(Second::new))
        .transpose()?;
    let microsecond = candidate.microsecond.map(scale_fraction).transpose()?;

    let year = year.ok_or(FieldError::MissingYear)?;
    let month = match month {
        Some(month) => month,
        None => Month::new(JANUARY)?,
    };
    let day = match day {
        Some(day) => day,
        None => Day::new(MIN_DAY, month)?,
    };
    Timestamp::from_parts(
        year,
        month,
        day,
        hour.unwrap_or_default(),
        minute.unwrap_or_default(),
        second.unwrap_or_default(),
        microsecond.unwrap_or_default(),
    )
}

fn resolve_year(
    candidate: &MatchCandidate<'_>,
    lexicon: &Lexicon,
    context: &ResolveContext,
) -> Result<Option<Year>, FieldError> {
    if let Some(raw) = candidate.century {
        let century = lexicon
            .century(raw)
            .ok_or_else(|| unknown_phrase(Component::Century, raw))?;
        let offset = match candidate.relative_century {
            Some(phrase) => lexicon
                .relative_century(phrase)
                .ok_or_else(|| unknown_phrase(Component::RelativeCentury, phrase))?,
            None => 0,
        };
        return Year::try_from(century.start_year() + i32::from(offset)).map(Some);
    }
    if candidate.relative_century.is_some() {
        return Err(FieldError::RelativeCenturyWithoutCentury);
    }

    let Some(raw) = candidate.year else {
        return Ok(None);
    };
    let value: u16 = parse_number(raw)?;
    let value = if raw.len() == TWO_DIGIT_YEAR_DIGITS {
        expand_two_digit_year(value, context.two_digit_year_pivot)
    } else {
        value
    };
    Year::new(value).map(Some)
}

/// Places a two-digit year in the previous century if it is past `pivot`.
fn expand_two_digit_year(value: u16, pivot: u8) -> u16 {
    if value > u16::from(pivot) {
        PREVIOUS_CENTURY_BASE + value
    } else {
        CURRENT_CENTURY_BASE + value
    }
}

fn resolve_month(raw: &str, lexicon: &Lexicon) -> Result<Month, FieldError> {
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return Month::new(parse_number(raw)?);
    }
    let month = lexicon
        .month(raw)
        .ok_or_else(|| FieldError::UnknownMonth(raw.to_owned()))?;
    Month::new(month)
}

fn resolve_weekday(raw: &str, lexicon: &Lexicon) -> Result<Weekday, FieldError> {
    if let Some(weekday) = lexicon.weekday(raw) {
        return Ok(weekday);
    }
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| WEEKDAY_DIGITS.get(index).copied())
        .ok_or_else(|| FieldError::UnknownWeekday(raw.to_owned()))
}

/// The first date on or after `reference` that falls on `weekday`.
///
/// # Errors
/// Returns `FieldError::ProjectionOverflow` past the end of chrono's calendar.
pub fn project_weekday(reference: NaiveDate, weekday: Weekday) -> Result<NaiveDate, FieldError> {
    let target = weekday.num_days_from_monday();
    let current = reference.weekday().num_days_from_monday();
    let ahead = (7 + target - current) % 7;
    reference
        .checked_add_days(Days::new(u64::from(ahead)))
        .ok_or(FieldError::ProjectionOverflow)
}

/// Hour and minute, splitting a compact `HHMM` hour.
fn resolve_clock(
    hour: Option<&str>,
    minute: Option<&str>,
) -> Result<(Option<Hour>, Option<Minute>), FieldError> {
    let Some(raw_hour) = hour else {
        let minute = minute
            .map(|raw| parse_number(raw).and_then(Minute::new))
            .transpose()?;
        return Ok((None, minute));
    };

    let compact = raw_hour.len() == COMPACT_HOUR_DIGITS && raw_hour.is_ascii();
    let (raw_hour, minute) = if compact {
        if minute.is_some() {
            return Err(FieldError::ConflictingMinute);
        }
        let (hh, mm) = raw_hour.split_at(COMPACT_HOUR_DIGITS / 2);
        (hh, Some(mm))
    } else {
        (raw_hour, minute)
    };

    let hour = Hour::new(parse_number(raw_hour)?)?;
    let minute = minute
        .map(|raw| parse_number(raw).and_then(Minute::new))
        .transpose()?;
    Ok((Some(hour), minute))
}

/// Reads fractional-second digits as microseconds: "23" is 230000.
///
/// Digits past microsecond precision are dropped.
fn scale_fraction(raw: &str) -> Result<Microsecond, FieldError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::NotNumeric(raw.to_owned()));
    }
    let kept = &raw[..raw.len().min(MICROSECOND_DIGITS)];
    let value: u32 = parse_number(kept)?;
    let scale = (kept.len()..MICROSECOND_DIGITS).fold(1, |acc, _| acc * 10);
    Microsecond::new(value * scale)
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T, FieldError> {
    raw.trim()
        .parse()
        .map_err(|_| FieldError::NotNumeric(raw.to_owned()))
}

fn unknown_phrase(component: Component, phrase: &str) -> FieldError {
    FieldError::UnknownPhrase {
        component,
        phrase: phrase.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn context() -> ResolveContext {
        ResolveContext {
            reference_date: NaiveDate::from_ymd_opt(2014, 3, 12).unwrap(),
            two_digit_year_pivot: 14,
        }
    }

    fn resolve_pairs(fields: &[(&str, &str)]) -> Result<Timestamp, FieldError> {
        let candidate = MatchCandidate::from_fields(fields.iter().copied())?;
        resolve(&candidate, &Lexicon::new(), &context())
    }

    fn ymd(year: u16, month: u8, day: u8) -> Timestamp {
        Timestamp::new(year, month, day, 0, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_full_numeric() {
        let ts = resolve_pairs(&[
            ("year", "2012"),
            ("month", "05"),
            ("day", "14"),
            ("hour", "13"),
            ("minute", "06"),
            ("second", "26"),
            ("microsecond", "23"),
        ])
        .unwrap();
        assert_eq!(ts, Timestamp::new(2012, 5, 14, 13, 6, 26, 230_000).unwrap());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(resolve_pairs(&[("year", "2012")]).unwrap(), ymd(2012, 1, 1));
        assert_eq!(
            resolve_pairs(&[("year", "2012"), ("month", "mai")]).unwrap(),
            ymd(2012, 5, 1)
        );
    }

    #[test]
    fn test_missing_year() {
        let result = resolve_pairs(&[("month", "5"), ("day", "14")]);
        assert_eq!(result, Err(FieldError::MissingYear));
    }

    #[test]
    fn test_month_names() {
        let ts = resolve_pairs(&[("year", "2012"), ("month", "Desember")]).unwrap();
        assert_eq!(ts.month(), 12);
        let ts = resolve_pairs(&[("year", "2012"), ("month", "oct")]).unwrap();
        assert_eq!(ts.month(), 10);

        let result = resolve_pairs(&[("year", "2012"), ("month", "smarch")]);
        assert_eq!(result, Err(FieldError::UnknownMonth("smarch".to_owned())));
    }

    #[test]
    fn test_month_out_of_range() {
        let result = resolve_pairs(&[("year", "2012"), ("month", "13")]);
        assert_eq!(result, Err(FieldError::InvalidMonth(13)));
        let result = resolve_pairs(&[("year", "2012"), ("month", "0")]);
        assert_eq!(result, Err(FieldError::InvalidMonth(0)));
    }

    #[test]
    fn test_day_requires_month() {
        let result = resolve_pairs(&[("year", "2012"), ("day", "14")]);
        assert_eq!(result, Err(FieldError::DayWithoutMonth(14)));
    }

    #[test]
    fn test_february_always_29() {
        assert_eq!(
            resolve_pairs(&[("year", "2019"), ("month", "2"), ("day", "29")]).unwrap(),
            ymd(2019, 2, 29)
        );
        assert!(resolve_pairs(&[("year", "2019"), ("month", "2"), ("day", "30")]).is_err());
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(resolve_pairs(&[("year", "12")]).unwrap().year(), 2012);
        assert_eq!(resolve_pairs(&[("year", "14")]).unwrap().year(), 2014);
        assert_eq!(resolve_pairs(&[("year", "15")]).unwrap().year(), 1915);
        assert_eq!(resolve_pairs(&[("year", "88")]).unwrap().year(), 1988);
        assert_eq!(resolve_pairs(&[("year", "00")]).unwrap().year(), 2000);
    }

    #[test]
    fn test_four_digit_year_taken_as_is() {
        assert_eq!(resolve_pairs(&[("year", "0033")]).unwrap().year(), 33);
        assert_eq!(
            resolve_pairs(&[("year", "0000")]),
            Err(FieldError::InvalidYear(0))
        );
    }

    #[test]
    fn test_clock_bounds() {
        let base = [("year", "2012"), ("month", "5"), ("day", "14")];
        let with = |extra: &[(&'static str, &'static str)]| {
            let mut fields = base.to_vec();
            fields.extend_from_slice(extra);
            resolve_pairs(&fields)
        };

        assert!(with(&[("hour", "0"), ("minute", "00")]).is_ok());
        assert!(with(&[("hour", "24"), ("minute", "60"), ("second", "60")]).is_ok());
        assert_eq!(
            with(&[("hour", "25"), ("minute", "00")]),
            Err(FieldError::InvalidHour(25))
        );
        assert_eq!(
            with(&[("hour", "12"), ("minute", "61")]),
            Err(FieldError::InvalidMinute(61))
        );
        assert_eq!(
            with(&[("hour", "12"), ("minute", "00"), ("second", "61")]),
            Err(FieldError::InvalidSecond(61))
        );
    }

    #[test]
    fn test_compact_hour() {
        let ts = resolve_pairs(&[
            ("year", "2012"),
            ("month", "5"),
            ("day", "14"),
            ("hour", "1306"),
        ])
        .unwrap();
        assert_eq!((ts.hour(), ts.minute()), (13, 6));

        let result = resolve_pairs(&[("year", "2012"), ("hour", "1306"), ("minute", "07")]);
        assert_eq!(result, Err(FieldError::ConflictingMinute));

        let result = resolve_pairs(&[("year", "2012"), ("hour", "2575")]);
        assert_eq!(result, Err(FieldError::InvalidHour(25)));
    }

    #[test]
    fn test_fraction_scaling() {
        assert_eq!(scale_fraction("23").unwrap().get(), 230_000);
        assert_eq!(scale_fraction("123457").unwrap().get(), 123_457);
        assert_eq!(scale_fraction("5").unwrap().get(), 500_000);
        assert_eq!(scale_fraction("000001").unwrap().get(), 1);
        assert_eq!(scale_fraction("1234567").unwrap().get(), 123_456);
        assert!(scale_fraction("").is_err());
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are `\d` to the pattern but not numbers here.
        let result = resolve_pairs(&[("year", "٢٠١٢")]);
        assert!(matches!(result, Err(FieldError::NotNumeric(_))));
        let result = resolve_pairs(&[("year", "2012"), ("hour", "١٣٠٦")]);
        assert!(matches!(result, Err(FieldError::NotNumeric(_))));
    }

    #[test]
    fn test_weekday_projection() {
        // 2014-03-12 is a Wednesday.
        let reference = context().reference_date;
        assert_eq!(
            project_weekday(reference, Weekday::Wed).unwrap(),
            reference
        );
        assert_eq!(
            project_weekday(reference, Weekday::Mon).unwrap(),
            NaiveDate::from_ymd_opt(2014, 3, 17).unwrap()
        );
        assert_eq!(
            project_weekday(reference, Weekday::Fri).unwrap(),
            NaiveDate::from_ymd_opt(2014, 3, 14).unwrap()
        );
    }

    #[test]
    fn test_weekday_owns_date() {
        let ts = resolve_pairs(&[("weekday", "mandag"), ("hour", "14"), ("minute", "30")]).unwrap();
        assert_eq!(ts, Timestamp::new(2014, 3, 17, 14, 30, 0, 0).unwrap());

        let ts = resolve_pairs(&[("weekday", "4"), ("year", "1999")]).unwrap();
        assert_eq!(ts, ymd(2014, 3, 14));

        let result = resolve_pairs(&[("weekday", "9")]);
        assert_eq!(result, Err(FieldError::UnknownWeekday("9".to_owned())));
    }

    #[test]
    fn test_relative_year_owns_month() {
        let ts = resolve_pairs(&[("relative_year", "sommeren"), ("year", "1988")]).unwrap();
        assert_eq!(ts, ymd(1988, 6, 1));

        let ts = resolve_pairs(&[("year", "2019"), ("relative_year", "Q4"), ("month", "2")]).unwrap();
        assert_eq!(ts.month(), 10);

        let result = resolve_pairs(&[("year", "2019"), ("relative_year", "solsnu")]);
        assert!(matches!(
            result,
            Err(FieldError::UnknownPhrase {
                component: Component::RelativeYear,
                ..
            })
        ));
    }

    #[test]
    fn test_relative_year_revalidates_day() {
        let result = resolve_pairs(&[
            ("year", "2019"),
            ("month", "1"),
            ("day", "31"),
            ("relative_year", "andre halvdel"),
        ]);
        assert_eq!(result, Err(FieldError::InvalidDay { month: 6, day: 31 }));
    }

    #[test]
    fn test_century() {
        assert_eq!(resolve_pairs(&[("century", "1600-tallet")]).unwrap().year(), 1600);
        assert_eq!(resolve_pairs(&[("century", "19. århundre")]).unwrap().year(), 1800);
        assert_eq!(
            resolve_pairs(&[("relative_century", "midten av"), ("century", "1600-tallet")])
                .unwrap()
                .year(),
            1650
        );
        assert_eq!(
            resolve_pairs(&[("relative_century", "midten av det"), ("century", "19. århundre")])
                .unwrap()
                .year(),
            1850
        );
        assert_eq!(
            resolve_pairs(&[("relative_century", "late"), ("century", "1900s")])
                .unwrap()
                .year(),
            1990
        );
    }

    #[test]
    fn test_century_bypasses_pivot() {
        // An ordinal first century starts at year 0, which is not a valid year.
        assert_eq!(
            resolve_pairs(&[("century", "1. århundre")]),
            Err(FieldError::InvalidYear(0))
        );
        assert_eq!(
            resolve_pairs(&[("relative_century", "early"), ("century", "2. century")])
                .unwrap()
                .year(),
            100
        );
    }

    #[test]
    fn test_relative_century_needs_century() {
        let result = resolve_pairs(&[("relative_century", "midten av"), ("year", "1600")]);
        assert_eq!(result, Err(FieldError::RelativeCenturyWithoutCentury));
    }

    #[test]
    fn test_context_from_options() {
        let date = NaiveDate::from_ymd_opt(1997, 8, 1).unwrap();
        let context = ResolveContext::from(&ParseOptions::default().with_reference_date(date));
        assert_eq!(context.reference_date, date);
        assert_eq!(context.two_digit_year_pivot, 97);

        let context = ResolveContext::from(
            &ParseOptions::default()
                .with_reference_date(date)
                .with_two_digit_year_pivot(14),
        );
        assert_eq!(context.two_digit_year_pivot, 14);
        assert_eq!(
            ResolveContext::new(date),
            ResolveContext {
                reference_date: date,
                two_digit_year_pivot: 97,
            }
        );
    }

    proptest! {
        #[test]
        fn prop_every_day_of_every_month_resolves(month in 1u8..=12, day in 1u8..=31) {
            let limit = crate::consts::DAYS_IN_MONTH[usize::from(month)];
            let (month_text, day_text) = (month.to_string(), day.to_string());
            let result = resolve_pairs(&[
                ("year", "2001"),
                ("month", month_text.as_str()),
                ("day", day_text.as_str()),
            ]);
            prop_assert_eq!(result.is_ok(), day <= limit);
        }

        #[test]
        fn prop_day_after_month_end_fails(month in 1u8..=12) {
            let limit = crate::consts::DAYS_IN_MONTH[usize::from(month)];
            let (month_text, day_text) = (month.to_string(), (limit + 1).to_string());
            let result = resolve_pairs(&[
                ("year", "2001"),
                ("month", month_text.as_str()),
                ("day", day_text.as_str()),
            ]);
            prop_assert!(result.is_err());
        }

        #[test]
        fn prop_fraction_scaling(fraction in "[0-9]{1,6}") {
            let value: u32 = fraction.parse().unwrap();
            let expected = value * 10u32.pow(u32::try_from(6 - fraction.len()).unwrap());
            prop_assert_eq!(scale_fraction(&fraction).unwrap().get(), expected);
        }

        #[test]
        fn prop_weekday_never_before_reference(offset in 0u64..3650, index in 0usize..7) {
            let reference = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Days::new(offset);
            let weekday = WEEKDAY_DIGITS[index];
            let projected = project_weekday(reference, weekday).unwrap();
            prop_assert!(projected >= reference);
            prop_assert!(projected < reference + Days::new(7));
            prop_assert_eq!(projected.weekday(), weekday);
        }
    }
}
