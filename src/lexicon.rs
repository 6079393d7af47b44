//! Vocabulary for Norwegian and English date text.
//!
//! A [`Lexicon`] is plain lookup data: month and weekday names, phrases that
//! place a date inside a year or a century, and the century recognizers. It is
//! built once and owned by a [`crate::DateParser`].

use std::collections::HashMap;

use chrono::Weekday;

use crate::consts::{CENTURY_YEARS, ORDINAL_CENTURY_CORRECTION};

/// Month names and abbreviations with their month number.
const MONTHS: &[(&str, u8)] = &[
    ("januar", 1),
    ("februar", 2),
    ("mars", 3),
    ("april", 4),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("august", 8),
    ("september", 9),
    ("oktober", 10),
    ("november", 11),
    ("desember", 12),
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("october", 10),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("sept", 9),
    ("okt", 10),
    ("oct", 10),
    ("nov", 11),
    ("des", 12),
    ("dec", 12),
];

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("mandag", Weekday::Mon),
    ("tirsdag", Weekday::Tue),
    ("onsdag", Weekday::Wed),
    ("torsdag", Weekday::Thu),
    ("fredag", Weekday::Fri),
    ("lørdag", Weekday::Sat),
    ("søndag", Weekday::Sun),
    ("man", Weekday::Mon),
    ("tir", Weekday::Tue),
    ("ons", Weekday::Wed),
    ("tor", Weekday::Thu),
    ("fre", Weekday::Fri),
    ("lør", Weekday::Sat),
    ("søn", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("mon", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
    ("sun", Weekday::Sun),
];

/// Phrases placing a date within a year, with the month the period starts in.
const RELATIVE_YEARS: &[(&str, u8)] = &[
    ("vår", 3),
    ("våren", 3),
    ("spring", 3),
    ("sommer", 6),
    ("sommeren", 6),
    ("summer", 6),
    ("høst", 9),
    ("høsten", 9),
    ("autumn", 9),
    ("fall", 9),
    ("vinter", 12),
    ("vinteren", 12),
    ("winter", 12),
    ("første kvartal", 1),
    ("1. kvartal", 1),
    ("q1", 1),
    ("first quarter", 1),
    ("andre kvartal", 4),
    ("2. kvartal", 4),
    ("q2", 4),
    ("second quarter", 4),
    ("tredje kvartal", 7),
    ("3. kvartal", 7),
    ("q3", 7),
    ("third quarter", 7),
    ("fjerde kvartal", 10),
    ("4. kvartal", 10),
    ("q4", 10),
    ("fourth quarter", 10),
    ("første halvdel", 1),
    ("first half", 1),
    ("tidlig", 1),
    ("early", 1),
    ("starten av", 1),
    ("begynnelsen av", 1),
    ("start of", 1),
    ("beginning of", 1),
    ("andre halvdel", 6),
    ("second half", 6),
    ("midten av", 6),
    ("mid", 6),
    ("middle of", 6),
    ("sent", 10),
    ("late", 10),
    ("slutten av", 10),
    ("end of", 10),
];

/// Phrases placing a year within a century, with the offset into it.
const RELATIVE_CENTURIES: &[(&str, u8)] = &[
    ("begynnelsen av", 0),
    ("starten av", 0),
    ("tidlig i", 0),
    ("tidlig på", 0),
    ("første halvdel av", 0),
    ("første kvartal av", 0),
    ("første kvartal", 0),
    ("early", 0),
    ("beginning of", 0),
    ("start of", 0),
    ("first half of", 0),
    ("first quarter of", 0),
    ("andre kvartal av", 25),
    ("andre kvartal", 25),
    ("second quarter of", 25),
    ("midten av", 50),
    ("andre halvdel av", 50),
    ("tredje kvartal av", 50),
    ("tredje kvartal", 50),
    ("mid", 50),
    ("middle of", 50),
    ("second half of", 50),
    ("third quarter of", 50),
    ("fjerde kvartal av", 75),
    ("fjerde kvartal", 75),
    ("fourth quarter of", 75),
    ("sent på", 90),
    ("slutten av", 90),
    ("late", 90),
    ("end of", 90),
];

/// Articles that may follow a relative-century phrase ("midten av det").
const CENTURY_ARTICLES: &[&str] = &["det", "the"];

/// Hundreds form ("1600-tallet", "1900s") or ordinal form ("19. århundre", "19th century").
const CENTURY_SHAPE: &str = r"(?i:\d{2}00(?:[-\s]tallet|s)|\d{1,2}(?:\.|st|nd|rd|th)?\s?(?:århundre|century))";

/// How a century phrase counts its centuries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenturyForm {
    /// "1600-tallet": the digits are the first year of the century.
    Hundreds,
    /// "17. århundre": the first century starts at year 0, so the 17th starts at 1600.
    Ordinal,
}

/// A recognized century phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Century {
    /// Two-digit century prefix as written ("16" for both "1600-tallet" and "16. århundre").
    pub prefix: u8,
    pub form: CenturyForm,
}

impl Century {
    /// First year of the century, before any relative offset.
    pub fn start_year(self) -> i32 {
        let base = i32::from(self.prefix) * CENTURY_YEARS;
        match self.form {
            CenturyForm::Hundreds => base,
            CenturyForm::Ordinal => base + ORDINAL_CENTURY_CORRECTION,
        }
    }
}

/// Lookup tables for the symbolic components.
#[derive(Debug, Clone)]
pub struct Lexicon {
    months: HashMap<String, u8>,
    weekdays: HashMap<String, Weekday>,
    relative_years: HashMap<String, u8>,
    relative_centuries: HashMap<String, u8>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// The Norwegian and English vocabulary.
    pub fn new() -> Self {
        Self {
            months: table(MONTHS),
            weekdays: table(WEEKDAYS),
            relative_years: table(RELATIVE_YEARS),
            relative_centuries: table(RELATIVE_CENTURIES),
        }
    }

    /// Adds or replaces a month name.
    #[must_use]
    pub fn with_month(mut self, name: &str, month: u8) -> Self {
        self.months.insert(normalize(name), month);
        self
    }

    /// Adds or replaces a weekday name.
    #[must_use]
    pub fn with_weekday(mut self, name: &str, weekday: Weekday) -> Self {
        self.weekdays.insert(normalize(name), weekday);
        self
    }

    /// Adds or replaces a relative-year phrase and the month it starts in.
    #[must_use]
    pub fn with_relative_year(mut self, phrase: &str, month: u8) -> Self {
        self.relative_years.insert(normalize(phrase), month);
        self
    }

    /// Adds or replaces a relative-century phrase and its offset.
    #[must_use]
    pub fn with_relative_century(mut self, phrase: &str, offset: u8) -> Self {
        self.relative_centuries.insert(normalize(phrase), offset);
        self
    }

    pub fn month(&self, name: &str) -> Option<u8> {
        self.months.get(&normalize(name)).copied()
    }

    pub fn weekday(&self, name: &str) -> Option<Weekday> {
        self.weekdays.get(&normalize(name)).copied()
    }

    /// Anchor month of a relative-year phrase.
    pub fn relative_year(&self, phrase: &str) -> Option<u8> {
        self.relative_years.get(&normalize(phrase)).copied()
    }

    /// Offset into the century of a relative-century phrase, with or without a trailing article.
    pub fn relative_century(&self, phrase: &str) -> Option<u8> {
        let normalized = normalize(phrase);
        if let Some(offset) = self.relative_centuries.get(&normalized) {
            return Some(*offset);
        }
        let (head, last) = normalized.rsplit_once(' ')?;
        if CENTURY_ARTICLES.contains(&last) {
            self.relative_centuries.get(head).copied()
        } else {
            None
        }
    }

    /// Reads a century phrase matched by [`Lexicon::century_shape`].
    pub fn century(&self, phrase: &str) -> Option<Century> {
        let digits: String = phrase
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        match digits.len() {
            4 if digits.ends_with("00") => Some(Century {
                prefix: digits[..2].parse().ok()?,
                form: CenturyForm::Hundreds,
            }),
            1 | 2 => Some(Century {
                prefix: digits.parse().ok()?,
                form: CenturyForm::Ordinal,
            }),
            _ => None,
        }
    }

    pub fn weekday_shape(&self) -> String {
        alternation(self.weekdays.keys())
    }

    pub fn relative_year_shape(&self) -> String {
        alternation(self.relative_years.keys())
    }

    pub fn relative_century_shape(&self) -> String {
        let articles = CENTURY_ARTICLES.join("|");
        format!(
            r"{}(?i:\s+(?:{articles}))?",
            alternation(self.relative_centuries.keys())
        )
    }

    pub fn century_shape(&self) -> &'static str {
        CENTURY_SHAPE
    }
}

fn table<V: Copy>(entries: &[(&str, V)]) -> HashMap<String, V> {
    entries
        .iter()
        .map(|(name, value)| (normalize(name), *value))
        .collect()
}

/// Lowercases and collapses inner whitespace to single spaces.
fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive alternation of phrases, longest first so a phrase never
/// loses to its own prefix ("mandag" before "man").
fn alternation<'a>(phrases: impl Iterator<Item = &'a String>) -> String {
    let mut phrases: Vec<&String> = phrases.collect();
    phrases.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    let branches: Vec<String> = phrases
        .into_iter()
        .map(|phrase| {
            phrase
                .split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    format!("(?i:{})", branches.join("|"))
}
