//! Finds dates and times in free-form Norwegian and English text.
//!
//! ```
//! let found = fuzzy_dateparse::parse("Møtet er 14.05.2012 kl 13:06");
//! assert_eq!(found[0].to_string(), "2012-05-14T13:06:00");
//! ```
//!
//! A [`DateParser`] tries a catalog of [`Grammar`]s, most specific first. The
//! first grammar that yields at least one valid timestamp wins, and every
//! timestamp it found is returned.

mod candidate;
mod component;
mod consts;
mod error;
mod grammar;
mod lexicon;
mod matcher;
mod options;
mod pattern;
mod prelude;
mod resolve;
mod timestamp;
mod types;

pub use candidate::MatchCandidate;
pub use component::{Component, Group};
pub use consts::*;
pub use error::{FieldError, GrammarError};
pub use grammar::Grammar;
pub use lexicon::{Century, CenturyForm, Lexicon};
pub use matcher::Candidates;
pub use options::ParseOptions;
pub use pattern::{AssembledPattern, SeparatorTie, assemble, build_pattern};
pub use resolve::{ResolveContext, project_weekday, resolve};
pub use timestamp::Timestamp;
pub use types::{Day, Hour, Microsecond, Minute, Month, Second, Year, days_in_month};

use std::sync::OnceLock;

/// The matcher driver: a lexicon plus one compiled pattern per grammar.
///
/// Patterns are compiled once at construction and only read afterwards, so a
/// parser can be shared between threads.
#[derive(Debug, Clone)]
pub struct DateParser {
    lexicon: Lexicon,
    patterns: Vec<AssembledPattern>,
}

impl DateParser {
    /// A parser over the built-in vocabulary and grammar catalog.
    ///
    /// # Errors
    /// Returns a `GrammarError` if the built-in catalog fails to compile.
    pub fn new() -> Result<Self, GrammarError> {
        Self::with_catalog(Lexicon::new(), Grammar::catalog()?)
    }

    /// A parser over a custom vocabulary and grammar list, tried in the given order.
    ///
    /// # Errors
    /// Returns `GrammarError::Empty` for an empty list, or the first error
    /// raised while compiling a grammar.
    pub fn with_catalog<I>(lexicon: Lexicon, grammars: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = Grammar>,
    {
        let patterns = grammars
            .into_iter()
            .map(|grammar| assemble(&grammar, &lexicon))
            .collect::<Result<Vec<_>, _>>()?;
        if patterns.is_empty() {
            return Err(GrammarError::Empty);
        }
        Ok(Self { lexicon, patterns })
    }

    /// Grammars in the order they are tried.
    pub fn grammars(&self) -> impl Iterator<Item = &Grammar> {
        self.patterns.iter().map(AssembledPattern::grammar)
    }

    /// Every timestamp found in `text` by the most specific grammar that finds any.
    ///
    /// Returns an empty vector when nothing in the text reads as a date.
    pub fn parse(&self, text: &str) -> Vec<Timestamp> {
        self.parse_with(text, &ParseOptions::default())
    }

    /// Like [`DateParser::parse`], with an explicit reference date and year pivot.
    pub fn parse_with(&self, text: &str, options: &ParseOptions) -> Vec<Timestamp> {
        let context = ResolveContext::from(options);

        for pattern in &self.patterns {
            let mut seen = 0_usize;
            let mut found = Vec::new();
            for candidate in pattern.candidates(text) {
                seen += 1;
                match resolve(&candidate, &self.lexicon, &context) {
                    Ok(timestamp) => found.push(timestamp),
                    Err(err) => {
                        tracing::trace!("Dropped {} candidate: {}", pattern.grammar(), err);
                    }
                }
            }

            if !found.is_empty() {
                tracing::debug!(
                    "Grammar {} resolved {} of {} candidates",
                    pattern.grammar(),
                    found.len(),
                    seen
                );
                return found;
            }
            if seen == 0 {
                tracing::trace!("Grammar {} has no match", pattern.grammar());
            }
        }
        Vec::new()
    }

    /// Resolves raw `(component name, text)` pairs directly, bypassing the patterns.
    ///
    /// Returns `None` if any name is unknown or the values do not form a valid timestamp.
    pub fn resolve_fields<'t, I>(&self, fields: I) -> Option<Timestamp>
    where
        I: IntoIterator<Item = (&'t str, &'t str)>,
    {
        self.resolve_fields_with(fields, &ParseOptions::default())
    }

    /// Like [`DateParser::resolve_fields`], with explicit options.
    pub fn resolve_fields_with<'t, I>(&self, fields: I, options: &ParseOptions) -> Option<Timestamp>
    where
        I: IntoIterator<Item = (&'t str, &'t str)>,
    {
        let context = ResolveContext::from(options);
        MatchCandidate::from_fields(fields)
            .and_then(|candidate| resolve(&candidate, &self.lexicon, &context))
            .map_err(|err| tracing::trace!("Rejected fields: {}", err))
            .ok()
    }
}

fn default_parser() -> Option<&'static DateParser> {
    static PARSER: OnceLock<Option<DateParser>> = OnceLock::new();
    PARSER
        .get_or_init(|| match DateParser::new() {
            Ok(parser) => Some(parser),
            Err(err) => {
                tracing::error!("Failed to build the default date parser: {}", err);
                None
            }
        })
        .as_ref()
}

/// Finds timestamps in `text` with the built-in vocabulary and catalog.
///
/// Weekdays are projected from today, and two-digit years pivot on the
/// current year.
pub fn parse(text: &str) -> Vec<Timestamp> {
    parse_with(text, &ParseOptions::default())
}

/// Like [`parse`], with explicit options.
pub fn parse_with(text: &str, options: &ParseOptions) -> Vec<Timestamp> {
    default_parser().map_or_else(Vec::new, |parser| parser.parse_with(text, options))
}

/// Resolves raw `(component name, text)` pairs with the built-in vocabulary.
pub fn resolve_fields<'t, I>(fields: I) -> Option<Timestamp>
where
    I: IntoIterator<Item = (&'t str, &'t str)>,
{
    default_parser().and_then(|parser| parser.resolve_fields(fields))
}
