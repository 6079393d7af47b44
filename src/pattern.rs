//! Turns a [`Grammar`] into one matchable pattern.
//!
//! Each component contributes its named capture. Between two components of
//! the same group a separator is inserted: the first one in a contiguous run
//! captures whichever separator the text uses, every later one is tied to it
//! so "2019.1.1" matches while "2019.1-1" does not. Between groups a looser
//! transition is used ("14.05.2012 kl 13:06"), and a relative-century phrase
//! after a century may be set off by a comma ("1600-tallet, midten av").
//!
//! The `regex` crate has neither look-around nor back-references. Boundaries
//! are therefore consumed around an inner [`FOUND`] capture, and each
//! back-reference is emitted as a tie capture that the matcher compares with
//! its anchor after the fact.

use regex::Regex;

use crate::GrammarError;
use crate::component::{Component, Group};
use crate::grammar::Grammar;
use crate::lexicon::Lexicon;

/// Name of the capture spanning the matched date text, without boundaries.
pub const FOUND: &str = "found";

const LEFT_BOUNDARY: &str = r"(?:^|\W)";
const RIGHT_BOUNDARY: &str = r"(?:\W|$)";

const DATE_SEPARATOR: &str = r"[\s./\\-]";
const TIME_SEPARATOR: &str = r"[.:\-]?";

/// Between a century and a trailing relative-century phrase ("1600-tallet, midten av").
const PHRASE_SEPARATOR: &str = r",?\s+";

const DATE_TO_TIME: &str = r",?\s+(?:(?i:klokken|klokka|kl|at)\.?\s*)?";
const TIME_TO_DATE: &str = r",?\s+";

/// A back-reference: the text captured by `tie` must equal that of `anchor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorTie {
    pub anchor: String,
    pub tie: String,
}

/// The compiled form of a grammar, built once and reused for every input.
#[derive(Debug, Clone)]
pub struct AssembledPattern {
    pub(crate) grammar: Grammar,
    pub(crate) source: String,
    pub(crate) regex: Regex,
    pub(crate) ties: Vec<SeparatorTie>,
}

impl AssembledPattern {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The pattern source the regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn ties(&self) -> &[SeparatorTie] {
        &self.ties
    }
}

/// Compiles `grammar` against the vocabulary in `lexicon`.
///
/// # Errors
/// Returns `GrammarError::Pattern` if the assembled source does not compile,
/// which only happens with a malformed lexicon entry.
pub fn assemble(grammar: &Grammar, lexicon: &Lexicon) -> Result<AssembledPattern, GrammarError> {
    let (source, ties) = pattern_source(grammar, lexicon);
    let regex = Regex::new(&source)?;
    Ok(AssembledPattern {
        grammar: grammar.clone(),
        source,
        regex,
        ties,
    })
}

/// Builds the pattern source for a sequence of component names using the
/// default vocabulary.
///
/// # Errors
/// Returns a `GrammarError` if the names do not form a valid grammar.
pub fn build_pattern<S: AsRef<str>>(names: &[S]) -> Result<String, GrammarError> {
    let grammar = Grammar::from_names(names)?;
    Ok(pattern_source(&grammar, &Lexicon::new()).0)
}

fn pattern_source(grammar: &Grammar, lexicon: &Lexicon) -> (String, Vec<SeparatorTie>) {
    let components = grammar.components();
    let mut body = String::new();
    let mut ties = Vec::new();
    let mut names = SeparatorNames::default();
    // Anchor capture of the contiguous same-group run we are in, if any.
    let mut anchor: Option<String> = None;

    for (i, component) in components.iter().enumerate() {
        body.push_str(&component.capture(lexicon));
        let Some(next) = components.get(i + 1) else {
            break;
        };

        let group = component.group();
        if (*component, *next) == (Component::Century, Component::RelativeCentury) {
            body.push_str(PHRASE_SEPARATOR);
        } else if group == next.group() {
            let class = separator_class(group);
            match anchor.clone() {
                None => {
                    let name = names.anchor(group);
                    body.push_str(&format!("(?P<{name}>{class})"));
                    anchor = Some(name);
                }
                Some(anchor) => {
                    let tie = names.tie(&anchor);
                    body.push_str(&format!("(?P<{tie}>{class})"));
                    ties.push(SeparatorTie { anchor, tie });
                }
            }
        } else {
            anchor = None;
            body.push_str(transition(group, next.group()));
        }
    }

    let source = format!("{LEFT_BOUNDARY}(?P<{FOUND}>{body}){RIGHT_BOUNDARY}");
    (source, ties)
}

const fn separator_class(group: Group) -> &'static str {
    match group {
        Group::Date => DATE_SEPARATOR,
        Group::Time => TIME_SEPARATOR,
    }
}

const fn transition(from: Group, to: Group) -> &'static str {
    match (from, to) {
        (Group::Date, Group::Time) => DATE_TO_TIME,
        (Group::Time, Group::Date) => TIME_TO_DATE,
        // Same-group adjacency never reaches here.
        (Group::Date, Group::Date) | (Group::Time, Group::Time) => "",
    }
}

/// Hands out unique capture names for separators.
#[derive(Default)]
struct SeparatorNames {
    date_runs: usize,
    time_runs: usize,
    ties: usize,
}

impl SeparatorNames {
    fn anchor(&mut self, group: Group) -> String {
        let runs = match group {
            Group::Date => &mut self.date_runs,
            Group::Time => &mut self.time_runs,
        };
        *runs += 1;
        if *runs == 1 {
            format!("{group}_sep")
        } else {
            format!("{group}_sep{runs}")
        }
    }

    fn tie(&mut self, anchor: &str) -> String {
        self.ties += 1;
        format!("{anchor}_tie{}", self.ties)
    }
}

/// Captures a candidate reads, in grammar order plus the second's fraction.
pub(crate) fn captured_components(grammar: &Grammar) -> Vec<Component> {
    let mut captured = grammar.components().to_vec();
    if grammar.contains(Component::Second) {
        captured.push(Component::Microsecond);
    }
    captured
}
