//! Runs an [`AssembledPattern`] over text.
//!
//! Yields every non-overlapping match as a [`MatchCandidate`]. A regex match
//! only counts if its separator ties hold; otherwise the search moves on one
//! character past where the rejected match started.

use regex::Captures;

use crate::candidate::MatchCandidate;
use crate::pattern::{AssembledPattern, FOUND, captured_components};

impl AssembledPattern {
    /// Lazily finds all candidates in `text`, left to right.
    pub fn candidates<'p, 't>(&'p self, text: &'t str) -> Candidates<'p, 't> {
        Candidates {
            pattern: self,
            text,
            pos: 0,
        }
    }

    /// Whether `text` contains at least one candidate.
    pub fn is_match(&self, text: &str) -> bool {
        self.candidates(text).next().is_some()
    }

    fn ties_hold(&self, caps: &Captures<'_>) -> bool {
        self.ties.iter().all(|tie| {
            let anchor = caps.name(&tie.anchor).map(|m| m.as_str());
            let tied = caps.name(&tie.tie).map(|m| m.as_str());
            anchor == tied
        })
    }
}

/// Iterator over the candidates of one pattern in one text.
#[derive(Debug)]
pub struct Candidates<'p, 't> {
    pattern: &'p AssembledPattern,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Candidates<'_, 't> {
    type Item = MatchCandidate<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos <= self.text.len() {
            let caps = self.pattern.regex.captures_at(self.text, self.pos)?;
            let found = caps.name(FOUND)?;

            if !self.pattern.ties_hold(&caps) {
                self.pos = next_boundary(self.text, found.start());
                continue;
            }

            // The right boundary character stays available as the next left boundary.
            self.pos = if found.end() > self.pos {
                found.end()
            } else {
                next_boundary(self.text, self.pos)
            };

            let mut candidate = MatchCandidate::default();
            for component in captured_components(&self.pattern.grammar) {
                if let Some(m) = caps.name(&component.to_string()) {
                    candidate.set(component, m.as_str());
                }
            }
            return Some(candidate);
        }
        None
    }
}

/// Byte offset just past the character starting at `pos`.
fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}
