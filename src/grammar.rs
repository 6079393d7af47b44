use std::fmt;
use std::str::FromStr;

use crate::GrammarError;
use crate::component::Component;

use Component::{
    Century, Day, Hour, Minute, Month, RelativeCentury, RelativeYear, Second, Weekday, Year,
};

/// Component sequences tried in order, most specific first.
const CATALOG: &[&[Component]] = &[
    &[Year, Month, Day, Hour, Minute, Second],
    &[Day, Month, Year, Hour, Minute, Second],
    &[Year, Month, Day, Hour, Minute],
    &[Day, Month, Year, Hour, Minute],
    &[Year, Month, Day, Hour],
    &[Day, Month, Year, Hour],
    &[Hour, Minute, Day, Month, Year],
    &[Hour, Minute, Year, Month, Day],
    &[Year, Month, Day],
    &[Day, Month, Year],
    &[Year, Day, Month],
    &[Weekday, Hour, Minute, Second],
    &[Weekday, Hour, Minute],
    &[Weekday, Hour],
    &[Hour, Minute, Weekday],
    &[Year, Month],
    &[Month, Year],
    &[RelativeCentury, Century],
    &[Century, RelativeCentury],
    &[RelativeYear, Year],
    &[Year, RelativeYear],
    &[Century],
    &[Year],
    &[Weekday],
];

/// One hypothesis about how a date is laid out in text.
///
/// Always non-empty, with each component at most once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grammar(Vec<Component>);

impl Grammar {
    /// Creates a grammar from an ordered component list.
    ///
    /// # Errors
    /// Returns `GrammarError::Empty` for an empty list,
    /// `GrammarError::DuplicateComponent` if a component repeats, and
    /// `GrammarError::NotStandalone` for components that only live inside another.
    pub fn new(components: Vec<Component>) -> Result<Self, GrammarError> {
        if components.is_empty() {
            return Err(GrammarError::Empty);
        }
        for (i, component) in components.iter().enumerate() {
            if !component.is_standalone() {
                return Err(GrammarError::NotStandalone(*component));
            }
            if components[..i].contains(component) {
                return Err(GrammarError::DuplicateComponent(*component));
            }
        }
        Ok(Self(components))
    }

    /// Creates a grammar from component names such as `["day", "month", "year"]`.
    ///
    /// # Errors
    /// Returns `GrammarError::UnknownComponent` for a name outside the catalog,
    /// plus everything [`Grammar::new`] rejects.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, GrammarError> {
        let components = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<Component>, _>>()?;
        Self::new(components)
    }

    /// The built-in grammars in priority order.
    ///
    /// # Errors
    /// Only fails if the built-in table itself is malformed.
    pub fn catalog() -> Result<Vec<Self>, GrammarError> {
        CATALOG.iter().map(|seq| Self::new(seq.to_vec())).collect()
    }

    pub fn components(&self) -> &[Component] {
        &self.0
    }

    pub fn contains(&self, component: Component) -> bool {
        self.0.contains(&component)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join("-"))
    }
}

impl FromStr for Grammar {
    type Err = GrammarError;

    /// Parses names separated by commas or whitespace, e.g. `"day month year"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty())
            .collect();
        Self::from_names(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        let catalog = Grammar::catalog().unwrap();
        assert_eq!(catalog.len(), CATALOG.len());
        assert_eq!(catalog[0].to_string(), "year-month-day-hour-minute-second");
        assert_eq!(catalog.last().unwrap().to_string(), "weekday");
    }

    #[test]
    fn test_catalog_full_dates_before_partial() {
        let catalog = Grammar::catalog().unwrap();
        let position = |name: &str| {
            catalog
                .iter()
                .position(|g| g.to_string() == name)
                .unwrap()
        };
        assert!(position("day-month-year-hour-minute") < position("day-month-year"));
        assert!(position("day-month-year") < position("month-year"));
        assert!(position("month-year") < position("year"));
        assert!(position("year") < position("weekday"));
        assert_eq!(
            position("century-relative_century"),
            position("relative_century-century") + 1
        );
        assert!(position("century-relative_century") < position("century"));
    }

    #[test]
    fn test_empty_grammar() {
        assert!(matches!(Grammar::new(vec![]), Err(GrammarError::Empty)));
    }

    #[test]
    fn test_duplicate_component() {
        let result = Grammar::new(vec![Year, Month, Year]);
        assert!(matches!(
            result,
            Err(GrammarError::DuplicateComponent(Component::Year))
        ));
    }

    #[test]
    fn test_microsecond_not_standalone() {
        let result = Grammar::from_names(&["second", "microsecond"]);
        assert!(matches!(
            result,
            Err(GrammarError::NotStandalone(Component::Microsecond))
        ));
    }

    #[test]
    fn test_from_names_unknown() {
        let result = Grammar::from_names(&["day", "moonphase"]);
        assert!(matches!(result, Err(GrammarError::UnknownComponent(_))));
    }

    #[test]
    fn test_from_str() {
        let grammar: Grammar = "relative-century, century".parse().unwrap();
        assert_eq!(grammar.components(), &[RelativeCentury, Century]);
        assert_eq!(grammar.to_string(), "relative_century-century");
    }
}
