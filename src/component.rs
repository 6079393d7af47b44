use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GrammarError;
use crate::lexicon::Lexicon;
use crate::prelude::*;

/// One named unit of a date or time.
///
/// The display name doubles as the capture-group name in assembled patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "microsecond")]
    Microsecond,
    #[display(fmt = "weekday")]
    Weekday,
    #[display(fmt = "relative_year")]
    RelativeYear,
    #[display(fmt = "century")]
    Century,
    #[display(fmt = "relative_century")]
    RelativeCentury,
}

/// Which half of a timestamp a component belongs to.
///
/// Weekday, relative and century components count as date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Group {
    #[display(fmt = "date")]
    Date,
    #[display(fmt = "time")]
    Time,
}

impl Component {
    /// Every component, in timestamp order followed by the symbolic ones.
    pub const ALL: [Self; 11] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Microsecond,
        Self::Weekday,
        Self::RelativeYear,
        Self::Century,
        Self::RelativeCentury,
    ];

    pub const fn group(self) -> Group {
        match self {
            Self::Hour | Self::Minute | Self::Second | Self::Microsecond => Group::Time,
            Self::Year
            | Self::Month
            | Self::Day
            | Self::Weekday
            | Self::RelativeYear
            | Self::Century
            | Self::RelativeCentury => Group::Date,
        }
    }

    /// Whether the component may appear on its own in a grammar.
    ///
    /// Microseconds are only ever captured as the fraction of a second.
    pub const fn is_standalone(self) -> bool {
        !matches!(self, Self::Microsecond)
    }

    /// The sub-pattern matching this component, with its named capture.
    pub fn capture(self, lexicon: &Lexicon) -> String {
        match self {
            Self::Year => format!(r"(?P<{self}>\d{{4}}|\d{{2}})"),
            Self::Month => format!(r"(?P<{self}>\d{{1,2}}|\w{{3,9}})"),
            Self::Day => format!(r"(?P<{self}>\d{{1,2}})(?:\.|st|nd|rd|th)?"),
            Self::Hour => format!(r"(?P<{self}>\d{{4}}|\d{{1,2}})"),
            Self::Minute => format!(r"(?P<{self}>\d{{2}})"),
            Self::Second => format!(
                r"(?P<{self}>\d{{2}})(?:[.,](?P<{micro}>\d+))?",
                micro = Self::Microsecond
            ),
            Self::Microsecond => format!(r"(?P<{self}>\d+)"),
            Self::Weekday => format!("(?P<{self}>{})", lexicon.weekday_shape()),
            Self::RelativeYear => format!("(?P<{self}>{})", lexicon.relative_year_shape()),
            Self::Century => format!("(?P<{self}>{})", lexicon.century_shape()),
            Self::RelativeCentury => {
                format!("(?P<{self}>{})", lexicon.relative_century_shape())
            }
        }
    }
}

impl FromStr for Component {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|component| component.to_string() == normalized)
            .ok_or_else(|| GrammarError::UnknownComponent(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names_round_trip() {
        for component in Component::ALL {
            let parsed: Component = component.to_string().parse().unwrap();
            assert_eq!(parsed, component);
        }
    }

    #[test]
    fn test_component_from_str_accepts_hyphens() {
        assert_eq!(
            "relative-year".parse::<Component>().unwrap(),
            Component::RelativeYear
        );
        assert_eq!(
            " Relative-Century ".parse::<Component>().unwrap(),
            Component::RelativeCentury
        );
    }

    #[test]
    fn test_component_from_str_unknown() {
        let result = "fortnight".parse::<Component>();
        assert!(matches!(result, Err(GrammarError::UnknownComponent(name)) if name == "fortnight"));
    }

    #[test]
    fn test_groups() {
        assert_eq!(Component::Year.group(), Group::Date);
        assert_eq!(Component::Weekday.group(), Group::Date);
        assert_eq!(Component::Century.group(), Group::Date);
        assert_eq!(Component::Hour.group(), Group::Time);
        assert_eq!(Component::Microsecond.group(), Group::Time);
    }

    #[test]
    fn test_second_capture_carries_microsecond() {
        let capture = Component::Second.capture(&Lexicon::new());
        assert_eq!(capture, r"(?P<second>\d{2})(?:[.,](?P<microsecond>\d+))?");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Component::RelativeCentury).unwrap();
        assert_eq!(json, r#""relative_century""#);
    }
}
