use crate::FieldError;
use crate::component::Component;

/// Raw text captured for each component of one match, before validation.
///
/// A field is `None` when its component did not take part in the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCandidate<'t> {
    pub year: Option<&'t str>,
    pub month: Option<&'t str>,
    pub day: Option<&'t str>,
    pub hour: Option<&'t str>,
    pub minute: Option<&'t str>,
    pub second: Option<&'t str>,
    pub microsecond: Option<&'t str>,
    pub weekday: Option<&'t str>,
    pub relative_year: Option<&'t str>,
    pub century: Option<&'t str>,
    pub relative_century: Option<&'t str>,
}

impl<'t> MatchCandidate<'t> {
    /// Builds a candidate from `(component name, raw text)` pairs.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownComponent` for a name that is not a component.
    pub fn from_fields<I>(fields: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = (&'t str, &'t str)>,
    {
        let mut candidate = Self::default();
        for (name, raw) in fields {
            let component: Component = name
                .parse()
                .map_err(|_| FieldError::UnknownComponent(name.to_owned()))?;
            candidate.set(component, raw);
        }
        Ok(candidate)
    }

    pub const fn get(&self, component: Component) -> Option<&'t str> {
        match component {
            Component::Year => self.year,
            Component::Month => self.month,
            Component::Day => self.day,
            Component::Hour => self.hour,
            Component::Minute => self.minute,
            Component::Second => self.second,
            Component::Microsecond => self.microsecond,
            Component::Weekday => self.weekday,
            Component::RelativeYear => self.relative_year,
            Component::Century => self.century,
            Component::RelativeCentury => self.relative_century,
        }
    }

    pub fn set(&mut self, component: Component, raw: &'t str) {
        let slot = match component {
            Component::Year => &mut self.year,
            Component::Month => &mut self.month,
            Component::Day => &mut self.day,
            Component::Hour => &mut self.hour,
            Component::Minute => &mut self.minute,
            Component::Second => &mut self.second,
            Component::Microsecond => &mut self.microsecond,
            Component::Weekday => &mut self.weekday,
            Component::RelativeYear => &mut self.relative_year,
            Component::Century => &mut self.century,
            Component::RelativeCentury => &mut self.relative_century,
        };
        *slot = Some(raw);
    }

    /// Whether no component was captured at all.
    pub fn is_empty(&self) -> bool {
        Component::ALL.iter().all(|c| self.get(*c).is_none())
    }
}
