use super::coordinate::TimeCoordinate;
use super::interval::TimeInterval;
use super::position::TimePosition;
use crate::error::{ConstructionError, TimeError};
use oxrdf::{NamedNode, NamedNodeRef};
use oxsdatatypes::DateTime;

/// Where an instant is, `time:inXSDDateTimeStamp`, `time:inDateTime` or `time:inTimePosition`.
#[derive(Debug, Clone, PartialEq)]
pub enum InstantValue {
    DateTime(DateTime),
    Description(TimeCoordinate),
    Position(TimePosition),
}

/// A `time:Instant` with exactly one position.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeInstant {
    iri: NamedNode,
    value: InstantValue,
}

impl TimeInstant {
    pub fn new(iri: NamedNode, value: InstantValue) -> Self {
        Self { iri, value }
    }

    pub fn from_date_time(iri: NamedNode, value: DateTime) -> Self {
        Self::new(iri, InstantValue::DateTime(value))
    }

    /// Builds an instant from the values found for it. Exactly one must be set.
    pub fn from_values(
        iri: NamedNode,
        date_time: Option<DateTime>,
        description: Option<TimeCoordinate>,
        position: Option<TimePosition>,
    ) -> Result<Self, TimeError> {
        let value = match (date_time, description, position) {
            (Some(value), None, None) => InstantValue::DateTime(value),
            (None, Some(value), None) => InstantValue::Description(value),
            (None, None, Some(value)) => InstantValue::Position(value),
            (None, None, None) => {
                return Err(ConstructionError::new(
                    "TimeInstant",
                    "value",
                    format!("{iri} has no date time, description or position"),
                )
                .into());
            }
            _ => {
                return Err(ConstructionError::new(
                    "TimeInstant",
                    "value",
                    format!("{iri} has more than one of date time, description and position"),
                )
                .into());
            }
        };
        Ok(Self::new(iri, value))
    }

    #[inline]
    pub fn iri(&self) -> NamedNodeRef<'_> {
        self.iri.as_ref()
    }

    #[inline]
    pub fn value(&self) -> &InstantValue {
        &self.value
    }

    /// The coordinate of this instant, if it can be resolved.
    pub fn coordinate(&self) -> Option<TimeCoordinate> {
        match &self.value {
            InstantValue::DateTime(value) => TimeCoordinate::from_date_time(*value),
            InstantValue::Description(coordinate) => Some(coordinate.clone()),
            InstantValue::Position(position) => position.to_coordinate(),
        }
    }

    /// Strictly before `other`. `false` when either side is unresolvable.
    pub fn before(&self, other: &Self) -> bool {
        compare(self, other, |a, b| a < b)
    }

    pub fn after(&self, other: &Self) -> bool {
        compare(self, other, |a, b| a > b)
    }

    /// At the same coordinate as `other`.
    pub fn equals(&self, other: &Self) -> bool {
        compare(self, other, |a, b| a == b)
    }

    /// Strictly between the beginning and the end of `interval`.
    pub fn inside(&self, interval: &TimeInterval) -> bool {
        let (Some(at), Some(beginning), Some(end)) =
            (self.coordinate(), interval.beginning(), interval.end())
        else {
            return false;
        };
        beginning < at && at < end
    }
}

fn compare(
    a: &TimeInstant,
    b: &TimeInstant,
    predicate: impl FnOnce(&TimeCoordinate, &TimeCoordinate) -> bool,
) -> bool {
    match (a.coordinate(), b.coordinate()) {
        (Some(a), Some(b)) => predicate(&a, &b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::position::{PositionReferenceSystem, TimePosition};

    fn instant(local: &str, value: &str) -> TimeInstant {
        TimeInstant::from_date_time(
            NamedNode::new_unchecked(format!("http://example.org/{local}")),
            value.parse().unwrap(),
        )
    }

    #[test]
    fn exactly_one_value() {
        let iri = NamedNode::new_unchecked("http://example.org/i");
        assert!(TimeInstant::from_values(iri.clone(), None, None, None).is_err());
        assert!(
            TimeInstant::from_values(
                iri.clone(),
                Some("2023-05-01T20:47:15Z".parse().unwrap()),
                Some(TimeCoordinate::date(2023, 5, 1).unwrap()),
                None
            )
            .is_err()
        );
        let position = TimePosition::numeric(PositionReferenceSystem::UnixTime, 0.).unwrap();
        let instant = TimeInstant::from_values(iri, None, None, Some(position)).unwrap();
        assert_eq!(instant.coordinate(), Some(TimeCoordinate::date(1970, 1, 1).unwrap()));
    }

    #[test]
    fn comparisons_across_timezones() {
        let a = instant("a", "2023-05-01T20:47:15Z");
        let b = instant("b", "2023-05-01T22:47:15+02:00");
        let c = instant("c", "2023-05-01T20:47:16Z");
        assert!(a.equals(&b));
        assert!(!a.before(&b));
        assert!(a.before(&c));
        assert!(c.after(&b));
    }

    #[test]
    fn unresolvable_instants_compare_false() {
        let nominal = TimeInstant::new(
            NamedNode::new_unchecked("http://example.org/n"),
            InstantValue::Position(
                TimePosition::nominal(PositionReferenceSystem::GeologicTime, "Jurassic").unwrap(),
            ),
        );
        let a = instant("a", "2023-05-01T20:47:15Z");
        assert!(!nominal.before(&a));
        assert!(!nominal.after(&a));
        assert!(!nominal.equals(&nominal));
    }
}
