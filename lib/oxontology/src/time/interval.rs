use super::allen::AllenRelation;
use super::coordinate::TimeCoordinate;
use super::instant::{InstantValue, TimeInstant};
use super::position::TimeUnit;
use crate::error::{ConstructionError, TimeError};
use oxrdf::{NamedNode, NamedNodeRef};
use oxsdatatypes::{Double, Duration};

/// How an interval is bounded.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalValue {
    /// `time:hasBeginning` and `time:hasEnd`, at least one of them.
    Bounded {
        beginning: Option<TimeInstant>,
        end: Option<TimeInstant>,
    },
    /// `time:hasBeginning` and `time:hasXSDDuration`.
    Duration {
        beginning: TimeInstant,
        duration: Duration,
    },
    /// `time:hasDateTimeDescription`: one whole unit starting at `start`, e.g. a calendar day.
    Description { start: TimeCoordinate, unit: TimeUnit },
}

/// A `time:Interval`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeInterval {
    iri: NamedNode,
    value: IntervalValue,
}

impl TimeInterval {
    /// An interval between two instants. One of them may be unknown, not both.
    pub fn bounded(
        iri: NamedNode,
        beginning: Option<TimeInstant>,
        end: Option<TimeInstant>,
    ) -> Result<Self, TimeError> {
        if beginning.is_none() && end.is_none() {
            return Err(ConstructionError::new(
                "TimeInterval",
                "hasBeginning",
                format!("{iri} needs a beginning or an end"),
            )
            .into());
        }
        Ok(Self {
            iri,
            value: IntervalValue::Bounded { beginning, end },
        })
    }

    pub fn with_duration(iri: NamedNode, beginning: TimeInstant, duration: Duration) -> Self {
        Self {
            iri,
            value: IntervalValue::Duration {
                beginning,
                duration,
            },
        }
    }

    pub fn described(iri: NamedNode, start: TimeCoordinate, unit: TimeUnit) -> Self {
        Self {
            iri,
            value: IntervalValue::Description { start, unit },
        }
    }

    #[inline]
    pub fn iri(&self) -> NamedNodeRef<'_> {
        self.iri.as_ref()
    }

    #[inline]
    pub fn value(&self) -> &IntervalValue {
        &self.value
    }

    pub fn beginning(&self) -> Option<TimeCoordinate> {
        match &self.value {
            IntervalValue::Bounded { beginning, .. } => beginning.as_ref()?.coordinate(),
            IntervalValue::Duration { beginning, .. } => beginning.coordinate(),
            IntervalValue::Description { start, .. } => Some(start.clone()),
        }
    }

    pub fn end(&self) -> Option<TimeCoordinate> {
        match &self.value {
            IntervalValue::Bounded { end, .. } => end.as_ref()?.coordinate(),
            IntervalValue::Duration {
                beginning,
                duration,
            } => {
                if let InstantValue::DateTime(value) = beginning.value() {
                    return TimeCoordinate::from_date_time(value.checked_add_duration(*duration)?);
                }
                beginning.coordinate()?.checked_add(
                    duration.months(),
                    f64::from(Double::from(duration.seconds())),
                )
            }
            IntervalValue::Description { start, unit } => {
                let (months, seconds) = unit.span();
                start.checked_add(months, seconds)
            }
        }
    }

    /// Resolved beginning and end of a proper interval, beginning strictly first.
    pub fn bounds(&self) -> Option<(TimeCoordinate, TimeCoordinate)> {
        let (beginning, end) = (self.beginning()?, self.end()?);
        (beginning < end).then_some((beginning, end))
    }

    /// Whether `instant` lies strictly inside this interval.
    pub fn contains_instant(&self, instant: &TimeInstant) -> bool {
        instant.inside(self)
    }

    /// The Allen relation from this interval to `other`, if both are resolved proper intervals.
    pub fn relation_to(&self, other: &Self) -> Option<AllenRelation> {
        AllenRelation::between(self, other)
    }

    /// Whether `relation` holds from this interval to `other`. `false` when unresolvable.
    pub fn relates(&self, relation: AllenRelation, other: &Self) -> bool {
        relation.holds(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    fn instant(local: &str, value: &str) -> TimeInstant {
        TimeInstant::from_date_time(node(local), value.parse().unwrap())
    }

    fn interval(beginning: &str, end: &str) -> TimeInterval {
        TimeInterval::bounded(
            node("interval"),
            Some(instant("beginning", beginning)),
            Some(instant("end", end)),
        )
        .unwrap()
    }

    #[test]
    fn containment_is_exclusive() {
        let interval = interval("2023-04-30T20:47:15Z", "2023-05-02T20:47:15Z");
        assert!(instant("i", "2023-05-01T20:47:15Z").inside(&interval));
        assert!(!instant("i", "2023-04-30T20:47:15Z").inside(&interval));
        assert!(!instant("i", "2023-05-02T20:47:15Z").inside(&interval));
        assert!(!interval.contains_instant(&instant("i", "2023-05-03T00:00:00Z")));
    }

    #[test]
    fn open_intervals_contain_nothing() {
        let open = TimeInterval::bounded(
            node("open"),
            Some(instant("beginning", "2023-01-01T00:00:00Z")),
            None,
        )
        .unwrap();
        assert!(!open.contains_instant(&instant("i", "2023-06-01T00:00:00Z")));
        assert_eq!(open.bounds(), None);
        assert!(TimeInterval::bounded(node("empty"), None, None).is_err());
    }

    #[test]
    fn durations_and_descriptions_resolve_their_end() {
        let with_duration = TimeInterval::with_duration(
            node("d"),
            instant("beginning", "2023-01-31T12:00:00Z"),
            "P1M1D".parse().unwrap(),
        );
        assert_eq!(
            with_duration.end(),
            Some(TimeCoordinate::new(2023, 3, 1, 12, 0, 0.).unwrap())
        );

        let may = TimeInterval::described(node("may"), TimeCoordinate::date(2023, 5, 1).unwrap(), TimeUnit::Month);
        assert_eq!(may.end(), Some(TimeCoordinate::date(2023, 6, 1).unwrap()));
        assert!(instant("i", "2023-05-31T23:59:59Z").inside(&may));
    }
}
