//! The thirteen [Allen interval relations](https://www.w3.org/TR/owl-time/#fig-thirteen-elementary-possible-relations-between-time-periods-af-97).

use super::interval::TimeInterval;
use crate::vocab::time;
use oxrdf::NamedNodeRef;
use std::cmp::Ordering;
use std::fmt;

/// A basic relation between two proper intervals. Exactly one holds for any resolved pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllenRelation {
    Before,
    After,
    Meets,
    MetBy,
    Overlaps,
    OverlappedBy,
    Starts,
    StartedBy,
    During,
    Contains,
    Finishes,
    FinishedBy,
    Equals,
}

impl AllenRelation {
    pub const ALL: [Self; 13] = [
        Self::Before,
        Self::After,
        Self::Meets,
        Self::MetBy,
        Self::Overlaps,
        Self::OverlappedBy,
        Self::Starts,
        Self::StartedBy,
        Self::During,
        Self::Contains,
        Self::Finishes,
        Self::FinishedBy,
        Self::Equals,
    ];

    /// The relation from `b` to `a` when `self` holds from `a` to `b`.
    pub fn inverse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
            Self::Meets => Self::MetBy,
            Self::MetBy => Self::Meets,
            Self::Overlaps => Self::OverlappedBy,
            Self::OverlappedBy => Self::Overlaps,
            Self::Starts => Self::StartedBy,
            Self::StartedBy => Self::Starts,
            Self::During => Self::Contains,
            Self::Contains => Self::During,
            Self::Finishes => Self::FinishedBy,
            Self::FinishedBy => Self::Finishes,
            Self::Equals => Self::Equals,
        }
    }

    /// The OWL-Time property, e.g. `time:intervalBefore`.
    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Before => time::INTERVAL_BEFORE,
            Self::After => time::INTERVAL_AFTER,
            Self::Meets => time::INTERVAL_MEETS,
            Self::MetBy => time::INTERVAL_MET_BY,
            Self::Overlaps => time::INTERVAL_OVERLAPS,
            Self::OverlappedBy => time::INTERVAL_OVERLAPPED_BY,
            Self::Starts => time::INTERVAL_STARTS,
            Self::StartedBy => time::INTERVAL_STARTED_BY,
            Self::During => time::INTERVAL_DURING,
            Self::Contains => time::INTERVAL_CONTAINS,
            Self::Finishes => time::INTERVAL_FINISHES,
            Self::FinishedBy => time::INTERVAL_FINISHED_BY,
            Self::Equals => time::INTERVAL_EQUALS,
        }
    }

    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.iri() == iri)
    }

    /// Classifies a pair of intervals.
    ///
    /// Returns `None` unless both intervals resolve to a beginning strictly before their end.
    pub fn between(a: &TimeInterval, b: &TimeInterval) -> Option<Self> {
        let (a1, a2) = a.bounds()?;
        let (b1, b2) = b.bounds()?;
        Some(match (a1.cmp(&b1), a2.cmp(&b2)) {
            (Ordering::Equal, Ordering::Equal) => Self::Equals,
            (Ordering::Equal, Ordering::Less) => Self::Starts,
            (Ordering::Equal, Ordering::Greater) => Self::StartedBy,
            (Ordering::Greater, Ordering::Equal) => Self::Finishes,
            (Ordering::Less, Ordering::Equal) => Self::FinishedBy,
            (Ordering::Greater, Ordering::Less) => Self::During,
            (Ordering::Less, Ordering::Greater) => Self::Contains,
            (Ordering::Less, Ordering::Less) => match a2.cmp(&b1) {
                Ordering::Less => Self::Before,
                Ordering::Equal => Self::Meets,
                Ordering::Greater => Self::Overlaps,
            },
            (Ordering::Greater, Ordering::Greater) => match a1.cmp(&b2) {
                Ordering::Greater => Self::After,
                Ordering::Equal => Self::MetBy,
                Ordering::Less => Self::OverlappedBy,
            },
        })
    }

    /// Whether this relation holds from `a` to `b`. `false` when either is unresolvable.
    pub fn holds(self, a: &TimeInterval, b: &TimeInterval) -> bool {
        Self::between(a, b) == Some(self)
    }
}

impl fmt::Display for AllenRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iri = self.iri().as_str();
        f.write_str(iri.strip_prefix(time::NAMESPACE).unwrap_or(iri))
    }
}

/// A disjunction of Allen relations, as declared by OWL-Time properties.
///
/// `time:intervalIn` is {starts, during, finishes} and `time:intervalDisjoint` is
/// {before, after, meets, met by}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllenRelations(u16);

impl AllenRelations {
    pub const NONE: Self = Self(0);
    pub const ANY: Self = Self((1 << 13) - 1);

    pub fn of(relations: &[AllenRelation]) -> Self {
        relations
            .iter()
            .fold(Self::NONE, |set, relation| set.union(Self::single(*relation)))
    }

    pub fn single(relation: AllenRelation) -> Self {
        Self(1 << relation as u16)
    }

    /// The relations a property declares between two intervals.
    ///
    /// `time:before` and `time:after` are read as interval before and after.
    pub fn declared_by(property: NamedNodeRef<'_>) -> Option<Self> {
        if let Some(relation) = AllenRelation::from_iri(property) {
            return Some(Self::single(relation));
        }
        Some(if property == time::INTERVAL_IN {
            Self::of(&[
                AllenRelation::Starts,
                AllenRelation::During,
                AllenRelation::Finishes,
            ])
        } else if property == time::INTERVAL_DISJOINT {
            Self::of(&[
                AllenRelation::Before,
                AllenRelation::After,
                AllenRelation::Meets,
                AllenRelation::MetBy,
            ])
        } else if property == time::BEFORE {
            Self::single(AllenRelation::Before)
        } else if property == time::AFTER {
            Self::single(AllenRelation::After)
        } else {
            return None;
        })
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// The relations from `b` to `a`.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::of(
            &self
                .iter()
                .map(AllenRelation::inverse)
                .collect::<Vec<_>>(),
        )
    }

    pub fn contains(self, relation: AllenRelation) -> bool {
        self.0 & Self::single(relation).0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = AllenRelation> {
        AllenRelation::ALL
            .into_iter()
            .filter(move |relation| self.contains(*relation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::coordinate::TimeCoordinate;
    use crate::time::position::TimeUnit;
    use oxrdf::NamedNode;

    fn days(from: u32, to: u32) -> TimeInterval {
        let start = TimeCoordinate::date(2023, 1, from).unwrap();
        let span = TimeInterval::described(
            NamedNode::new_unchecked("http://example.org/span"),
            start.clone(),
            TimeUnit::Day,
        );
        if to == from + 1 {
            return span;
        }
        let end = start.checked_add(0, f64::from(to - from) * 86_400.).unwrap();
        TimeInterval::bounded(
            NamedNode::new_unchecked("http://example.org/span"),
            Some(super::super::instant::TimeInstant::new(
                NamedNode::new_unchecked("http://example.org/b"),
                super::super::instant::InstantValue::Description(start),
            )),
            Some(super::super::instant::TimeInstant::new(
                NamedNode::new_unchecked("http://example.org/e"),
                super::super::instant::InstantValue::Description(end),
            )),
        )
        .unwrap()
    }

    #[test]
    fn every_relation_is_reachable() {
        let reference = days(10, 20);
        let cases = [
            (days(1, 5), AllenRelation::Before),
            (days(25, 28), AllenRelation::After),
            (days(5, 10), AllenRelation::Meets),
            (days(20, 25), AllenRelation::MetBy),
            (days(5, 15), AllenRelation::Overlaps),
            (days(15, 25), AllenRelation::OverlappedBy),
            (days(10, 15), AllenRelation::Starts),
            (days(10, 25), AllenRelation::StartedBy),
            (days(12, 18), AllenRelation::During),
            (days(5, 25), AllenRelation::Contains),
            (days(15, 20), AllenRelation::Finishes),
            (days(5, 20), AllenRelation::FinishedBy),
            (days(10, 20), AllenRelation::Equals),
        ];
        for (interval, expected) in cases {
            assert_eq!(interval.relation_to(&reference), Some(expected));
            assert_eq!(reference.relation_to(&interval), Some(expected.inverse()));
            for relation in AllenRelation::ALL {
                assert_eq!(interval.relates(relation, &reference), relation == expected);
            }
        }
    }

    #[test]
    fn iris_round_trip() {
        for relation in AllenRelation::ALL {
            assert_eq!(AllenRelation::from_iri(relation.iri()), Some(relation));
            assert_eq!(relation.inverse().inverse(), relation);
        }
        assert_eq!(AllenRelation::MetBy.to_string(), "intervalMetBy");
    }

    #[test]
    fn relation_sets() {
        let inside = AllenRelations::declared_by(time::INTERVAL_IN).unwrap();
        assert!(inside.contains(AllenRelation::During));
        assert!(!inside.contains(AllenRelation::Equals));
        let outside = AllenRelations::declared_by(time::INTERVAL_DISJOINT).unwrap();
        assert!(inside.intersection(outside).is_empty());
        assert_eq!(
            inside.inverse(),
            AllenRelations::of(&[
                AllenRelation::StartedBy,
                AllenRelation::Contains,
                AllenRelation::FinishedBy
            ])
        );
        assert_eq!(AllenRelations::ANY.iter().count(), 13);
        assert_eq!(AllenRelations::declared_by(time::HAS_BEGINNING), None);
    }
}
