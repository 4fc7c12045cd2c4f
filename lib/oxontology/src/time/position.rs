use super::coordinate::TimeCoordinate;
use crate::error::{ConstructionError, TimeError};
use crate::vocab::time;
use oxrdf::{NamedNode, NamedNodeRef};

/// Seconds between the Unix epoch and the GPS epoch, 1980-01-06T00:00:00Z.
const GPS_EPOCH: f64 = 315_964_800.;

/// Year of "present" for geologic positions.
const GEOLOGIC_PRESENT: f64 = 1950.;

/// A temporal position reference system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionReferenceSystem {
    /// Seconds since 1970-01-01T00:00:00Z.
    UnixTime,
    /// Seconds since 1980-01-06T00:00:00Z, without leap second correction.
    GpsTime,
    /// Millions of years before 1950.
    GeologicTime,
    /// A system positions can not be resolved in.
    Other(NamedNode),
}

impl PositionReferenceSystem {
    pub fn from_iri(iri: NamedNodeRef<'_>) -> Self {
        if iri == time::UNIX_TIME {
            Self::UnixTime
        } else if iri == time::GPS_TIME {
            Self::GpsTime
        } else if iri == time::GEOLOGIC_TIME {
            Self::GeologicTime
        } else {
            Self::Other(iri.into_owned())
        }
    }

    pub fn iri(&self) -> NamedNodeRef<'_> {
        match self {
            Self::UnixTime => time::UNIX_TIME,
            Self::GpsTime => time::GPS_TIME,
            Self::GeologicTime => time::GEOLOGIC_TIME,
            Self::Other(iri) => iri.as_ref(),
        }
    }
}

/// A unit of temporal duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [Self; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Second => time::UNIT_SECOND,
            Self::Minute => time::UNIT_MINUTE,
            Self::Hour => time::UNIT_HOUR,
            Self::Day => time::UNIT_DAY,
            Self::Week => time::UNIT_WEEK,
            Self::Month => time::UNIT_MONTH,
            Self::Year => time::UNIT_YEAR,
        }
    }

    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.iri() == iri)
    }

    /// The unit as a number of months plus a number of seconds.
    pub fn span(self) -> (i64, f64) {
        match self {
            Self::Second => (0, 1.),
            Self::Minute => (0, 60.),
            Self::Hour => (0, 3_600.),
            Self::Day => (0, 86_400.),
            Self::Week => (0, 604_800.),
            Self::Month => (1, 0.),
            Self::Year => (12, 0.),
        }
    }
}

/// The value of a [`TimePosition`].
#[derive(Debug, Clone, PartialEq)]
pub enum PositionValue {
    Numeric(f64),
    Nominal(String),
}

/// A position in a reference system, `time:TimePosition`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePosition {
    trs: PositionReferenceSystem,
    value: PositionValue,
}

impl TimePosition {
    pub fn numeric(trs: PositionReferenceSystem, value: f64) -> Result<Self, TimeError> {
        if !value.is_finite() {
            return Err(TimeError::invalid_coordinate(
                "numericPosition",
                format!("{value} is not a finite number"),
            ));
        }
        Ok(Self {
            trs,
            value: PositionValue::Numeric(value),
        })
    }

    pub fn nominal(trs: PositionReferenceSystem, name: impl Into<String>) -> Result<Self, TimeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::empty("TimePosition", "nominalPosition").into());
        }
        Ok(Self {
            trs,
            value: PositionValue::Nominal(name),
        })
    }

    #[inline]
    pub fn trs(&self) -> &PositionReferenceSystem {
        &self.trs
    }

    #[inline]
    pub fn value(&self) -> &PositionValue {
        &self.value
    }

    /// The Gregorian coordinate of this position. `None` for nominal positions and unknown systems.
    pub fn to_coordinate(&self) -> Option<TimeCoordinate> {
        let PositionValue::Numeric(value) = self.value else {
            return None;
        };
        match self.trs {
            PositionReferenceSystem::UnixTime => TimeCoordinate::from_unix_seconds(value),
            PositionReferenceSystem::GpsTime => TimeCoordinate::from_unix_seconds(value + GPS_EPOCH),
            PositionReferenceSystem::GeologicTime => {
                let year = (GEOLOGIC_PRESENT - value * 1e6).floor();
                if year.abs() > 1e15 {
                    return None;
                }
                TimeCoordinate::date(year as i64, 1, 1).ok()
            }
            PositionReferenceSystem::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_positions_resolve() {
        let unix = TimePosition::numeric(PositionReferenceSystem::UnixTime, 86_400.5).unwrap();
        assert_eq!(
            unix.to_coordinate().unwrap(),
            TimeCoordinate::new(1970, 1, 2, 0, 0, 0.5).unwrap()
        );
        let gps = TimePosition::numeric(PositionReferenceSystem::GpsTime, 0.).unwrap();
        assert_eq!(gps.to_coordinate().unwrap(), TimeCoordinate::date(1980, 1, 6).unwrap());
        let chicxulub = TimePosition::numeric(PositionReferenceSystem::GeologicTime, 66.).unwrap();
        assert_eq!(chicxulub.to_coordinate().unwrap().year(), 1950 - 66_000_000);
    }

    #[test]
    fn unresolvable_positions() {
        let nominal = TimePosition::nominal(PositionReferenceSystem::GeologicTime, "Cretaceous").unwrap();
        assert_eq!(nominal.to_coordinate(), None);
        let other = TimePosition::numeric(
            PositionReferenceSystem::from_iri(NamedNodeRef::new_unchecked("http://example.org/trs")),
            1.,
        )
        .unwrap();
        assert_eq!(other.to_coordinate(), None);
        assert!(TimePosition::numeric(PositionReferenceSystem::UnixTime, f64::INFINITY).is_err());
        assert!(TimePosition::nominal(PositionReferenceSystem::UnixTime, "").is_err());
    }

    #[test]
    fn reference_systems_and_units_round_trip_through_iris() {
        for trs in [
            PositionReferenceSystem::UnixTime,
            PositionReferenceSystem::GpsTime,
            PositionReferenceSystem::GeologicTime,
        ] {
            assert_eq!(PositionReferenceSystem::from_iri(trs.iri()), trs);
        }
        for unit in TimeUnit::ALL {
            assert_eq!(TimeUnit::from_iri(unit.iri()), Some(unit));
        }
    }
}
