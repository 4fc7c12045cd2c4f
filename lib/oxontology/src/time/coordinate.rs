use super::calendar::Calendar;
use crate::error::TimeError;
use oxrdf::NamedNode;
use oxsdatatypes::{DateTime, Double, TimezoneOffset};
use std::cmp::Ordering;
use std::fmt;

const SECONDS_PER_DAY: f64 = 86_400.;

/// A position on a calendar clock.
///
/// Coordinates are totally ordered on (year, month, day, hour, minute, second); the
/// calendar they were read in does not take part in comparisons. Years follow the
/// astronomical numbering: year 0 is 1 BCE.
#[derive(Debug, Clone)]
pub struct TimeCoordinate {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
    calendar: Option<NamedNode>,
}

impl TimeCoordinate {
    /// Builds a Gregorian coordinate, checking every component.
    pub fn new(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let mut coordinate = Self::in_calendar(
            Calendar::gregorian(),
            year,
            month,
            day,
            hour,
            minute,
            second,
        )?;
        coordinate.calendar = None;
        Ok(coordinate)
    }

    /// Midnight of a Gregorian date.
    pub fn date(year: i64, month: u32, day: u32) -> Result<Self, TimeError> {
        Self::new(year, month, day, 0, 0, 0.)
    }

    /// Builds a coordinate of the given calendar, checking every component against its metrics.
    pub fn in_calendar(
        calendar: &Calendar,
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let metrics = calendar.metrics();
        if !(1..=metrics.months_per_year()).contains(&month) {
            return Err(TimeError::invalid_coordinate(
                "month",
                format!("{month} is not in 1..={}", metrics.months_per_year()),
            ));
        }
        let days = metrics.days_in_month(year, month);
        if !(1..=days).contains(&day) {
            return Err(TimeError::invalid_coordinate(
                "day",
                format!("{day} is not in 1..={days}"),
            ));
        }
        for (value, limit, component) in [
            (hour, metrics.hours_per_day(), "hour"),
            (minute, metrics.minutes_per_hour(), "minute"),
        ] {
            if value >= limit {
                return Err(TimeError::invalid_coordinate(
                    component,
                    format!("{value} is not below {limit}"),
                ));
            }
        }
        if !second.is_finite() || second < 0. || second >= f64::from(metrics.seconds_per_minute()) {
            return Err(TimeError::invalid_coordinate(
                "second",
                format!("{second} is not in [0, {})", metrics.seconds_per_minute()),
            ));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            calendar: Some(calendar.iri().into_owned()),
        })
    }

    /// Builds a Gregorian coordinate from components that may overflow, carrying the excess.
    ///
    /// `normalized(2023, 13, 32, 0, 0, 0.)` is 2024-02-01. Returns `None` on non-finite seconds
    /// or if the result is out of range.
    pub fn normalized(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: f64,
    ) -> Option<Self> {
        let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
        let first = days_from_civil(months.div_euclid(12), u32::try_from(months.rem_euclid(12) + 1).ok()?, 1)?;
        let days = first.checked_add(day.checked_sub(1)?)?;
        let seconds = days as f64 * SECONDS_PER_DAY
            + hour as f64 * 3600.
            + minute as f64 * 60.
            + second;
        Self::from_unix_seconds(seconds)
    }

    /// The Gregorian UTC coordinate of a number of seconds since 1970-01-01T00:00:00Z.
    pub fn from_unix_seconds(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() {
            return None;
        }
        let days = (seconds / SECONDS_PER_DAY).floor();
        if days.abs() > 1e15 {
            return None;
        }
        let remainder = seconds - days * SECONDS_PER_DAY;
        let (year, month, day) = civil_from_days(days as i64)?;
        let hour = (remainder / 3600.).floor().clamp(0., 23.);
        let minute = ((remainder - hour * 3600.) / 60.).floor().clamp(0., 59.);
        let second = (remainder - hour * 3600. - minute * 60.).clamp(0., 59.999_999_999);
        Some(Self {
            year,
            month,
            day,
            hour: hour as u32,
            minute: minute as u32,
            second,
            calendar: None,
        })
    }

    /// Seconds since 1970-01-01T00:00:00Z. `None` for non-Gregorian coordinates.
    pub fn to_unix_seconds(&self) -> Option<f64> {
        if !self.is_gregorian() {
            return None;
        }
        let days = days_from_civil(self.year, self.month, self.day)?;
        Some(
            days as f64 * SECONDS_PER_DAY
                + f64::from(self.hour) * 3600.
                + f64::from(self.minute) * 60.
                + self.second,
        )
    }

    /// The UTC coordinate of an `xsd:dateTime`. Values without timezone are read as UTC.
    pub fn from_date_time(value: DateTime) -> Option<Self> {
        let value = if value.timezone_offset().is_some() {
            value.adjust(Some(TimezoneOffset::UTC))?
        } else {
            value
        };
        Some(Self {
            year: value.year(),
            month: value.month().into(),
            day: value.day().into(),
            hour: value.hour().into(),
            minute: value.minute().into(),
            second: f64::from(Double::from(value.second())),
            calendar: None,
        })
    }

    /// Adds a number of months, then a number of seconds. Gregorian coordinates only.
    ///
    /// Adding months keeps the day of month, clamped to the length of the target month.
    pub fn checked_add(&self, months: i64, seconds: f64) -> Option<Self> {
        if !self.is_gregorian() {
            return None;
        }
        let total = self
            .year
            .checked_mul(12)?
            .checked_add(i64::from(self.month) - 1)?
            .checked_add(months)?;
        let year = total.div_euclid(12);
        let month = u32::try_from(total.rem_euclid(12) + 1).ok()?;
        let day = self
            .day
            .min(Calendar::gregorian().metrics().days_in_month(year, month));
        let shifted = Self {
            year,
            month,
            day,
            ..self.clone()
        };
        Self::from_unix_seconds(shifted.to_unix_seconds()? + seconds)
    }

    #[inline]
    pub fn year(&self) -> i64 {
        self.year
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    #[inline]
    pub fn second(&self) -> f64 {
        self.second
    }

    /// The calendar this coordinate was built in. `None` means Gregorian.
    #[inline]
    pub fn calendar(&self) -> Option<&NamedNode> {
        self.calendar.as_ref()
    }

    pub fn is_gregorian(&self) -> bool {
        self.calendar
            .as_ref()
            .is_none_or(|iri| *iri == Calendar::gregorian().iri())
    }
}

impl Ord for TimeCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day, self.hour, self.minute)
            .cmp(&(other.year, other.month, other.day, other.hour, other.minute))
            .then_with(|| self.second.total_cmp(&other.second))
    }
}

impl PartialOrd for TimeCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimeCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeCoordinate {}

impl fmt::Display for TimeCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "{:05}", self.year)?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:",
            self.month, self.day, self.hour, self.minute
        )?;
        if self.second.fract() == 0. {
            write!(f, "{:02.0}", self.second)
        } else {
            write!(f, "{:06.3}", self.second)
        }
    }
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> Option<i64> {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year.rem_euclid(400);
    let month = i64::from(month);
    let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5
        + i64::from(day)
        - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era.checked_mul(146_097)?
        .checked_add(day_of_era)?
        .checked_sub(719_468)
}

/// The proleptic Gregorian date of a number of days since 1970-01-01.
fn civil_from_days(days: i64) -> Option<(i64, u32, u32)> {
    let days = days.checked_add(719_468)?;
    let era = days.div_euclid(146_097);
    let day_of_era = days.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = era.checked_mul(400)?.checked_add(year_of_era)?;
    let year = if month <= 2 { year + 1 } else { year };
    Some((year, u32::try_from(month).ok()?, u32::try_from(day).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::calendar::CalendarMetrics;

    #[test]
    fn total_order_includes_negative_years() {
        let bce = TimeCoordinate::date(-44, 3, 15).unwrap();
        let ce = TimeCoordinate::date(1, 1, 1).unwrap();
        let late = TimeCoordinate::new(1, 1, 1, 0, 0, 0.5).unwrap();
        assert!(bce < ce);
        assert!(ce < late);
        assert_eq!(bce.to_string(), "-0044-03-15T00:00:00");
        assert_eq!(late.to_string(), "0001-01-01T00:00:00.500");
    }

    #[test]
    fn calendar_is_not_compared() {
        let calendar = Calendar::new(
            oxrdf::NamedNode::new_unchecked("http://example.org/calendar"),
            CalendarMetrics::new(vec![30; 12], 24, 60, 60).unwrap(),
        );
        let custom = TimeCoordinate::in_calendar(&calendar, 2023, 2, 30, 0, 0, 0.).unwrap();
        let gregorian = TimeCoordinate::date(2023, 2, 28).unwrap();
        assert!(gregorian < custom);
        assert!(!custom.is_gregorian());
        assert_eq!(custom.to_unix_seconds(), None);
        assert!(TimeCoordinate::date(2023, 2, 30).is_err());
        assert_eq!(
            TimeCoordinate::in_calendar(Calendar::gregorian(), 2023, 2, 28, 0, 0, 0.).unwrap(),
            gregorian
        );
    }

    #[test]
    fn components_are_checked() {
        assert!(matches!(
            TimeCoordinate::new(2023, 13, 1, 0, 0, 0.),
            Err(TimeError::InvalidCoordinate { component: "month", .. })
        ));
        assert!(TimeCoordinate::new(2023, 1, 1, 24, 0, 0.).is_err());
        assert!(TimeCoordinate::new(2023, 1, 1, 0, 60, 0.).is_err());
        assert!(TimeCoordinate::new(2023, 1, 1, 0, 0, 60.).is_err());
        assert!(TimeCoordinate::new(2023, 1, 1, 0, 0, f64::NAN).is_err());
        assert!(TimeCoordinate::new(2024, 2, 29, 23, 59, 59.5).is_ok());
    }

    #[test]
    fn unix_seconds() {
        let epoch = TimeCoordinate::from_unix_seconds(0.).unwrap();
        assert_eq!(epoch, TimeCoordinate::date(1970, 1, 1).unwrap());
        let moment = TimeCoordinate::new(2023, 5, 1, 20, 47, 15.).unwrap();
        assert_eq!(moment.to_unix_seconds(), Some(1_682_974_035.));
        assert_eq!(TimeCoordinate::from_unix_seconds(1_682_974_035.).unwrap(), moment);
        assert_eq!(
            TimeCoordinate::from_unix_seconds(-1.).unwrap(),
            TimeCoordinate::new(1969, 12, 31, 23, 59, 59.).unwrap()
        );
    }

    #[test]
    fn normalization_carries_overflow() {
        assert_eq!(
            TimeCoordinate::normalized(2023, 13, 32, 0, 0, 0.).unwrap(),
            TimeCoordinate::date(2024, 2, 1).unwrap()
        );
        assert_eq!(
            TimeCoordinate::normalized(2023, 12, 31, 23, 59, 75.).unwrap(),
            TimeCoordinate::new(2024, 1, 1, 0, 0, 15.).unwrap()
        );
    }

    #[test]
    fn date_times_are_read_in_utc() {
        let value: DateTime = "2023-05-01T22:47:15+02:00".parse().unwrap();
        assert_eq!(
            TimeCoordinate::from_date_time(value).unwrap(),
            TimeCoordinate::new(2023, 5, 1, 20, 47, 15.).unwrap()
        );
    }

    #[test]
    fn month_arithmetic_clamps_days() {
        let end_of_january = TimeCoordinate::date(2023, 1, 31).unwrap();
        assert_eq!(
            end_of_january.checked_add(1, 0.).unwrap(),
            TimeCoordinate::date(2023, 2, 28).unwrap()
        );
        assert_eq!(
            end_of_january.checked_add(-1, 86_400.).unwrap(),
            TimeCoordinate::date(2023, 1, 1).unwrap()
        );
    }
}
