use crate::error::TimeError;
use crate::vocab::time;
use oxrdf::{NamedNode, NamedNodeRef};
use std::sync::LazyLock;

/// The shape of a calendar: months, days and clock units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetrics {
    days_per_month: Vec<u32>,
    leap_month: Option<u32>,
    hours_per_day: u32,
    minutes_per_hour: u32,
    seconds_per_minute: u32,
}

impl CalendarMetrics {
    /// Builds metrics from the length of each month, in order.
    ///
    /// Every count must be positive.
    pub fn new(
        days_per_month: Vec<u32>,
        hours_per_day: u32,
        minutes_per_hour: u32,
        seconds_per_minute: u32,
    ) -> Result<Self, TimeError> {
        if days_per_month.is_empty() {
            return Err(TimeError::invalid_calendar("a calendar needs at least one month"));
        }
        if let Some(month) = days_per_month.iter().position(|days| *days == 0) {
            return Err(TimeError::invalid_calendar(format!(
                "month {} has no day",
                month + 1
            )));
        }
        for (value, name) in [
            (hours_per_day, "hours per day"),
            (minutes_per_hour, "minutes per hour"),
            (seconds_per_minute, "seconds per minute"),
        ] {
            if value == 0 {
                return Err(TimeError::invalid_calendar(format!("{name} must be positive")));
            }
        }
        Ok(Self {
            days_per_month,
            leap_month: None,
            hours_per_day,
            minutes_per_hour,
            seconds_per_minute,
        })
    }

    /// Adds one day to `month` in Gregorian leap years.
    #[must_use]
    fn with_gregorian_leap_month(mut self, month: u32) -> Self {
        self.leap_month = Some(month);
        self
    }

    #[inline]
    pub fn months_per_year(&self) -> u32 {
        u32::try_from(self.days_per_month.len()).unwrap_or(u32::MAX)
    }

    /// The number of days of a month, leap days included. 0 if the month does not exist.
    pub fn days_in_month(&self, year: i64, month: u32) -> u32 {
        let Some(days) = month
            .checked_sub(1)
            .and_then(|i| self.days_per_month.get(i as usize))
        else {
            return 0;
        };
        if self.leap_month == Some(month) && is_gregorian_leap_year(year) {
            days + 1
        } else {
            *days
        }
    }

    #[inline]
    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    #[inline]
    pub fn minutes_per_hour(&self) -> u32 {
        self.minutes_per_hour
    }

    #[inline]
    pub fn seconds_per_minute(&self) -> u32 {
        self.seconds_per_minute
    }
}

pub(super) fn is_gregorian_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// A calendar-clock reference system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    iri: NamedNode,
    metrics: CalendarMetrics,
}

static GREGORIAN: LazyLock<Calendar> = LazyLock::new(|| Calendar {
    iri: time::GREGORIAN.into_owned(),
    metrics: CalendarMetrics {
        days_per_month: vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
        leap_month: None,
        hours_per_day: 24,
        minutes_per_hour: 60,
        seconds_per_minute: 60,
    }
    .with_gregorian_leap_month(2),
});

impl Calendar {
    /// A custom calendar identified by `iri`.
    pub fn new(iri: NamedNode, metrics: CalendarMetrics) -> Self {
        Self { iri, metrics }
    }

    /// The Gregorian calendar with a 24 hour clock.
    pub fn gregorian() -> &'static Self {
        &GREGORIAN
    }

    #[inline]
    pub fn iri(&self) -> NamedNodeRef<'_> {
        self.iri.as_ref()
    }

    #[inline]
    pub fn metrics(&self) -> &CalendarMetrics {
        &self.metrics
    }

    pub fn is_gregorian(&self) -> bool {
        self.iri == time::GREGORIAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_leap_years() {
        let metrics = Calendar::gregorian().metrics();
        assert_eq!(metrics.days_in_month(2023, 2), 28);
        assert_eq!(metrics.days_in_month(2024, 2), 29);
        assert_eq!(metrics.days_in_month(1900, 2), 28);
        assert_eq!(metrics.days_in_month(2000, 2), 29);
        assert_eq!(metrics.days_in_month(-4, 2), 29);
        assert_eq!(metrics.days_in_month(2023, 13), 0);
        assert_eq!(metrics.days_in_month(2023, 0), 0);
        assert_eq!(metrics.months_per_year(), 12);
    }

    #[test]
    fn invalid_metrics_are_rejected() {
        assert!(CalendarMetrics::new(Vec::new(), 24, 60, 60).is_err());
        assert!(CalendarMetrics::new(vec![30, 0], 24, 60, 60).is_err());
        assert!(matches!(
            CalendarMetrics::new(vec![30; 13], 24, 0, 60),
            Err(TimeError::InvalidCalendar { message }) if message.contains("minutes")
        ));
        let metrics = CalendarMetrics::new(vec![30; 12], 10, 100, 100).unwrap();
        assert_eq!(metrics.days_in_month(2024, 2), 30);
    }
}
