use crate::calendar::{days_between, month_name, DAYS_IN_WEEK};
use thiserror::Error;
use time::{error::IndeterminateOffset, Date, OffsetDateTime, UtcOffset};

/// Day count substituted by [`HostCalendar::days_between()`] when either
/// instant cannot be placed on the calendar
pub const FALLBACK_DAY_COUNT: i64 = 4;

/// A calendar whose days begin and end at midnight in one fixed UTC offset.
///
/// Instants are always reduced to the calendar date they fall on before any
/// day arithmetic, so two instants on the same date are zero days apart no
/// matter their times of day.
///
/// Of the methods taking instants, the `try_*` ones report instants whose
/// dates the calendar cannot represent as errors, while `days_between()`,
/// `week_number()` and `short_date_label()` never fail: they substitute fixed
/// defaults (a day count of [`FALLBACK_DAY_COUNT`], or day & month 0) and log
/// a warning instead.  [`HostCalendar::local()`] and
/// [`HostCalendar::today()`] can also fail.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HostCalendar {
    offset: UtcOffset,
}

impl HostCalendar {
    pub fn new(offset: UtcOffset) -> HostCalendar {
        HostCalendar { offset }
    }

    pub fn utc() -> HostCalendar {
        HostCalendar::new(UtcOffset::UTC)
    }

    /// Returns a calendar using the system's current local UTC offset.
    ///
    /// On Unix this can only succeed while the process has a single thread.
    pub fn local() -> Result<HostCalendar, CalendarComputationError> {
        Ok(HostCalendar::new(UtcOffset::current_local_offset()?))
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns the date on which `instant` falls in this calendar
    pub fn try_date(&self, instant: OffsetDateTime) -> Result<Date, CalendarComputationError> {
        instant
            .checked_to_offset(self.offset)
            .map(OffsetDateTime::date)
            .ok_or(CalendarComputationError::Unrepresentable {
                instant,
                offset: self.offset,
            })
    }

    pub fn today(&self) -> Result<Date, CalendarComputationError> {
        self.try_date(OffsetDateTime::now_utc())
    }

    pub fn try_days_between(
        &self,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<i64, CalendarComputationError> {
        Ok(days_between(self.try_date(from)?, self.try_date(to)?))
    }

    /// Returns the signed number of calendar days from `from` to `to`, or
    /// [`FALLBACK_DAY_COUNT`] if either instant is outside the calendar
    pub fn days_between(&self, from: OffsetDateTime, to: OffsetDateTime) -> i64 {
        self.try_days_between(from, to).unwrap_or_else(|e| {
            log::warn!("{e}; assuming {FALLBACK_DAY_COUNT} days");
            FALLBACK_DAY_COUNT
        })
    }

    /// Returns the number of whole weeks from `epoch` to `reference`,
    /// truncated toward zero
    pub fn week_number(&self, epoch: OffsetDateTime, reference: OffsetDateTime) -> i64 {
        self.days_between(epoch, reference) / DAYS_IN_WEEK
    }

    /// Formats the date of `instant` as `"<day> <month name>"`.  If the
    /// instant is outside the calendar, both components are taken as 0,
    /// which gives `"0 "`.
    pub fn short_date_label(&self, instant: OffsetDateTime) -> String {
        let (day, month) = match self.try_date(instant) {
            Ok(date) => (date.day(), u8::from(date.month())),
            Err(e) => {
                log::warn!("{e}; using day 0 of month 0");
                (0, 0)
            }
        };
        format!("{day} {}", month_name(i64::from(month)))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CalendarComputationError {
    #[error("could not determine local UTC offset")]
    IndeterminateOffset(#[from] IndeterminateOffset),
    #[error("{instant} cannot be represented at UTC offset {offset}")]
    Unrepresentable {
        instant: OffsetDateTime,
        offset: UtcOffset,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset, time};

    fn end_of_time() -> OffsetDateTime {
        Date::MAX.with_time(time!(23:30)).assume_utc()
    }

    #[test]
    fn test_try_date_utc() {
        let cal = HostCalendar::utc();
        assert_eq!(
            cal.try_date(datetime!(2020-09-27 23:30 UTC)),
            Ok(date!(2020 - 09 - 27))
        );
    }

    #[test]
    fn test_try_date_crosses_midnight() {
        let cal = HostCalendar::new(offset!(+2));
        assert_eq!(
            cal.try_date(datetime!(2020-09-27 23:30 UTC)),
            Ok(date!(2020 - 09 - 28))
        );
        let cal = HostCalendar::new(offset!(-5));
        assert_eq!(
            cal.try_date(datetime!(2020-09-28 03:00 UTC)),
            Ok(date!(2020 - 09 - 27))
        );
    }

    #[test]
    fn test_try_date_unrepresentable() {
        let cal = HostCalendar::new(offset!(+1));
        assert_eq!(
            cal.try_date(end_of_time()),
            Err(CalendarComputationError::Unrepresentable {
                instant: end_of_time(),
                offset: offset!(+1),
            })
        );
    }

    #[test]
    fn test_days_between_uses_calendar_dates() {
        let cal = HostCalendar::utc();
        // Less than an hour apart, but on different dates
        assert_eq!(
            cal.days_between(
                datetime!(2020-09-27 23:30 UTC),
                datetime!(2020-09-28 00:15 UTC)
            ),
            1
        );
        // Almost a full day apart, but on the same date
        assert_eq!(
            cal.days_between(
                datetime!(2020-09-27 00:05 UTC),
                datetime!(2020-09-27 23:55 UTC)
            ),
            0
        );
        assert_eq!(
            cal.days_between(
                datetime!(2020-10-04 12:00 UTC),
                datetime!(2020-09-27 12:00 UTC)
            ),
            -7
        );
    }

    #[test]
    fn test_days_between_fallback() {
        let cal = HostCalendar::new(offset!(+1));
        let now = datetime!(2020-09-27 12:00 UTC);
        assert!(cal.try_days_between(now, end_of_time()).is_err());
        assert_eq!(cal.days_between(now, end_of_time()), FALLBACK_DAY_COUNT);
        assert_eq!(cal.days_between(end_of_time(), now), FALLBACK_DAY_COUNT);
    }

    #[test]
    fn test_week_number() {
        let cal = HostCalendar::new(offset!(+2));
        let epoch = datetime!(2020-09-27 15:00 +2);
        assert_eq!(cal.week_number(epoch, epoch), 0);
        assert_eq!(cal.week_number(epoch, datetime!(2020-10-04 00:00 +2)), 1);
        assert_eq!(cal.week_number(epoch, datetime!(2020-10-10 23:59 +2)), 1);
        assert_eq!(cal.week_number(epoch, datetime!(2020-10-11 00:00 +2)), 2);
        assert_eq!(cal.week_number(epoch, datetime!(2020-09-24 09:00 +2)), 0);
    }

    #[test]
    fn test_week_number_fallback() {
        let cal = HostCalendar::new(offset!(+1));
        let epoch = datetime!(2020-09-27 12:00 UTC);
        assert_eq!(cal.week_number(epoch, end_of_time()), 0);
    }

    #[test]
    fn test_short_date_label() {
        let cal = HostCalendar::new(offset!(+2));
        assert_eq!(
            cal.short_date_label(datetime!(2020-09-27 12:00 UTC)),
            "27 September"
        );
        assert_eq!(
            cal.short_date_label(datetime!(2020-09-30 22:30 UTC)),
            "1 October"
        );
    }

    #[test]
    fn test_short_date_label_fallback() {
        let cal = HostCalendar::new(offset!(+1));
        assert_eq!(cal.short_date_label(end_of_time()), "0 ");
    }

    #[test]
    fn test_today_is_fallible_but_succeeds_in_utc() {
        let before = OffsetDateTime::now_utc().date();
        let today: Result<Date, CalendarComputationError> = HostCalendar::utc().today();
        let after = OffsetDateTime::now_utc().date();
        let today = today.unwrap();
        assert!(
            today == before || today == after,
            "{today} is neither {before} nor {after}"
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(HostCalendar::utc().offset(), UtcOffset::UTC);
        assert_eq!(HostCalendar::new(offset!(-3)).offset(), offset!(-3));
    }
}
