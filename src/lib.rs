//! Week numbers counted from a chosen epoch date
//!
//! Week 0 begins on the epoch date and every following block of seven days
//! is the next week.  This is deliberately *not* ISO-8601 week numbering.
//! Alongside the week number, the crate provides the Monday-first day of the
//! week and a short `"<day> <month>"` label for display next to it.
//!
//! The free functions operate on plain [`time::Date`] values and never fail.
//! [`HostCalendar`] places instants on dates in a fixed UTC offset for hosts
//! that only have a clock reading to start from.
//!
//! ```
//! use time::macros::date;
//! use weekno::{day_of_week_index, short_date_label, week_number};
//!
//! let epoch = date!(2020 - 09 - 27);
//! let today = date!(2020 - 10 - 15);
//! assert_eq!(week_number(epoch, today), 2);
//! assert_eq!(day_of_week_index(today), 4);
//! assert_eq!(short_date_label(today), "15 October");
//! ```
mod calendar;
mod entry;
mod host;
pub use crate::calendar::{
    day_of_week_index, days_between, month_name, short_date_label, week_number, DAYS_IN_WEEK,
};
pub use crate::entry::WidgetEntry;
pub use crate::host::{CalendarComputationError, HostCalendar, FALLBACK_DAY_COUNT};
