use time::{Date, Weekday};

pub const DAYS_IN_WEEK: i64 = 7;

static MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) trait WeekdayExt {
    /// Position of the weekday in a Monday-first week, starting at 1
    fn index1(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index1(&self) -> u8 {
        // Sunday-first ordinal, 1..=7
        match self.number_from_sunday() {
            1 => 7,
            n => n - 1,
        }
    }
}

/// Returns the signed number of days from `from` to `to`.  The result is
/// positive if `to` is the later date.
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Returns the number of whole weeks elapsed from `epoch` to `reference`.
///
/// This is not ISO-8601 week numbering: week 0 is the week starting on
/// `epoch`.  The division truncates toward zero, so a reference up to six
/// days *before* the epoch also lands in week 0.
pub fn week_number(epoch: Date, reference: Date) -> i64 {
    days_between(epoch, reference) / DAYS_IN_WEEK
}

/// Returns the day of the week of `reference`, numbered from Monday = 1 to
/// Sunday = 7.
pub fn day_of_week_index(reference: Date) -> u8 {
    reference.weekday().index1()
}

/// Formats `reference` as `"<day> <month name>"`, e.g. `"27 September"`
pub fn short_date_label(reference: Date) -> String {
    let month = month_name(i64::from(u8::from(reference.month())));
    format!("{} {month}", reference.day())
}

/// Returns the English name of month number `month` (1 = January), or an
/// empty string if `month` is not in `1..=12`.
pub fn month_name(month: i64) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTH_NAMES.get(i))
        .copied()
        .unwrap_or_default()
}
