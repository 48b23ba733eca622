use crate::calendar::{day_of_week_index, short_date_label, week_number};
use time::Date;

/// Everything a week-number display needs for a single day
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct WidgetEntry {
    /// The day the entry describes
    pub date: Date,

    /// Whole weeks elapsed since the epoch
    pub week_number: i64,

    /// Monday = 1 through Sunday = 7
    pub day_of_week: u8,

    /// E.g., `"27 September"`
    pub label: String,
}

impl WidgetEntry {
    /// Computes the entry for `reference`, counting weeks from `epoch`
    pub fn new(epoch: Date, reference: Date) -> WidgetEntry {
        WidgetEntry {
            date: reference,
            week_number: week_number(epoch, reference),
            day_of_week: day_of_week_index(reference),
            label: short_date_label(reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_new() {
        let entry = WidgetEntry::new(date!(2020 - 09 - 27), date!(2020 - 10 - 15));
        assert_eq!(
            entry,
            WidgetEntry {
                date: date!(2020 - 10 - 15),
                week_number: 2,
                day_of_week: 4,
                label: String::from("15 October"),
            }
        );
    }

    #[test]
    fn test_new_at_epoch() {
        let entry = WidgetEntry::new(date!(2021 - 03 - 07), date!(2021 - 03 - 07));
        assert_eq!(entry.week_number, 0);
        assert_eq!(entry.day_of_week, 7);
        assert_eq!(entry.label, "7 March");
    }

    #[test]
    fn test_day_of_week_ignores_epoch() {
        let reference = date!(2021 - 03 - 08);
        let a = WidgetEntry::new(date!(2021 - 03 - 07), reference);
        let b = WidgetEntry::new(date!(2019 - 06 - 12), reference);
        assert_eq!(a.day_of_week, 1);
        assert_eq!(a.day_of_week, b.day_of_week);
        assert_ne!(a.week_number, b.week_number);
    }
}
