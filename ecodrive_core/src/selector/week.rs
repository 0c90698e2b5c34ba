use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

pub const DAYS_IN_WEEK: usize = 7;

/// Seven consecutive days starting on a Monday.
///
/// Only constructible through [`Week::containing`] and the shift methods, so
/// the Monday start always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Week {
    monday: NaiveDate,
}

/// Days to step back from `date` to reach the Monday of its week.
/// Sunday belongs to the week that started six days earlier.
pub fn offset_to_monday(date: NaiveDate) -> u64 {
    let weekday = date.weekday().num_days_from_sunday();
    if weekday == 0 { 6 } else { (weekday - 1) as u64 }
}

impl Week {
    pub fn containing(date: NaiveDate) -> Self {
        let monday = date - Days::new(offset_to_monday(date));
        Self { monday }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn sunday(&self) -> NaiveDate {
        self.monday + Days::new(DAYS_IN_WEEK as u64 - 1)
    }

    pub fn days(&self) -> [NaiveDate; DAYS_IN_WEEK] {
        std::array::from_fn(|i| self.monday + Days::new(i as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.monday..=self.sunday()).contains(&date)
    }

    pub fn previous(&self) -> Self {
        Self { monday: self.monday - Days::new(DAYS_IN_WEEK as u64) }
    }

    pub fn next(&self) -> Self {
        Self { monday: self.monday + Days::new(DAYS_IN_WEEK as u64) }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn wednesday_week() {
        let week = Week::containing(date(2025, 9, 17));
        let days = week.days();

        assert_eq!(days[0], date(2025, 9, 15));
        assert_eq!(days[6], date(2025, 9, 21));
        assert_eq!(week.sunday(), date(2025, 9, 21));
    }

    #[test]
    fn sunday_belongs_to_previous_monday() {
        assert_eq!(offset_to_monday(date(2025, 9, 21)), 6);
        assert_eq!(Week::containing(date(2025, 9, 21)).monday(), date(2025, 9, 15));
        assert_eq!(offset_to_monday(date(2025, 9, 15)), 0);
        assert_eq!(Week::containing(date(2025, 9, 15)).monday(), date(2025, 9, 15));
    }

    #[test]
    fn every_window_starts_monday_and_is_consecutive() {
        let mut day = date(2023, 12, 20);
        while day < date(2025, 3, 10) {
            let days = Week::containing(day).days();

            assert_eq!(days[0].weekday(), Weekday::Mon);
            assert!(days.contains(&day));
            for pair in days.windows(2) {
                assert_eq!(pair[0].succ_opt(), Some(pair[1]));
            }

            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn shifting_round_trips() {
        let week = Week::containing(date(2025, 12, 31));
        assert_eq!(week.next().previous(), week);
        assert_eq!(week.previous().next(), week);
        assert_eq!(week.next().monday(), date(2026, 1, 5));
        assert_eq!(week.next().monday().weekday(), Weekday::Mon);
    }

    #[test]
    fn contains_only_its_days() {
        let week = Week::containing(date(2025, 9, 17));
        assert!(week.contains(date(2025, 9, 15)));
        assert!(week.contains(date(2025, 9, 21)));
        assert!(!week.contains(date(2025, 9, 14)));
        assert!(!week.contains(date(2025, 9, 22)));
    }
}
