use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

use super::error::TodoError;

/// Point in time a task is due. Stored as local wall-clock time, no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDateTime);

impl DueDate {
    pub fn new(when: NaiveDateTime) -> Self {
        Self(when)
    }

    /// 23:59 of the current local day
    pub fn end_of_today() -> Self {
        Self::end_of_day(Local::now().date_naive())
    }

    /// 23:59 of the next local day
    pub fn end_of_tomorrow() -> Self {
        let mut due = Self::end_of_today();
        due.postpone_one_day();
        due
    }

    pub fn end_of_day(date: NaiveDate) -> Self {
        // 23:59:00 always exists
        let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
        Self(date.and_time(time))
    }

    /// Build from calendar components. `month` is zero-based (0 = January),
    /// matching the persisted file format.
    pub fn from_components(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, TodoError> {
        let date = month
            .checked_add(1)
            .and_then(|month1| NaiveDate::from_ymd_opt(year, month1, day))
            .ok_or_else(|| {
                TodoError::InvalidDate(format!("year {} month0 {} day {}", year, month, day))
            })?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TodoError::InvalidDate(format!("{:02}:{:02}", hour, minute)))?;
        Ok(Self(date.and_time(time)))
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.0
    }

    /// Keep the day, replace the time of day.
    pub fn set_due_time(&mut self, hour: u32, minute: u32) -> Result<(), TodoError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TodoError::InvalidDate(format!("{:02}:{:02}", hour, minute)))?;
        self.0 = self.0.date().and_time(time);
        Ok(())
    }

    pub fn postpone_one_day(&mut self) {
        self.0 += Duration::days(1);
    }

    pub fn postpone_one_week(&mut self) {
        self.0 += Duration::weeks(1);
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Local::now().naive_local())
    }

    pub fn is_due_today(&self) -> bool {
        self.is_due_on(Local::now().date_naive())
    }

    pub fn is_due_tomorrow(&self) -> bool {
        match Local::now().date_naive().succ_opt() {
            Some(tomorrow) => self.is_due_on(tomorrow),
            None => false,
        }
    }

    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        self.0 < now
    }

    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.0.date() == day
    }

    /// Calendar components as (year, zero-based month, day, hour, minute).
    pub fn components(&self) -> (i32, u32, u32, u32, u32) {
        use chrono::Datelike;
        (
            self.0.year(),
            self.0.month0(),
            self.0.day(),
            self.0.hour(),
            self.0.minute(),
        )
    }
}

impl From<NaiveDateTime> for DueDate {
    fn from(when: NaiveDateTime) -> Self {
        Self(when)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a %b %d %Y %I:%M %p"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_components_are_zero_based_month() {
        let due = DueDate::from_components(2019, 0, 20, 20, 0).unwrap();
        assert_eq!(due.date_time(), at(2019, 1, 20, 20, 0));
        assert_eq!(due.components(), (2019, 0, 20, 20, 0));
    }

    #[test]
    fn test_invalid_components() {
        assert!(matches!(
            DueDate::from_components(2019, 1, 30, 0, 0),
            Err(TodoError::InvalidDate(_))
        ));
        assert!(DueDate::from_components(2019, 0, 1, 24, 0).is_err());
    }

    #[test]
    fn test_month_at_type_limit_is_invalid() {
        assert!(matches!(
            DueDate::from_components(2019, u32::MAX, 1, 0, 0),
            Err(TodoError::InvalidDate(_))
        ));
        assert!(DueDate::from_components(2019, 12, 1, 0, 0).is_err());
    }

    #[test]
    fn test_display() {
        let due = DueDate::new(at(2019, 1, 20, 20, 0));
        assert_eq!(due.to_string(), "Sun Jan 20 2019 08:00 PM");
    }

    #[test]
    fn test_postpone_and_set_time() {
        let mut due = DueDate::new(at(2019, 12, 31, 23, 59));
        due.postpone_one_day();
        assert_eq!(due.date_time(), at(2020, 1, 1, 23, 59));
        due.postpone_one_week();
        assert_eq!(due.date_time(), at(2020, 1, 8, 23, 59));
        due.set_due_time(9, 30).unwrap();
        assert_eq!(due.date_time(), at(2020, 1, 8, 9, 30));
        assert!(due.set_due_time(9, 60).is_err());
        assert_eq!(due.date_time(), at(2020, 1, 8, 9, 30));
    }

    #[test]
    fn test_overdue_and_ordering() {
        let early = DueDate::new(at(2020, 1, 1, 8, 0));
        let late = DueDate::new(at(2020, 1, 2, 8, 0));
        assert!(early < late);
        assert!(early.is_overdue_at(at(2020, 1, 1, 9, 0)));
        assert!(!late.is_overdue_at(at(2020, 1, 1, 9, 0)));
        assert!(late.is_due_on(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()));
    }

    #[test]
    fn test_end_of_today() {
        let due = DueDate::end_of_today();
        assert!(due.is_due_today());
        assert!(DueDate::end_of_tomorrow().is_due_tomorrow());
        assert_eq!(due.date_time().hour(), 23);
        assert_eq!(due.date_time().minute(), 59);
    }
}
