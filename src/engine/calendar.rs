//! Business-calendar policy for the monthly closing cycle.
//!
//! Attendance and leave for a month stay editable until that month's
//! submission deadline: the first Friday of the following month, pushed to
//! the next Friday when the 1st itself falls on a Friday. Once the
//! deadline passes the period is closed and payroll for it can be cut.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::YearMonth;

/// The closing boundary of the reporting cycle active at a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosingWindow {
    /// First day of the reporting period (the prior calendar month).
    pub period_start: NaiveDate,
    /// Last day of the reporting period.
    pub period_end: NaiveDate,
    /// Submission deadline for the period, falling in the month after it.
    pub deadline: NaiveDate,
}

/// Pure date arithmetic for submission windows and deadlines.
#[derive(Debug, Clone, Copy)]
pub struct CalendarPolicy {
    edit_buffer_days: u32,
}

impl CalendarPolicy {
    /// Creates a policy with the given number of prior-month days that
    /// remain editable into the next month.
    pub fn new(edit_buffer_days: u32) -> Self {
        Self { edit_buffer_days }
    }

    /// The reporting cycle active at `reference`: the prior calendar month
    /// as the period, and its submission deadline in `reference`'s month.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use personnel_engine::engine::CalendarPolicy;
    ///
    /// let policy = CalendarPolicy::new(7);
    /// let window = policy.month_closing_window(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    /// assert_eq!(window.period_start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    /// assert_eq!(window.period_end, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
    /// assert_eq!(window.deadline, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
    /// ```
    pub fn month_closing_window(&self, reference: NaiveDate) -> ClosingWindow {
        let period = YearMonth::from_date(reference).pred();
        ClosingWindow {
            period_start: period.first_day(),
            period_end: period.last_day(),
            deadline: self.deadline_for(period),
        }
    }

    /// The submission deadline for a reporting period: the first Friday of
    /// the following month, or the Friday of the week after when the 1st
    /// is itself a Friday.
    pub fn deadline_for(&self, period: YearMonth) -> NaiveDate {
        first_friday_after_first(period.succ())
    }

    /// The range of dates currently accepting attendance/leave edits:
    /// from the last `edit_buffer_days` of the prior month through the end
    /// of `now`'s month.
    pub fn submission_window(&self, now: NaiveDate) -> (NaiveDate, NaiveDate) {
        let window = self.month_closing_window(now);
        let start = window.period_end - Duration::days(i64::from(self.edit_buffer_days));
        let end = YearMonth::from_date(now).last_day();
        (start, end)
    }

    /// Whether `date` may still be edited at `now`.
    ///
    /// True iff `date` lies inside [`Self::submission_window`] and `now`
    /// has not passed the deadline of `date`'s own month. A `now` equal to
    /// the deadline is still open.
    pub fn is_within_submission_window(&self, date: NaiveDate, now: NaiveDate) -> bool {
        let (start, end) = self.submission_window(now);
        if date < start || date > end {
            return false;
        }
        now <= self.deadline_for(YearMonth::from_date(date))
    }
}

/// The unique Friday among days 2 through 8 of the month.
fn first_friday_after_first(month: YearMonth) -> NaiveDate {
    (2..=8)
        .filter_map(|day| NaiveDate::from_ymd_opt(month.year(), month.month(), day))
        .find(|date| date.weekday() == Weekday::Fri)
        .expect("seven consecutive days contain a Friday")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn policy() -> CalendarPolicy {
        CalendarPolicy::new(7)
    }

    #[test]
    fn test_deadline_is_first_friday_of_following_month() {
        // June 2024 starts on a Saturday; its first Friday is the 7th.
        assert_eq!(policy().deadline_for(ym("202405")), make_date("2024-06-07"));
        // July 2024 starts on a Monday; its first Friday is the 5th.
        assert_eq!(policy().deadline_for(ym("202406")), make_date("2024-07-05"));
    }

    #[test]
    fn test_deadline_skips_a_week_when_the_first_is_friday() {
        // 2024-03-01 and 2024-11-01 are Fridays; the deadline moves to the 8th.
        assert_eq!(policy().deadline_for(ym("202402")), make_date("2024-03-08"));
        assert_eq!(policy().deadline_for(ym("202410")), make_date("2024-11-08"));
    }

    #[test]
    fn test_closing_window_reports_prior_month_period() {
        let window = policy().month_closing_window(make_date("2024-06-10"));
        assert_eq!(window.period_start, make_date("2024-05-01"));
        assert_eq!(window.period_end, make_date("2024-05-31"));
        assert_eq!(window.deadline, make_date("2024-06-07"));
    }

    #[test]
    fn test_closing_window_in_january_reports_prior_december() {
        let window = policy().month_closing_window(make_date("2024-01-15"));
        assert_eq!(window.period_start, make_date("2023-12-01"));
        assert_eq!(window.period_end, make_date("2023-12-31"));
        // January 2024 starts on a Monday; first Friday is the 5th.
        assert_eq!(window.deadline, make_date("2024-01-05"));
    }

    #[test]
    fn test_submission_window_spans_buffer_through_month_end() {
        let (start, end) = policy().submission_window(make_date("2024-06-10"));
        assert_eq!(start, make_date("2024-05-24"));
        assert_eq!(end, make_date("2024-06-30"));
    }

    #[test]
    fn test_current_month_date_is_editable() {
        assert!(
            policy().is_within_submission_window(make_date("2024-06-10"), make_date("2024-06-10"))
        );
        // Late in the month the current month stays open; its deadline is
        // in July and cannot have passed.
        assert!(
            policy().is_within_submission_window(make_date("2024-06-02"), make_date("2024-06-28"))
        );
    }

    #[test]
    fn test_prior_month_tail_editable_until_deadline() {
        let date = make_date("2024-05-28");
        assert!(policy().is_within_submission_window(date, make_date("2024-06-05")));
        assert!(!policy().is_within_submission_window(date, make_date("2024-06-10")));
    }

    #[test]
    fn test_deadline_day_itself_is_still_open() {
        let date = make_date("2024-05-28");
        assert!(policy().is_within_submission_window(date, make_date("2024-06-07")));
        assert!(!policy().is_within_submission_window(date, make_date("2024-06-08")));
    }

    #[test]
    fn test_prior_month_before_buffer_is_closed() {
        assert!(
            !policy().is_within_submission_window(make_date("2024-05-20"), make_date("2024-06-05"))
        );
    }

    #[test]
    fn test_future_month_is_not_editable() {
        assert!(
            !policy().is_within_submission_window(make_date("2024-07-01"), make_date("2024-06-28"))
        );
    }

    #[test]
    fn test_zero_buffer_closes_prior_month_immediately() {
        let tight = CalendarPolicy::new(0);
        // Only the prior month's last day remains within the range.
        assert!(tight.is_within_submission_window(make_date("2024-05-31"), make_date("2024-06-03")));
        assert!(!tight.is_within_submission_window(make_date("2024-05-30"), make_date("2024-06-03")));
    }
}
