//! Time-bucket classification for due items.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate};

/// Display-grouping category for a due item relative to a reference
/// instant.
///
/// Exactly one bucket applies to any due timestamp; classification is a
/// pure function of the timestamp and the injected reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Due strictly before the reference instant, on an earlier calendar
    /// day.
    Overdue,
    /// Due on the reference instant's calendar day, at any time of day.
    Today,
    /// Due after today but on or before the coming Sunday.
    ThisWeek {
        /// Day-group key: the due date truncated to calendar-day
        /// granularity.
        day: NaiveDate,
    },
    /// Due after the coming Sunday.
    Future,
}

impl Bucket {
    /// Classifies a due timestamp against the reference instant.
    ///
    /// Calendar-date equality wins over strict time comparison: an item
    /// due earlier today is `Today`, never `Overdue`, even though its
    /// timestamp lies in the past.
    #[must_use]
    pub fn classify(due: DateTime<Local>, now: DateTime<Local>) -> Self {
        let today = now.date_naive();
        let due_day = due.date_naive();

        if due < now && due_day != today {
            Self::Overdue
        } else if due_day == today {
            Self::Today
        } else if due_day <= end_of_week(today) {
            Self::ThisWeek { day: due_day }
        } else {
            Self::Future
        }
    }
}

/// The coming Sunday, the inclusive upper bound of the `ThisWeek` window.
///
/// `today + (7 - weekday_index)` with Sunday indexed 0, so a Sunday run
/// extends the window to the next Sunday.
fn end_of_week(today: NaiveDate) -> NaiveDate {
    let days_to_sunday = 7 - u64::from(today.weekday().num_days_from_sunday());
    today + Days::new(days_to_sunday)
}
