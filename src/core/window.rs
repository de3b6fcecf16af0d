//! Calendar window boundaries
//!
//! Daily and weekly rules aggregate history over a half-open window whose
//! upper bound is the evaluated request's own timestamp and whose lower bound
//! is computed here. Both lower bounds are exclusive.
//!
//! The day bound sits one second before midnight so that a load stamped at
//! exactly midnight falls inside the window. The week bound is Monday midnight
//! itself, so a load stamped at exactly Monday 00:00:00 falls outside it.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Offset, TimeZone};

/// Exclusive lower bound of the daily window containing `t`
///
/// Returns one second before midnight at the start of `t`'s calendar day,
/// in `t`'s time zone.
pub fn day_window_start<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    start_of_day(t, t.date_naive()) - Duration::seconds(1)
}

/// Exclusive lower bound of the weekly window containing `t`
///
/// Returns midnight of the Monday on or before `t`'s calendar day, in `t`'s
/// time zone.
pub fn week_window_start<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let date = t.date_naive();
    let days_since_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(days_since_monday))
        .unwrap_or(date);
    start_of_day(t, monday)
}

/// Midnight of `date` in the time zone of `t`
fn start_of_day<Tz: TimeZone>(t: &DateTime<Tz>, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match t.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start,
        // Local midnight skipped by a DST jump: anchor on t's own offset.
        None => {
            let offset = Duration::seconds(i64::from(t.offset().fix().local_minus_utc()));
            DateTime::from_naive_utc_and_offset(midnight - offset, t.offset().clone())
        }
    }
}
