use chrono::NaiveDate;

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Share of the schedule that has elapsed by `today`, in `0.0..=100.0`.
///
/// A zero-length schedule reads as 0% before its start date and 100% from
/// the start date on.
pub fn time_progress(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> f64 {
    let total = days_between(start, end);
    let elapsed = days_between(start, today);

    if total <= 0 {
        return if elapsed < 0 { 0.0 } else { 100.0 };
    }

    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Round a percentage for display.
pub fn round_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
