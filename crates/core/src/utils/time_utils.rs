use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};

/// Source of wall-clock time in Unix seconds.
///
/// Validation of time windows and the Track sub-machine read the clock through
/// this trait so that tests can pin "now".
pub trait Clock: Send + Sync {
    fn now_seconds(&self) -> f64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_seconds(&self) -> f64 {
        Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_seconds(&self) -> f64 {
        self.0
    }
}

fn to_seconds<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.timestamp_millis() as f64 / 1000.0
}

/// Instant at `time` on the calendar day of `dt`, in the same timezone.
fn at_time_of_day<Tz: TimeZone>(dt: &DateTime<Tz>, time: NaiveTime) -> DateTime<Tz> {
    let naive = dt.date_naive().and_time(time);
    dt.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| dt.clone())
}

fn start_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    at_time_of_day(dt, NaiveTime::MIN)
}

fn end_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Tz> {
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    at_time_of_day(dt, time)
}

fn plus_days<Tz: TimeZone>(dt: &DateTime<Tz>, days: u32) -> DateTime<Tz> {
    dt.clone()
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or_else(|| dt.clone())
}

/// Computes a commitment window from "starting in N days, for M days".
///
/// Starting today runs from `now` until the start of the day `duration_days`
/// ahead. Starting later runs from the start of the first day until the end of
/// the last one.
pub fn window_from_offsets<Tz: TimeZone>(
    start_in_days: u32,
    duration_days: u32,
    now: &DateTime<Tz>,
) -> (f64, f64) {
    if start_in_days == 0 {
        let end = start_of_day(&plus_days(now, duration_days));
        (to_seconds(now), to_seconds(&end))
    } else {
        let start = start_of_day(&plus_days(now, start_in_days));
        let end = end_of_day(&plus_days(&start, duration_days));
        (to_seconds(&start), to_seconds(&end))
    }
}

/// One week from `now`, ending at 23:59 on the last day.
pub fn default_window<Tz: TimeZone>(now: &DateTime<Tz>) -> (f64, f64) {
    let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    let end = at_time_of_day(&plus_days(now, 7), time);
    (to_seconds(now), to_seconds(&end))
}

/// Renders a Unix-second timestamp for display, e.g. `Monday, March 4 2024 09:30`.
pub fn format_timestamp<Tz: TimeZone>(seconds: f64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let dt = DateTime::from_timestamp(seconds.floor() as i64, 0)?;
    Some(
        dt.with_timezone(tz)
            .format("%A, %B %-d %Y %H:%M")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_window_starting_today() {
        let now = utc(2024, 3, 4, 9, 30);
        let (start, end) = window_from_offsets(0, 7, &now);
        assert_eq!(start, now.timestamp() as f64);
        assert_eq!(end, utc(2024, 3, 11, 0, 0).timestamp() as f64);
    }

    #[test]
    fn test_window_starting_later() {
        let now = utc(2024, 3, 4, 9, 30);
        let (start, end) = window_from_offsets(2, 3, &now);
        assert_eq!(start, utc(2024, 3, 6, 0, 0).timestamp() as f64);
        assert_eq!(end, utc(2024, 3, 9, 23, 59).timestamp() as f64 + 59.0);
    }

    #[test]
    fn test_default_window() {
        let now = utc(2024, 3, 4, 9, 30);
        let (start, end) = default_window(&now);
        assert_eq!(start, now.timestamp() as f64);
        assert_eq!(end, utc(2024, 3, 11, 23, 59).timestamp() as f64);
    }

    #[test]
    fn test_format_timestamp() {
        let ts = utc(2024, 3, 4, 9, 30).timestamp() as f64;
        assert_eq!(
            format_timestamp(ts, &Utc).as_deref(),
            Some("Monday, March 4 2024 09:30")
        );
    }

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(42.5).now_seconds(), 42.5);
    }
}
