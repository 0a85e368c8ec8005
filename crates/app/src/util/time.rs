use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, Timelike, Utc};

pub fn hour_window() -> Duration {
    Duration::hours(1)
}

pub fn day_window() -> Duration {
    Duration::hours(24)
}

pub fn start_of_utc_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    start_of_utc_day(now) + Duration::days(1)
}

pub fn next_hour_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let hour_start = now
        .with_minute(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(now);
    hour_start + Duration::hours(1)
}

/// `YYYY-MM-DD` bucket used in daily storage keys.
pub fn date_bucket(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

pub fn format_instant(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn next_hour_start_truncates_then_advances() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 14, 37, 12).unwrap();
        assert_eq!(
            next_hour_start(now),
            Utc.with_ymd_and_hms(2025, 6, 1, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn next_hour_start_on_exact_hour_moves_forward() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 23, 0, 0).unwrap();
        assert_eq!(
            next_hour_start(now),
            Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn next_utc_midnight_crosses_month_end() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 18, 5, 0).unwrap();
        assert_eq!(
            next_utc_midnight(now),
            Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn date_bucket_formats_utc_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(date_bucket(now), "2025-03-09");
        assert_eq!(format_instant(now), "2025-03-09T23:59:59.000Z");
    }
}
