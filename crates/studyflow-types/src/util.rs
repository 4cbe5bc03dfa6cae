use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Utc};

/// Calendar date of a timestamp in the machine's local timezone.
///
/// Daily session caps and streaks are defined over local-midnight
/// windows, so all date collapsing goes through here.
pub fn local_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Hour of day (0-23) of a timestamp in the local timezone.
pub fn local_hour(ts: DateTime<Utc>) -> u32 {
    ts.with_timezone(&Local).hour()
}

/// Weekday index of a timestamp in the local timezone, Sunday = 0.
pub fn local_weekday(ts: DateTime<Utc>) -> usize {
    ts.with_timezone(&Local).weekday().num_days_from_sunday() as usize
}

/// Elapsed wall time between two instants, rounded to the nearest
/// whole minute. Negative spans clamp to zero.
pub fn elapsed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let secs = (end - start).num_seconds().max(0);
    ((secs as f64) / 60.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_elapsed_minutes_rounds_to_nearest() {
        let start = Utc::now();
        assert_eq!(elapsed_minutes(start, start + Duration::seconds(29)), 0);
        assert_eq!(elapsed_minutes(start, start + Duration::seconds(31)), 1);
        assert_eq!(elapsed_minutes(start, start + Duration::seconds(25 * 60)), 25);
        assert_eq!(
            elapsed_minutes(start, start + Duration::seconds(25 * 60 + 40)),
            26
        );
    }

    #[test]
    fn test_elapsed_minutes_clamps_negative_spans() {
        let start = Utc::now();
        assert_eq!(elapsed_minutes(start, start - Duration::seconds(120)), 0);
    }

    #[test]
    fn test_local_date_is_stable_within_an_hour() {
        // Noon UTC stays clear of local midnight for every real offset.
        let ts = chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(local_date(ts), local_date(ts + Duration::minutes(30)));
    }
}
