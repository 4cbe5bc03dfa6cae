pub mod assignment;
pub mod plan;
pub mod session;
pub mod stats;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Parse a date argument: full RFC 3339, or a bare YYYY-MM-DD taken in
/// local time. Bare dates resolve to end of day for due dates and
/// upper bounds, start of day for lower bounds.
pub(crate) fn parse_date(input: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").with_context(|| {
        format!(
            "Unrecognized date: {} (expected YYYY-MM-DD or RFC 3339)",
            input
        )
    })?;
    let naive = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
    .context("invalid wall-clock time")?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("Date {} does not exist in the local timezone", input))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_rfc3339() {
        let ts = parse_date("2026-03-01T10:30:00Z", false).unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-03-01T10:30:00+00:00");
    }

    #[test]
    fn test_parse_date_bare_day_bounds() {
        let start = parse_date("2026-03-01", false).unwrap();
        let end = parse_date("2026-03-01", true).unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("next tuesday", false).is_err());
    }
}
