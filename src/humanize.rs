use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Parses an RFC 3339 timestamp, or a naive ISO-8601 one read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn humanize(date: DateTime<Utc>) -> String {
    humanize_at(Utc::now(), date)
}

/// Relative description of `date` as seen from `now`. Each unit is rounded
/// from the previous one, so 90 seconds reads as "2 minutes ago".
pub fn humanize_at(now: DateTime<Utc>, date: DateTime<Utc>) -> String {
    let seconds = ((now - date).num_milliseconds() as f64 / 1000.0).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();
    let days = (hours / 24.0).round();

    if seconds < 10.0 {
        "just now".to_string()
    } else if minutes < 1.0 {
        format!("{seconds} seconds ago")
    } else if minutes < 60.0 {
        format!("{minutes} minutes ago")
    } else if hours < 24.0 {
        format!("{hours} hours ago")
    } else if days < 7.0 {
        format!("{days} days ago")
    } else {
        absolute_date(date)
    }
}

/// Humanizes a raw `data-date` value, leaving unparseable input as it was.
pub fn humanize_raw_at(now: DateTime<Utc>, raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(date) => humanize_at(now, date),
        None => raw.to_string(),
    }
}

fn absolute_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Text for the footer year stamp.
pub fn year_stamp() -> String {
    year_stamp_at(Utc::now())
}

pub fn year_stamp_at(now: DateTime<Utc>) -> String {
    now.year().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 11, 15, 30, 0).unwrap()
    }

    #[test]
    fn buckets() {
        let now = now();
        assert_eq!(humanize_at(now, now - Duration::seconds(3)), "just now");
        assert_eq!(humanize_at(now, now - Duration::seconds(25)), "25 seconds ago");
        assert_eq!(humanize_at(now, now - Duration::minutes(5)), "5 minutes ago");
        assert_eq!(humanize_at(now, now - Duration::hours(3)), "3 hours ago");
        assert_eq!(humanize_at(now, now - Duration::days(2)), "2 days ago");
    }

    #[test]
    fn rounding_carries_between_units() {
        let now = now();
        assert_eq!(humanize_at(now, now - Duration::seconds(40)), "1 minutes ago");
        let almost_hour = Duration::minutes(59) + Duration::seconds(40);
        assert_eq!(humanize_at(now, now - almost_hour), "1 hours ago");
    }

    #[test]
    fn a_week_or_more_is_absolute() {
        let now = now();
        assert_eq!(humanize_at(now, now - Duration::days(8)), "January 3, 2025");
    }

    #[test]
    fn future_dates_read_as_just_now() {
        let now = now();
        assert_eq!(humanize_at(now, now + Duration::minutes(10)), "just now");
    }

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-01-03T12:00:00"), Some(expected));
        let fractional = parse_timestamp("2025-01-03T12:00:00.250000");
        assert_eq!(fractional.map(|d| d.timestamp()), Some(expected.timestamp()));
        assert_eq!(parse_timestamp("2025-01-03T14:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(humanize_raw_at(now(), "yesterday"), "yesterday");
    }

    #[test]
    fn year_stamp_is_four_digits() {
        assert_eq!(year_stamp_at(now()), "2025");
    }
}
