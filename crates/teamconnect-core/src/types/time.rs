//! Relative timestamp rendering for activity feeds.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Placeholders the server renders instead of a timestamp.
const PLACEHOLDERS: [&str; 2] = ["Never", "N/A"];

/// Render `then` relative to `now`: "Just now", "N minutes ago",
/// "N hours ago", or the calendar date once a day has passed.
pub fn format_relative<Tz>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let diff = now.clone().signed_duration_since(then.clone());

    if diff.num_seconds() < 60 {
        return "Just now".to_string();
    }

    let minutes = diff.num_minutes();
    if minutes < 60 {
        return format!("{minutes} minutes ago");
    }

    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{hours} hours ago");
    }

    then.format("%-m/%-d/%Y").to_string()
}

/// Parse a server timestamp and render it relative to `now`.
///
/// Accepts RFC 3339 and the server's naive ISO-8601 form
/// (`2024-05-01T09:30:00.123456`, interpreted as local time). Placeholders
/// and unparseable text are returned unchanged.
pub fn format_timestamp(text: &str, now: &DateTime<Local>) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed) {
        return text.to_string();
    }

    match parse_timestamp(trimmed) {
        Some(then) => format_relative(&then, now),
        None => text.to_string(),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn at(secs_ago: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        (now - Duration::seconds(secs_ago), now)
    }

    #[test]
    fn test_just_now() {
        let (then, now) = at(59);
        assert_eq!(format_relative(&then, &now), "Just now");
    }

    #[test]
    fn test_future_is_just_now() {
        let (then, now) = at(-300);
        assert_eq!(format_relative(&then, &now), "Just now");
    }

    #[test]
    fn test_minutes_and_hours() {
        let (then, now) = at(60);
        assert_eq!(format_relative(&then, &now), "1 minutes ago");
        let (then, now) = at(45 * 60 + 30);
        assert_eq!(format_relative(&then, &now), "45 minutes ago");
        let (then, now) = at(3 * 3600 + 59);
        assert_eq!(format_relative(&then, &now), "3 hours ago");
        let (then, now) = at(3600);
        assert_eq!(format_relative(&then, &now), "1 hours ago");
    }

    #[test]
    fn test_older_than_a_day_shows_date() {
        let (then, now) = at(2 * 86_400);
        assert_eq!(format_relative(&then, &now), "4/29/2024");
    }

    #[test]
    fn test_placeholders_pass_through() {
        let now = Local::now();
        assert_eq!(format_timestamp("Never", &now), "Never");
        assert_eq!(format_timestamp("N/A", &now), "N/A");
        assert_eq!(format_timestamp("", &now), "");
        assert_eq!(format_timestamp("yesterday-ish", &now), "yesterday-ish");
    }

    #[test]
    fn test_naive_server_timestamp() {
        let now = Local::now();
        let then = (now - Duration::minutes(5)).naive_local();
        let text = then.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        assert_eq!(format_timestamp(&text, &now), "5 minutes ago");
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let now = Local::now();
        let text = (now - Duration::hours(2)).to_rfc3339();
        assert_eq!(format_timestamp(&text, &now), "2 hours ago");
    }
}
