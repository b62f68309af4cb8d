use super::time_span::TimeSpan;
use chrono::{Duration, TimeZone, Utc};

fn t(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

#[test]
fn rejects_end_before_start() {
    assert!(TimeSpan::new(t(10), t(5)).is_err());
}

#[test]
fn is_valid_checks_inclusive_bounds() {
    let span = TimeSpan::new(t(0), t(100)).unwrap();
    assert!(span.is_valid(t(0)));
    assert!(span.is_valid(t(100)));
    assert!(span.is_valid(t(50)));
    assert!(!span.is_valid(t(101)));
    assert!(!span.is_valid(t(-1)));
}

#[test]
fn from_duration_derives_end() {
    let span = TimeSpan::from_duration(t(0), Duration::minutes(30)).unwrap();
    assert_eq!(span.end(), t(30 * 60));
    assert_eq!(span.duration(), Duration::minutes(30));
}
