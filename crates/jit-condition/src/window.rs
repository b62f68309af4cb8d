//! Parser for the temporary-access window expression (spec §4.1, §4.5):
//!
//! ```text
//! request.time >= timestamp("<RFC3339>") && request.time < timestamp("<RFC3339>")
//! ```
//!
//! A post-activation binding may carry a trailing `&& <resource condition>`
//! preserved verbatim from the original eligibility condition.

use crate::error::ConditionError;
use chrono::{DateTime, Utc};
use jit_kernel::TimeSpan;
use regex::Regex;
use std::sync::LazyLock;

static WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)request\.time\s*>=\s*timestamp\(\s*"([^"]+)"\s*\)\s*&&\s*request\.time\s*<\s*timestamp\(\s*"([^"]+)"\s*\)(?:\s*&&\s*(.+))?"#,
    )
    .expect("static window regex is valid")
});

/// A parsed temporary-access window and any trailing resource condition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWindow {
    pub span: TimeSpan,
    pub trailing: Option<String>,
}

pub fn parse_window(expression: &str) -> Result<Option<RecognizedWindow>, ConditionError> {
    let Some(captures) = WINDOW_RE.captures(expression) else {
        return Ok(None);
    };

    let start_raw = &captures[1];
    let end_raw = &captures[2];
    let start = parse_timestamp(start_raw)?;
    let end = parse_timestamp(end_raw)?;

    let span = TimeSpan::new(start, end).map_err(|_| ConditionError::InvertedWindow {
        start: start_raw.to_string(),
        end: end_raw.to_string(),
    })?;

    let trailing = captures.get(3).map(|g| g.as_str().trim().to_string());

    Ok(Some(RecognizedWindow { span, trailing }))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ConditionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConditionError::MalformedTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_window() {
        let expr = r#"request.time >= timestamp("2026-01-01T00:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z")"#;
        let w = parse_window(expr).unwrap().unwrap();
        assert_eq!(w.trailing, None);
    }

    #[test]
    fn preserves_trailing_condition() {
        let expr = r#"request.time >= timestamp("2026-01-01T00:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z") && resource.region == "eu""#;
        let w = parse_window(expr).unwrap().unwrap();
        assert_eq!(w.trailing, Some(r#"resource.region == "eu""#.to_string()));
    }

    #[test]
    fn rejects_inverted_window() {
        let expr = r#"request.time >= timestamp("2026-01-01T02:00:00Z") && request.time < timestamp("2026-01-01T01:00:00Z")"#;
        assert!(matches!(
            parse_window(expr),
            Err(ConditionError::InvertedWindow { .. })
        ));
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let expr = r#"request.time >= timestamp("not-a-date") && request.time < timestamp("2026-01-01T01:00:00Z")"#;
        assert!(matches!(
            parse_window(expr),
            Err(ConditionError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn non_window_expression_yields_none() {
        assert_eq!(parse_window("resource.name == \"x\"").unwrap(), None);
    }
}
