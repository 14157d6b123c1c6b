//! Display formatting for costs, scores, commits, and timestamps

use chrono::{DateTime, Local, NaiveDateTime};

/// Dollar amount with four decimals; a missing cost renders as `$0.0000`
pub fn format_cost(cost: Option<f64>) -> String {
    format!("${:.4}", cost.unwrap_or(0.0))
}

/// Severity score as a percentage with one decimal (`0.42` → `42.0%`)
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => "-".to_string(),
    }
}

/// First eight characters of a commit identifier
pub fn short_commit(commit: &str) -> &str {
    match commit.char_indices().nth(8) {
        Some((idx, _)) => &commit[..idx],
        None => commit,
    }
}

/// Render a backend timestamp in local time.
///
/// RFC 3339 values are converted to the local zone. Naive values (the
/// backend's default) are shown as-is. Anything unparseable is returned
/// verbatim.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

/// [`format_timestamp`] for an optional value, `-` when absent
pub fn format_optional_timestamp(raw: Option<&str>) -> String {
    raw.map(format_timestamp).unwrap_or_else(|| "-".to_string())
}
