use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // +1d2h3m4s5ms, every component optional
    static ref RELATIVE_TS: Regex =
        Regex::new(r"^([+-])?(?:(\d+)d)?(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?(?:(\d+)ms)?$").unwrap();
}

/// Parses a duration token into milliseconds.
///
/// A bare integer is taken as milliseconds already. The compact relative
/// form used by dumpsys (`+1d2h3m4s5ms`) is also accepted. Negative or
/// overflowing values give `None`.
pub fn parse_relative_timestamp(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }

    let caps = RELATIVE_TS.captures(s)?;
    if caps.get(1).map(|m| m.as_str()) == Some("-") {
        return None;
    }

    let mut total = Duration::zero();
    let mut any = false;
    // (capture group, milliseconds per unit)
    let units: [(usize, i64); 5] = [
        (2, 86_400_000),
        (3, 3_600_000),
        (4, 60_000),
        (5, 1_000),
        (6, 1),
    ];
    for (group, unit_ms) in units {
        if let Some(m) = caps.get(group) {
            let n: i64 = m.as_str().parse().ok()?;
            let part = Duration::try_milliseconds(n.checked_mul(unit_ms)?)?;
            total = total.checked_add(&part)?;
            any = true;
        }
    }
    if !any {
        return None;
    }

    u64::try_from(total.num_milliseconds()).ok()
}

/// Formats milliseconds the way the report shows them: `1d 2h 3m 4s 5ms`.
///
/// Zero components are left out; a zero duration renders as `0ms`.
pub fn format_ts(ms: u64) -> String {
    let total = Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX));

    let days = total.num_days();
    let hours = total.num_hours() % 24;
    let minutes = total.num_minutes() % 60;
    let seconds = total.num_seconds() % 60;
    let millis = total.num_milliseconds() % 1000;

    let mut parts = Vec::new();
    for (value, unit) in [
        (days, "d"),
        (hours, "h"),
        (minutes, "m"),
        (seconds, "s"),
        (millis, "ms"),
    ] {
        if value > 0 {
            parts.push(format!("{value}{unit}"));
        }
    }

    if parts.is_empty() {
        "0ms".to_string()
    } else {
        parts.join(" ")
    }
}
