use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parse a UTC offset such as `Z`, `+08:00`, `-0700` or `+05`.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    if tz.is_empty() || tz.eq_ignore_ascii_case("z") || tz.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match tz.as_bytes()[0] {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a timestamp. Strings carrying their own offset keep it; naive
/// strings (and bare dates, at midnight) are placed in `fallback`.
pub fn parse_timestamp(s: &str, fallback: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let zoned = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return fallback.from_local_datetime(&naive).single();
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    fallback
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .single()
}

pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// "Monday, January 1, 2024"
pub fn format_full_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%A, %B %-d, %Y").to_string()
}

/// "9:00 AM"
pub fn format_short_time(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// Percentage with at most one decimal, trailing zeros trimmed: `66.7%`, `50%`.
pub fn format_percent(proportion: f64) -> String {
    let formatted = format!("{:.1}", proportion * 100.0);
    let trimmed = formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted);
    format!("{trimmed}%")
}

pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}
