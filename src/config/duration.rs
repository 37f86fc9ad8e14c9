//! Duration strings used by the CLI and config file.
//!
//! Accepted forms: "500ms", "30s", "5m", "1h30m", "2d", or a bare number of seconds.
//! Units may be chained; whitespace around the value is ignored.

use std::time::Duration;

/// Parse a duration string like "5m", "1h30m", "250ms" or "90".
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("empty duration".to_string());
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        let secs: u64 = trimmed
            .parse()
            .map_err(|_| format!("invalid duration: '{s}'"))?;
        return non_zero(Duration::from_secs(secs), s);
    }

    let mut total = Duration::ZERO;
    let mut chars = trimmed.chars().peekable();
    while chars.peek().is_some() {
        let mut num = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
            num.push(c);
            chars.next();
        }
        let mut unit = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_alphabetic) {
            unit.push(c.to_ascii_lowercase());
            chars.next();
        }
        if num.is_empty() || unit.is_empty() {
            return Err(format!("invalid duration: '{s}' (expected e.g. 30s, 5m, 1h30m)"));
        }
        let n: u64 = num.parse().map_err(|_| format!("invalid duration: '{s}'"))?;
        let part = match unit.as_str() {
            "ms" => Duration::from_millis(n),
            "s" => Duration::from_secs(n),
            "m" => Duration::from_secs(n.saturating_mul(60)),
            "h" => Duration::from_secs(n.saturating_mul(3600)),
            "d" => Duration::from_secs(n.saturating_mul(86_400)),
            other => return Err(format!("invalid duration unit '{other}' in '{s}'")),
        };
        total = total.saturating_add(part);
    }

    non_zero(total, s)
}

fn non_zero(d: Duration, s: &str) -> Result<Duration, String> {
    if d.is_zero() {
        Err(format!("duration must be greater than zero: '{s}'"))
    } else {
        Ok(d)
    }
}
