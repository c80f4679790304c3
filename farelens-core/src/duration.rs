/// Parse a provider duration token (`PT5H30M`, `PT45M`, `PT2H`) into total
/// minutes.
///
/// A missing hour or minute component counts as zero. Input that is not a
/// `PT` token at all yields 0 — a silent degrade, not an error; callers must
/// tolerate zero durations from malformed upstream data.
pub fn parse_duration_minutes(token: &str) -> u32 {
    let Some(rest) = token.trim().strip_prefix("PT") else {
        return 0;
    };

    let mut minutes = 0u32;
    let mut digits = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if let Ok(value) = digits.parse::<u32>() {
            match ch {
                'H' => minutes = minutes.saturating_add(value.saturating_mul(60)),
                'M' => minutes = minutes.saturating_add(value),
                _ => {}
            }
        }
        digits.clear();
    }
    minutes
}

/// Render minutes as the compact `5h 30m` form used in result rows.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_token() {
        assert_eq!(parse_duration_minutes("PT5H30M"), 330);
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(parse_duration_minutes("PT45M"), 45);
    }

    #[test]
    fn test_hours_only() {
        assert_eq!(parse_duration_minutes("PT2H"), 120);
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        assert_eq!(parse_duration_minutes("garbage"), 0);
        assert_eq!(parse_duration_minutes(""), 0);
        assert_eq!(parse_duration_minutes("PT"), 0);
        assert_eq!(parse_duration_minutes("5H30M"), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(330), "5h 30m");
        assert_eq!(format_duration(45), "0h 45m");
        assert_eq!(format_duration(120), "2h 0m");
    }
}
