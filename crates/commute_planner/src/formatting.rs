use std::sync::LazyLock;

use regex::Regex;

const MILES_PER_KILOMETER: f64 = 0.621371;

static HOURS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*hour").expect("valid hours pattern"));
static MINUTES_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*min").expect("valid minutes pattern"));
static MILES_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*mi").expect("valid miles pattern"));

/// Parses a Routes API duration such as `"1834s"` into whole seconds.
pub fn parse_seconds(value: &str) -> Option<u64> {
    let number = value.trim().trim_end_matches('s');
    number
        .parse::<u64>()
        .ok()
        .or_else(|| number.parse::<f64>().ok().map(|seconds| seconds as u64))
}

/// `"{h} hour(s) {m} min"`, or `"{m} min"` under an hour. Zero minutes are
/// left out once there is an hour component.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours == 0 {
        return format!("{} min", minutes);
    }

    let mut text = format!("{} hour{}", hours, if hours > 1 { "s" } else { "" });
    if minutes > 0 {
        text.push_str(&format!(" {} min", minutes));
    }
    text
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `"{mi} mi ({km} km)"`. Miles are derived from the rounded kilometers.
pub fn format_distance(meters: u64) -> String {
    let kilometers = round_one_decimal(meters as f64 / 1000.0);
    let miles = round_one_decimal(kilometers * MILES_PER_KILOMETER);

    format!("{:.1} mi ({:.1} km)", miles, kilometers)
}

/// Recovers total minutes from any formatted duration, including the
/// directions service's own text (`"1 hour 5 mins"`).
pub fn duration_minutes_from_text(text: &str) -> u32 {
    let capture = |pattern: &Regex| {
        pattern
            .captures(text)
            .and_then(|captures| captures[1].parse::<u32>().ok())
            .unwrap_or(0)
    };

    capture(&HOURS_TOKEN) * 60 + capture(&MINUTES_TOKEN)
}

/// Recovers miles from a formatted distance; 0 when no mile figure is present.
pub fn distance_miles_from_text(text: &str) -> f64 {
    let text = text.replace(',', "");
    MILES_TOKEN
        .captures(&text)
        .and_then(|captures| captures[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("5400s"), Some(5400));
        assert_eq!(parse_seconds("0s"), Some(0));
        assert_eq!(parse_seconds("12.7s"), Some(12));
        assert_eq!(parse_seconds("soon"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5400), "1 hour 30 min");
        assert_eq!(format_duration(7200), "2 hours");
        assert_eq!(format_duration(7320), "2 hours 2 min");
        assert_eq!(format_duration(1500), "25 min");
        assert_eq!(format_duration(59), "0 min");
    }

    #[test]
    fn test_duration_round_trip() {
        assert_eq!(duration_minutes_from_text(&format_duration(5400)), 90);
        assert_eq!(duration_minutes_from_text("2 hours"), 120);
        assert_eq!(duration_minutes_from_text("1 hour 5 mins"), 65);
        assert_eq!(duration_minutes_from_text("25 mins"), 25);
        assert_eq!(duration_minutes_from_text("n/a"), 0);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(10000), "6.2 mi (10.0 km)");
        assert_eq!(format_distance(1609), "1.0 mi (1.6 km)");
        assert_eq!(format_distance(0), "0.0 mi (0.0 km)");
    }

    #[test]
    fn test_distance_miles_from_text() {
        assert_eq!(distance_miles_from_text("6.2 mi (10.0 km)"), 6.2);
        assert_eq!(distance_miles_from_text("12 mi"), 12.0);
        assert_eq!(distance_miles_from_text("1,204 mi"), 1204.0);
        assert_eq!(distance_miles_from_text("850 ft"), 0.0);
    }
}
