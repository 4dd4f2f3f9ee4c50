//! Calendar date, clock time and byte size labels.

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Long calendar date, e.g. `1 January 2024`.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-d %B %Y").to_string()
}

/// 24-hour clock time, e.g. `09:05`.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

/// Human-readable byte size in base-1024 units.
///
/// Values keep at most two decimals with trailing zeros dropped; anything
/// past terabytes stays in `TB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::{format_date, format_file_size, format_time};
    use chrono::{TimeZone, Utc};

    #[test]
    fn file_size_picks_largest_whole_unit() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 1024 * 1024 / 4), "5.25 MB");
    }

    #[test]
    fn file_size_caps_at_terabytes() {
        assert_eq!(format_file_size(1024_u64.pow(5)), "1024 TB");
    }

    #[test]
    fn date_and_time_labels() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 9, 5, 0).unwrap();
        assert_eq!(format_date(ts), "1 January 2024");
        assert_eq!(format_time(ts), "09:05");
    }
}
