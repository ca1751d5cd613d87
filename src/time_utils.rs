use chrono::TimeZone;
use std::fmt::Display;

/// Format a chart time (seconds since epoch) as `HH:MM:SS` in `tz`.
///
/// The browser passes `chrono::Local`, which follows the page's offset.
pub fn format_tick_mark<Tz>(seconds: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_opt(seconds, 0).single().map(|time| time.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::format_tick_mark;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn format_is_zero_padded_utc() {
        assert_eq!(format_tick_mark(0, &Utc).as_deref(), Some("00:00:00"));
        assert_eq!(format_tick_mark(3_723, &Utc).as_deref(), Some("01:02:03"));
    }

    #[test]
    fn format_follows_offset() {
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(format_tick_mark(1_700_000_000, &plus_three).as_deref(), Some("01:13:20"));
    }
}
