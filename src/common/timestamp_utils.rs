use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use std::fmt::Display;
use std::sync::OnceLock;

// Offset is sampled once; later host timezone changes are not observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn capture() -> Self {
        let offset = *Local::now().offset();
        log::debug!("Captured system UTC offset {}", offset);
        SystemClock { offset }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        SystemClock { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

static PROCESS_CLOCK: OnceLock<SystemClock> = OnceLock::new();

// For callers without an AppContext; the offset is captured on first call.
pub fn datetime_now() -> DateTime<FixedOffset> {
    PROCESS_CLOCK.get_or_init(SystemClock::capture).now()
}

// Format any timestamp with a strftime pattern
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>, format_str: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(format_str).to_string()
}

// Accepts "+HH:MM", "-HHMM", "+H" and "Z"/"UTC".
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match value.chars().next()? {
        '+' => (1, &value[1..]),
        '-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => (rest.get(..2)?, rest.get(2..)?),
        None => (rest, "0"),
    };
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 || hours > 23 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn now_carries_captured_offset() {
        let offset = FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap();
        let clock = SystemClock::with_offset(offset);
        for _ in 0..3 {
            let ts = clock.now();
            assert_eq!(*ts.offset(), offset);
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn now_is_current_instant() {
        let clock = SystemClock::with_offset(FixedOffset::east_opt(9 * 3600).unwrap());
        let before = Utc::now();
        let ts = clock.now();
        let after = Utc::now();
        let ts_utc = ts.with_timezone(&Utc);
        assert!(ts_utc >= before && ts_utc <= after);
    }

    #[test]
    fn captured_clock_matches_local_offset() {
        let clock = SystemClock::capture();
        assert_eq!(clock.offset(), *Local::now().offset());
    }

    #[test]
    fn process_clock_is_stable_across_calls() {
        let first = datetime_now();
        thread::sleep(Duration::from_millis(2));
        let second = datetime_now();
        assert_eq!(first.offset(), second.offset());
        assert!(second >= first);
    }

    #[test]
    fn format_timestamp_uses_pattern() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let ts = offset.with_ymd_and_hms(2023, 12, 31, 23, 59, 1).unwrap();
        assert_eq!(format_timestamp(&ts, "%Y-%m-%d %H:%M:%S %:z"), "2023-12-31 23:59:01 +01:00");
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_utc_offset("+02:00"), FixedOffset::east_opt(7200));
        assert_eq!(parse_utc_offset("-0530"), FixedOffset::west_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("+9"), FixedOffset::east_opt(9 * 3600));
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("02:00"), None);
        assert_eq!(parse_utc_offset("+02:75"), None);
        assert_eq!(parse_utc_offset("+30:00"), None);
        assert_eq!(parse_utc_offset(""), None);
    }

    #[test]
    fn multibyte_offset_input_is_rejected_not_sliced() {
        assert_eq!(parse_utc_offset("+1é1"), None);
        assert_eq!(parse_utc_offset("+é:00"), None);
        assert_eq!(parse_utc_offset("-ab"), None);
    }
}
