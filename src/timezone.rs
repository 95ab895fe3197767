use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Resolve the current UTC offset for a canonical timezone name such as
/// "Pacific/Auckland". Returns `None` when the name is not recognized.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod timezone_tests {
    use super::get_local_offset;

    #[test]
    fn resolves_canonical_timezone_name() {
        assert!(get_local_offset("Pacific/Auckland").is_some());
    }

    #[test]
    fn utc_resolves_to_zero_offset() {
        assert_eq!(
            get_local_offset("Etc/UTC"),
            Some(time::UtcOffset::UTC),
            "Etc/UTC should resolve to a zero offset"
        );
    }

    #[test]
    fn rejects_unknown_timezone_name() {
        assert_eq!(get_local_offset("Middle/Earth"), None);
    }
}
