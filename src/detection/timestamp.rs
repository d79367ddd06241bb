//! Syslog timestamp parsing
//!
//! Syslog prefixes carry no year, so a reference year is supplied. Month
//! names are matched explicitly rather than through the C locale, and the
//! result is computed in UTC so it does not depend on the host timezone.

use chrono::NaiveDate;

/// Year assumed when none is configured
pub const DEFAULT_YEAR: i32 = 2021;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const SECONDS_PER_DAY: i64 = 86_400;

/// Convert `"Mon DD HH:MM:SS"` to seconds since the Unix epoch.
///
/// Parsing never fails. Unrecognised fields fall back to January, day 1 and
/// midnight, and out-of-range values roll over into the next unit, so bad
/// input produces an unreliable value rather than an error.
pub fn to_seconds(timestamp: &str, year: i32) -> i64 {
    let mut fields = timestamp.split_whitespace();
    let month = fields.next().and_then(month_number).unwrap_or(1);
    let day = fields
        .next()
        .and_then(|d| d.parse::<u32>().ok())
        .map(i64::from)
        .unwrap_or(1);
    let (hours, minutes, seconds) = fields.next().map(parse_clock).unwrap_or((0, 0, 0));

    let month_start = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return 0,
    };
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let days = month_start.signed_duration_since(epoch).num_days() + day - 1;

    days * SECONDS_PER_DAY + hours * 3600 + minutes * 60 + seconds
}

/// 1-based month for an English month name or abbreviation, any case
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|abbrev| lower.starts_with(abbrev))
        .map(|index| index as u32 + 1)
}

fn parse_clock(clock: &str) -> (i64, i64, i64) {
    let mut parts = clock
        .split(':')
        .map(|part| part.parse::<u32>().map(i64::from).unwrap_or(0));
    let hours = parts.next().unwrap_or(0);
    let minutes = parts.next().unwrap_or(0);
    let seconds = parts.next().unwrap_or(0);
    (hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_year() {
        assert_eq!(to_seconds("Jan 01 00:00:00", 2021), 1_609_459_200);
    }

    #[test]
    fn test_known_timestamp() {
        assert_eq!(to_seconds("Aug 29 11:01:01", 2021), 1_630_234_861);
    }

    #[test]
    fn test_year_is_configurable() {
        let a = to_seconds("Mar 01 00:00:00", 2020);
        let b = to_seconds("Mar 01 00:00:00", 2021);
        // 2020 is a leap year
        assert_eq!(b - a, 365 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_seconds_resolution() {
        let first = to_seconds("Jun 10 03:32:36", DEFAULT_YEAR);
        let second = to_seconds("Jun 10 03:32:41", DEFAULT_YEAR);
        assert_eq!(second - first, 5);
    }

    #[test]
    fn test_month_boundary() {
        let end = to_seconds("Jan 31 23:59:59", DEFAULT_YEAR);
        let start = to_seconds("Feb 01 00:00:00", DEFAULT_YEAR);
        assert_eq!(start - end, 1);
    }

    #[test]
    fn test_space_padded_day_and_full_month_name() {
        assert_eq!(
            to_seconds("Jun  1 03:32:36", DEFAULT_YEAR),
            to_seconds("June 01 03:32:36", DEFAULT_YEAR)
        );
        assert_eq!(
            to_seconds("jun 01 03:32:36", DEFAULT_YEAR),
            to_seconds("JUN 01 03:32:36", DEFAULT_YEAR)
        );
    }

    #[test]
    fn test_malformed_input_does_not_fail() {
        let start_of_year = to_seconds("Jan 01 00:00:00", DEFAULT_YEAR);
        assert_eq!(to_seconds("garbage", DEFAULT_YEAR), start_of_year);
        assert_eq!(to_seconds("", DEFAULT_YEAR), start_of_year);
        // Out-of-range values roll over instead of being rejected
        assert_eq!(
            to_seconds("Feb 30 00:00:00", DEFAULT_YEAR),
            to_seconds("Mar 02 00:00:00", DEFAULT_YEAR)
        );
        assert_eq!(
            to_seconds("Jun 10 03:32:xx", DEFAULT_YEAR),
            to_seconds("Jun 10 03:32:00", DEFAULT_YEAR)
        );
    }
}
