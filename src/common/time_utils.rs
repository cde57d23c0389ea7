use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::common::constants::POST_DATE_FORMAT;
use crate::error::Error;

/// Parse a post date in the blog's timezone.
///
/// The wire format carries no offset, only local wall-clock fields
/// ("Sat, 05 Aug 2006 14:08:37"), so the owning blog's zone qualifies the
/// parse. Ambiguous local times during a DST fold resolve to the earlier
/// instant.
pub fn parse_post_date(raw: &str, tz: Tz) -> Result<DateTime<Tz>, Error> {
    let naive = NaiveDateTime::parse_from_str(raw, POST_DATE_FORMAT)
        .map_err(|e| Error::MalformedPost(format!("invalid date '{}': {}", raw, e)))?;

    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        Error::MalformedPost(format!("date '{}' does not exist in zone {}", raw, tz.name()))
    })
}

/// Format a post date back to the wire layout.
///
/// Only local wall-clock fields are emitted; the offset is discarded, so
/// re-parsing under a different zone reinterprets the instant.
pub fn format_post_date(date: &DateTime<Tz>) -> String {
    date.format(POST_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL_CLOCK: &str = "Sat, 05 Aug 2006 14:08:37";

    #[test]
    fn test_parse_format_round_trip() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let date = parse_post_date(WALL_CLOCK, tz).unwrap();
        assert_eq!(format_post_date(&date), WALL_CLOCK);
    }

    #[test]
    fn test_parse_is_zone_qualified() {
        let eastern: Tz = "America/New_York".parse().unwrap();
        let pacific: Tz = "America/Los_Angeles".parse().unwrap();

        let east = parse_post_date(WALL_CLOCK, eastern).unwrap();
        let west = parse_post_date(WALL_CLOCK, pacific).unwrap();

        // Same wall clock, three hours apart as instants in August.
        assert_eq!(west.timestamp() - east.timestamp(), 3 * 3600);
    }

    #[test]
    fn test_parse_winter_date_uses_standard_offset() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let date = parse_post_date("Mon, 09 Jan 2006 09:00:00", tz).unwrap();
        assert_eq!(date.offset().to_string(), "EST");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let tz: Tz = "UTC".parse().unwrap();
        assert!(parse_post_date("not a date", tz).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_weekday() {
        let tz: Tz = "UTC".parse().unwrap();
        // 05 Aug 2006 was a Saturday.
        assert!(parse_post_date("Fri, 05 Aug 2006 14:08:37", tz).is_err());
    }
}
