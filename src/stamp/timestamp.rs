use chrono::{DateTime, Local, TimeZone};
use chrono_tz::Tz;
use std::env;

use crate::stamp::error::StampError;

/// Calendar rendering used for `BUILD_TIMESTAMP_FMT`.
pub const TIMESTAMP_FORMAT: &str = "%c %Z";

pub fn parse_epoch_seconds(raw: &str) -> Result<i64, StampError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| StampError::InvalidTimestamp(raw.to_string()))
}

/// Formats epoch seconds in the local time zone, `%Z` being the zone
/// abbreviation (`UTC`, `EST`, `CEST`, ...).
///
/// Zones that cannot be named (a POSIX-style `TZ` such as `EST5EDT,M3.2.0,M11.1.0`)
/// fall back to chrono's `Local`, which renders `%Z` as a numeric offset.
pub fn format_build_timestamp(raw: &str) -> Result<String, StampError> {
    match local_zone() {
        Some(tz) => format_in(raw, &tz),
        None => format_in(raw, &Local),
    }
}

/// Same as [`format_build_timestamp`] with an explicit zone.
pub fn format_in<Z>(raw: &str, tz: &Z) -> Result<String, StampError>
where
    Z: TimeZone,
    Z::Offset: std::fmt::Display,
{
    let secs = parse_epoch_seconds(raw)?;
    let utc = DateTime::from_timestamp(secs, 0).ok_or(StampError::TimestampOutOfRange(secs))?;
    Ok(utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
}

/// `TZ` wins when set; otherwise the system zone.
pub fn local_zone() -> Option<Tz> {
    match env::var("TZ") {
        Ok(value) if !value.is_empty() => zone_from_tz_value(&value),
        _ => iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok()),
    }
}

/// Accepts `Europe/Berlin`, `:Europe/Berlin` and `/usr/share/zoneinfo/Europe/Berlin`.
pub fn zone_from_tz_value(value: &str) -> Option<Tz> {
    let name = value.strip_prefix(':').unwrap_or(value);
    let name = match name.rfind("zoneinfo/") {
        Some(idx) => &name[idx + "zoneinfo/".len()..],
        None => name,
    };
    name.parse::<Tz>().ok()
}
