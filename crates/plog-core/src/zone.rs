//! The fixed CST zone.
//!
//! Every timestamp plog renders, in log lines and in backup file names, uses
//! a UTC+8 offset named `CST`. The zone is a process-wide constant and is
//! independent of the host's `TZ` setting.

use chrono::{DateTime, FixedOffset, Utc};
use once_cell::sync::Lazy;

/// Name of the zone, appended to timestamps rendered by the tracing backend.
pub const ZONE_NAME: &str = "CST";

/// Offset of the zone east of UTC.
pub const OFFSET_SECS: i32 = 8 * 3600;

/// The CST offset.
pub static CST: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(OFFSET_SECS).expect("+08:00 is within range"));

/// Layout of the timestamp at the start of each log line.
pub const LINE_TIMESTAMP: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// Current time in CST.
pub fn now() -> DateTime<FixedOffset> {
    to_cst(Utc::now())
}

/// Convert a UTC timestamp to CST.
pub fn to_cst(timestamp: DateTime<Utc>) -> DateTime<FixedOffset> {
    timestamp.with_timezone(&*CST)
}

/// Render `timestamp` the way log lines start.
pub fn line_timestamp(timestamp: DateTime<FixedOffset>) -> String {
    timestamp.format(LINE_TIMESTAMP).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_is_plus_eight() {
        assert_eq!(CST.local_minus_utc(), 8 * 3600);
        assert_eq!(now().offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_to_cst_shifts_wall_clock() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 0).unwrap();
        let cst = to_cst(utc);
        assert_eq!(line_timestamp(cst), "2024/03/02 04:30:00.000");
        assert_eq!(cst, utc);
    }
}
