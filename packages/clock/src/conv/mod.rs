//! Conversions between clock timestamps and the RFC 3339 text used on the
//! tracker wire.
use chrono::{DateTime, SecondsFormat, Utc};
use lanswarm_primitives::DurationSinceUnixEpoch;

/// Formats a timestamp as RFC 3339 in UTC, for example
/// `1970-01-01T00:00:00Z` for the epoch.
///
/// Returns `None` if the timestamp does not fit a `DateTime<Utc>`.
#[must_use]
pub fn timestamp_to_rfc3339(timestamp: DurationSinceUnixEpoch) -> Option<String> {
    timestamp_to_datetime_utc(timestamp).map(|datetime| datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn timestamp_to_datetime_utc(timestamp: DurationSinceUnixEpoch) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(timestamp.as_secs()).ok()?, timestamp.subsec_nanos())
}
