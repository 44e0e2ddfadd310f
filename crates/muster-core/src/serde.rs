// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::Serializer;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const WALL_CLOCK: &str = "%Y-%m-%d %H:%M:%S";

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Optional variant of [`to_rfc3339_ms`]; `None` becomes `null`.
pub fn to_rfc3339_ms_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => to_rfc3339_ms(dt, s),
        None => s.serialize_none(),
    }
}

/// Serialize a local wall-clock instant as `YYYY-MM-DD HH:MM:SS`.
pub fn to_wall_clock<S>(at: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&at.format(WALL_CLOCK))
}

/// Optional variant of [`to_wall_clock`]; `None` becomes `null`.
pub fn to_wall_clock_opt<S>(at: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match at {
        Some(at) => to_wall_clock(at, s),
        None => s.serialize_none(),
    }
}
