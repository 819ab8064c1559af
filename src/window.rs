// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve the recent-activity cutoff instant and the effective "now" (with a test override)
// role: time/window
// inputs: now (UTC), configured recentActivityHours; optional --now-override string
// outputs: Cutoff DateTime<Utc>; ISO-8601 `since` string for the actions endpoint
// invariants:
// - Falsy hours (0 or NaN) resolve to 12; a configured 0 means "unset", not "zero hours"
// - Never panics: cutoffs before the Unix epoch clamp to the epoch
// - Pure; no clock reads except in effective_now when no override is given
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Local, SecondsFormat, TimeDelta, Utc};

use crate::config::DEFAULT_RECENT_ACTIVITY_HOURS;

/// Hours actually used for the window. Zero and NaN fall back to the default.
pub fn effective_hours(hours: f64) -> f64 {
  if hours == 0.0 || hours.is_nan() {
    DEFAULT_RECENT_ACTIVITY_HOURS
  } else {
    hours
  }
}

/// Cutoff instant for recent activity: `now - hours`, millisecond precision.
///
/// Windows reaching past the Unix epoch (or past chrono's range) clamp to the epoch;
/// no board activity predates it.
pub fn activity_cutoff(now: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
  let millis = (effective_hours(hours) * 3_600_000.0).round() as i64;

  TimeDelta::try_milliseconds(millis)
    .and_then(|window| now.checked_sub_signed(window))
    .filter(|cutoff| *cutoff > DateTime::<Utc>::UNIX_EPOCH)
    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Render an instant the way the actions endpoint expects its `since` parameter.
pub fn iso_since(instant: DateTime<Utc>) -> String {
  instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a `--now-override` string into a UTC instant.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Utc>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
          .map(|dt| dt.with_timezone(&Utc))
      })
  })
}

/// Returns the effective "now" given an optional override.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}
