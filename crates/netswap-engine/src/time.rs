use chrono::{SecondsFormat, Utc};

/// RFC 3339 UTC timestamp for step records, note markers, and audit lines.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
