//! Value and date encoding shared by the facade and the hosts.
//!
//! Values are escaped with the `encodeURIComponent` character set so that `;`,
//! `=`, spaces and non-ASCII text survive the `"; "`-joined host string. Expiry
//! dates use the `Www, DD Mon YYYY HH:MM:SS GMT` form written by browsers, and
//! the parser also accepts the legacy `Www, DD-Mon-YY HH:MM:SS GMT` form.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const EXPIRES_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Expiry written by `remove`. Any host evicts a cookie carrying it.
pub const EPOCH_EXPIRES: &str = "Thu, 01-Jan-70 00:00:01 GMT";

/// Percent-encodes a cookie value.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-decodes a cookie value.
///
/// Returns the raw text unchanged if the decoded bytes are not valid UTF-8.
pub fn decode_value(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::warn!("Cookie value {raw:?} does not decode to UTF-8: {e}");
            raw.to_string()
        }
    }
}

/// Absolute expiry `days` from `now`, saturating at the largest representable date.
pub fn expiry_after(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    days.checked_mul(86_400)
        .and_then(|secs| now.checked_add(Duration::seconds(secs)))
        .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc())
}

pub fn format_expires(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(EXPIRES_FORMAT)
}

/// Parses an `expires` attribute. `None` if the text is not a recognised date.
pub fn parse_expires(text: &str) -> Option<OffsetDateTime> {
    let normalized = normalize_expires(text)?;
    PrimitiveDateTime::parse(&normalized, EXPIRES_FORMAT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

// Rewrites the dashed two-digit-year form into the four-digit form.
fn normalize_expires(text: &str) -> Option<String> {
    let spaced = text.trim().replace('-', " ");
    let mut parts: Vec<String> = spaced.split_whitespace().map(str::to_string).collect();
    if parts.len() != 6 {
        return None;
    }

    if parts[1].len() == 1 {
        parts[1] = format!("0{}", parts[1]);
    }

    if parts[3].len() == 2 {
        let year: u32 = parts[3].parse().ok()?;
        let year = if year >= 70 { 1900 + year } else { 2000 + year };
        parts[3] = year.to_string();
    }

    Some(parts.join(" "))
}
