// H:MM:SS timecodes as used by clip lists and ASS events
use std::time::Duration;

use crate::error::{ClipsubsError, Result};

/// Parse a `H:MM:SS` or `H:MM:SS.cc` timecode into whole seconds.
///
/// Hours may have any number of digits. A fractional part must be digits but
/// is discarded, so `0:14:29.50` reads as `0:14:29`. Clip bounds and event
/// times are both compared and shifted at whole-second resolution.
pub fn parse_timecode(s: &str) -> Result<Duration> {
    let s = s.trim();
    let invalid = || ClipsubsError::Timestamp(format!("'{s}' is not a H:MM:SS timecode"));

    let clock = match s.split_once('.') {
        Some((clock, fraction)) => {
            if !is_digits(fraction) {
                return Err(invalid());
            }
            clock
        }
        None => s,
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let hours = parse_digits(parts[0]).ok_or_else(invalid)?;
    let minutes = parse_digits(parts[1]).ok_or_else(invalid)?;
    let seconds = parse_digits(parts[2]).ok_or_else(invalid)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let total = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)?;

    Ok(Duration::from_secs(total))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> Option<u64> {
    if !is_digits(s) {
        return None;
    }
    s.parse().ok()
}

/// Format a duration as `H:MM:SS.00`.
///
/// The sub-second part is truncated, never rounded, and the hundredths are
/// always written as a literal `00`.
pub fn format_timecode(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}:{:02}.00", hours, minutes, seconds)
}
