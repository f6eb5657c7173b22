use std::time::Duration;

use crate::error::{ClipsubsError, Result};

use super::timecode::parse_timecode;

/// Marker that starts every ASS event line we care about.
pub const DIALOGUE_MARKER: &str = "Dialogue:";

/// Number of comma-separated fields in an ASS `Dialogue:` event.
const FIELD_COUNT: usize = 10;

/// One `Dialogue:` event from an ASS document.
///
/// Field order follows the `[Events]` format line:
/// `Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub layer: String,
    pub start: Duration,
    pub end: Duration,
    pub style: String,
    pub name: String,
    pub margin_l: String,
    pub margin_r: String,
    pub margin_v: String,
    pub effect: String,
    /// Free text, including any commas and override tags, carried through as-is.
    pub text: String,
}

impl DialogueLine {
    /// Returns true if the line is a dialogue event at all.
    pub fn is_dialogue(line: &str) -> bool {
        line.starts_with(DIALOGUE_MARKER)
    }

    /// Parse a `Dialogue:` line.
    ///
    /// Lines with fewer than ten fields fail with `MalformedDialogue`. Lines with
    /// enough fields but unreadable times fail with `Timestamp`.
    pub fn parse(line: &str) -> Result<Self> {
        let body = line
            .strip_prefix(DIALOGUE_MARKER)
            .ok_or_else(|| ClipsubsError::MalformedDialogue(line.to_string()))?;

        let fields: Vec<&str> = body.splitn(FIELD_COUNT, ',').collect();
        if fields.len() < FIELD_COUNT {
            return Err(ClipsubsError::MalformedDialogue(line.to_string()));
        }

        Ok(Self {
            layer: fields[0].trim().to_string(),
            start: parse_timecode(fields[1])?,
            end: parse_timecode(fields[2])?,
            style: fields[3].to_string(),
            name: fields[4].to_string(),
            margin_l: fields[5].to_string(),
            margin_r: fields[6].to_string(),
            margin_v: fields[7].to_string(),
            effect: fields[8].to_string(),
            text: fields[9].to_string(),
        })
    }

    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}
