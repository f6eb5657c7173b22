use std::time::Duration;

use tracing::debug;

use crate::error::{ClipsubsError, Result};

use super::{Clip, DialogueLine};

/// Select the dialogue lines of `raw` that lie entirely inside the clip and
/// shift them onto the output timeline starting at `cursor`.
///
/// A line is kept when `start >= clip.range_start` and `end <= clip.range_end`.
/// Lines that only partly overlap the range are dropped, not trimmed.
/// Lines too short to be dialogue events are skipped without comment; lines
/// with unreadable times abort with a `Timestamp` error.
pub fn rebase_lines(raw: &str, clip: &Clip, cursor: Duration) -> Result<Vec<DialogueLine>> {
    let mut accepted = Vec::new();

    for line in raw.lines().filter(|l| DialogueLine::is_dialogue(l)) {
        let mut dialogue = match DialogueLine::parse(line) {
            Ok(d) => d,
            Err(ClipsubsError::MalformedDialogue(_)) => continue,
            Err(e) => return Err(e),
        };

        if dialogue.start < clip.range_start || dialogue.end > clip.range_end {
            continue;
        }

        dialogue.start = dialogue.start - clip.range_start + cursor;
        dialogue.end = dialogue.end - clip.range_start + cursor;
        debug!(
            "Line at {}s ({}s long) kept",
            dialogue.start.as_secs(),
            dialogue.duration().as_secs()
        );
        accepted.push(dialogue);
    }

    Ok(accepted)
}

/// The output timeline built so far: the running cursor plus every accepted,
/// already rebased line in compilation order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    cursor: Duration,
    lines: Vec<DialogueLine>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current length of the output timeline.
    pub fn cursor(&self) -> Duration {
        self.cursor
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<DialogueLine> {
        self.lines
    }

    /// Rebase the clip's lines from `raw`, append them, and advance the cursor
    /// by the clip's nominal duration. Returns the number of lines accepted.
    pub fn append_clip(&mut self, raw: &str, clip: &Clip) -> Result<usize> {
        let rebased = rebase_lines(raw, clip, self.cursor)?;
        let count = rebased.len();
        debug!(
            "{}: {} line(s) accepted at cursor {:.2}s",
            clip,
            count,
            self.cursor.as_secs_f64()
        );
        self.lines.extend(rebased);
        self.advance(clip);
        Ok(count)
    }

    /// Advance the cursor by the clip's nominal duration without adding lines.
    pub fn advance(&mut self, clip: &Clip) {
        self.cursor += clip.duration();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(start: u64, end: u64) -> Clip {
        Clip {
            source_id: "S01E25".to_string(),
            range_start: Duration::from_secs(start),
            range_end: Duration::from_secs(end),
        }
    }

    fn event(start: &str, end: &str, text: &str) -> String {
        format!("Dialogue: 0,{start},{end},Default,,0,0,0,,{text}")
    }

    #[test]
    fn test_rebase_inside_range() {
        let raw = event("0:13:15.00", "0:13:20.00", "Hello");
        let lines = rebase_lines(&raw, &clip(790, 869), Duration::ZERO).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].start, Duration::from_secs(5));
        assert_eq!(lines[0].end, Duration::from_secs(10));
        assert_eq!(lines[0].text, "Hello");
    }

    #[test]
    fn test_rebase_adds_cursor() {
        let raw = event("0:01:45.00", "0:01:47.00", "Later");
        let lines = rebase_lines(&raw, &clip(103, 188), Duration::from_secs(79)).unwrap();

        assert_eq!(lines[0].start, Duration::from_secs(81));
        assert_eq!(lines[0].end, Duration::from_secs(83));
    }

    #[test]
    fn test_partial_overlaps_dropped() {
        let raw = [
            event("0:00:08.00", "0:00:12.00", "starts before"),
            event("0:00:18.00", "0:00:21.00", "ends after"),
            event("0:00:05.00", "0:00:25.00", "covers range"),
        ]
        .join("\n");

        let lines = rebase_lines(&raw, &clip(10, 20), Duration::ZERO).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_exact_boundaries_included() {
        let raw = event("0:00:10.00", "0:00:20.00", "exact");
        let lines = rebase_lines(&raw, &clip(10, 20), Duration::from_secs(30)).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].start, Duration::from_secs(30));
        assert_eq!(lines[0].end, Duration::from_secs(40));
    }

    #[test]
    fn test_line_ending_in_last_second_kept() {
        let raw = event("0:14:25.00", "0:14:29.50", "tail");
        let lines = rebase_lines(&raw, &clip(790, 869), Duration::ZERO).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].start, Duration::from_secs(75));
        assert_eq!(lines[0].end, Duration::from_secs(79));
    }

    #[test]
    fn test_line_starting_in_first_second_kept() {
        let raw = event("0:13:10.75", "0:13:12.00", "head");
        let lines = rebase_lines(&raw, &clip(790, 869), Duration::from_secs(10)).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].start, Duration::from_secs(10));
        assert_eq!(lines[0].end, Duration::from_secs(12));
    }

    #[test]
    fn test_skips_non_dialogue_and_malformed() {
        let raw = [
            "[Events]".to_string(),
            "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
                .to_string(),
            "Comment: 0,0:00:11.00,0:00:12.00,Default,,0,0,0,,note".to_string(),
            "Dialogue: 0,0:00:11.00,0:00:12.00,Default".to_string(),
            event("0:00:13.00", "0:00:14.00", "kept"),
        ]
        .join("\r\n");

        let lines = rebase_lines(&raw, &clip(10, 20), Duration::ZERO).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn test_bad_timestamp_aborts() {
        let raw = event("0:00:1x.00", "0:00:14.00", "broken");
        let result = rebase_lines(&raw, &clip(10, 20), Duration::ZERO);
        assert!(matches!(result, Err(ClipsubsError::Timestamp(_))));
    }

    #[test]
    fn test_timeline_advances_by_nominal_duration() {
        let mut timeline = Timeline::new();

        let accepted = timeline.append_clip("", &clip(790, 869)).unwrap();
        assert_eq!(accepted, 0);
        assert_eq!(timeline.cursor(), Duration::from_secs(79));

        let raw = event("0:15:10.00", "0:15:12.00", "second");
        let accepted = timeline.append_clip(&raw, &clip(907, 940)).unwrap();
        assert_eq!(accepted, 1);
        assert_eq!(timeline.cursor(), Duration::from_secs(112));
        assert_eq!(timeline.lines()[0].start, Duration::from_secs(82));

        timeline.advance(&clip(0, 5));
        assert_eq!(timeline.cursor(), Duration::from_secs(117));
        assert_eq!(timeline.into_lines().len(), 1);
    }
}
