pub mod ass;
pub mod dialogue;
pub mod rebase;
pub mod timecode;

pub use ass::{assemble, render_dialogue};
pub use dialogue::DialogueLine;
pub use rebase::{rebase_lines, Timeline};
pub use timecode::{format_timecode, parse_timecode};

use std::fmt;
use std::time::Duration;

/// One contiguous range of one source, destined for the output timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub source_id: String,
    pub range_start: Duration,
    pub range_end: Duration,
}

impl Clip {
    /// Nominal length of the clip on the output timeline.
    pub fn duration(&self) -> Duration {
        self.range_end.saturating_sub(self.range_start)
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} - {}]",
            self.source_id,
            format_clock(self.range_start),
            format_clock(self.range_end)
        )
    }
}

fn format_clock(d: Duration) -> String {
    let total_secs = d.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
