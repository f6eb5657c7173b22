pub mod mkvtoolnix;

pub use mkvtoolnix::{check_mkvextract, check_mkvmerge, parse_track_listing, MkvToolNix};

use std::path::Path;

use crate::error::Result;

/// Case-insensitive marker identifying a subtitle track in a track description.
pub const SUBTITLE_MARKER: &str = "subtitles";

/// One track of a media container as reported by the track lister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub id: u32,
    pub description: String,
}

impl TrackInfo {
    pub fn is_subtitle(&self) -> bool {
        self.description.to_lowercase().contains(SUBTITLE_MARKER)
    }
}

/// Access to the subtitle tracks embedded in media containers.
///
/// Errors from either method are treated as fatal by the pipeline.
pub trait SubtitleSource {
    /// Enumerate the tracks of a container.
    fn list_tracks(&self, container: &Path) -> Result<Vec<TrackInfo>>;

    /// Return the full text of one track as an ASS document.
    fn extract_track(&self, container: &Path, track_id: u32) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Pick the first subtitle track, in listing order.
pub fn find_subtitle_track(tracks: &[TrackInfo]) -> Option<&TrackInfo> {
    tracks.iter().find(|t| t.is_subtitle())
}
