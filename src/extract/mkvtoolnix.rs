use std::fs;
use std::path::Path;
use std::process::Command;

use regex::Regex;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{ClipsubsError, Result};

use super::{SubtitleSource, TrackInfo};

const INSTALL_HINT: &str =
    "Install MKVToolNix with: brew install mkvtoolnix (macOS) or apt install mkvtoolnix (Linux)";

fn check_tool(tool: &str) -> Result<()> {
    let output = Command::new(tool)
        .arg("--version")
        .output()
        .map_err(|e| {
            ClipsubsError::ExternalTool(format!("{tool} not found. {INSTALL_HINT}. Error: {e}"))
        })?;

    if !output.status.success() {
        return Err(ClipsubsError::ExternalTool(format!("{tool} check failed")));
    }

    debug!("{} is available", tool);
    Ok(())
}

/// Check if mkvmerge is installed and accessible.
pub fn check_mkvmerge() -> Result<()> {
    check_tool("mkvmerge")
}

/// Check if mkvextract is installed and accessible.
pub fn check_mkvextract() -> Result<()> {
    check_tool("mkvextract")
}

/// Parse the output of `mkvmerge -i`.
///
/// Only `Track ID <n>: <description>` lines are kept; the container line and
/// attachment/chapter lines are ignored.
pub fn parse_track_listing(listing: &str) -> Vec<TrackInfo> {
    let track_re = Regex::new(r"^Track ID (\d+): (.*)$").expect("Invalid regex");

    listing
        .lines()
        .filter_map(|line| {
            let cap = track_re.captures(line.trim_end())?;
            let id = cap.get(1)?.as_str().parse().ok()?;
            Some(TrackInfo {
                id,
                description: cap.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}

/// Subtitle source backed by the MKVToolNix command line tools.
///
/// Every extraction writes to its own file inside a private temp directory,
/// so a failed extraction can never expose an earlier track's text. The
/// directory is removed when the source is dropped.
pub struct MkvToolNix {
    work_dir: TempDir,
}

impl MkvToolNix {
    /// Check both tools and create the working directory.
    pub fn new() -> Result<Self> {
        check_mkvmerge()?;
        check_mkvextract()?;

        let work_dir = tempfile::Builder::new().prefix("clipsubs-").tempdir()?;
        debug!("Using temp directory: {:?}", work_dir.path());

        Ok(Self { work_dir })
    }
}

impl SubtitleSource for MkvToolNix {
    fn list_tracks(&self, container: &Path) -> Result<Vec<TrackInfo>> {
        if !container.exists() {
            return Err(ClipsubsError::FileNotFound(container.display().to_string()));
        }

        let output = Command::new("mkvmerge")
            .arg("-i")
            .arg(container)
            .output()
            .map_err(|e| ClipsubsError::ExternalTool(format!("Failed to run mkvmerge: {e}")))?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ClipsubsError::ExternalTool(format!(
                "mkvmerge failed on {}: {}",
                container.display(),
                stdout.trim()
            )));
        }

        let tracks = parse_track_listing(&String::from_utf8_lossy(&output.stdout));
        debug!("{} track(s) in {}", tracks.len(), container.display());
        Ok(tracks)
    }

    fn extract_track(&self, container: &Path, track_id: u32) -> Result<String> {
        let buffer = tempfile::Builder::new()
            .prefix("track-")
            .suffix(".ass")
            .tempfile_in(self.work_dir.path())?;
        let buffer_path = buffer.path();

        info!("Extracting track {} from {}", track_id, container.display());

        let status = Command::new("mkvextract")
            .arg(container)
            .arg("tracks")
            .arg(format!("{}:{}", track_id, buffer_path.display()))
            .stdout(std::process::Stdio::null())
            .status()
            .map_err(|e| ClipsubsError::ExternalTool(format!("Failed to run mkvextract: {e}")))?;

        if !status.success() {
            return Err(ClipsubsError::ExternalTool(format!(
                "mkvextract failed for track {} of {}",
                track_id,
                container.display()
            )));
        }

        let text = fs::read_to_string(buffer_path)?;
        if text.trim().is_empty() {
            return Err(ClipsubsError::ExternalTool(format!(
                "mkvextract produced no subtitle text for track {} of {}",
                track_id,
                container.display()
            )));
        }

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "MKVToolNix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mkvmerge_available() -> bool {
        Command::new("mkvmerge")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_parse_track_listing() {
        let listing = "File 'S01E25.mkv': container: Matroska\n\
                       Track ID 0: video (MPEG-4p10/AVC/H.264)\n\
                       Track ID 1: audio (FLAC)\n\
                       Track ID 2: audio (AAC)\n\
                       Track ID 3: subtitles (SubStationAlpha)\n\
                       Attachment ID 1: type 'font/ttf', size 123 bytes, file name 'a.ttf'\n\
                       Chapters: 6 entries\n";

        let tracks = parse_track_listing(listing);
        assert_eq!(tracks.len(), 4);
        assert_eq!(tracks[0].id, 0);
        assert_eq!(tracks[3].id, 3);
        assert_eq!(tracks[3].description, "subtitles (SubStationAlpha)");
        assert!(tracks[3].is_subtitle());
        assert!(!tracks[1].is_subtitle());
    }

    #[test]
    fn test_parse_track_listing_crlf() {
        let tracks = parse_track_listing("Track ID 7: subtitles (SubRip/SRT)\r\n");
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 7);
        assert_eq!(tracks[0].description, "subtitles (SubRip/SRT)");
    }

    #[test]
    fn test_parse_track_listing_empty() {
        assert!(parse_track_listing("").is_empty());
        assert!(parse_track_listing("File 'x.mkv': container: Matroska").is_empty());
    }

    #[test]
    fn test_list_tracks_file_not_found() {
        if !mkvmerge_available() {
            eprintln!("Skipping test: mkvmerge not available");
            return;
        }

        let source = match MkvToolNix::new() {
            Ok(source) => source,
            Err(_) => {
                eprintln!("Skipping test: mkvextract not available");
                return;
            }
        };

        let result = source.list_tracks(Path::new("/nonexistent/episode.mkv"));
        match result {
            Err(ClipsubsError::FileNotFound(path)) => assert!(path.contains("nonexistent")),
            Err(other) => panic!("Expected FileNotFound error, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
