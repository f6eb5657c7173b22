use crate::error::{ClipsubsError, Result};
use crate::subtitle::{parse_timecode, Clip};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What to do with the timeline when a clip's source has no subtitle track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTrackPolicy {
    /// Keep the cursor moving by the clip's duration, leaving a silent gap.
    #[default]
    Advance,
    /// Drop the clip from the timeline entirely.
    Collapse,
}

impl std::fmt::Display for MissingTrackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingTrackPolicy::Advance => write!(f, "advance"),
            MissingTrackPolicy::Collapse => write!(f, "collapse"),
        }
    }
}

impl std::str::FromStr for MissingTrackPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "advance" => Ok(MissingTrackPolicy::Advance),
            "collapse" => Ok(MissingTrackPolicy::Collapse),
            _ => Err(format!(
                "Unknown missing-track policy: {}. Use 'advance' or 'collapse'",
                s
            )),
        }
    }
}

/// A clip as written in the config file, before its times are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSpec {
    pub source: String,
    pub start: String,
    pub end: String,
}

impl ClipSpec {
    pub fn new(source: &str, start: &str, end: &str) -> Self {
        Self {
            source: source.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: PathBuf,
    pub missing_track: MissingTrackPolicy,
    pub sources: BTreeMap<String, PathBuf>,
    pub clips: Vec<ClipSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output.ass"),
            missing_track: MissingTrackPolicy::default(),
            sources: BTreeMap::new(),
            clips: Vec::new(),
        }
    }
}

impl Config {
    /// Load the clip list from `path`, or from the default location when none
    /// is given, then apply environment overrides.
    ///
    /// Relative source and output paths are resolved against the directory
    /// holding the config file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path().ok_or_else(|| {
                ClipsubsError::Config("Could not determine the config directory".to_string())
            })?,
        };

        if !config_path.exists() {
            return Err(ClipsubsError::FileNotFound(
                config_path.display().to_string(),
            ));
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let mut config = Self::from_toml(&contents)?;

        if let Some(base) = config_path.parent() {
            config.resolve_paths(base);
        }

        if let Ok(output) = std::env::var("CLIPSUBS_OUTPUT") {
            config.output = PathBuf::from(output);
        }
        if let Ok(policy) = std::env::var("CLIPSUBS_MISSING_TRACK") {
            if let Ok(p) = policy.parse() {
                config.missing_track = p;
            }
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in self.sources.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if self.output.is_relative() {
            self.output = base.join(&self.output);
        }
    }

    /// Container path for a source id.
    pub fn source_path(&self, source_id: &str) -> Result<&Path> {
        self.sources
            .get(source_id)
            .map(PathBuf::as_path)
            .ok_or_else(|| ClipsubsError::Config(format!("Unknown source: {source_id}")))
    }

    /// Parse every clip's bounds, in list order.
    pub fn clips(&self) -> Result<Vec<Clip>> {
        self.clips
            .iter()
            .map(|spec| {
                Ok(Clip {
                    source_id: spec.source.clone(),
                    range_start: parse_timecode(&spec.start)?,
                    range_end: parse_timecode(&spec.end)?,
                })
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.clips.is_empty() {
            return Err(ClipsubsError::Config("No clips configured".to_string()));
        }

        for clip in self.clips()? {
            self.source_path(&clip.source_id)?;

            if clip.range_end <= clip.range_start {
                return Err(ClipsubsError::Config(format!(
                    "Clip {clip} must end after it starts"
                )));
            }
        }

        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clipsubs").join("clips.toml"))
    }
}
