use crate::config::{Config, MissingTrackPolicy};
use crate::error::{ClipsubsError, Result};
use crate::extract::{find_subtitle_track, MkvToolNix, SubtitleSource};
use crate::subtitle::{assemble, Clip, Timeline};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Configuration for the compilation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Timeline handling for clips whose source has no subtitle track.
    pub missing_track: MissingTrackPolicy,
    /// Show a progress bar while clips are processed.
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            missing_track: MissingTrackPolicy::default(),
            show_progress: true,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            missing_track: config.missing_track,
            ..Self::default()
        }
    }
}

/// Statistics from one compilation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Number of clips in the input list.
    pub clips_total: usize,
    /// Clips whose subtitles were extracted and filtered.
    pub clips_compiled: usize,
    /// Clips skipped because their source had no subtitle track.
    pub clips_skipped: usize,
    /// Dialogue lines written to the output document.
    pub lines_written: usize,
    /// Final length of the output timeline.
    pub timeline: Duration,
    /// Wall time for the whole run.
    pub total_time: Duration,
}

/// Result of a compilation run.
#[derive(Debug)]
pub struct PipelineResult {
    /// Path the document was written to.
    pub output_path: PathBuf,
    /// The document text exactly as written.
    pub document: String,
    pub stats: PipelineStats,
}

/// Run every clip through resolve, extract and rebase, in list order, and
/// assemble the document in memory. Nothing is written to disk here.
pub fn compile_document(
    clips: &[Clip],
    config: &Config,
    source: &dyn SubtitleSource,
    pipeline_config: &PipelineConfig,
) -> Result<(String, PipelineStats)> {
    let mut timeline = Timeline::new();
    let mut stats = PipelineStats {
        clips_total: clips.len(),
        ..PipelineStats::default()
    };

    let pb = if pipeline_config.show_progress {
        let pb = ProgressBar::new(clips.len() as u64);
        if let Ok(progress_style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(progress_style.progress_chars("#>-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    for (index, clip) in clips.iter().enumerate() {
        pb.set_message(clip.to_string());
        info!("Clip {}/{}: {}", index + 1, clips.len(), clip);

        let container = config.source_path(&clip.source_id)?;
        let tracks = source.list_tracks(container)?;

        let track = match find_subtitle_track(&tracks) {
            Some(track) => track,
            None => {
                let err = ClipsubsError::MissingTrack(clip.source_id.clone());
                warn!("{}, skipping {}", err, clip);
                stats.clips_skipped += 1;
                if pipeline_config.missing_track == MissingTrackPolicy::Advance {
                    timeline.advance(clip);
                }
                pb.inc(1);
                continue;
            }
        };

        debug!(
            "Using track {} ({}) of {}",
            track.id,
            track.description,
            container.display()
        );

        let raw = source.extract_track(container, track.id)?;
        timeline.append_clip(&raw, clip)?;
        stats.clips_compiled += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();

    stats.timeline = timeline.cursor();
    stats.lines_written = timeline.lines().len();

    Ok((assemble(timeline.lines()), stats))
}

/// Compile the configured clips using the given subtitle source and write the
/// document to the configured output path.
///
/// The output file is written once, after every clip succeeded; a failure
/// part way through leaves no output behind.
pub fn compile_with_source(
    config: &Config,
    source: &dyn SubtitleSource,
    pipeline_config: &PipelineConfig,
) -> Result<PipelineResult> {
    let start_time = Instant::now();

    config.validate()?;
    let clips = config.clips()?;

    info!(
        "Compiling {} clip(s) from {} source(s) with {}",
        clips.len(),
        config.sources.len(),
        source.name()
    );

    let (document, mut stats) = compile_document(&clips, config, source, pipeline_config)?;

    fs::write(&config.output, &document)?;
    info!(
        "Wrote {} line(s) to {:?}",
        stats.lines_written, config.output
    );

    stats.total_time = start_time.elapsed();

    Ok(PipelineResult {
        output_path: config.output.clone(),
        document,
        stats,
    })
}

/// Compile the configured clips with MKVToolNix as the subtitle source.
///
/// Extracted tracks live in a temp directory that is removed when this
/// returns, whether the run succeeded or not.
pub fn compile_subtitles(config: &Config, pipeline_config: &PipelineConfig) -> Result<PipelineResult> {
    let source = MkvToolNix::new()?;
    compile_with_source(config, &source, pipeline_config)
}

/// Print a summary of the compilation results.
pub fn print_summary(result: &PipelineResult) {
    let stats = &result.stats;

    println!();
    println!("{}", style("Subtitle Compilation Complete").green().bold());
    println!();
    println!("  Output:     {}", result.output_path.display());
    println!("  Lines:      {}", stats.lines_written);
    println!(
        "  Clips:      {} compiled, {} skipped, {} total",
        stats.clips_compiled, stats.clips_skipped, stats.clips_total
    );
    println!("  Timeline:   {:.0}s", stats.timeline.as_secs_f64());
    println!("  Time:       {:.2}s", stats.total_time.as_secs_f64());
    if stats.clips_skipped > 0 {
        println!();
        println!(
            "  {}",
            style(format!(
                "Note: {} clip(s) had no subtitle track",
                stats.clips_skipped
            ))
            .yellow()
        );
    }
    println!();
}
