use anyhow::{Context, Result};
use clap::Parser;
use clipsubs::config::{Config, MissingTrackPolicy};
use clipsubs::pipeline::{compile_subtitles, print_summary, PipelineConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "clipsubs")]
#[command(version, about = "Compile subtitles from video clips into one ASS file")]
#[command(long_about = "Extract the dialogue inside selected time ranges of several MKV files and \
join it, re-timed onto one continuous timeline, into a single ASS subtitle file.")]
struct Cli {
    /// Clip list (defaults to ~/.config/clipsubs/clips.toml)
    config: Option<PathBuf>,

    /// Output subtitle file (overrides the clip list)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Timeline handling for clips without a subtitle track: advance, collapse
    #[arg(long)]
    missing_track: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load clip list")?;

    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(ref policy) = cli.missing_track {
        config.missing_track = policy
            .parse::<MissingTrackPolicy>()
            .map_err(|e| anyhow::anyhow!(e))?;
    }

    config.validate().context("Clip list validation failed")?;

    info!("Clips:    {}", config.clips.len());
    info!("Sources:  {}", config.sources.len());
    info!("Output:   {}", config.output.display());
    info!("Missing:  {}", config.missing_track);

    let mut pipeline_config = PipelineConfig::from(&config);
    pipeline_config.show_progress = !cli.no_progress;

    let result = compile_subtitles(&config, &pipeline_config)
        .context("Subtitle compilation failed")?;

    print_summary(&result);

    Ok(())
}
