pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod subtitle;

pub use config::Config;
pub use error::{ClipsubsError, Result};
pub use pipeline::{
    compile_subtitles, compile_with_source, print_summary, PipelineConfig, PipelineResult,
    PipelineStats,
};
