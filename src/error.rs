use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipsubsError {
    #[error("No subtitle track found: {0}")]
    MissingTrack(String),

    #[error("Malformed dialogue line: {0}")]
    MalformedDialogue(String),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),

    #[error("External tool failed: {0}")]
    ExternalTool(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ClipsubsError>;
