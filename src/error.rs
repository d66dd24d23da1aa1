use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single date contributed no records.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Start-up and terminal I/O faults. Per-date failures never end up here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read configuration file {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse configuration file {path}: {source}")]
    ConfigParse { path: PathBuf, source: serde_json::Error },

    #[error("failed to set up HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error("terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("failed to encode output: {0}")]
    Output(serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
