// src/errors.rs
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {}s and was killed", .limit.as_secs())]
    Timeout { program: String, limit: Duration },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
