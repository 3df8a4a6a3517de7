//! Error types shared by the handlers and helpers.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Why a registration or recognizer launch did not happen.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("no face images found")]
    NoFaceImages,

    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed ({status})")]
    Failed { program: String, status: String },

    #[error("could not inspect face data: {0}")]
    Probe(#[from] io::Error),
}
