use std::path::PathBuf;
use thiserror::Error;

pub type MissionResult<T> = Result<T, MissionError>;

#[derive(Error, Debug)]
pub enum MissionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Mission file is empty: {path}")]
    Empty { path: PathBuf },

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_yaml::Error),
}
