//! hx-results: result-file serialization.
//!
//! Per-scenario CSV exports (semicolon delimiter, decimal comma, matching
//! the telemetry decks the results sit next to) and the JSON batch summary.

pub mod batch;
pub mod summary;
pub mod writer;

pub use batch::{run_batch, run_scenario};
pub use summary::{BatchSummary, ScenarioSummary, SkippedScenario};
pub use writer::{
    energy_file_name, exergy_file_name, write_energy_csv, write_exergy_csv, CsvStyle,
};

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
