//! hx-mission: mission-telemetry ingestion.
//!
//! Provides:
//! - `MissionSample`: one normalized telemetry record per mission time sample
//! - `Scenario`: hybridization-degree label selecting active subsystems
//! - CSV reader with delimiter detection, decimal-comma normalization,
//!   missing-column defaulting and Conventional-baseline column remapping
//! - YAML mission-set manifest for batch runs
//!
//! Samples are immutable once read; adjacent-sample deltas (battery energy,
//! time) are forward-filled here so the balance engine never divides by a
//! zero interval.

pub mod error;
pub mod manifest;
pub mod reader;
pub mod sample;
pub mod scenario;

pub use error::{MissionError, MissionResult};
pub use manifest::{MissionSet, ScenarioEntry};
pub use reader::read_mission_csv;
pub use sample::MissionSample;
pub use scenario::Scenario;
