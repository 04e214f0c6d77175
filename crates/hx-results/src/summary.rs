//! JSON batch summary.
//!
//! One `summary.json` per batch run recording which scenarios produced
//! results, which were skipped and why, and a few headline aggregates so the
//! batch can be sanity-checked without opening the CSVs.

use crate::ResultsResult;
use hx_balance::ExergyBalanceResult;
use hx_mission::Scenario;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub label: String,
    pub conventional: bool,
    pub samples: usize,
    pub exergy_file: String,
    pub energy_file: String,
    /// Mean whole-system exergy efficiency over the mission
    pub mean_total_efficiency: f64,
    /// Peak total thrust exergy [kW]
    pub peak_thrust_exergy_kw: f64,
}

impl ScenarioSummary {
    pub fn from_rows(scenario: &Scenario, rows: &[ExergyBalanceResult]) -> Self {
        let samples = rows.len();
        let mean_total_efficiency = if samples > 0 {
            rows.iter().map(|r| r.total_efficiency).sum::<f64>() / samples as f64
        } else {
            0.0
        };
        let peak_thrust_exergy_kw = rows
            .iter()
            .map(|r| r.total_thrust_exergy_kw)
            .fold(0.0, f64::max);

        Self {
            label: scenario.label().to_string(),
            conventional: scenario.is_conventional(),
            samples,
            exergy_file: crate::writer::exergy_file_name(scenario),
            energy_file: crate::writer::energy_file_name(scenario),
            mean_total_efficiency,
            peak_thrust_exergy_kw,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedScenario {
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub scenarios: Vec<ScenarioSummary>,
    pub skipped: Vec<SkippedScenario>,
}

impl BatchSummary {
    pub fn write(&self, dir: &Path) -> ResultsResult<PathBuf> {
        let path = dir.join("summary.json");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}
