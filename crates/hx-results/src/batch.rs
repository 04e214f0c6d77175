//! Batch orchestration over a mission set.
//!
//! Scenarios are independent, so the batch evaluates them in parallel. A
//! scenario whose deck cannot be read or evaluated is recorded as skipped
//! and the remaining scenarios still write their files; one bad input never
//! takes the batch down or alters another scenario's output.

use crate::summary::{BatchSummary, ScenarioSummary, SkippedScenario};
use crate::writer::{write_energy_csv, write_exergy_csv, CsvStyle};
use crate::ResultsResult;
use hx_balance::{energy_series, ExergyAnalysis};
use hx_mission::{read_mission_csv, MissionSet, ScenarioEntry};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Run every scenario of a mission set, writing one exergy/energy CSV pair
/// per successful scenario into `out_dir`.
pub fn run_batch(
    analysis: &ExergyAnalysis,
    set: &MissionSet,
    out_dir: &Path,
    style: CsvStyle,
) -> ResultsResult<BatchSummary> {
    fs::create_dir_all(out_dir)?;

    let outcomes: Vec<Result<ScenarioSummary, SkippedScenario>> = set
        .scenarios
        .par_iter()
        .map(|entry| run_scenario(analysis, entry, out_dir, style))
        .collect();

    let mut summary = BatchSummary::default();
    for outcome in outcomes {
        match outcome {
            Ok(s) => summary.scenarios.push(s),
            Err(s) => summary.skipped.push(s),
        }
    }
    Ok(summary)
}

/// Evaluate one scenario end to end and write its result files.
///
/// Any failure along the way demotes the scenario to a `SkippedScenario`
/// carrying the reason; nothing here is fatal to the batch.
pub fn run_scenario(
    analysis: &ExergyAnalysis,
    entry: &ScenarioEntry,
    out_dir: &Path,
    style: CsvStyle,
) -> Result<ScenarioSummary, SkippedScenario> {
    let scenario = entry.scenario();
    let skip = |reason: String| {
        warn!(scenario = scenario.label(), %reason, "scenario skipped");
        SkippedScenario {
            label: scenario.label().to_string(),
            reason,
        }
    };

    let samples = read_mission_csv(&entry.input, &scenario).map_err(|e| skip(e.to_string()))?;
    info!(
        scenario = scenario.label(),
        samples = samples.len(),
        "running balance"
    );

    let exergy_rows = analysis
        .run(&scenario, &samples)
        .map_err(|e| skip(e.to_string()))?;
    let energy_rows = energy_series(&samples, &scenario);

    write_exergy_csv(out_dir, &scenario, &exergy_rows, style).map_err(|e| skip(e.to_string()))?;
    write_energy_csv(out_dir, &scenario, &energy_rows, style).map_err(|e| skip(e.to_string()))?;

    Ok(ScenarioSummary::from_rows(&scenario, &exergy_rows))
}
