//! YAML mission-set manifest for batch runs.
//!
//! A mission set names the scenarios of one study and the telemetry deck
//! backing each. The CLI loads it, runs every scenario and writes one result
//! pair per entry.

use crate::error::MissionResult;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One scenario of the batch: its label, baseline flag and input deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub label: String,
    #[serde(default)]
    pub conventional: bool,
    pub input: PathBuf,
}

impl ScenarioEntry {
    pub fn scenario(&self) -> Scenario {
        Scenario::new(self.label.clone(), self.conventional)
    }
}

/// The full batch definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSet {
    /// Directory the result files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub scenarios: Vec<ScenarioEntry>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl MissionSet {
    pub fn from_yaml_file(path: &Path) -> MissionResult<Self> {
        let text = fs::read_to_string(path)?;
        let set: MissionSet = serde_yaml::from_str(&text)?;
        Ok(set)
    }

    /// Input paths resolved relative to the manifest's own directory, so a
    /// manifest can live next to its decks.
    pub fn resolved_against(mut self, manifest_path: &Path) -> Self {
        if let Some(base) = manifest_path.parent() {
            for entry in &mut self.scenarios {
                if entry.input.is_relative() {
                    entry.input = base.join(&entry.input);
                }
            }
            if self.output_dir.is_relative() {
                self.output_dir = base.join(&self.output_dir);
            }
        }
        self
    }
}
