//! Hybridization scenarios.

use serde::{Deserialize, Serialize};

/// Hybridization-degree scenario.
///
/// The label (e.g. "15%", "30%", "Conventional") names the output files; the
/// conventional flag selects the legacy single-path column mapping and
/// disables all electric subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    label: String,
    conventional: bool,
}

impl Scenario {
    pub fn hybrid(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            conventional: false,
        }
    }

    pub fn conventional() -> Self {
        Self {
            label: "Conventional".to_string(),
            conventional: true,
        }
    }

    pub fn new(label: impl Into<String>, conventional: bool) -> Self {
        Self {
            label: label.into(),
            conventional,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_conventional(&self) -> bool {
        self.conventional
    }

    /// Deterministic file-name stem: the label with '%' stripped.
    pub fn output_stem(&self) -> String {
        self.label.replace('%', "")
    }
}
