use clap::{Parser, Subcommand};
use hx_balance::{AnalysisConfig, BalanceError, ExergyAnalysis};
use hx_mission::{read_mission_csv, MissionError, MissionSet};
use hx_results::{run_batch, CsvStyle, ResultsError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hx-cli")]
#[command(about = "Hybrid-electric propulsion exergy/energy balance tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a mission-set manifest and its telemetry decks
    Validate {
        /// Path to the mission-set YAML manifest
        manifest_path: PathBuf,
    },
    /// Run the balance across all scenarios of a mission set
    Run {
        /// Path to the mission-set YAML manifest
        manifest_path: PathBuf,
        /// Override the manifest's output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Optional YAML file overriding analysis constants
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write comma-delimited, decimal-point CSV instead of the deck style
        #[arg(long)]
        plain_csv: bool,
    },
    /// Summarize one telemetry deck without running the balance
    Inspect {
        /// Path to the telemetry CSV
        deck_path: PathBuf,
        /// Treat the deck as the Conventional baseline
        #[arg(long)]
        conventional: bool,
    },
}

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Mission error: {0}")]
    Mission(#[from] MissionError),

    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("{failures} scenario(s) failed validation")]
    Validation { failures: usize },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { manifest_path } => cmd_validate(&manifest_path),
        Commands::Run {
            manifest_path,
            output_dir,
            config,
            plain_csv,
        } => cmd_run(&manifest_path, output_dir, config.as_deref(), plain_csv),
        Commands::Inspect {
            deck_path,
            conventional,
        } => cmd_inspect(&deck_path, conventional),
    }
}

fn load_mission_set(manifest_path: &Path) -> CliResult<MissionSet> {
    let set = MissionSet::from_yaml_file(manifest_path)?.resolved_against(manifest_path);
    Ok(set)
}

fn cmd_validate(manifest_path: &Path) -> CliResult<()> {
    println!("Validating mission set: {}", manifest_path.display());
    let set = load_mission_set(manifest_path)?;

    let mut failures = 0usize;
    for entry in &set.scenarios {
        let scenario = entry.scenario();
        match read_mission_csv(&entry.input, &scenario) {
            Ok(samples) => {
                println!(
                    "  ✓ {} ({} samples, {})",
                    scenario.label(),
                    samples.len(),
                    entry.input.display()
                );
            }
            Err(err) => {
                failures += 1;
                println!("  ✗ {} - {}", scenario.label(), err);
            }
        }
    }

    if failures > 0 {
        return Err(CliError::Validation { failures });
    }
    println!("✓ Mission set is valid ({} scenarios)", set.scenarios.len());
    Ok(())
}

fn cmd_run(
    manifest_path: &Path,
    output_dir: Option<PathBuf>,
    config_path: Option<&Path>,
    plain_csv: bool,
) -> CliResult<()> {
    let set = load_mission_set(manifest_path)?;
    let out_dir = output_dir.unwrap_or_else(|| set.output_dir.clone());

    let config: AnalysisConfig = match config_path {
        Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        None => AnalysisConfig::default(),
    };
    config.validate()?;
    let analysis = ExergyAnalysis::new(config);
    let style = if plain_csv {
        CsvStyle::plain()
    } else {
        CsvStyle::default()
    };

    let summary = run_batch(&analysis, &set, &out_dir, style)?;
    let summary_path = summary.write(&out_dir)?;

    for s in &summary.scenarios {
        println!(
            "  ✓ {} ({} samples, mean η_ex = {:.3})",
            s.label, s.samples, s.mean_total_efficiency
        );
    }
    for s in &summary.skipped {
        println!("  ✗ {} - {}", s.label, s.reason);
    }
    println!(
        "✓ {} of {} scenarios written to {} (summary: {})",
        summary.scenarios.len(),
        set.scenarios.len(),
        out_dir.display(),
        summary_path.display()
    );
    Ok(())
}

fn cmd_inspect(deck_path: &Path, conventional: bool) -> CliResult<()> {
    let scenario = if conventional {
        hx_mission::Scenario::conventional()
    } else {
        hx_mission::Scenario::hybrid("inspect")
    };
    let samples = read_mission_csv(deck_path, &scenario)?;

    let t_first = samples.first().map(|s| s.time_s).unwrap_or(0.0);
    let t_last = samples.last().map(|s| s.time_s).unwrap_or(0.0);
    let electric_samples = samples
        .iter()
        .filter(|s| s.electric_throttle_mtrb != 0.0 || s.electric_throttle_wtp > 0.0)
        .count();
    let mut segments: Vec<&str> = Vec::new();
    for s in &samples {
        if !s.segment.is_empty() && segments.last() != Some(&s.segment.as_str()) {
            segments.push(&s.segment);
        }
    }

    println!("Deck: {}", deck_path.display());
    println!("  Samples: {}", samples.len());
    println!("  Time range: {:.1} - {:.1} s", t_first, t_last);
    println!(
        "  Electric path active: {} of {} samples",
        electric_samples,
        samples.len()
    );
    if !segments.is_empty() {
        println!("  Segments: {}", segments.join(" -> "));
    }
    Ok(())
}
