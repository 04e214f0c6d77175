//! Per-scenario CSV export.
//!
//! Result files are written the way the telemetry decks arrive: semicolon
//! delimiter, decimal comma. Column order follows the component chain so the
//! file reads left to right as the balance evaluates.

use crate::ResultsResult;
use hx_balance::{EnergyBalanceResult, ExergyBalanceResult};
use hx_mission::Scenario;
use std::path::{Path, PathBuf};

/// Output formatting: delimiter and decimal-separator convention.
#[derive(Debug, Clone, Copy)]
pub struct CsvStyle {
    pub delimiter: u8,
    pub decimal_comma: bool,
}

impl Default for CsvStyle {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_comma: true,
        }
    }
}

impl CsvStyle {
    /// Plain comma-delimited, decimal-point output.
    pub fn plain() -> Self {
        Self {
            delimiter: b',',
            decimal_comma: false,
        }
    }

    fn format_number(&self, v: f64) -> String {
        let text = v.to_string();
        if self.decimal_comma {
            text.replace('.', ",")
        } else {
            text
        }
    }
}

enum Field {
    Text(String),
    Num(f64),
}

type ExergyAccessor = fn(&ExergyBalanceResult) -> Field;
type EnergyAccessor = fn(&EnergyBalanceResult) -> Field;

const EXERGY_COLUMNS: &[(&str, ExergyAccessor)] = &[
    ("segment", |r| Field::Text(r.segment.clone())),
    ("time_s", |r| Field::Num(r.time_s)),
    ("altitude_m", |r| Field::Num(r.altitude_m)),
    ("mach_number", |r| Field::Num(r.mach_number)),
    ("velocity_m_s", |r| Field::Num(r.velocity_m_s)),
    ("pressure_pa", |r| Field::Num(r.pressure_pa)),
    ("temperature_k", |r| Field::Num(r.temperature_k)),
    ("mdot_fuel_kg_s", |r| Field::Num(r.mdot_fuel_kg_s)),
    ("mdot_air_kg_s", |r| Field::Num(r.mdot_air_kg_s)),
    ("afr_stoich", |r| Field::Num(r.afr_stoich)),
    ("afr_real_adjusted", |r| Field::Num(r.afr_real_adjusted)),
    ("excess_air", |r| Field::Num(r.excess_air)),
    ("phi", |r| Field::Num(r.phi)),
    ("fuel_exergy_kw", |r| Field::Num(r.fuel_exergy_kw)),
    ("air_exergy_kw", |r| Field::Num(r.air_exergy_kw)),
    ("engine_shaft_power_kw", |r| Field::Num(r.engine_shaft_power_kw)),
    ("aux_hydraulic_kw", |r| Field::Num(r.aux_hydraulic_kw)),
    ("aux_electric_kw", |r| Field::Num(r.aux_electric_kw)),
    ("aux_total_kw", |r| Field::Num(r.aux_total_kw)),
    ("bleed_mdot_kg_s", |r| Field::Num(r.bleed_mdot_kg_s)),
    ("bleed_pressure_pa", |r| Field::Num(r.bleed_pressure_pa)),
    ("bleed_stagnation_t_k", |r| Field::Num(r.bleed_stagnation_t_k)),
    ("bleed_stagnation_p_pa", |r| Field::Num(r.bleed_stagnation_p_pa)),
    ("bleed_temperature_k", |r| Field::Num(r.bleed_temperature_k)),
    ("bleed_exergy_kw", |r| Field::Num(r.bleed_exergy_kw)),
    ("engine_destruction_kw", |r| Field::Num(r.engine_destruction_kw)),
    ("propulsion_mode", |r| Field::Text(r.propulsion_mode.clone())),
    ("mtrb_mechanical_kw", |r| Field::Num(r.mtrb_mechanical_kw)),
    ("gearbox_input_kw", |r| Field::Num(r.gearbox_input_kw)),
    ("gearbox_output_kw", |r| Field::Num(r.gearbox_output_kw)),
    ("gearbox_destruction_kw", |r| Field::Num(r.gearbox_destruction_kw)),
    ("propeller_input_kw", |r| Field::Num(r.propeller_input_kw)),
    ("propeller_thrust_n", |r| Field::Num(r.propeller_thrust_n)),
    ("propeller_thrust_exergy_kw", |r| Field::Num(r.propeller_thrust_exergy_kw)),
    ("propeller_destruction_kw", |r| Field::Num(r.propeller_destruction_kw)),
    ("battery_chemical_kw", |r| Field::Num(r.battery_chemical_kw)),
    ("battery_power_kw", |r| Field::Num(r.battery_power_kw)),
    ("battery_heat_kw", |r| Field::Num(r.battery_heat_kw)),
    ("battery_heat_exergy_kw", |r| Field::Num(r.battery_heat_exergy_kw)),
    ("battery_destruction_kw", |r| Field::Num(r.battery_destruction_kw)),
    ("inverter_mode", |r| Field::Text(r.inverter_mode.clone())),
    ("inverter_input_kw", |r| Field::Num(r.inverter_input_kw)),
    ("inverter_output_kw", |r| Field::Num(r.inverter_output_kw)),
    ("inverter_heat_kw", |r| Field::Num(r.inverter_heat_kw)),
    ("inverter_heat_exergy_kw", |r| Field::Num(r.inverter_heat_exergy_kw)),
    ("inverter_destruction_kw", |r| Field::Num(r.inverter_destruction_kw)),
    ("mtrb_electrical_in_kw", |r| Field::Num(r.mtrb_electrical_in_kw)),
    ("mtrb_electrical_out_kw", |r| Field::Num(r.mtrb_electrical_out_kw)),
    ("mtrb_loss_kw", |r| Field::Num(r.mtrb_loss_kw)),
    ("mtrb_heat_exergy_kw", |r| Field::Num(r.mtrb_heat_exergy_kw)),
    ("mtrb_destruction_kw", |r| Field::Num(r.mtrb_destruction_kw)),
    ("wtp_electrical_in_kw", |r| Field::Num(r.wtp_electrical_in_kw)),
    ("wtp_mechanical_kw", |r| Field::Num(r.wtp_mechanical_kw)),
    ("wtp_loss_kw", |r| Field::Num(r.wtp_loss_kw)),
    ("wtp_heat_exergy_kw", |r| Field::Num(r.wtp_heat_exergy_kw)),
    ("wtp_destruction_kw", |r| Field::Num(r.wtp_destruction_kw)),
    ("wtp_thrust_exergy_kw", |r| Field::Num(r.wtp_thrust_exergy_kw)),
    ("wtp_propeller_destruction_kw", |r| Field::Num(r.wtp_propeller_destruction_kw)),
    ("total_thrust_exergy_kw", |r| Field::Num(r.total_thrust_exergy_kw)),
    ("engine_efficiency", |r| Field::Num(r.engine_efficiency)),
    ("gearbox_efficiency", |r| Field::Num(r.gearbox_efficiency)),
    ("propeller_efficiency", |r| Field::Num(r.propeller_efficiency)),
    ("battery_efficiency", |r| Field::Num(r.battery_efficiency)),
    ("inverter_efficiency", |r| Field::Num(r.inverter_efficiency)),
    ("mtrb_efficiency", |r| Field::Num(r.mtrb_efficiency)),
    ("wtp_motor_efficiency", |r| Field::Num(r.wtp_motor_efficiency)),
    ("wtp_propeller_efficiency", |r| Field::Num(r.wtp_propeller_efficiency)),
    ("total_efficiency", |r| Field::Num(r.total_efficiency)),
];

const ENERGY_COLUMNS: &[(&str, EnergyAccessor)] = &[
    ("time_s", |r| Field::Num(r.time_s)),
    ("altitude_m", |r| Field::Num(r.altitude_m)),
    ("energy_consumption_j", |r| Field::Num(r.energy_consumption_j)),
    ("power_w", |r| Field::Num(r.power_w)),
    ("emotor_efficiency", |r| Field::Num(r.emotor_efficiency)),
    ("eta_propeller", |r| Field::Num(r.eta_propeller)),
    ("total_thrust_n", |r| Field::Num(r.total_thrust_n)),
    ("global_efficiency", |r| Field::Num(r.global_efficiency)),
    ("distance_m", |r| Field::Num(r.distance_m)),
    ("specific_energy_j_m", |r| Field::Num(r.specific_energy_j_m)),
    ("co2_emissions_total_kg", |r| Field::Num(r.co2_emissions_total_kg)),
    ("battery_resistive_losses_w", |r| Field::Num(r.battery_resistive_losses_w)),
];

/// Deterministic exergy file name: `exergy_results_<stem>.csv`, '%' stripped
/// from the scenario label.
pub fn exergy_file_name(scenario: &Scenario) -> String {
    format!("exergy_results_{}.csv", scenario.output_stem())
}

/// Deterministic energy file name: `energy_results_<stem>.csv`.
pub fn energy_file_name(scenario: &Scenario) -> String {
    format!("energy_results_{}.csv", scenario.output_stem())
}

pub fn write_exergy_csv(
    dir: &Path,
    scenario: &Scenario,
    rows: &[ExergyBalanceResult],
    style: CsvStyle,
) -> ResultsResult<PathBuf> {
    let path = dir.join(exergy_file_name(scenario));
    write_table(&path, EXERGY_COLUMNS, rows, style)?;
    Ok(path)
}

pub fn write_energy_csv(
    dir: &Path,
    scenario: &Scenario,
    rows: &[EnergyBalanceResult],
    style: CsvStyle,
) -> ResultsResult<PathBuf> {
    let path = dir.join(energy_file_name(scenario));
    write_table(&path, ENERGY_COLUMNS, rows, style)?;
    Ok(path)
}

fn write_table<R>(
    path: &Path,
    columns: &[(&str, fn(&R) -> Field)],
    rows: &[R],
    style: CsvStyle,
) -> ResultsResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(style.delimiter)
        .from_path(path)?;

    writer.write_record(columns.iter().map(|(name, _)| *name))?;
    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|(_, accessor)| match accessor(row) {
                Field::Text(s) => s,
                Field::Num(v) => style.format_number(v),
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hx_results_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn exergy_row() -> ExergyBalanceResult {
        ExergyBalanceResult {
            segment: "cruise".to_string(),
            time_s: 12.5,
            fuel_exergy_kw: 2283.65,
            propulsion_mode: "combined".to_string(),
            inverter_mode: "discharging".to_string(),
            ..ExergyBalanceResult::default()
        }
    }

    #[test]
    fn file_names_strip_percent() {
        assert_eq!(
            exergy_file_name(&Scenario::hybrid("15%")),
            "exergy_results_15.csv"
        );
        assert_eq!(
            energy_file_name(&Scenario::conventional()),
            "energy_results_Conventional.csv"
        );
    }

    #[test]
    fn exergy_csv_uses_semicolon_and_decimal_comma() {
        let dir = temp_dir("exergy");
        let path = write_exergy_csv(
            &dir,
            &Scenario::hybrid("15%"),
            &[exergy_row()],
            CsvStyle::default(),
        )
        .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("segment;time_s;altitude_m"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("cruise;12,5;"));
        assert!(row.contains("2283,65"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn plain_style_keeps_decimal_point() {
        let dir = temp_dir("plain");
        let path = write_exergy_csv(
            &dir,
            &Scenario::hybrid("20%"),
            &[exergy_row()],
            CsvStyle::plain(),
        )
        .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("cruise,12.5,"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn energy_csv_column_count_matches_header() {
        let dir = temp_dir("energy");
        let rows = vec![EnergyBalanceResult {
            time_s: 10.0,
            total_thrust_n: 13_500.0,
            ..EnergyBalanceResult::default()
        }];
        let path = write_energy_csv(
            &dir,
            &Scenario::hybrid("30%"),
            &rows,
            CsvStyle::default(),
        )
        .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let header_cols = text.lines().next().unwrap().split(';').count();
        let row_cols = text.lines().nth(1).unwrap().split(';').count();
        assert_eq!(header_cols, ENERGY_COLUMNS.len());
        assert_eq!(header_cols, row_cols);
        let _ = fs::remove_dir_all(dir);
    }
}
