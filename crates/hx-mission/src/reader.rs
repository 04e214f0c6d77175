//! Mission CSV ingestion.
//!
//! Handles the telemetry decks as exported: semicolon- or comma-delimited,
//! decimal separator either comma or point, columns occasionally absent.
//! Absent columns default to zero and are logged once per file.

use crate::error::{MissionError, MissionResult};
use crate::sample::MissionSample;
use crate::scenario::Scenario;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Fallback propeller efficiency when the Conventional deck carries none and
/// it cannot be reconstructed from thrust, velocity and power.
const FALLBACK_PROPELLER_EFFICIENCY: f64 = 0.8;

/// Read one scenario's mission deck into time-ordered samples.
///
/// The Conventional baseline is remapped onto the uniform schema here
/// (legacy `etap`/`propeller_thrust` columns, zeroed electric quantities) so
/// downstream balance code never branches on column layout.
pub fn read_mission_csv(path: &Path, scenario: &Scenario) -> MissionResult<Vec<MissionSample>> {
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Err(MissionError::Empty {
            path: path.to_path_buf(),
        });
    }

    let delimiter = detect_delimiter(&raw);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let header_index: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_string(), i))
        .collect();

    let mut warned: HashSet<&'static str> = HashSet::new();
    let mut samples = Vec::new();

    for record in reader.records() {
        let record = record?;
        let mut field = |name: &'static str| -> f64 {
            numeric_field(&record, &header_index, name, &mut warned, path)
        };

        let mut sample = MissionSample {
            segment: string_field(&record, &header_index, "segment"),
            time_s: field("time"),
            altitude_m: field("altitude_m"),
            mach: field("mach_number"),
            velocity_m_s: field("velocity_m_s"),
            pressure_pa: field("pressure_Pa"),
            temperature_k: field("temperature_C"),
            mdot_fuel_kg_s: field("mass_flow_kg_s"),
            far: field("gas_turbine_far"),
            compressor_exit_t_c: field("gas_turbine_t3"),
            compressor_exit_p_pa: field("gas_turbine_p3"),
            shaft_power_w: field("power_turboshaft"),
            combustion_engine_throttle: field("combustion_engine_throttle"),
            battery_energy_j: field("battery_energy"),
            battery_draw_w: field("battery_draw"),
            battery_current_a: field("battery_current"),
            battery_voltage_v: field("battery_voltage_under_load"),
            battery_voltage_oc_v: field("battery_voltage_open_circuit"),
            battery_resistive_losses_w: field("battery_resistive_losses"),
            electric_throttle_mtrb: field("electric_throttle"),
            electric_throttle_wtp: field("electric_throttle_WTP"),
            emotor_efficiency_mtrb: field("emotor_efficiency"),
            emotor_efficiency_wtp: field("emotorWTP_efficiency"),
            mtrb_mech_power_w: field("power_motor_turboprop"),
            wtp_prop_power_w: field("power_propeller_WTP"),
            eta_propeller_wtp: field("eta_propellerWTP"),
            thrust_propeller_n: field("thrust_propeller"),
            thrust_wtp_n: field("thrust_WTP"),
            eta_propeller: field("eta_propeller"),
            total_power_w: field("power"),
            co2_emissions_total_kg: field("co2_emissions_total"),
            delta_battery_energy_j: 0.0,
            delta_time_s: 1.0,
        };

        if scenario.is_conventional() {
            remap_conventional(&mut sample, &record, &header_index, &mut warned, path);
        }

        samples.push(sample);
    }

    if samples.is_empty() {
        return Err(MissionError::Empty {
            path: path.to_path_buf(),
        });
    }

    if scenario.is_conventional() {
        reconstruct_propeller_efficiency(&mut samples, path);
    }
    forward_fill_deltas(&mut samples);

    Ok(samples)
}

/// Legacy single-path columns of the Conventional deck mapped onto the
/// multi-path schema; all electric quantities forced to zero.
fn remap_conventional(
    sample: &mut MissionSample,
    record: &csv::StringRecord,
    header_index: &HashMap<String, usize>,
    warned: &mut HashSet<&'static str>,
    path: &Path,
) {
    if header_index.contains_key("etap") {
        sample.eta_propeller = numeric_field(record, header_index, "etap", warned, path);
    }
    if header_index.contains_key("propeller_thrust") {
        sample.thrust_propeller_n =
            numeric_field(record, header_index, "propeller_thrust", warned, path);
    }

    sample.battery_energy_j = 0.0;
    sample.battery_draw_w = 0.0;
    sample.battery_current_a = 0.0;
    sample.battery_resistive_losses_w = 0.0;
    sample.electric_throttle_mtrb = 0.0;
    sample.electric_throttle_wtp = 0.0;
    sample.emotor_efficiency_mtrb = 0.0;
    sample.emotor_efficiency_wtp = 0.0;
    sample.mtrb_mech_power_w = 0.0;
    sample.wtp_prop_power_w = 0.0;
    sample.eta_propeller_wtp = 0.0;
    sample.thrust_wtp_n = 0.0;
}

/// Conventional decks sometimes carry a zero `etap`; rebuild the propulsive
/// efficiency from thrust·v/power where those are positive, clamp to [0, 1],
/// and fall back to a documented default when nothing can be reconstructed.
fn reconstruct_propeller_efficiency(samples: &mut [MissionSample], path: &Path) {
    let mut reconstructed = 0usize;
    for sample in samples.iter_mut() {
        if sample.eta_propeller == 0.0
            && sample.thrust_propeller_n > 0.0
            && sample.velocity_m_s > 0.0
            && sample.total_power_w > 0.0
        {
            let eta = sample.thrust_propeller_n * sample.velocity_m_s / sample.total_power_w;
            sample.eta_propeller = eta.clamp(0.0, 1.0);
            reconstructed += 1;
        }
    }

    if reconstructed > 0 {
        warn!(
            file = %path.display(),
            count = reconstructed,
            "reconstructed propeller efficiency from thrust, velocity and power"
        );
    } else if samples.iter().all(|s| s.eta_propeller == 0.0) {
        for sample in samples.iter_mut() {
            sample.eta_propeller = FALLBACK_PROPELLER_EFFICIENCY;
        }
        warn!(
            file = %path.display(),
            fallback = FALLBACK_PROPELLER_EFFICIENCY,
            "propeller efficiency unavailable, using fallback"
        );
    }
}

/// Adjacent-sample deltas with forward fill.
///
/// A zero delta is treated as a missing measurement and carries the last
/// non-zero value forward; a still-undefined leading value defaults to the
/// 1.0 sentinel so no downstream division hits zero.
fn forward_fill_deltas(samples: &mut [MissionSample]) {
    let mut last_de: Option<f64> = None;
    let mut last_dt: Option<f64> = None;
    let mut prev: Option<(f64, f64)> = None;

    for sample in samples.iter_mut() {
        let (de_raw, dt_raw) = match prev {
            Some((e_prev, t_prev)) => (sample.battery_energy_j - e_prev, sample.time_s - t_prev),
            None => (0.0, 0.0),
        };
        prev = Some((sample.battery_energy_j, sample.time_s));

        sample.delta_battery_energy_j = if de_raw != 0.0 {
            last_de = Some(de_raw);
            de_raw
        } else {
            last_de.unwrap_or(1.0)
        };
        sample.delta_time_s = if dt_raw != 0.0 {
            last_dt = Some(dt_raw);
            dt_raw
        } else {
            last_dt.unwrap_or(1.0)
        };
    }
}

/// Delimiter detection on the header line: semicolon wins when present.
fn detect_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or("");
    if header.contains(';') {
        b';'
    } else {
        b','
    }
}

fn string_field(
    record: &csv::StringRecord,
    header_index: &HashMap<String, usize>,
    name: &str,
) -> String {
    header_index
        .get(name)
        .and_then(|&i| record.get(i))
        .unwrap_or("")
        .to_string()
}

fn numeric_field(
    record: &csv::StringRecord,
    header_index: &HashMap<String, usize>,
    name: &'static str,
    warned: &mut HashSet<&'static str>,
    path: &Path,
) -> f64 {
    let token = match header_index.get(name).and_then(|&i| record.get(i)) {
        Some(tok) => tok,
        None => {
            if warned.insert(name) {
                warn!(file = %path.display(), column = name, "column absent, defaulting to 0");
            }
            return 0.0;
        }
    };

    match parse_numeric(token) {
        Some(v) => v,
        None => {
            if warned.insert(name) {
                warn!(
                    file = %path.display(),
                    column = name,
                    token,
                    "non-numeric token, defaulting to 0"
                );
            }
            0.0
        }
    }
}

/// Parse one numeric token, normalizing a decimal comma to a point first.
/// Empty tokens read as zero (missing value).
fn parse_numeric(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let normalized = trimmed.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("hx_mission_{name}_{}", std::process::id()));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parse_numeric_handles_decimal_comma() {
        assert_eq!(parse_numeric("1,5"), Some(1.5));
        assert_eq!(parse_numeric("1.5"), Some(1.5));
        assert_eq!(parse_numeric(" -3,25 "), Some(-3.25));
        assert_eq!(parse_numeric(""), Some(0.0));
        assert_eq!(parse_numeric("abc"), None);
    }

    #[test]
    fn detect_delimiter_prefers_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), b',');
    }

    #[test]
    fn reads_semicolon_decimal_comma_deck() {
        let path = write_temp(
            "semi",
            "time;velocity_m_s;mass_flow_kg_s;battery_energy\n\
             0;50,5;0,05;1000\n\
             10;60,0;0,06;900\n",
        );
        let samples = read_mission_csv(&path, &Scenario::hybrid("15%")).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].velocity_m_s, 50.5);
        assert_eq!(samples[1].mdot_fuel_kg_s, 0.06);
        // absent columns default to zero
        assert_eq!(samples[0].thrust_wtp_n, 0.0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn comma_and_point_decks_read_identically() {
        let semi = write_temp("eq_semi", "time;velocity_m_s\n0;50,5\n10;60,25\n");
        let comma = write_temp("eq_comma", "time,velocity_m_s\n0,50.5\n10,60.25\n");
        let a = read_mission_csv(&semi, &Scenario::hybrid("20%")).unwrap();
        let b = read_mission_csv(&comma, &Scenario::hybrid("20%")).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.velocity_m_s, y.velocity_m_s);
            assert_eq!(x.time_s, y.time_s);
        }
        let _ = fs::remove_file(semi);
        let _ = fs::remove_file(comma);
    }

    #[test]
    fn empty_file_is_an_error() {
        let path = write_temp("empty", "\n");
        let err = read_mission_csv(&path, &Scenario::hybrid("15%")).unwrap_err();
        assert!(matches!(err, MissionError::Empty { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn conventional_remap_zeroes_electric_columns() {
        let path = write_temp(
            "conv",
            "time;velocity_m_s;propeller_thrust;etap;power;battery_draw;electric_throttle\n\
             0;50;2000;0,85;120000;5000;-1\n",
        );
        let samples = read_mission_csv(&path, &Scenario::conventional()).unwrap();
        let s = &samples[0];
        assert_eq!(s.thrust_propeller_n, 2000.0);
        assert_eq!(s.eta_propeller, 0.85);
        assert_eq!(s.battery_draw_w, 0.0);
        assert_eq!(s.electric_throttle_mtrb, 0.0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn conventional_efficiency_reconstructed_from_power() {
        let path = write_temp(
            "conv_eta",
            "time;velocity_m_s;propeller_thrust;etap;power\n0;50;2000;0;125000\n",
        );
        let samples = read_mission_csv(&path, &Scenario::conventional()).unwrap();
        // 2000 * 50 / 125000 = 0.8
        assert!((samples[0].eta_propeller - 0.8).abs() < 1e-12);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn conventional_efficiency_falls_back_when_unrecoverable() {
        let path = write_temp(
            "conv_fb",
            "time;velocity_m_s;propeller_thrust;etap;power\n0;0;0;0;0\n",
        );
        let samples = read_mission_csv(&path, &Scenario::conventional()).unwrap();
        assert_eq!(samples[0].eta_propeller, FALLBACK_PROPELLER_EFFICIENCY);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn deltas_forward_filled_with_sentinel() {
        let path = write_temp(
            "deltas",
            "time;battery_energy\n0;1000\n10;900\n10;900\n30;700\n",
        );
        let samples = read_mission_csv(&path, &Scenario::hybrid("30%")).unwrap();
        // first row: no previous sample, sentinel 1.0
        assert_eq!(samples[0].delta_time_s, 1.0);
        assert_eq!(samples[0].delta_battery_energy_j, 1.0);
        // second row: true deltas
        assert_eq!(samples[1].delta_time_s, 10.0);
        assert_eq!(samples[1].delta_battery_energy_j, -100.0);
        // third row: repeated timestamp forward-fills the previous deltas
        assert_eq!(samples[2].delta_time_s, 10.0);
        assert_eq!(samples[2].delta_battery_energy_j, -100.0);
        // fourth row: fresh deltas again
        assert_eq!(samples[3].delta_time_s, 20.0);
        assert_eq!(samples[3].delta_battery_energy_j, -200.0);
        let _ = fs::remove_file(path);
    }
}
