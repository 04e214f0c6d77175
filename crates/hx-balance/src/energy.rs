//! First-law (energy-side) mission metrics.
//!
//! Runs alongside the exergy chain on the same telemetry: battery depletion
//! per step, total thrust, global propulsive efficiency, cumulative distance
//! and energy per distance flown.

use hx_core::numeric::{clamp_unit, zero_guarded_ratio};
use hx_mission::{MissionSample, Scenario};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnergyBalanceResult {
    pub time_s: f64,
    pub altitude_m: f64,
    /// Battery energy drawn down since the previous sample [J]
    pub energy_consumption_j: f64,
    /// Total propulsive power [W]
    pub power_w: f64,
    pub emotor_efficiency: f64,
    pub eta_propeller: f64,
    /// Main plus wingtip thrust [N]
    pub total_thrust_n: f64,
    pub global_efficiency: f64,
    /// Ground distance flown since the start of the mission [m]
    pub distance_m: f64,
    /// Battery energy per distance flown [J/m]; zero at zero distance
    pub specific_energy_j_m: f64,
    pub co2_emissions_total_kg: f64,
    pub battery_resistive_losses_w: f64,
}

/// Derives the energy-side series for one scenario.
///
/// The first sample carries zero deltas, so its consumption and distance
/// start at zero. For the Conventional baseline the electric terms are
/// already zeroed by the reader, so global efficiency degenerates to the
/// propeller efficiency.
pub fn energy_series(samples: &[MissionSample], scenario: &Scenario) -> Vec<EnergyBalanceResult> {
    let mut distance_m = 0.0;
    let mut previous_time = samples.first().map(|s| s.time_s).unwrap_or(0.0);
    let mut previous_energy = samples.first().map(|s| s.battery_energy_j).unwrap_or(0.0);
    let mut first = true;

    samples
        .iter()
        .map(|sample| {
            let (energy_consumption_j, dt) = if first {
                first = false;
                (0.0, 0.0)
            } else {
                (
                    previous_energy - sample.battery_energy_j,
                    sample.time_s - previous_time,
                )
            };
            previous_time = sample.time_s;
            previous_energy = sample.battery_energy_j;

            distance_m += sample.velocity_m_s * dt;

            let total_thrust_n = if scenario.is_conventional() {
                sample.thrust_propeller_n
            } else {
                sample.thrust_propeller_n + sample.thrust_wtp_n
            };

            let electric_engaged =
                !scenario.is_conventional() && sample.electric_throttle_mtrb != 0.0;
            let global_efficiency = clamp_unit(if electric_engaged {
                sample.emotor_efficiency_mtrb * sample.eta_propeller
            } else {
                sample.eta_propeller
            });

            EnergyBalanceResult {
                time_s: sample.time_s,
                altitude_m: sample.altitude_m,
                energy_consumption_j,
                power_w: sample.total_power_w,
                emotor_efficiency: sample.emotor_efficiency_mtrb,
                eta_propeller: sample.eta_propeller,
                total_thrust_n,
                global_efficiency,
                distance_m,
                specific_energy_j_m: zero_guarded_ratio(energy_consumption_j, distance_m),
                co2_emissions_total_kg: sample.co2_emissions_total_kg,
                battery_resistive_losses_w: sample.battery_resistive_losses_w,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_s: f64, energy_j: f64, velocity: f64) -> MissionSample {
        MissionSample {
            time_s,
            battery_energy_j: energy_j,
            velocity_m_s: velocity,
            thrust_propeller_n: 12_000.0,
            thrust_wtp_n: 1_500.0,
            eta_propeller: 0.8,
            emotor_efficiency_mtrb: 0.9,
            ..MissionSample::default()
        }
    }

    #[test]
    fn first_sample_has_zero_consumption_and_distance() {
        let rows = energy_series(&[sample(0.0, 5.0e8, 60.0)], &Scenario::hybrid("15%"));
        assert_eq!(rows[0].energy_consumption_j, 0.0);
        assert_eq!(rows[0].distance_m, 0.0);
        assert_eq!(rows[0].specific_energy_j_m, 0.0);
    }

    #[test]
    fn consumption_is_negative_energy_delta() {
        let rows = energy_series(
            &[sample(0.0, 5.0e8, 60.0), sample(10.0, 4.98e8, 60.0)],
            &Scenario::hybrid("15%"),
        );
        assert!((rows[1].energy_consumption_j - 2.0e6).abs() < 1.0);
        assert!((rows[1].distance_m - 600.0).abs() < 1e-9);
        assert!((rows[1].specific_energy_j_m - 2.0e6 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn total_thrust_includes_wingtip_for_hybrids_only() {
        let samples = [sample(0.0, 5.0e8, 60.0)];
        let hybrid = energy_series(&samples, &Scenario::hybrid("30%"));
        let conventional = energy_series(&samples, &Scenario::conventional());
        assert_eq!(hybrid[0].total_thrust_n, 13_500.0);
        assert_eq!(conventional[0].total_thrust_n, 12_000.0);
    }

    #[test]
    fn global_efficiency_folds_in_motor_when_engaged() {
        let mut engaged = sample(0.0, 5.0e8, 60.0);
        engaged.electric_throttle_mtrb = -1.0;
        let rows = energy_series(&[engaged.clone()], &Scenario::hybrid("20%"));
        assert!((rows[0].global_efficiency - 0.72).abs() < 1e-12);

        engaged.electric_throttle_mtrb = 0.0;
        let rows = energy_series(&[engaged], &Scenario::hybrid("20%"));
        assert!((rows[0].global_efficiency - 0.8).abs() < 1e-12);
    }

    #[test]
    fn charging_yields_negative_consumption() {
        let rows = energy_series(
            &[sample(0.0, 5.0e8, 60.0), sample(10.0, 5.01e8, 60.0)],
            &Scenario::hybrid("15%"),
        );
        assert!(rows[1].energy_consumption_j < 0.0);
    }
}
