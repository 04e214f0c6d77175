//! Mission telemetry record.

use serde::{Deserialize, Serialize};

/// One normalized telemetry record per mission time sample.
///
/// Raw SUAVE units are preserved: powers in W, thrusts in N, battery energy
/// in J, compressor-exit temperature in °C. The Conventional baseline is
/// remapped onto this schema by the reader (electric fields zeroed, legacy
/// single-path columns mapped), so the balance engine sees one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MissionSample {
    /// Mission segment label (may be empty)
    pub segment: String,
    pub time_s: f64,
    pub altitude_m: f64,
    pub mach: f64,
    pub velocity_m_s: f64,
    pub pressure_pa: f64,
    /// Ambient temperature [K] (column name is legacy `temperature_C` but
    /// values are already Kelvin in the decks)
    pub temperature_k: f64,

    // Thermal engine telemetry
    pub mdot_fuel_kg_s: f64,
    /// Fuel-air ratio, 0 when the engine is inactive
    pub far: f64,
    /// Compressor-exit stagnation temperature [°C]
    pub compressor_exit_t_c: f64,
    /// Compressor-exit stagnation pressure [Pa]
    pub compressor_exit_p_pa: f64,
    /// Turboshaft shaft power [W]
    pub shaft_power_w: f64,
    pub combustion_engine_throttle: f64,

    // Battery telemetry
    pub battery_energy_j: f64,
    pub battery_draw_w: f64,
    pub battery_current_a: f64,
    pub battery_voltage_v: f64,
    pub battery_voltage_oc_v: f64,
    pub battery_resistive_losses_w: f64,

    // Electric path telemetry
    /// MTRB engagement flag (-1 engaged, 0 inactive)
    pub electric_throttle_mtrb: f64,
    pub electric_throttle_wtp: f64,
    pub emotor_efficiency_mtrb: f64,
    pub emotor_efficiency_wtp: f64,
    /// MTRB mechanical power [W]; sign selects motor (+) vs generator (-)
    pub mtrb_mech_power_w: f64,
    /// WTP propeller shaft power [W]
    pub wtp_prop_power_w: f64,
    pub eta_propeller_wtp: f64,

    // Propulsive outputs
    pub thrust_propeller_n: f64,
    pub thrust_wtp_n: f64,
    pub eta_propeller: f64,
    /// Total propulsive power [W] (used for the energy-side metrics)
    pub total_power_w: f64,
    pub co2_emissions_total_kg: f64,

    // Adjacent-sample deltas, forward-filled by the reader
    pub delta_battery_energy_j: f64,
    pub delta_time_s: f64,
}
