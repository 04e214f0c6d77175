//! Per-sample exergy result row.
//!
//! One flat record per time sample, mirroring the component chain in order:
//! telemetry echo, combustion, engine, gearbox, thermal propeller, battery,
//! inverter, MTRB, WTP motor, wingtip propeller, then the whole-system
//! aggregate. Flat `f64` fields keep the CSV writer a plain field-per-column
//! mapping.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExergyBalanceResult {
    // telemetry echo
    pub segment: String,
    pub time_s: f64,
    pub altitude_m: f64,
    pub mach_number: f64,
    pub velocity_m_s: f64,
    pub pressure_pa: f64,
    pub temperature_k: f64,

    // combustion
    pub mdot_fuel_kg_s: f64,
    pub mdot_air_kg_s: f64,
    pub afr_stoich: f64,
    pub afr_real_adjusted: f64,
    pub excess_air: f64,
    pub phi: f64,

    // thermal engine
    pub fuel_exergy_kw: f64,
    pub air_exergy_kw: f64,
    pub engine_shaft_power_kw: f64,
    pub aux_hydraulic_kw: f64,
    pub aux_electric_kw: f64,
    pub aux_total_kw: f64,
    pub bleed_mdot_kg_s: f64,
    pub bleed_pressure_pa: f64,
    pub bleed_stagnation_t_k: f64,
    pub bleed_stagnation_p_pa: f64,
    pub bleed_temperature_k: f64,
    pub bleed_exergy_kw: f64,
    pub engine_destruction_kw: f64,

    // gearbox
    pub propulsion_mode: String,
    pub mtrb_mechanical_kw: f64,
    pub gearbox_input_kw: f64,
    pub gearbox_output_kw: f64,
    pub gearbox_destruction_kw: f64,

    // thermal-path propeller
    pub propeller_input_kw: f64,
    pub propeller_thrust_n: f64,
    pub propeller_thrust_exergy_kw: f64,
    pub propeller_destruction_kw: f64,

    // battery
    pub battery_chemical_kw: f64,
    pub battery_power_kw: f64,
    pub battery_heat_kw: f64,
    pub battery_heat_exergy_kw: f64,
    pub battery_destruction_kw: f64,

    // inverter
    pub inverter_mode: String,
    pub inverter_input_kw: f64,
    pub inverter_output_kw: f64,
    pub inverter_heat_kw: f64,
    pub inverter_heat_exergy_kw: f64,
    pub inverter_destruction_kw: f64,

    // MTRB electric machine
    pub mtrb_electrical_in_kw: f64,
    pub mtrb_electrical_out_kw: f64,
    pub mtrb_loss_kw: f64,
    pub mtrb_heat_exergy_kw: f64,
    pub mtrb_destruction_kw: f64,

    // WTP electric machine
    pub wtp_electrical_in_kw: f64,
    pub wtp_mechanical_kw: f64,
    pub wtp_loss_kw: f64,
    pub wtp_heat_exergy_kw: f64,
    pub wtp_destruction_kw: f64,

    // wingtip propeller
    pub wtp_thrust_exergy_kw: f64,
    pub wtp_propeller_destruction_kw: f64,

    // whole-system aggregate
    pub total_thrust_exergy_kw: f64,
    pub engine_efficiency: f64,
    pub gearbox_efficiency: f64,
    pub propeller_efficiency: f64,
    pub battery_efficiency: f64,
    pub inverter_efficiency: f64,
    pub mtrb_efficiency: f64,
    pub wtp_motor_efficiency: f64,
    pub wtp_propeller_efficiency: f64,
    pub total_efficiency: f64,
}
