//! Whole-system exergy analysis: wires the component chain per sample.

use crate::battery::Battery;
use crate::config::AnalysisConfig;
use crate::engine::{EngineInputs, ThermalEngine};
use crate::error::BalanceResult;
use crate::gearbox::{Gearbox, PropulsionMode};
use crate::inverter::{Inverter, InverterBalance};
use crate::motor::{MtrbMachine, WtpMotor, MTRB_ENGAGED_SENTINEL};
use crate::propeller::ThermalPropeller;
use crate::result::ExergyBalanceResult;
use crate::wingtip::WingtipPropeller;
use hx_core::numeric::{ensure_finite, guarded_efficiency};
use hx_core::units::constants::CELSIUS_TO_KELVIN;
use hx_gas::combustion::air_fuel_flow;
use hx_gas::DeadState;
use hx_mission::{MissionSample, Scenario};

/// The full per-sample balance pipeline for one configuration.
///
/// Components evaluate in dependency order: combustion stoichiometry, thermal
/// engine, MTRB machine, gearbox, thermal propeller, then (hybrids only)
/// battery, WTP motor, inverter and wingtip propeller, finishing with the
/// whole-system aggregate. The analysis itself is read-only state, so one
/// instance can serve scenario batches in parallel.
pub struct ExergyAnalysis {
    config: AnalysisConfig,
    dead: DeadState,
    engine: ThermalEngine,
    gearbox: Gearbox,
    propeller: ThermalPropeller,
    battery: Battery,
    inverter: Inverter,
    mtrb: MtrbMachine,
    wtp_motor: WtpMotor,
    wtp_propeller: WingtipPropeller,
}

impl ExergyAnalysis {
    pub fn new(config: AnalysisConfig) -> Self {
        let dead = config.dead_state();
        Self {
            engine: ThermalEngine::from_config(&config),
            gearbox: Gearbox::from_config(&config),
            propeller: ThermalPropeller,
            battery: Battery::from_config(&config),
            inverter: Inverter::from_config(&config),
            mtrb: MtrbMachine::from_config(&config),
            wtp_motor: WtpMotor::from_config(&config),
            wtp_propeller: WingtipPropeller,
            dead,
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Evaluate the whole mission for one scenario, one result row per
    /// sample.
    pub fn run(
        &self,
        scenario: &Scenario,
        samples: &[MissionSample],
    ) -> BalanceResult<Vec<ExergyBalanceResult>> {
        samples
            .iter()
            .map(|sample| self.evaluate_sample(scenario, sample))
            .collect()
    }

    fn evaluate_sample(
        &self,
        scenario: &Scenario,
        sample: &MissionSample,
    ) -> BalanceResult<ExergyBalanceResult> {
        validate_telemetry(sample)?;
        let conventional = scenario.is_conventional();

        let flow = air_fuel_flow(
            sample.mdot_fuel_kg_s,
            sample.far,
            self.config.combustion_efficiency,
        );

        let engine = self.engine.evaluate(
            EngineInputs {
                mdot_fuel_kg_s: sample.mdot_fuel_kg_s,
                mdot_air_kg_s: flow.mdot_air_kg_s,
                mach: sample.mach,
                velocity_m_s: sample.velocity_m_s,
                t_ambient_k: sample.temperature_k,
                p_ambient_pa: sample.pressure_pa,
                shaft_power_kw: sample.shaft_power_w / 1000.0,
                compressor_exit_t_c: sample.compressor_exit_t_c,
                compressor_exit_p_pa: sample.compressor_exit_p_pa,
            },
            &self.dead,
        )?;

        // MTRB mechanical power flows into the gearbox signed; the machine
        // balance itself only exists for hybrids.
        let mtrb_engaged = !conventional && sample.electric_throttle_mtrb == MTRB_ENGAGED_SENTINEL;
        let mtrb_mech_kw = if mtrb_engaged {
            sample.mtrb_mech_power_w / 1000.0
        } else {
            0.0
        };
        let mtrb = if conventional {
            Default::default()
        } else {
            self.mtrb.evaluate(
                sample.electric_throttle_mtrb,
                mtrb_mech_kw,
                sample.emotor_efficiency_mtrb,
                &self.dead,
            )
        };

        let mode = PropulsionMode::classify(sample.combustion_engine_throttle, mtrb_engaged);
        let gearbox = self
            .gearbox
            .evaluate(mode, engine.shaft_power_kw, mtrb_mech_kw);

        let propeller = self.propeller.evaluate(
            gearbox.output_kw,
            sample.thrust_propeller_n,
            sample.velocity_m_s,
        );

        // Electric chain (hybrids only; the reader zeroes the telemetry for
        // the Conventional baseline, but the components are skipped outright
        // so their rows carry structural zeros).
        let battery = if conventional {
            Default::default()
        } else {
            self.battery.evaluate(
                sample.delta_battery_energy_j,
                sample.delta_time_s,
                sample.battery_draw_w,
                sample.battery_resistive_losses_w,
                &self.dead,
            )
        };

        let wtp = if conventional {
            Default::default()
        } else {
            self.wtp_motor.evaluate(
                sample.electric_throttle_wtp,
                sample.wtp_prop_power_w / 1000.0,
                sample.eta_propeller_wtp,
                sample.emotor_efficiency_wtp,
                &self.dead,
            )
        };

        let inverter = if conventional {
            InverterBalance::default()
        } else {
            let motor_demand_kw = mtrb.electrical_in_kw + wtp.electrical_in_kw;
            self.inverter
                .evaluate(sample.battery_draw_w / 1000.0, motor_demand_kw, &self.dead)
        };

        // Wingtip thrust exergy is telemetry-derived, reported even when the
        // motor balance is inactive for the sample.
        let wtp_thrust_exergy_kw = sample.thrust_wtp_n * sample.velocity_m_s / 1000.0;
        let wingtip = self.wtp_propeller.evaluate(
            wtp.mechanical_kw,
            sample.thrust_wtp_n,
            sample.velocity_m_s,
        );

        let total_thrust_exergy_kw = if conventional {
            propeller.thrust_exergy_kw
        } else {
            propeller.thrust_exergy_kw + wtp_thrust_exergy_kw
        };

        // Whole-system efficiency: useful exergy (thrust plus the auxiliary
        // and bleed extractions) over fuel, air and, for hybrids, battery
        // chemical input.
        let mut total_input_kw = engine.fuel_exergy_kw + engine.air_exergy_kw;
        if !conventional {
            total_input_kw += battery.chemical_kw;
        }
        let total_efficiency = guarded_efficiency(
            total_thrust_exergy_kw + engine.aux_kw + engine.bleed_exergy_kw,
            total_input_kw,
        );

        let engine_active = engine.aux_kw > 0.0;

        Ok(ExergyBalanceResult {
            segment: sample.segment.clone(),
            time_s: sample.time_s,
            altitude_m: sample.altitude_m,
            mach_number: sample.mach,
            velocity_m_s: sample.velocity_m_s,
            pressure_pa: sample.pressure_pa,
            temperature_k: sample.temperature_k,

            mdot_fuel_kg_s: sample.mdot_fuel_kg_s,
            mdot_air_kg_s: flow.mdot_air_kg_s,
            afr_stoich: flow.afr_stoich,
            afr_real_adjusted: flow.afr_real_adjusted,
            excess_air: flow.excess_air,
            phi: flow.phi,

            fuel_exergy_kw: engine.fuel_exergy_kw,
            air_exergy_kw: engine.air_exergy_kw,
            engine_shaft_power_kw: engine.shaft_power_kw,
            aux_hydraulic_kw: if engine_active {
                self.config.aux_hydraulic_kw
            } else {
                0.0
            },
            aux_electric_kw: if engine_active {
                self.config.aux_electric_kw
            } else {
                0.0
            },
            aux_total_kw: engine.aux_kw,
            bleed_mdot_kg_s: self.config.bleed_mdot_kg_s,
            bleed_pressure_pa: self.config.bleed_pressure_pa,
            bleed_stagnation_t_k: sample.compressor_exit_t_c + CELSIUS_TO_KELVIN,
            bleed_stagnation_p_pa: sample.compressor_exit_p_pa,
            bleed_temperature_k: engine.bleed_temperature_k,
            bleed_exergy_kw: engine.bleed_exergy_kw,
            engine_destruction_kw: engine.destruction_kw,

            propulsion_mode: mode.label().to_string(),
            mtrb_mechanical_kw: mtrb_mech_kw,
            gearbox_input_kw: gearbox.input_kw,
            gearbox_output_kw: gearbox.output_kw,
            gearbox_destruction_kw: gearbox.destruction_kw,

            propeller_input_kw: propeller.input_kw,
            propeller_thrust_n: sample.thrust_propeller_n,
            propeller_thrust_exergy_kw: propeller.thrust_exergy_kw,
            propeller_destruction_kw: propeller.destruction_kw,

            battery_chemical_kw: battery.chemical_kw,
            battery_power_kw: battery.power_kw,
            battery_heat_kw: battery.heat_kw,
            battery_heat_exergy_kw: battery.heat_exergy_kw,
            battery_destruction_kw: battery.destruction_kw,

            inverter_mode: inverter.mode.label().to_string(),
            inverter_input_kw: inverter.input_kw,
            inverter_output_kw: inverter.output_kw,
            inverter_heat_kw: inverter.heat_kw,
            inverter_heat_exergy_kw: inverter.heat_exergy_kw,
            inverter_destruction_kw: inverter.destruction_kw,

            mtrb_electrical_in_kw: mtrb.electrical_in_kw,
            mtrb_electrical_out_kw: mtrb.electrical_out_kw,
            mtrb_loss_kw: mtrb.loss_kw,
            mtrb_heat_exergy_kw: mtrb.heat_exergy_kw,
            mtrb_destruction_kw: mtrb.destruction_kw,

            wtp_electrical_in_kw: wtp.electrical_in_kw,
            wtp_mechanical_kw: wtp.mechanical_kw,
            wtp_loss_kw: wtp.loss_kw,
            wtp_heat_exergy_kw: wtp.heat_exergy_kw,
            wtp_destruction_kw: wtp.destruction_kw,

            wtp_thrust_exergy_kw,
            wtp_propeller_destruction_kw: wingtip.destruction_kw,

            total_thrust_exergy_kw,
            engine_efficiency: engine.efficiency,
            gearbox_efficiency: gearbox.efficiency,
            propeller_efficiency: propeller.efficiency,
            battery_efficiency: battery.efficiency,
            inverter_efficiency: inverter.efficiency,
            mtrb_efficiency: mtrb.efficiency,
            wtp_motor_efficiency: wtp.efficiency,
            wtp_propeller_efficiency: wingtip.efficiency,
            total_efficiency,
        })
    }
}

/// Reject non-finite driving telemetry before it poisons the whole row.
///
/// The CSV reader already defaults unparseable tokens to zero; this guards
/// samples constructed programmatically.
fn validate_telemetry(sample: &MissionSample) -> BalanceResult<()> {
    for (value, what) in [
        (sample.time_s, "time"),
        (sample.mach, "mach number"),
        (sample.velocity_m_s, "velocity"),
        (sample.pressure_pa, "ambient pressure"),
        (sample.temperature_k, "ambient temperature"),
        (sample.mdot_fuel_kg_s, "fuel mass flow"),
        (sample.far, "fuel-air ratio"),
        (sample.shaft_power_w, "shaft power"),
        (sample.battery_draw_w, "battery draw"),
        (sample.delta_battery_energy_j, "battery energy delta"),
        (sample.delta_time_s, "time delta"),
        (sample.mtrb_mech_power_w, "MTRB mechanical power"),
        (sample.wtp_prop_power_w, "WTP propeller power"),
    ] {
        ensure_finite(value, what)?;
    }
    Ok(())
}
