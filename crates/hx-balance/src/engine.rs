//! Thermal (turboshaft) engine exergy balance.

use crate::config::AnalysisConfig;
use crate::error::BalanceResult;
use hx_core::numeric::{clamp_nonneg, guarded_efficiency};
use hx_core::units::constants::CELSIUS_TO_KELVIN;
use hx_core::units::{k, kgps, mps, pa};
use hx_gas::state::isentropic_expansion_temperature;
use hx_gas::{DeadState, ExergyModel, GasState, IdealGasExergy};

/// Per-sample inputs to the engine balance.
#[derive(Debug, Clone, Copy)]
pub struct EngineInputs {
    pub mdot_fuel_kg_s: f64,
    pub mdot_air_kg_s: f64,
    pub mach: f64,
    pub velocity_m_s: f64,
    pub t_ambient_k: f64,
    pub p_ambient_pa: f64,
    /// Measured shaft power [kW]
    pub shaft_power_kw: f64,
    /// Compressor-exit stagnation temperature [°C] (bleed source)
    pub compressor_exit_t_c: f64,
    /// Compressor-exit stagnation pressure [Pa]
    pub compressor_exit_p_pa: f64,
}

/// Engine balance terms, all in kW unless noted.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineBalance {
    pub fuel_exergy_kw: f64,
    pub air_exergy_kw: f64,
    pub shaft_power_kw: f64,
    pub aux_kw: f64,
    /// Bleed static temperature after isentropic expansion [K]; zero when
    /// compressor-exit telemetry is invalid
    pub bleed_temperature_k: f64,
    pub bleed_exergy_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Balances fuel + inlet-air exergy against shaft power, auxiliary
/// extractions and bleed exergy.
///
/// The exhaust stream is not modeled separately; its exergy is folded into
/// the destruction term, matching the measured-balance formulation.
#[derive(Debug, Clone)]
pub struct ThermalEngine {
    fuel_exergy_kj_kg: f64,
    aux_kw: f64,
    bleed_mdot_kg_s: f64,
    bleed_pressure_pa: f64,
    gamma: f64,
    exergy: IdealGasExergy,
}

impl ThermalEngine {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            fuel_exergy_kj_kg: cfg.fuel_exergy_kj_kg,
            aux_kw: cfg.aux_total_kw(),
            bleed_mdot_kg_s: cfg.bleed_mdot_kg_s,
            bleed_pressure_pa: cfg.bleed_pressure_pa,
            gamma: cfg.gamma_air,
            exergy: IdealGasExergy {
                cp: cfg.cp_air_j_kg_k,
                r_gas: cfg.r_air_j_kg_k,
            },
        }
    }

    pub fn evaluate(&self, input: EngineInputs, dead: &DeadState) -> BalanceResult<EngineBalance> {
        let fuel_exergy_kw = input.mdot_fuel_kg_s * self.fuel_exergy_kj_kg;

        // Inlet-air exergy at the stagnation state seen by the engine.
        let air_exergy_kw = if input.mdot_air_kg_s > 0.0 {
            let inlet = GasState::stagnation_from_ambient(
                k(input.t_ambient_k),
                pa(input.p_ambient_pa),
                input.mach,
                self.gamma,
            )?;
            self.exergy
                .flow_exergy_kw(
                    kgps(input.mdot_air_kg_s),
                    inlet,
                    dead,
                    Some(mps(input.velocity_m_s)),
                )?
                .abs()
        } else {
            0.0
        };

        // Bleed stream: expand the compressor-exit stagnation state to the
        // bleed pressure. Invalid telemetry disables the term for the sample.
        let t3_k = input.compressor_exit_t_c + CELSIUS_TO_KELVIN;
        let (bleed_temperature_k, bleed_exergy_kw) =
            if input.compressor_exit_p_pa > 0.0 && t3_k > 0.0 {
                let stagnation = GasState::new(k(t3_k), pa(input.compressor_exit_p_pa))?;
                let t_bleed =
                    isentropic_expansion_temperature(stagnation, pa(self.bleed_pressure_pa), self.gamma)?;
                let bleed_state = GasState::new(t_bleed, pa(self.bleed_pressure_pa))?;
                let b_bleed = self.exergy.flow_exergy_kw(
                    kgps(self.bleed_mdot_kg_s),
                    bleed_state,
                    dead,
                    None,
                )?;
                (t_bleed.value, b_bleed)
            } else {
                (0.0, 0.0)
            };

        // Auxiliary extractions only exist while the engine runs.
        let aux_kw = if fuel_exergy_kw > 0.0 { self.aux_kw } else { 0.0 };

        let input_exergy = fuel_exergy_kw + air_exergy_kw;
        let useful = input.shaft_power_kw + aux_kw + bleed_exergy_kw;
        let destruction_kw = clamp_nonneg(input_exergy - useful);
        let efficiency = guarded_efficiency(useful, input_exergy);

        Ok(EngineBalance {
            fuel_exergy_kw,
            air_exergy_kw,
            shaft_power_kw: input.shaft_power_kw,
            aux_kw,
            bleed_temperature_k,
            bleed_exergy_kw,
            destruction_kw,
            efficiency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hx_core::numeric::{nearly_equal, Tolerances};

    fn engine() -> ThermalEngine {
        ThermalEngine::from_config(&AnalysisConfig::default())
    }

    fn dead() -> DeadState {
        DeadState::default()
    }

    fn cruise_inputs() -> EngineInputs {
        EngineInputs {
            mdot_fuel_kg_s: 0.05,
            mdot_air_kg_s: 2.551,
            mach: 0.3,
            velocity_m_s: 100.0,
            t_ambient_k: 268.0,
            p_ambient_pa: 70_000.0,
            shaft_power_kw: 1200.0,
            compressor_exit_t_c: 330.0,
            compressor_exit_p_pa: 600_000.0,
        }
    }

    #[test]
    fn fuel_exergy_reference_value() {
        let balance = engine().evaluate(cruise_inputs(), &dead()).unwrap();
        // 0.05 kg/s * 45673 kJ/kg = 2283.65 kW
        assert!((balance.fuel_exergy_kw - 2283.65).abs() < 1e-9);
    }

    #[test]
    fn zero_fuel_and_air_is_idle_not_error() {
        let mut input = cruise_inputs();
        input.mdot_fuel_kg_s = 0.0;
        input.mdot_air_kg_s = 0.0;
        input.shaft_power_kw = 0.0;
        input.compressor_exit_p_pa = 0.0;
        let balance = engine().evaluate(input, &dead()).unwrap();
        assert_eq!(balance.fuel_exergy_kw, 0.0);
        assert_eq!(balance.air_exergy_kw, 0.0);
        assert_eq!(balance.aux_kw, 0.0);
        assert_eq!(balance.destruction_kw, 0.0);
        assert_eq!(balance.efficiency, 0.0);
    }

    #[test]
    fn conservation_of_tracked_terms() {
        let balance = engine().evaluate(cruise_inputs(), &dead()).unwrap();
        let inputs = balance.fuel_exergy_kw + balance.air_exergy_kw;
        let outputs = balance.shaft_power_kw
            + balance.aux_kw
            + balance.bleed_exergy_kw
            + balance.destruction_kw;
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-6,
        };
        assert!(nearly_equal(inputs, outputs, tol));
    }

    #[test]
    fn destruction_nonneg_and_efficiency_in_unit_range() {
        let balance = engine().evaluate(cruise_inputs(), &dead()).unwrap();
        assert!(balance.destruction_kw >= 0.0);
        assert!((0.0..=1.0).contains(&balance.efficiency));
    }

    #[test]
    fn invalid_bleed_telemetry_disables_bleed_term() {
        let mut input = cruise_inputs();
        input.compressor_exit_p_pa = 0.0;
        let balance = engine().evaluate(input, &dead()).unwrap();
        assert_eq!(balance.bleed_exergy_kw, 0.0);
        assert_eq!(balance.bleed_temperature_k, 0.0);
    }

    #[test]
    fn bleed_temperature_below_compressor_exit() {
        let balance = engine().evaluate(cruise_inputs(), &dead()).unwrap();
        assert!(balance.bleed_temperature_k > 0.0);
        assert!(balance.bleed_temperature_k < 330.0 + 273.15);
    }
}
