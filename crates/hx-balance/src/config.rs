//! Analysis configuration: the process-wide read-only constants.
//!
//! Modeled as an immutable structure passed explicitly into each component
//! rather than ambient global state. Serde-deserializable so a YAML override
//! file can adjust individual constants; anything omitted keeps its default.

use crate::error::BalanceResult;
use hx_core::numeric::ensure_finite;
use hx_core::units::{k, Temperature};
use hx_core::HxError;
use hx_gas::DeadState;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dead-state reference temperature [K]
    pub dead_state_t0_k: f64,
    /// Dead-state reference pressure [Pa]
    pub dead_state_p0_pa: f64,

    /// Specific chemical exergy of Jet-A fuel [kJ/kg]
    pub fuel_exergy_kj_kg: f64,
    /// Combustion efficiency applied to the real air-fuel ratio
    pub combustion_efficiency: f64,

    /// Air properties for the closed-form exergy strategy
    pub gamma_air: f64,
    pub cp_air_j_kg_k: f64,
    pub r_air_j_kg_k: f64,

    /// Auxiliary power extractions from the engine [kW] (engine-deck values)
    pub aux_hydraulic_kw: f64,
    pub aux_electric_kw: f64,

    /// Bleed-air extraction (engine-deck values)
    pub bleed_mdot_kg_s: f64,
    pub bleed_pressure_pa: f64,

    /// Fixed mechanical efficiency of the gearbox
    pub gearbox_efficiency: f64,
    /// Assumed inverter/rectifier efficiency
    pub inverter_efficiency: f64,
    /// MTRB motor efficiency when telemetry carries none
    pub default_motor_efficiency: f64,

    /// Assumed operating temperatures for heat-exergy evaluation [K]
    pub battery_temperature_k: f64,
    pub inverter_temperature_k: f64,
    /// Electric machines, midpoint of an assumed 100-150 C range
    pub motor_temperature_k: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dead_state_t0_k: 298.15,
            dead_state_p0_pa: 101_325.0,
            fuel_exergy_kj_kg: 45_673.0,
            combustion_efficiency: 0.98,
            gamma_air: 1.4,
            cp_air_j_kg_k: 1005.0,
            r_air_j_kg_k: 287.0,
            aux_hydraulic_kw: 14.914,
            aux_electric_kw: 14.914,
            bleed_mdot_kg_s: 0.103_948_25,
            bleed_pressure_pa: 172_369.7,
            gearbox_efficiency: 0.98,
            inverter_efficiency: 0.95,
            default_motor_efficiency: 0.9,
            battery_temperature_k: 313.15,
            inverter_temperature_k: 343.15,
            motor_temperature_k: (100.0 + 150.0) / 2.0 + 273.15,
        }
    }
}

impl AnalysisConfig {
    /// Check an override before building the analysis from it.
    ///
    /// The constants arrive from YAML, so a typo can smuggle in a NaN, a
    /// non-positive reference state or an efficiency outside (0, 1].
    pub fn validate(&self) -> BalanceResult<()> {
        for (value, what) in [
            (self.dead_state_t0_k, "dead-state temperature"),
            (self.dead_state_p0_pa, "dead-state pressure"),
            (self.fuel_exergy_kj_kg, "fuel exergy"),
            (self.gamma_air, "gamma"),
            (self.cp_air_j_kg_k, "air cp"),
            (self.r_air_j_kg_k, "air gas constant"),
            (self.aux_hydraulic_kw, "auxiliary hydraulic power"),
            (self.aux_electric_kw, "auxiliary electric power"),
            (self.bleed_mdot_kg_s, "bleed mass flow"),
            (self.bleed_pressure_pa, "bleed pressure"),
            (self.battery_temperature_k, "battery temperature"),
            (self.inverter_temperature_k, "inverter temperature"),
            (self.motor_temperature_k, "motor temperature"),
        ] {
            ensure_finite(value, what)?;
        }

        for (value, what) in [
            (self.combustion_efficiency, "combustion efficiency outside (0, 1]"),
            (self.gearbox_efficiency, "gearbox efficiency outside (0, 1]"),
            (self.inverter_efficiency, "inverter efficiency outside (0, 1]"),
            (
                self.default_motor_efficiency,
                "default motor efficiency outside (0, 1]",
            ),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(HxError::InvalidArg { what }.into());
            }
        }
        if self.dead_state_t0_k <= 0.0 || self.dead_state_p0_pa <= 0.0 {
            return Err(HxError::InvalidArg {
                what: "dead state must be positive",
            }
            .into());
        }
        Ok(())
    }

    pub fn dead_state(&self) -> DeadState {
        DeadState {
            t0: k(self.dead_state_t0_k),
            p0: hx_core::units::pa(self.dead_state_p0_pa),
        }
    }

    pub fn aux_total_kw(&self) -> f64 {
        self.aux_hydraulic_kw + self.aux_electric_kw
    }

    pub fn battery_temperature(&self) -> Temperature {
        k(self.battery_temperature_k)
    }

    pub fn inverter_temperature(&self) -> Temperature {
        k(self.inverter_temperature_k)
    }

    pub fn motor_temperature(&self) -> Temperature {
        k(self.motor_temperature_k)
    }
}
