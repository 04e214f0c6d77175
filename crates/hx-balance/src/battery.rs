//! Battery exergy balance (hybrid scenarios only).

use crate::config::AnalysisConfig;
use hx_core::numeric::{clamp_nonneg, guarded_efficiency};
use hx_core::units::k;
use hx_gas::{heat_exergy_kw, DeadState};

#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryBalance {
    /// Chemical exergy depletion rate [kW]; negative while charging
    pub chemical_kw: f64,
    /// Delivered electrical power [kW]
    pub power_kw: f64,
    /// Resistive heat flow [kW]
    pub heat_kw: f64,
    /// Exergy of the rejected heat [kW]
    pub heat_exergy_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Converts stored-energy depletion into delivered power, resistive-loss
/// exergy and destruction, at an assumed fixed cell temperature.
#[derive(Debug, Clone, Copy)]
pub struct Battery {
    operating_temperature_k: f64,
}

impl Battery {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            operating_temperature_k: cfg.battery_temperature_k,
        }
    }

    /// `delta_time_s` is forward-filled upstream; a non-positive interval
    /// still short-circuits the depletion rate to zero here.
    pub fn evaluate(
        &self,
        delta_energy_j: f64,
        delta_time_s: f64,
        battery_draw_w: f64,
        resistive_losses_w: f64,
        dead: &DeadState,
    ) -> BatteryBalance {
        let chemical_kw = if delta_time_s > 0.0 {
            -delta_energy_j / (delta_time_s * 1000.0)
        } else {
            0.0
        };

        let power_kw = battery_draw_w.abs() / 1000.0;
        let heat_kw = resistive_losses_w / 1000.0;
        let heat_exergy = heat_exergy_kw(heat_kw, k(self.operating_temperature_k), dead);

        let destruction_kw = clamp_nonneg(chemical_kw - power_kw - heat_exergy);
        let efficiency = guarded_efficiency(power_kw, chemical_kw);

        BatteryBalance {
            chemical_kw,
            power_kw,
            heat_kw,
            heat_exergy_kw: heat_exergy,
            destruction_kw,
            efficiency,
        }
    }
}
