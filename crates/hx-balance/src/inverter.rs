//! Inverter/rectifier balance with explicit operating modes.

use crate::config::AnalysisConfig;
use hx_core::numeric::{clamp_nonneg, clamp_unit, zero_guarded_ratio};
use hx_core::units::k;
use hx_gas::{heat_exergy_kw, DeadState};

/// Operating mode, inferred once per sample from the sign of the battery
/// power draw and the motor electrical demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverterMode {
    /// Battery discharging: DC -> AC, input is the battery power
    Discharging,
    /// Battery charging: AC -> DC, output is the power into the battery
    Charging,
    /// Zero net battery flow with active motor demand: power supplied
    /// directly from the generating path
    DirectSupply,
    /// No electrical flow at all
    Inactive,
}

impl InverterMode {
    pub fn classify(battery_draw_kw: f64, motor_demand_kw: f64) -> Self {
        if battery_draw_kw > 0.0 {
            InverterMode::Discharging
        } else if battery_draw_kw < 0.0 {
            InverterMode::Charging
        } else if motor_demand_kw > 0.0 {
            InverterMode::DirectSupply
        } else {
            InverterMode::Inactive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InverterMode::Discharging => "discharging",
            InverterMode::Charging => "charging",
            InverterMode::DirectSupply => "direct-supply",
            InverterMode::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InverterBalance {
    pub mode: InverterMode,
    pub input_kw: f64,
    pub output_kw: f64,
    pub heat_kw: f64,
    pub heat_exergy_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

impl Default for InverterBalance {
    fn default() -> Self {
        Self {
            mode: InverterMode::Inactive,
            input_kw: 0.0,
            output_kw: 0.0,
            heat_kw: 0.0,
            heat_exergy_kw: 0.0,
            destruction_kw: 0.0,
            efficiency: 0.0,
        }
    }
}

/// Bidirectional DC/AC power router between battery and motors.
#[derive(Debug, Clone, Copy)]
pub struct Inverter {
    assumed_efficiency: f64,
    operating_temperature_k: f64,
}

impl Inverter {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            assumed_efficiency: cfg.inverter_efficiency,
            operating_temperature_k: cfg.inverter_temperature_k,
        }
    }

    /// `battery_draw_kw` keeps its measured sign (positive = discharge);
    /// `motor_demand_kw` is the summed electrical input demanded by the
    /// active motors.
    pub fn evaluate(
        &self,
        battery_draw_kw: f64,
        motor_demand_kw: f64,
        dead: &DeadState,
    ) -> InverterBalance {
        let mode = InverterMode::classify(battery_draw_kw, motor_demand_kw);

        let (input_kw, output_kw) = match mode {
            InverterMode::Discharging => (battery_draw_kw, motor_demand_kw),
            InverterMode::Charging => {
                let output = battery_draw_kw.abs();
                (output / self.assumed_efficiency, output)
            }
            InverterMode::DirectSupply => {
                (motor_demand_kw / self.assumed_efficiency, motor_demand_kw)
            }
            InverterMode::Inactive => (0.0, 0.0),
        };

        if input_kw <= 0.0 {
            return InverterBalance {
                mode,
                ..InverterBalance::default()
            };
        }

        let heat_kw = input_kw - output_kw;
        let t_op = k(self.operating_temperature_k);

        if heat_kw >= 0.0 {
            let heat_exergy = heat_exergy_kw(heat_kw, t_op, dead);
            InverterBalance {
                mode,
                input_kw,
                output_kw,
                heat_kw,
                heat_exergy_kw: heat_exergy,
                destruction_kw: clamp_nonneg(heat_kw - heat_exergy),
                efficiency: clamp_unit(zero_guarded_ratio(output_kw, input_kw)),
            }
        } else {
            // Telemetry inconsistency: output exceeds input. Fall back to the
            // assumed efficiency instead of propagating a negative loss.
            let heat_magnitude = heat_kw.abs();
            let heat_exergy = heat_exergy_kw(heat_magnitude, t_op, dead);
            InverterBalance {
                mode,
                input_kw,
                output_kw,
                heat_kw,
                heat_exergy_kw: heat_exergy,
                destruction_kw: clamp_nonneg(heat_magnitude - heat_exergy),
                efficiency: self.assumed_efficiency,
            }
        }
    }
}
