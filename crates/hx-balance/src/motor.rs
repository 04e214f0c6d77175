//! Electric machine balances: MTRB (motor/generator) and WTP (motor-only).

use crate::config::AnalysisConfig;
use hx_core::numeric::{clamp_nonneg, zero_guarded_ratio};
use hx_core::units::k;
use hx_gas::{heat_exergy_kw, DeadState};

/// Engagement sentinel for the MTRB electric throttle.
pub const MTRB_ENGAGED_SENTINEL: f64 = -1.0;

/// Machine operating mode, selected once from the sign of the mechanical
/// power. Downstream electrical terms are total functions of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineMode {
    /// Positive mechanical power: electrical energy drives the shaft
    Motor,
    /// Negative mechanical power: the shaft drives electrical generation
    Generator,
}

impl MachineMode {
    pub fn from_mechanical_power(mech_kw: f64) -> Option<Self> {
        if mech_kw > 0.0 {
            Some(MachineMode::Motor)
        } else if mech_kw < 0.0 {
            Some(MachineMode::Generator)
        } else {
            None
        }
    }
}

/// MTRB balance terms [kW].
#[derive(Debug, Clone, Copy, Default)]
pub struct MtrbBalance {
    pub mode: Option<MachineMode>,
    pub mechanical_kw: f64,
    pub electrical_in_kw: f64,
    pub electrical_out_kw: f64,
    pub loss_kw: f64,
    pub heat_exergy_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Gearbox-coupled dual-mode electric machine.
#[derive(Debug, Clone, Copy)]
pub struct MtrbMachine {
    operating_temperature_k: f64,
    default_efficiency: f64,
}

impl MtrbMachine {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            operating_temperature_k: cfg.motor_temperature_k,
            default_efficiency: cfg.default_motor_efficiency,
        }
    }

    /// Engaged only when the electric throttle equals the sentinel and the
    /// mechanical power is non-zero; everything is zero otherwise.
    pub fn evaluate(
        &self,
        electric_throttle: f64,
        mechanical_kw: f64,
        motor_efficiency: f64,
        dead: &DeadState,
    ) -> MtrbBalance {
        if electric_throttle != MTRB_ENGAGED_SENTINEL || mechanical_kw == 0.0 {
            return MtrbBalance::default();
        }

        let eta = if motor_efficiency > 0.0 {
            motor_efficiency
        } else {
            self.default_efficiency
        };

        let mode = match MachineMode::from_mechanical_power(mechanical_kw) {
            Some(m) => m,
            None => return MtrbBalance::default(),
        };

        let (electrical_in_kw, electrical_out_kw, loss_kw, efficiency) = match mode {
            MachineMode::Motor => {
                let e_in = mechanical_kw / eta;
                let loss = clamp_nonneg(e_in - mechanical_kw);
                (e_in, 0.0, loss, zero_guarded_ratio(mechanical_kw, e_in))
            }
            MachineMode::Generator => {
                let mech = mechanical_kw.abs();
                let e_out = mech * eta;
                let loss = clamp_nonneg(mech - e_out);
                (0.0, e_out, loss, zero_guarded_ratio(e_out, mech))
            }
        };

        let heat_exergy = heat_exergy_kw(loss_kw, k(self.operating_temperature_k), dead);
        let destruction_kw = clamp_nonneg(loss_kw - heat_exergy);

        MtrbBalance {
            mode: Some(mode),
            mechanical_kw,
            electrical_in_kw,
            electrical_out_kw,
            loss_kw,
            heat_exergy_kw: heat_exergy,
            destruction_kw,
            efficiency,
        }
    }
}

/// WTP motor balance terms [kW].
#[derive(Debug, Clone, Copy, Default)]
pub struct WtpBalance {
    pub active: bool,
    /// Shaft power into the wingtip propeller [kW]
    pub mechanical_kw: f64,
    pub electrical_in_kw: f64,
    pub loss_kw: f64,
    pub heat_exergy_kw: f64,
    pub destruction_kw: f64,
    pub efficiency: f64,
}

/// Wingtip machine: motor-only, fed through its propeller efficiency.
#[derive(Debug, Clone, Copy)]
pub struct WtpMotor {
    operating_temperature_k: f64,
}

impl WtpMotor {
    pub fn from_config(cfg: &AnalysisConfig) -> Self {
        Self {
            operating_temperature_k: cfg.motor_temperature_k,
        }
    }

    /// Active when the WTP throttle is positive and propeller power flows.
    /// Mechanical power is the propeller shaft power divided by the
    /// propeller efficiency; electrical input divides again by the motor
    /// efficiency.
    pub fn evaluate(
        &self,
        electric_throttle: f64,
        propeller_power_kw: f64,
        propeller_efficiency: f64,
        motor_efficiency: f64,
        dead: &DeadState,
    ) -> WtpBalance {
        if electric_throttle <= 0.0 || propeller_power_kw <= 0.0 {
            return WtpBalance::default();
        }
        if propeller_efficiency <= 0.0 || motor_efficiency <= 0.0 {
            return WtpBalance::default();
        }

        let mechanical_kw = propeller_power_kw / propeller_efficiency;
        let electrical_in_kw = mechanical_kw / motor_efficiency;
        let loss_kw = clamp_nonneg(electrical_in_kw - mechanical_kw);
        let heat_exergy = heat_exergy_kw(loss_kw, k(self.operating_temperature_k), dead);
        let destruction_kw = clamp_nonneg(loss_kw - heat_exergy);

        WtpBalance {
            active: true,
            mechanical_kw,
            electrical_in_kw,
            loss_kw,
            heat_exergy_kw: heat_exergy,
            destruction_kw,
            efficiency: zero_guarded_ratio(mechanical_kw, electrical_in_kw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mtrb() -> MtrbMachine {
        MtrbMachine::from_config(&AnalysisConfig::default())
    }

    fn wtp() -> WtpMotor {
        WtpMotor::from_config(&AnalysisConfig::default())
    }

    fn dead() -> DeadState {
        DeadState::default()
    }

    #[test]
    fn disengaged_mtrb_is_all_zero() {
        let b = mtrb().evaluate(0.0, 200.0, 0.95, &dead());
        assert_eq!(b.mode, None);
        assert_eq!(b.electrical_in_kw, 0.0);
        assert_eq!(b.destruction_kw, 0.0);
    }

    #[test]
    fn positive_mechanical_power_selects_motor_mode() {
        let b = mtrb().evaluate(MTRB_ENGAGED_SENTINEL, 190.0, 0.95, &dead());
        assert_eq!(b.mode, Some(MachineMode::Motor));
        assert!((b.electrical_in_kw - 200.0).abs() < 1e-9);
        assert_eq!(b.electrical_out_kw, 0.0);
        assert!((b.loss_kw - 10.0).abs() < 1e-9);
        assert!((b.efficiency - 0.95).abs() < 1e-9);
    }

    #[test]
    fn negative_mechanical_power_selects_generator_mode() {
        let b = mtrb().evaluate(MTRB_ENGAGED_SENTINEL, -200.0, 0.95, &dead());
        assert_eq!(b.mode, Some(MachineMode::Generator));
        assert_eq!(b.electrical_in_kw, 0.0);
        assert!((b.electrical_out_kw - 190.0).abs() < 1e-9);
        assert!((b.loss_kw - 10.0).abs() < 1e-9);
        assert!((b.efficiency - 0.95).abs() < 1e-9);
    }

    #[test]
    fn mode_flips_with_sign_across_adjacent_samples() {
        let motoring = mtrb().evaluate(MTRB_ENGAGED_SENTINEL, 150.0, 0.9, &dead());
        let generating = mtrb().evaluate(MTRB_ENGAGED_SENTINEL, -150.0, 0.9, &dead());
        assert_eq!(motoring.mode, Some(MachineMode::Motor));
        assert_eq!(generating.mode, Some(MachineMode::Generator));
        assert!(motoring.electrical_in_kw > 0.0 && motoring.electrical_out_kw == 0.0);
        assert!(generating.electrical_out_kw > 0.0 && generating.electrical_in_kw == 0.0);
    }

    #[test]
    fn missing_efficiency_uses_default() {
        let b = mtrb().evaluate(MTRB_ENGAGED_SENTINEL, 90.0, 0.0, &dead());
        // default 0.9: electrical input = 100
        assert!((b.electrical_in_kw - 100.0).abs() < 1e-9);
    }

    #[test]
    fn destruction_below_loss_due_to_heat_exergy() {
        let b = mtrb().evaluate(MTRB_ENGAGED_SENTINEL, 190.0, 0.95, &dead());
        assert!(b.heat_exergy_kw > 0.0);
        assert!(b.destruction_kw < b.loss_kw);
        assert!(b.destruction_kw >= 0.0);
    }

    #[test]
    fn wtp_active_path() {
        // prop power 80 kW, eta_prop 0.8 -> mech 100; eta_motor 0.9 -> 111.1
        let b = wtp().evaluate(0.6, 80.0, 0.8, 0.9, &dead());
        assert!(b.active);
        assert!((b.mechanical_kw - 100.0).abs() < 1e-9);
        assert!((b.electrical_in_kw - 111.111_111).abs() < 1e-3);
        assert!((b.efficiency - 0.9).abs() < 1e-9);
    }

    #[test]
    fn wtp_inactive_without_throttle_or_power() {
        assert!(!wtp().evaluate(0.0, 80.0, 0.8, 0.9, &dead()).active);
        assert!(!wtp().evaluate(0.6, 0.0, 0.8, 0.9, &dead()).active);
        assert!(!wtp().evaluate(0.6, 80.0, 0.0, 0.9, &dead()).active);
    }
}
